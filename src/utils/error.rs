use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Listing request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Unexpected listing response at offset {offset}: {message}")]
    ResponseShapeError { offset: usize, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Export failed for '{name}': {message}")]
    SinkError { name: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    ResponseShape,
    Export,
}

impl ExportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExportError::TransportError(_) => ErrorCategory::Transport,
            ExportError::ResponseShapeError { .. } => ErrorCategory::ResponseShape,
            ExportError::ConfigError { .. }
            | ExportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ExportError::IoError(_)
            | ExportError::SerializationError(_)
            | ExportError::SinkError { .. } => ErrorCategory::Export,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command line flags or the TOML file passed with --config"
            }
            ErrorCategory::Transport => {
                "Check network access and that the session cookie is still valid, then rerun"
            }
            ErrorCategory::ResponseShape => {
                "The endpoint did not return a `domains` listing; verify --endpoint and --offset-placement"
            }
            ErrorCategory::Export => "Check that the output directory exists and is writable",
        }
    }

    /// Process exit code for the binary.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Transport => 2,
            ErrorCategory::ResponseShape => 3,
            ErrorCategory::Export => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

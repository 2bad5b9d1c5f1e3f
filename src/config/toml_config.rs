use crate::config::{validate_provider, DEFAULT_ENDPOINT, DEFAULT_FILE_NAME, DEFAULT_REFERER};
use crate::core::pagination::{DEFAULT_DELAY, DEFAULT_PAGE_SIZE};
use crate::core::{ConfigProvider, OffsetPlacement, Session};
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// File based configuration, e.g.
///
/// ```toml
/// [source]
/// endpoint = "https://www.namebase.io/api/user/domains/listed"
/// offset_placement = "path"
///
/// [session]
/// cookie = "${NAMEBASE_COOKIE}"
///
/// [output]
/// dir = "./exports"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub source: SourceConfig,
    pub session: SessionConfig,
    pub pagination: PaginationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub offset_placement: OffsetPlacement,
    pub referer: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            offset_placement: OffsetPlacement::default(),
            referer: Some(DEFAULT_REFERER.to_string()),
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie: Option<String>,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("cookie", &self.cookie.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: usize,
    pub delay_ms: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            delay_ms: DEFAULT_DELAY.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern"))
}

impl ExportConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ExportError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ExportError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Uses `cookie` when the file has no `[session] cookie` of its own.
    pub fn with_fallback_cookie(mut self, cookie: Option<String>) -> Self {
        if self.session.cookie.is_none() {
            self.session.cookie = cookie;
        }
        self
    }

    /// Replaces `${VAR}` with the environment value. Unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for ExportConfig {
    fn endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn offset_placement(&self) -> OffsetPlacement {
        self.source.offset_placement
    }

    fn page_size(&self) -> usize {
        self.pagination.page_size
    }

    fn delay(&self) -> Duration {
        Duration::from_millis(self.pagination.delay_ms)
    }

    fn output_dir(&self) -> &str {
        &self.output.dir
    }

    fn file_name(&self) -> &str {
        &self.output.file_name
    }

    fn session(&self) -> Session {
        let referer = self.source.referer.clone().filter(|r| !r.is_empty());
        Session::new(self.session.cookie.clone(), referer)
    }
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        if let Some(cookie) = &self.session.cookie {
            if let Some(caps) = env_var_pattern().captures(cookie) {
                return Err(ExportError::InvalidConfigValueError {
                    field: "session.cookie".to_string(),
                    value: "<redacted>".to_string(),
                    reason: format!("Environment variable {} is not set", &caps[1]),
                });
            }
        }
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ExportConfig::from_toml_str("").unwrap();

        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.page_size(), 100);
        assert_eq!(config.delay(), Duration::from_millis(1250));
        assert_eq!(config.file_name(), "listed.json");
        assert!(config.session().cookie.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
endpoint = "https://api.example.com/listed"
offset_placement = "path"
referer = "https://example.com/manage"

[session]
cookie = "sid=abc"

[pagination]
page_size = 50
delay_ms = 500

[output]
dir = "./exports"
file_name = "snapshot.json"
"#;

        let config = ExportConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.offset_placement(), OffsetPlacement::Path);
        assert_eq!(config.page_size(), 50);
        assert_eq!(config.delay(), Duration::from_millis(500));
        assert_eq!(config.output_dir(), "./exports");
        assert_eq!(config.file_name(), "snapshot.json");
        let session = config.session();
        assert_eq!(session.cookie.as_deref(), Some("sid=abc"));
        assert_eq!(session.referer.as_deref(), Some("https://example.com/manage"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LISTED_EXPORT_TEST_COOKIE", "sid=from-env");

        let toml_content = r#"
[session]
cookie = "${LISTED_EXPORT_TEST_COOKIE}"
"#;

        let config = ExportConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.session.cookie.as_deref(), Some("sid=from-env"));
        assert!(config.validate().is_ok());

        std::env::remove_var("LISTED_EXPORT_TEST_COOKIE");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[session]
cookie = "${LISTED_EXPORT_SURELY_UNSET_VAR}"
"#;

        let config = ExportConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("LISTED_EXPORT_SURELY_UNSET_VAR"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_url = ExportConfig::from_toml_str("[source]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_name =
            ExportConfig::from_toml_str("[output]\nfile_name = \"../listed.json\"\n").unwrap();
        assert!(bad_name.validate().is_err());

        assert!(ExportConfig::from_toml_str("[source]\noffset_placement = \"header\"\n").is_err());
    }

    #[test]
    fn test_fallback_cookie_only_fills_missing_session() {
        let without_session = ExportConfig::from_toml_str("[pagination]\npage_size = 10\n")
            .unwrap()
            .with_fallback_cookie(Some("sid=from-cli".to_string()));
        assert_eq!(without_session.session().cookie.as_deref(), Some("sid=from-cli"));

        let with_session = ExportConfig::from_toml_str("[session]\ncookie = \"sid=from-file\"\n")
            .unwrap()
            .with_fallback_cookie(Some("sid=from-cli".to_string()));
        assert_eq!(with_session.session().cookie.as_deref(), Some("sid=from-file"));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[pagination]\npage_size = 10\n")
            .unwrap();

        let config = ExportConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.page_size(), 10);

        assert!(ExportConfig::from_file("/nonexistent/listed-export.toml").is_err());
    }
}

pub mod storage;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation;

#[cfg(feature = "cli")]
use crate::core::pagination::{DEFAULT_DELAY, DEFAULT_PAGE_SIZE};
#[cfg(feature = "cli")]
use crate::core::{OffsetPlacement, Session};
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://www.namebase.io/api/user/domains/listed";
pub const DEFAULT_REFERER: &str = "https://www.namebase.io/manage/owned?page=1";
pub const DEFAULT_FILE_NAME: &str = "listed.json";
pub const COOKIE_ENV: &str = "LISTED_EXPORT_COOKIE";

/// Checks shared by every configuration source.
pub(crate) fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_url("endpoint", config.endpoint())?;
    validation::validate_positive_number("page_size", config.page_size(), 1)?;
    validation::validate_path("output_dir", config.output_dir())?;
    validation::validate_file_name("file_name", config.file_name())?;

    let session = config.session();
    if let Some(referer) = &session.referer {
        validation::validate_url("referer", referer)?;
    }
    if let Some(cookie) = &session.cookie {
        validation::validate_non_empty_string("cookie", cookie)?;
    }
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "listed-export")]
#[command(about = "Export every listed domain to a single JSON file")]
pub struct CliConfig {
    /// Listing endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Where the offset goes in the request URL
    #[arg(long, value_enum, default_value_t = OffsetPlacement::Query)]
    pub offset_placement: OffsetPlacement,

    /// Referer sent with every request
    #[arg(long, default_value = DEFAULT_REFERER)]
    pub referer: String,

    /// Session cookie header value
    #[arg(long, env = COOKIE_ENV, hide_env_values = true)]
    pub cookie: Option<String>,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Pause between pages in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY.as_millis() as u64)]
    pub delay_ms: u64,

    #[arg(long, default_value = ".")]
    pub output_dir: String,

    #[arg(long, default_value = DEFAULT_FILE_NAME)]
    pub file_name: String,

    /// Load settings from a TOML file instead of the flags above.
    /// --cookie / LISTED_EXPORT_COOKIE still apply when the file sets no cookie
    #[arg(short, long)]
    pub config: Option<String>,

    /// Validate configuration and show the first request without fetching
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn offset_placement(&self) -> OffsetPlacement {
        self.offset_placement
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn session(&self) -> Session {
        let referer = Some(self.referer.clone()).filter(|r| !r.is_empty());
        Session::new(self.cookie.clone(), referer)
    }
}

#[cfg(feature = "cli")]
impl validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{storage::FileSink, toml_config::ExportConfig};
pub use core::{
    etl::{ExportEngine, ExportReport},
    listing::HttpListingSource,
    pipeline::ListingPipeline,
};
pub use utils::error::{ExportError, Result};

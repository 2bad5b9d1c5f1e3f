pub mod artifact;
pub mod etl;
pub mod listing;
pub mod pagination;
pub mod pipeline;

pub use crate::domain::model::{Accumulator, ExportArtifact, OffsetPlacement, Record, Session};
pub use crate::domain::ports::{ArtifactSink, ConfigProvider, ListingSource, Pacer, Pipeline};
pub use crate::utils::error::Result;

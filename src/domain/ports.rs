use crate::domain::model::{Accumulator, ExportArtifact, OffsetPlacement, Record, Session};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// One page of the listing, starting at `offset`.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<Record>>;
}

/// Suspends the loop between pages.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

/// Receives the finished artifact. Returns a human readable location.
pub trait ArtifactSink: Send + Sync {
    fn write(
        &self,
        name: &str,
        content: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn offset_placement(&self) -> OffsetPlacement;
    fn page_size(&self) -> usize;
    fn delay(&self) -> Duration;
    fn output_dir(&self) -> &str;
    fn file_name(&self) -> &str;
    fn session(&self) -> Session;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Accumulator>;
    async fn transform(&self, data: Accumulator) -> Result<ExportArtifact>;
    async fn load(&self, artifact: ExportArtifact) -> Result<String>;
}

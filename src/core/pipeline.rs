use crate::core::artifact::build_artifact;
use crate::core::listing::HttpListingSource;
use crate::core::pagination::{collect_listing, PaginationSettings, TokioPacer};
use crate::core::{Accumulator, ArtifactSink, ConfigProvider, ExportArtifact, ListingSource, Pacer, Pipeline};
use crate::utils::error::Result;

/// Walks the whole listing, renders it and hands it to the sink.
pub struct ListingPipeline<L: ListingSource, S: ArtifactSink, P: Pacer> {
    source: L,
    sink: S,
    pacer: P,
    settings: PaginationSettings,
    file_name: String,
}

impl<L: ListingSource, S: ArtifactSink, P: Pacer> ListingPipeline<L, S, P> {
    pub fn new(
        source: L,
        sink: S,
        pacer: P,
        settings: PaginationSettings,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            source,
            sink,
            pacer,
            settings,
            file_name: file_name.into(),
        }
    }
}

impl<S: ArtifactSink> ListingPipeline<HttpListingSource, S, TokioPacer> {
    pub fn from_config<C: ConfigProvider>(sink: S, config: &C) -> Self {
        let source = HttpListingSource::new(
            config.endpoint(),
            config.offset_placement(),
            config.session(),
        );
        let settings = PaginationSettings {
            page_size: config.page_size(),
            delay: config.delay(),
        };
        Self::new(source, sink, TokioPacer, settings, config.file_name())
    }
}

#[async_trait::async_trait]
impl<L: ListingSource, S: ArtifactSink, P: Pacer> Pipeline for ListingPipeline<L, S, P> {
    async fn extract(&self) -> Result<Accumulator> {
        tracing::debug!(
            "Paging listing with page size {} and {:?} between pages",
            self.settings.page_size,
            self.settings.delay
        );
        collect_listing(&self.source, &self.pacer, self.settings).await
    }

    async fn transform(&self, data: Accumulator) -> Result<ExportArtifact> {
        build_artifact(&self.file_name, data.records(), data.pages().len())
    }

    async fn load(&self, artifact: ExportArtifact) -> Result<String> {
        tracing::debug!(
            "Writing {} ({} bytes) to sink",
            artifact.file_name,
            artifact.content.len()
        );
        self.sink
            .write(&artifact.file_name, artifact.content.as_bytes())
            .await
    }
}

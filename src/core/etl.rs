use crate::core::Pipeline;
use crate::utils::error::Result;
use chrono::Local;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub location: String,
    pub record_count: usize,
    pub page_count: usize,
}

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<ExportReport> {
        let started = Local::now();
        tracing::info!("Starting listing export");

        tracing::info!("Fetching listing pages...");
        let accumulated = self.pipeline.extract().await?;
        tracing::info!(
            "Fetched {} records over {} requests in {:.1}s",
            accumulated.len(),
            accumulated.pages().len(),
            seconds_since(started)
        );

        let artifact = self.pipeline.transform(accumulated).await?;
        let record_count = artifact.record_count;
        let page_count = artifact.page_count;
        tracing::debug!("Rendered {} ({} bytes)", artifact.file_name, artifact.content.len());

        let location = self.pipeline.load(artifact).await?;
        tracing::info!(
            "Export saved to {} after {:.1}s",
            location,
            seconds_since(started)
        );

        Ok(ExportReport {
            location,
            record_count,
            page_count,
        })
    }
}

fn seconds_since(started: chrono::DateTime<Local>) -> f64 {
    (Local::now() - started)
        .num_milliseconds()
        .max(0) as f64
        / 1000.0
}

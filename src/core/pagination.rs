use crate::domain::model::Accumulator;
use crate::domain::ports::{ListingSource, Pacer};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1250);

#[derive(Debug, Clone, Copy)]
pub struct PaginationSettings {
    pub page_size: usize,
    pub delay: Duration,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            delay: DEFAULT_DELAY,
        }
    }
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Requests pages until one comes back empty.
///
/// Each request starts at the number of records received so far, so a short page
/// still moves the cursor correctly. The pacer runs between pages, never after the
/// empty page that ends the listing. Any error aborts the walk and drops whatever
/// was collected.
pub async fn collect_listing<L, P>(
    source: &L,
    pacer: &P,
    settings: PaginationSettings,
) -> Result<Accumulator>
where
    L: ListingSource + ?Sized,
    P: Pacer + ?Sized,
{
    let mut accumulated = Accumulator::new();

    loop {
        let offset = accumulated.cursor();
        let page = source.fetch_page(offset, settings.page_size).await?;
        let received = accumulated.push_page(page);

        if received == 0 {
            tracing::debug!("Empty page at offset {}, listing complete", offset);
            break;
        }

        tracing::info!(
            "Fetched {} records at offset {} ({} total)",
            received,
            offset,
            accumulated.len()
        );
        pacer.pause(settings.delay).await;
    }

    Ok(accumulated)
}

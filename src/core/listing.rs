use crate::domain::model::{ListingPage, OffsetPlacement, Record, Session};
use crate::domain::ports::ListingSource;
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, COOKIE, REFERER};
use reqwest::Client;
use url::Url;

/// Reads listing pages over HTTP with an explicit session.
pub struct HttpListingSource {
    client: Client,
    endpoint: String,
    placement: OffsetPlacement,
    session: Session,
}

impl HttpListingSource {
    pub fn new(endpoint: impl Into<String>, placement: OffsetPlacement, session: Session) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            placement,
            session,
        }
    }

    pub fn page_url(&self, offset: usize, limit: usize) -> Result<Url> {
        let mut url =
            Url::parse(&self.endpoint).map_err(|e| ExportError::InvalidConfigValueError {
                field: "endpoint".to_string(),
                value: self.endpoint.clone(),
                reason: format!("Invalid URL format: {}", e),
            })?;

        match self.placement {
            OffsetPlacement::Query => {
                url.query_pairs_mut()
                    .append_pair("offset", &offset.to_string())
                    .append_pair("limit", &limit.to_string());
            }
            OffsetPlacement::Path => {
                url.path_segments_mut()
                    .map_err(|_| ExportError::InvalidConfigValueError {
                        field: "endpoint".to_string(),
                        value: self.endpoint.clone(),
                        reason: "URL cannot carry a path offset".to_string(),
                    })?
                    .pop_if_empty()
                    .push(&offset.to_string());
                url.query_pairs_mut()
                    .append_pair("limit", &limit.to_string());
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<Record>> {
        let url = self.page_url(offset, limit)?;
        tracing::debug!("Requesting listing page: {}", url);

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "max-age=0");

        if let Some(cookie) = &self.session.cookie {
            request = request.header(COOKIE, cookie.as_str());
        }
        if let Some(referer) = &self.session.referer {
            request = request.header(REFERER, referer.as_str());
        }

        let response = request.send().await?;
        tracing::debug!("Listing response status: {}", response.status());

        let body = response.error_for_status()?.text().await?;
        let page: ListingPage =
            serde_json::from_str(&body).map_err(|e| ExportError::ResponseShapeError {
                offset,
                message: e.to_string(),
            })?;

        Ok(page.domains)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// One listed domain. `amount` is kept exactly as the API sent it (string or number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub amount: serde_json::Value,
}

impl Record {
    pub fn new(name: impl Into<String>, amount: impl Into<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
        }
    }

    /// The amount as it appears inside the export artifact's quoted field.
    /// Numbers keep the digits the API sent (`1e3` stays `1e3`).
    pub fn amount_text(&self) -> String {
        match &self.amount {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Body of one listing response. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    pub domains: Vec<Record>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub offset: usize,
    pub count: usize,
}

/// Every record received so far, in arrival order, plus the offsets that produced them.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    records: Vec<Record>,
    pages: Vec<PageSummary>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset for the next request: the number of records received so far.
    pub fn cursor(&self) -> usize {
        self.records.len()
    }

    /// Appends one page and returns how many records it held.
    pub fn push_page(&mut self, page: Vec<Record>) -> usize {
        let count = page.len();
        self.pages.push(PageSummary {
            offset: self.cursor(),
            count,
        });
        self.records.extend(page);
        count
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn pages(&self) -> &[PageSummary] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The serialized payload handed to the artifact sink.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content: String,
    pub record_count: usize,
    pub page_count: usize,
}

/// Where the offset goes in the listing URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OffsetPlacement {
    /// `<base>?offset=<n>&limit=<size>`
    #[default]
    Query,
    /// `<base>/<n>?limit=<size>`
    Path,
}

impl fmt::Display for OffsetPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetPlacement::Query => write!(f, "query"),
            OffsetPlacement::Path => write!(f, "path"),
        }
    }
}

/// Credentials and page context sent with every listing request.
#[derive(Clone, Default)]
pub struct Session {
    pub cookie: Option<String>,
    pub referer: Option<String>,
}

impl Session {
    pub fn new(cookie: Option<String>, referer: Option<String>) -> Self {
        Self { cookie, referer }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cookie", &self.cookie.as_ref().map(|_| "<redacted>"))
            .field("referer", &self.referer)
            .finish()
    }
}

use crate::error::ParseAnomaly;
use serde::{Deserialize, Serialize};
use url::Url;

/// A PDF resource discovered on a scanned page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfLink {
    /// Trailing path segment of the raw href
    pub filename: String,

    /// Absolute URL, resolved against the page URL
    pub url: String,

    /// Anchor text, or the filename when the anchor has no text
    pub display_text: String,
}

impl PdfLink {
    /// Build a link record from a raw href and the anchor's text content.
    ///
    /// The filename comes from the raw href, not from the resolved URL, so
    /// percent-encoding applied by the URL parser does not leak into it.
    pub fn from_anchor(href: &str, text: &str, base: &Url) -> Result<Self, ParseAnomaly> {
        let url = base
            .join(href)
            .map_err(|e| ParseAnomaly::UnresolvableHref {
                href: href.to_string(),
                base: base.to_string(),
                reason: e.to_string(),
            })?;

        let filename = filename_from_href(href).to_string();
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let display_text = if text.is_empty() {
            filename.clone()
        } else {
            text
        };

        Ok(Self {
            filename,
            url: url.to_string(),
            display_text,
        })
    }
}

/// Returns the substring after the last `/` of an href
pub fn filename_from_href(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or(href)
}

/// Case-insensitive check for the `.pdf` suffix
pub fn is_pdf_href(href: &str) -> bool {
    href.to_ascii_lowercase().ends_with(".pdf")
}

/// Everything one page scan produced, handed back to the caller.
///
/// The caller keeps this between interactions (listing, downloading,
/// bundling) instead of the harvester remembering anything.
#[derive(Debug, Clone, Serialize)]
pub struct HarvestSession {
    /// The page that was scanned
    pub source_url: String,

    /// Links in document order, duplicates preserved
    pub links: Vec<PdfLink>,

    /// Non-fatal markup problems seen during the scan
    #[serde(skip)]
    pub anomalies: Vec<ParseAnomaly>,
}

impl HarvestSession {
    pub fn new(source_url: String, links: Vec<PdfLink>, anomalies: Vec<ParseAnomaly>) -> Self {
        Self {
            source_url,
            links,
            anomalies,
        }
    }

    /// Whether this session was produced for the given page URL
    pub fn is_for(&self, url: &str) -> bool {
        self.source_url == url
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Final state of one item in a bulk fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ItemState {
    /// Fetched and written; `target` is the file path or archive member name
    Written { target: String, bytes: u64 },
    /// Skipped after a fetch or write failure
    Failed { reason: String },
}

/// Outcome of one link in a bulk fetch
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    /// 1-based position in the link sequence
    pub index: usize,
    pub filename: String,
    pub url: String,
    pub state: ItemState,
}

/// Per-item outcomes and running counters of a bulk fetch
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub items: Vec<ItemReport>,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    pub(crate) fn record(&mut self, item: ItemReport) {
        match item.state {
            ItemState::Written { .. } => self.succeeded += 1,
            ItemState::Failed { .. } => self.failed += 1,
        }
        self.items.push(item);
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }
}

/// A finished in-memory zip archive
#[derive(Debug, Clone)]
pub struct ArchiveBundle {
    /// Complete archive bytes
    pub bytes: Vec<u8>,

    /// Number of members written (HTTP 200 responses)
    pub written: usize,

    pub report: BatchReport,
}

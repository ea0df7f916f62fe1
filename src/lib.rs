pub mod config;
pub mod error;
pub mod fetchers;
pub mod filter;
pub mod parsers;
pub mod report;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::HarvestConfig;
pub use error::{FetchError, HarvestError, ItemError, ParseAnomaly};
pub use fetchers::Progress;
pub use results::{ArchiveBundle, BatchReport, HarvestSession, ItemState, PdfLink};

use fetchers::{ArchiveSink, DirectorySink, HarvestClient};
use filter::{LinkFilter, LinkFilterConfig};
use std::path::Path;

/// Scans pages for PDF links and fetches them.
///
/// A `Harvester` keeps nothing between calls except its HTTP client and
/// link filter; every scan returns a [`HarvestSession`] that the caller
/// passes back to [`Harvester::download`] or [`Harvester::bundle`].
#[derive(Debug)]
pub struct Harvester {
    client: HarvestClient,
    filter: LinkFilter,
}

impl Harvester {
    /// Build a harvester from configuration, compiling its link filter
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestError> {
        let filter = LinkFilter::new(LinkFilterConfig::from(&config))?;
        let client = HarvestClient::new(config)?;
        Ok(Self { client, filter })
    }

    pub fn config(&self) -> &HarvestConfig {
        self.client.config()
    }

    /// Fetch one page and collect its PDF links.
    ///
    /// Fails with [`FetchError`] when the URL is not http(s), or when the
    /// page cannot be retrieved; no links are returned in that case.
    pub async fn scan(&self, url: &str) -> Result<HarvestSession, FetchError> {
        let page_url = fetchers::validate_url(url)?;
        let result = fetchers::fetch_pdf_links(&self.client, url).await?;
        let links = self.filter.apply(result.links, &page_url);

        Ok(HarvestSession::new(url.to_string(), links, result.anomalies))
    }

    /// Download every link of `session` into `dir`, one file each.
    ///
    /// Only failing to create `dir` is an error; per-file failures are in the report.
    pub async fn download<F>(
        &self,
        session: &HarvestSession,
        dir: impl AsRef<Path>,
        on_progress: F,
    ) -> std::io::Result<BatchReport>
    where
        F: FnMut(&Progress<'_>),
    {
        let mut sink = DirectorySink::create(dir.as_ref()).await?;
        ::log::info!("Downloading into {}", sink.dir().display());
        Ok(fetchers::fetch_all(&self.client, &session.links, &mut sink, on_progress).await)
    }

    /// Download every link of `session` into an in-memory zip archive
    pub async fn bundle<F>(
        &self,
        session: &HarvestSession,
        on_progress: F,
    ) -> Result<ArchiveBundle, ItemError>
    where
        F: FnMut(&Progress<'_>),
    {
        let mut sink = ArchiveSink::new();
        let report = fetchers::fetch_all(&self.client, &session.links, &mut sink, on_progress).await;
        let written = sink.written();
        let bytes = sink.finish()?;

        Ok(ArchiveBundle {
            bytes,
            written,
            report,
        })
    }
}

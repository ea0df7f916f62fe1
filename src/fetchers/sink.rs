use crate::config::HarvestConfig;
use crate::error::ItemError;
use crate::results::PdfLink;
use reqwest::{Response, StatusCode};
use std::time::Duration;

/// Where a successfully fetched item ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stored {
    /// File path or archive member name
    pub target: String,
    /// Body size in bytes
    pub bytes: u64,
}

/// Output side of a bulk fetch.
///
/// The fetch loop owns the requests; a sink decides which responses it
/// accepts and how their bodies are persisted.
#[allow(async_fn_in_trait)]
pub trait Sink {
    /// Short name used in log lines
    fn mode(&self) -> &'static str;

    /// Per-request timeout for this output mode
    fn timeout(&self, config: &HarvestConfig) -> Duration;

    /// Whether a response with this status should be stored
    fn accepts(&self, status: StatusCode) -> bool;

    /// Persist an accepted response body
    async fn store(&mut self, link: &PdfLink, response: Response) -> Result<Stored, ItemError>;
}

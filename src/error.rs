use reqwest::StatusCode;
use thiserror::Error;

/// Failure to retrieve a page or a file over HTTP
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL was rejected before any request was made
    #[error("invalid URL '{url}': must be an absolute http:// or https:// URL")]
    InvalidUrl { url: String },

    /// Connection, TLS, timeout or body read failure
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status the caller does not accept
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// The HTTP client itself could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// True when the underlying transport error was a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}

/// Unexpected markup or content found while scanning a page.
///
/// Anomalies never abort extraction; they are logged and kept on the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAnomaly {
    #[error("href '{href}' could not be resolved against {base}: {reason}")]
    UnresolvableHref {
        href: String,
        base: String,
        reason: String,
    },

    #[error("{url} declared content type '{content_type}', scanned as HTML anyway")]
    UnexpectedContentType { url: String, content_type: String },
}

/// Failure of a single item inside a bulk fetch
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Failure to construct a [`crate::Harvester`]
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("invalid link filter pattern: {0}")]
    Filter(#[from] regex::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

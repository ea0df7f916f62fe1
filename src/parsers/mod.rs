pub mod html;

#[cfg(test)]
mod tests;

use crate::error::ParseAnomaly;
use crate::results::PdfLink;
use url::Url;

/// Kind of document a page response declared itself to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    /// HTML or XHTML markup
    Html,
    /// No content type header was sent
    Unknown,
    /// Anything else; still scanned as HTML
    Other(String),
}

impl ContentKind {
    /// Classify a `Content-Type` header value
    pub fn from_content_type(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return ContentKind::Unknown;
        };

        let mime = value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if mime == "text/html" || mime == "application/xhtml+xml" {
            ContentKind::Html
        } else if mime.is_empty() {
            ContentKind::Unknown
        } else {
            ::log::debug!("Classifying as non-HTML content: {}", mime);
            ContentKind::Other(mime)
        }
    }
}

/// Result of scanning a page for PDF links
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Links in document order
    pub links: Vec<PdfLink>,
    /// Problems seen along the way
    pub anomalies: Vec<ParseAnomaly>,
}

impl ParseResult {
    pub fn new(links: Vec<PdfLink>, anomalies: Vec<ParseAnomaly>) -> Self {
        Self { links, anomalies }
    }
}

/// Entry point for turning a fetched page body into link records
pub struct Parser;

impl Parser {
    /// Scan markup for PDF links, resolving them against `base`
    pub fn parse(body: &str, base: &Url) -> ParseResult {
        html::parse(body, base)
    }

    /// Scan a page body, noting an anomaly when the declared content type is not HTML
    pub fn parse_response(body: &str, base: &Url, content_type: Option<&str>) -> ParseResult {
        let mut result = Self::parse(body, base);

        if let ContentKind::Other(mime) = ContentKind::from_content_type(content_type) {
            let anomaly = ParseAnomaly::UnexpectedContentType {
                url: base.to_string(),
                content_type: mime,
            };
            ::log::warn!("{}", anomaly);
            result.anomalies.insert(0, anomaly);
        }

        result
    }
}

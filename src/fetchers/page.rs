use crate::error::FetchError;
use crate::fetchers::client::{HarvestClient, validate_url};
use crate::parsers::{ParseResult, Parser};
use reqwest::header::CONTENT_TYPE;

/// Fetches one page and returns the PDF links it contains.
///
/// The URL is validated before any request. A transport failure, timeout or
/// non-2xx status fails the whole scan; nothing is parsed in that case.
/// A page without PDF links is an empty result, not an error.
pub async fn fetch_pdf_links(client: &HarvestClient, url: &str) -> Result<ParseResult, FetchError> {
    let page_url = validate_url(url)?;
    ::log::info!("Fetching content from: {}", page_url);

    let response = client
        .get(page_url.as_str(), client.config().page_timeout())
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: page_url.to_string(),
            status,
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::transport(page_url.as_str(), e))?;
    ::log::debug!("Read {} bytes of markup from {}", body.len(), page_url);

    let result = Parser::parse_response(&body, &page_url, content_type.as_deref());
    ::log::info!("Found {} PDF links in {}", result.links.len(), page_url);

    Ok(result)
}

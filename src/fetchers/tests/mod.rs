mod directory_tests;

use crate::config::HarvestConfig;
use crate::fetchers::HarvestClient;
use crate::results::PdfLink;
use wiremock::MockServer;

/// Client with short timeouts suitable for a local mock server
pub(super) fn test_client() -> HarvestClient {
    let config = HarvestConfig::default()
        .with_page_timeout(2)
        .with_file_timeout(2);
    HarvestClient::new(config).unwrap()
}

/// Link record pointing at `path` on the mock server
pub(super) fn mock_link(server: &MockServer, path: &str, filename: &str) -> PdfLink {
    PdfLink {
        filename: filename.to_string(),
        url: format!("{}{}", server.uri(), path),
        display_text: filename.to_string(),
    }
}

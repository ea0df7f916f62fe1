use crate::parsers::ParseResult;
use crate::results::{PdfLink, is_pdf_href};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static selector is valid"));

/// Parses HTML content and extracts every anchor whose href ends in `.pdf`.
///
/// html5ever recovers from any markup, so a malformed page simply yields
/// whatever anchors survive recovery. Hrefs that cannot be resolved against
/// `base` are reported as anomalies and skipped.
pub fn parse(html: &str, base: &Url) -> ParseResult {
    let doc = Html::parse_document(html);

    let mut links = Vec::new();
    let mut anomalies = Vec::new();

    for anchor in doc.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !is_pdf_href(href) {
            continue;
        }

        match PdfLink::from_anchor(href, &anchor_text(&anchor), base) {
            Ok(link) => links.push(link),
            Err(anomaly) => {
                ::log::warn!("Skipping anchor: {}", anomaly);
                anomalies.push(anomaly);
            }
        }
    }

    ::log::debug!("HTML parser found {} PDF links", links.len());
    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links.iter().take(5).map(|l| &l.url).collect::<Vec<_>>()
        );
    }

    ParseResult::new(links, anomalies)
}

/// Parses HTML content and only returns the links, dropping anomalies
pub fn parse_links_only(html: &str, base: &Url) -> Vec<PdfLink> {
    parse(html, base).links
}

/// Concatenated text nodes of the anchor; whitespace is normalized by `PdfLink`
fn anchor_text(anchor: &ElementRef<'_>) -> String {
    anchor.text().collect()
}

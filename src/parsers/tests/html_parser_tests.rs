use crate::error::ParseAnomaly;
use crate::parsers::{Parser, html};
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://ex.com/docs/index.html").unwrap()
    }

    #[test]
    fn test_one_link_per_occurrence_in_document_order() {
        let page = r#"<html><body>
            <a href="b.pdf">B</a>
            <p><a href="/top/a.PDF">A</a></p>
            <a href="b.pdf">B again</a>
            <a href="notes.txt">Notes</a>
            <a href="report.pdf?version=2">Query</a>
        </body></html>"#;

        let result = Parser::parse(page, &base());
        let urls: Vec<&str> = result.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://ex.com/docs/b.pdf",
                "https://ex.com/top/a.PDF",
                "https://ex.com/docs/b.pdf",
            ]
        );
        assert_eq!(result.links[2].display_text, "B again");
        assert!(result.anomalies.is_empty());
    }

    #[test]
    fn test_relative_href_resolution() {
        let page = r#"<a href="report.pdf">Report</a>"#;
        let links = html::parse_links_only(page, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://ex.com/docs/report.pdf");
        assert_eq!(links[0].filename, "report.pdf");
    }

    #[test]
    fn test_empty_anchor_uses_filename() {
        let page = r#"<a href="files/2024/summary.pdf"><img src="icon.png"></a>"#;
        let links = html::parse_links_only(page, &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].display_text, "summary.pdf");
        assert_eq!(links[0].filename, "summary.pdf");
    }

    #[test]
    fn test_nested_anchor_text_is_trimmed() {
        let page = "<a href=\"x.pdf\">\n   Annual <b>Report</b>\n  2024  </a>";
        let links = html::parse_links_only(page, &base());
        assert_eq!(links[0].display_text, "Annual Report 2024");
    }

    #[test]
    fn test_page_without_pdf_links_is_empty() {
        let page = r#"<html><body><a href="/about">About</a><a>No href</a></body></html>"#;
        let result = Parser::parse(page, &base());
        assert!(result.links.is_empty());
        assert!(result.anomalies.is_empty());
    }

    #[test]
    fn test_malformed_markup_is_not_fatal() {
        let page = r#"<ul><li><a href="one.pdf">One</a><li><a href=two.pdf>Two</a></ul></div></span>"#;
        let links = html::parse_links_only(page, &base());
        let names: Vec<&str> = links.iter().map(|l| l.filename.as_str()).collect();
        assert_eq!(names, vec!["one.pdf", "two.pdf"]);

        assert!(Parser::parse("", &base()).links.is_empty());
    }

    #[test]
    fn test_unresolvable_href_is_skipped_and_recorded() {
        let page = r#"<a href="http://[bad/x.pdf">Bad</a><a href="good.pdf">Good</a>"#;
        let result = Parser::parse(page, &base());
        assert_eq!(result.links.len(), 1);
        assert_eq!(result.links[0].filename, "good.pdf");
        assert_eq!(result.anomalies.len(), 1);
        assert!(matches!(
            result.anomalies[0],
            ParseAnomaly::UnresolvableHref { .. }
        ));
    }

    #[test]
    fn test_non_html_content_type_is_recorded() {
        let page = r#"<a href="a.pdf">A</a>"#;
        let result = Parser::parse_response(page, &base(), Some("application/json"));
        assert_eq!(result.links.len(), 1);
        assert_eq!(
            result.anomalies,
            vec![ParseAnomaly::UnexpectedContentType {
                url: "https://ex.com/docs/index.html".to_string(),
                content_type: "application/json".to_string(),
            }]
        );

        let result = Parser::parse_response(page, &base(), Some("text/html; charset=utf-8"));
        assert!(result.anomalies.is_empty());
    }
}

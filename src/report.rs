use crate::results::{BatchReport, ItemState, PdfLink};
use std::fmt::Write as _;
use std::io;
use std::path::Path;

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn push_entries(out: &mut String, links: &[PdfLink]) {
    for (idx, link) in links.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", idx + 1, link.display_text);
        let _ = writeln!(out, "   Filename: {}", link.filename);
        let _ = writeln!(out, "   URL: {}", link.url);
        out.push('\n');
    }
}

/// Flat text listing of links, in the format written by `--save-list`
pub fn render_listing(links: &[PdfLink]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total PDF files found: {}", links.len());
    let _ = writeln!(out, "{}", rule());
    out.push('\n');
    push_entries(&mut out, links);
    out
}

/// Listing for the terminal, framed by rules
pub fn render_display(links: &[PdfLink]) -> String {
    if links.is_empty() {
        return "No PDF files found on this page.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "Found {} PDF file(s):", links.len());
    let _ = writeln!(out, "{}", rule());
    out.push('\n');
    push_entries(&mut out, links);
    out
}

/// Write the text listing to `path`
pub fn write_listing(links: &[PdfLink], path: impl AsRef<Path>) -> io::Result<()> {
    std::fs::write(path.as_ref(), render_listing(links))?;
    ::log::info!("PDF links saved to: {}", path.as_ref().display());
    Ok(())
}

/// Summary block printed after a bulk fetch
pub fn render_summary(report: &BatchReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "Download Summary:");
    let _ = writeln!(out, "  Successful: {}", report.succeeded);
    let _ = writeln!(out, "  Failed: {}", report.failed);
    let _ = writeln!(out, "  Total: {}", report.total());

    let failures: Vec<_> = report
        .items
        .iter()
        .filter_map(|item| match &item.state {
            ItemState::Failed { reason } => Some((item, reason)),
            ItemState::Written { .. } => None,
        })
        .collect();
    if !failures.is_empty() {
        let _ = writeln!(out, "  Failures:");
        for (item, reason) in failures {
            let _ = writeln!(out, "    [{}] {} - {}", item.index, item.filename, reason);
        }
    }

    let _ = writeln!(out, "{}", rule());
    out
}

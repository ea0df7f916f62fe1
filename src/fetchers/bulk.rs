use crate::error::{FetchError, ItemError};
use crate::fetchers::client::HarvestClient;
use crate::fetchers::sink::{Sink, Stored};
use crate::results::{BatchReport, ItemReport, ItemState, PdfLink};
use std::time::Duration;

/// Position of the item about to be fetched, for progress display
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 1-based index of the current item
    pub index: usize,
    pub total: usize,
    pub link: &'a PdfLink,
}

/// Fetches every link in order and hands accepted responses to `sink`.
///
/// Items are processed one at a time. A failed item is logged and counted
/// and the loop moves on; nothing here aborts the batch.
pub async fn fetch_all<S, F>(
    client: &HarvestClient,
    links: &[PdfLink],
    sink: &mut S,
    mut on_progress: F,
) -> BatchReport
where
    S: Sink,
    F: FnMut(&Progress<'_>),
{
    let total = links.len();
    let timeout = sink.timeout(client.config());
    let mut report = BatchReport::default();
    let start_time = std::time::Instant::now();

    ::log::info!("Fetching {} PDF file(s) in {} mode", total, sink.mode());

    for (i, link) in links.iter().enumerate() {
        let index = i + 1;
        on_progress(&Progress { index, total, link });
        ::log::debug!("[{}/{}] Fetching {}", index, total, link.url);

        let state = match fetch_one(client, link, sink, timeout).await {
            Ok(Stored { target, bytes }) => {
                ::log::debug!("[{}/{}] Wrote {} ({} bytes)", index, total, target, bytes);
                ItemState::Written { target, bytes }
            }
            Err(e) => {
                ::log::warn!("[{}/{}] Failed {}: {}", index, total, link.filename, e);
                ItemState::Failed {
                    reason: e.to_string(),
                }
            }
        };

        report.record(ItemReport {
            index,
            filename: link.filename.clone(),
            url: link.url.clone(),
            state,
        });
    }

    ::log::info!(
        "Fetch complete - {} succeeded, {} failed of {} in {:.2} seconds",
        report.succeeded,
        report.failed,
        total,
        start_time.elapsed().as_secs_f64()
    );

    report
}

async fn fetch_one<S: Sink>(
    client: &HarvestClient,
    link: &PdfLink,
    sink: &mut S,
    timeout: Duration,
) -> Result<Stored, ItemError> {
    let response = client.get(&link.url, timeout).await?;

    let status = response.status();
    if !sink.accepts(status) {
        return Err(FetchError::Status {
            url: link.url.clone(),
            status,
        }
        .into());
    }
    ::log::trace!("Fetched headers for {} ({})", link.url, status);

    sink.store(link, response).await
}

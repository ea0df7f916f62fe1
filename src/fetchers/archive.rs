use crate::config::HarvestConfig;
use crate::error::{FetchError, ItemError};
use crate::fetchers::sink::{Sink, Stored};
use crate::results::PdfLink;
use crate::utils::unique_name;
use reqwest::{Response, StatusCode};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::time::Duration;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Accumulates fetched PDFs into one deflate-compressed zip held in memory.
///
/// Only HTTP 200 responses are written. Member names follow the same
/// numeric-suffix rule as directory mode, so a repeated `a.pdf` is stored
/// as `a_1.pdf` instead of a second member with the same name.
pub struct ArchiveSink {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    names: HashSet<String>,
    written: usize,
}

impl Default for ArchiveSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveSink {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: HashSet::new(),
            written: 0,
        }
    }

    /// Number of members written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Finalize the central directory and return the archive bytes
    pub fn finish(self) -> Result<Vec<u8>, ItemError> {
        let cursor = self.writer.finish()?;
        let bytes = cursor.into_inner();
        ::log::debug!(
            "Archive finished: {} members, {} bytes",
            self.written,
            bytes.len()
        );
        Ok(bytes)
    }
}

impl Sink for ArchiveSink {
    fn mode(&self) -> &'static str {
        "archive"
    }

    fn timeout(&self, config: &HarvestConfig) -> Duration {
        config.archive_timeout()
    }

    fn accepts(&self, status: StatusCode) -> bool {
        status == StatusCode::OK
    }

    async fn store(&mut self, link: &PdfLink, response: Response) -> Result<Stored, ItemError> {
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(&link.url, e))?;

        let name = unique_name(&link.filename, |n| self.names.contains(n));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        self.writer.start_file(name.as_str(), options)?;
        self.writer.write_all(&body)?;

        self.names.insert(name.clone());
        self.written += 1;

        Ok(Stored {
            target: name,
            bytes: body.len() as u64,
        })
    }
}

use crate::config::HarvestConfig;
use crate::error::{FetchError, ItemError};
use crate::fetchers::sink::{Sink, Stored};
use crate::results::PdfLink;
use crate::utils::{numbered_name, sanitize_filename};
use reqwest::{Response, StatusCode};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Writes each fetched PDF to its own file in a directory.
///
/// Existing files are never overwritten: a taken `name.pdf` becomes
/// `name_1.pdf`, then `name_2.pdf`, and so on.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create the directory (and parents) if needed
    pub async fn create(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        ::log::debug!("Download directory ready: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Open the first free numbered variant of `name` with create-new semantics
    async fn open_unique(&self, name: &str) -> io::Result<(PathBuf, File)> {
        let mut n = 0;
        loop {
            let path = self.dir.join(numbered_name(name, n));
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    ::log::trace!("{} exists, trying next name", path.display());
                    n += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Sink for DirectorySink {
    fn mode(&self) -> &'static str {
        "directory"
    }

    fn timeout(&self, config: &HarvestConfig) -> Duration {
        config.file_timeout()
    }

    fn accepts(&self, status: StatusCode) -> bool {
        status.is_success()
    }

    async fn store(&mut self, link: &PdfLink, mut response: Response) -> Result<Stored, ItemError> {
        let name = sanitize_filename(&link.filename);
        let (path, mut file) = self.open_unique(&name).await?;

        match stream_to_file(&mut response, &mut file, &link.url).await {
            Ok(bytes) => Ok(Stored {
                target: path.display().to_string(),
                bytes,
            }),
            Err(e) => {
                drop(file);
                if let Err(rm) = tokio::fs::remove_file(&path).await {
                    ::log::warn!("Failed to remove partial file {}: {}", path.display(), rm);
                }
                Err(e)
            }
        }
    }
}

/// Copy the body chunk by chunk so large files never sit in memory whole
async fn stream_to_file(response: &mut Response, file: &mut File, url: &str) -> Result<u64, ItemError> {
    let mut written: u64 = 0;

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| FetchError::transport(url, e))?
    {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        ::log::trace!("{}: {} bytes so far", url, written);
    }

    file.flush().await?;
    Ok(written)
}

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Desktop Chrome user agent; some sites refuse obvious bot agents
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for scanning a page and fetching the PDFs it links to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarvestConfig {
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for the page fetch, in seconds
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Timeout for each file fetched in directory mode, in seconds
    #[serde(default = "default_file_timeout_secs")]
    pub file_timeout_secs: u64,

    /// Timeout for each file fetched in archive mode, in seconds
    #[serde(default = "default_archive_timeout_secs")]
    pub archive_timeout_secs: u64,

    /// Directory used by `--download` when no explicit directory is given
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Regex patterns a link URL must match (any of them) to be kept
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns that drop a link URL (these take precedence over includes)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Only keep links whose host equals the scanned page's host
    #[serde(default)]
    pub same_host_only: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            page_timeout_secs: default_page_timeout_secs(),
            file_timeout_secs: default_file_timeout_secs(),
            archive_timeout_secs: default_archive_timeout_secs(),
            download_dir: default_download_dir(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            same_host_only: false,
        }
    }
}

impl HarvestConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn file_timeout(&self) -> Duration {
        Duration::from_secs(self.file_timeout_secs)
    }

    pub fn archive_timeout(&self) -> Duration {
        Duration::from_secs(self.archive_timeout_secs)
    }

    /// Override the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the page fetch timeout
    pub fn with_page_timeout(mut self, seconds: u64) -> Self {
        self.page_timeout_secs = seconds;
        self
    }

    /// Override both per-file timeouts
    pub fn with_file_timeout(mut self, seconds: u64) -> Self {
        self.file_timeout_secs = seconds;
        self.archive_timeout_secs = seconds;
        self
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_page_timeout_secs() -> u64 {
    10
}

fn default_file_timeout_secs() -> u64 {
    60
}

fn default_archive_timeout_secs() -> u64 {
    30
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloaded_pdfs")
}

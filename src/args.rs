use clap::Parser;
use pdf_harvest::HarvestConfig;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pdf-harvest")]
#[command(about = "Finds PDF links on a web page, lists them, and optionally downloads them")]
#[command(version)]
pub struct Args {
    /// Page to scan (must start with http:// or https://)
    pub url: String,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Save the link listing to this text file
    #[arg(short = 'o', long)]
    pub save_list: Option<PathBuf>,

    /// Print the listing as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Download every PDF into this directory
    #[arg(short, long)]
    pub download_dir: Option<PathBuf>,

    /// Download every PDF into the configured directory (default: downloaded_pdfs)
    #[arg(long)]
    pub download: bool,

    /// Bundle every PDF into a zip archive written to this path
    #[arg(short, long)]
    pub zip: Option<PathBuf>,

    /// User-Agent header to send
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Page fetch timeout in seconds
    #[arg(long)]
    pub page_timeout: Option<u64>,

    /// Per-file fetch timeout in seconds
    #[arg(long)]
    pub file_timeout: Option<u64>,

    /// Only keep links matching this regex (repeatable)
    #[arg(long = "include")]
    pub include_patterns: Vec<String>,

    /// Drop links matching this regex (repeatable)
    #[arg(long = "exclude")]
    pub exclude_patterns: Vec<String>,

    /// Only keep links on the scanned page's host
    #[arg(long)]
    pub same_host: bool,
}

impl Args {
    /// Load the config file if one was given, then apply command-line overrides
    pub fn harvest_config(&self) -> Result<HarvestConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => HarvestConfig::from_file(path)?,
            None => HarvestConfig::default(),
        };

        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        if let Some(seconds) = self.page_timeout {
            config = config.with_page_timeout(seconds);
        }
        if let Some(seconds) = self.file_timeout {
            config = config.with_file_timeout(seconds);
        }
        config.include_patterns.extend(self.include_patterns.iter().cloned());
        config.exclude_patterns.extend(self.exclude_patterns.iter().cloned());
        config.same_host_only |= self.same_host;

        Ok(config)
    }

    /// Directory for directory mode: `-d` wins, `--download` falls back to the config
    pub fn download_target(&self, config: &HarvestConfig) -> Option<PathBuf> {
        match &self.download_dir {
            Some(dir) => Some(dir.clone()),
            None if self.download => Some(config.download_dir.clone()),
            None => None,
        }
    }
}

use crate::config::HarvestConfig;
use crate::results::PdfLink;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for narrowing down the links a scan keeps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkFilterConfig {
    /// Only keep links on the same host as the scanned page
    #[serde(default)]
    pub same_host_only: bool,

    /// Regex patterns for URLs to include (if empty, all URLs are included unless excluded)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to exclude (these take precedence over include patterns)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl From<&HarvestConfig> for LinkFilterConfig {
    fn from(config: &HarvestConfig) -> Self {
        Self {
            same_host_only: config.same_host_only,
            include_patterns: config.include_patterns.clone(),
            exclude_patterns: config.exclude_patterns.clone(),
        }
    }
}

/// Link filter built from regex patterns and a host restriction.
///
/// The default filter keeps every link.
#[derive(Debug, Default)]
pub struct LinkFilter {
    same_host_only: bool,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl LinkFilter {
    /// Create a new link filter, compiling its patterns
    pub fn new(config: LinkFilterConfig) -> Result<Self, regex::Error> {
        let include_regexes = compile_all(&config.include_patterns)?;
        let exclude_regexes = compile_all(&config.exclude_patterns)?;

        Ok(Self {
            same_host_only: config.same_host_only,
            include_regexes,
            exclude_regexes,
        })
    }

    /// Whether the filter keeps every link unconditionally
    pub fn is_pass_through(&self) -> bool {
        !self.same_host_only && self.include_regexes.is_empty() && self.exclude_regexes.is_empty()
    }

    /// Determine if a link found on `page` should be kept
    pub fn keeps(&self, link: &PdfLink, page: &Url) -> bool {
        if self.same_host_only && !same_host(&link.url, page) {
            return false;
        }

        let url_str = link.url.as_str();
        if self.exclude_regexes.iter().any(|re| re.is_match(url_str)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|re| re.is_match(url_str))
    }

    /// Keep the links that pass, preserving their order
    pub fn apply(&self, links: Vec<PdfLink>, page: &Url) -> Vec<PdfLink> {
        if self.is_pass_through() {
            return links;
        }

        let before = links.len();
        let kept: Vec<PdfLink> = links
            .into_iter()
            .filter(|link| {
                let keep = self.keeps(link, page);
                if !keep {
                    ::log::debug!("Link filter rejected: {}", link.url);
                }
                keep
            })
            .collect();

        ::log::debug!("Link filter kept {} of {} links", kept.len(), before);
        kept
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|p| Regex::new(p)).collect()
}

fn same_host(url: &str, page: &Url) -> bool {
    match Url::parse(url) {
        Ok(url) => url.host_str().is_some() && url.host_str() == page.host_str(),
        Err(_) => false,
    }
}

pub mod archive;
pub mod bulk;
pub mod client;
pub mod directory;
pub mod page;
pub mod sink;

#[cfg(test)]
mod tests;

pub use archive::ArchiveSink;
pub use bulk::{Progress, fetch_all};
pub use client::{HarvestClient, validate_url};
pub use directory::DirectorySink;
pub use page::fetch_pdf_links;
pub use sink::{Sink, Stored};

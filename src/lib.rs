//! blog-pdf: crawl a paginated blog index and export its articles as PDFs
//!
//! The crawler walks index pages from 1 upward, follows every "Read More"
//! link it finds, and renders each article to a PDF. Fetched HTML and
//! rendered PDFs are cached on disk so repeated runs only touch the network
//! and the renderer for content they have not seen before.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod export;

use thiserror::Error;

/// Main error type for crawl operations
///
/// Everything in here is fatal to a crawl. Render failures are not errors:
/// they are contained per link and reported as [`export::ExportOutcome`].
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid link text pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use cache::{cache_key, ContentCache};
pub use config::Config;
pub use crawler::{run_crawl, Coordinator, CrawlSummary};
pub use export::{ExportOutcome, PdfExporter, Renderer, WkhtmltopdfRenderer};

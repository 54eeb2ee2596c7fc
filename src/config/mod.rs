//! Configuration module
//!
//! Every crawl parameter lives in one immutable [`Config`] value, built once
//! at start-up (from defaults or from a TOML file) and handed to each
//! component.
//!
//! # Example
//!
//! ```no_run
//! use blog_pdf::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("blog-pdf.toml")).unwrap();
//! println!("Crawling at most {} index pages", config.crawl.max_page);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CacheConfig, Config, CrawlConfig, ExportConfig, FetchConfig, DEFAULT_ATTEMPTS,
    DEFAULT_LINK_TEXT, DEFAULT_MAX_PAGE, DEFAULT_PRINT_QUERY, DEFAULT_ROOT_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

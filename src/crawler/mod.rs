//! Crawler module for index walking and link discovery
//!
//! This module contains the core crawling logic, including:
//! - Cache-first HTTP fetching with throttling
//! - "Read More" link extraction
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlSummary};
pub use fetcher::{build_http_client, fetch_html, throttle_delay, PageFetcher};
pub use parser::LinkExtractor;

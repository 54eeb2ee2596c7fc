use crate::config::types::{CacheConfig, Config, CrawlConfig, ExportConfig, FetchConfig};
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_fetch_config(&config.fetch)?;
    validate_export_config(&config.export)?;
    validate_cache_config(&config.cache)?;
    Ok(())
}

/// Validates the index template, page cap and link pattern
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if !config.root_url.contains("{page}") {
        return Err(ConfigError::InvalidUrl(format!(
            "root_url must contain a {{page}} placeholder, got '{}'",
            config.root_url
        )));
    }

    let first = config.index_url(1);
    let parsed = Url::parse(&first)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root_url '{}': {}", first, e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "root_url must use http or https, got '{}'",
            parsed.scheme()
        )));
    }

    if config.max_page < 1 {
        return Err(ConfigError::Validation(format!(
            "max_page must be >= 1, got {}",
            config.max_page
        )));
    }

    if config.link_text.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "link_text cannot be empty".to_string(),
        ));
    }
    Regex::new(&config.link_text)
        .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", config.link_text, e)))?;

    Ok(())
}

/// Validates HTTP client settings
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout == 0 {
        return Err(ConfigError::Validation(
            "request_timeout must be > 0 seconds".to_string(),
        ));
    }

    if config.connect_timeout == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout must be > 0 seconds".to_string(),
        ));
    }

    Ok(())
}

/// Validates the render retry policy
fn validate_export_config(config: &ExportConfig) -> Result<(), ConfigError> {
    if config.attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "attempts must be >= 1, got {}",
            config.attempts
        )));
    }

    if config.render_timeout == 0 {
        return Err(ConfigError::Validation(
            "render_timeout must be > 0 seconds".to_string(),
        ));
    }

    if config.renderer.trim().is_empty() {
        return Err(ConfigError::Validation(
            "renderer cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.pdf_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "pdf_dir cannot be empty".to_string(),
        ));
    }

    if matches!(&config.html_dir, Some(dir) if dir.as_os_str().is_empty()) {
        return Err(ConfigError::Validation(
            "html_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

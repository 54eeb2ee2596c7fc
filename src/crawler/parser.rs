//! HTML parser for extracting article links
//!
//! An article link is an `<a>` whose text matches the configured pattern
//! ("Read More" by default) and whose `href` is absolute. Relative, empty,
//! and missing targets are dropped rather than resolved.

use crate::ConfigError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Finds article links in index pages
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    pattern: Regex,
    anchors: Selector,
}

impl LinkExtractor {
    /// Compiles the anchor-text pattern
    ///
    /// The pattern is an unanchored, case-sensitive regex.
    pub fn new(link_text: &str) -> Result<Self, ConfigError> {
        let pattern = Regex::new(link_text)
            .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", link_text, e)))?;
        let anchors = Selector::parse("a").map_err(|e| {
            ConfigError::InvalidPattern(format!("built-in anchor selector 'a' rejected: {}", e))
        })?;
        Ok(Self { pattern, anchors })
    }

    /// Lazily yields article links in document order
    ///
    /// # Example
    ///
    /// ```
    /// use blog_pdf::crawler::LinkExtractor;
    /// use scraper::Html;
    ///
    /// let extractor = LinkExtractor::new("Read More").unwrap();
    /// let document = Html::parse_document(
    ///     r#"<a href="https://example.com/post">Read More</a><a href="/about">About</a>"#,
    /// );
    /// let links: Vec<String> = extractor.links(&document).collect();
    /// assert_eq!(links, vec!["https://example.com/post"]);
    /// ```
    pub fn links<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = String> + 'a {
        document
            .select(&self.anchors)
            .filter(move |anchor| self.matches(anchor))
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter(|href| href.starts_with("http"))
            .map(str::to_string)
    }

    /// Parses `html` and collects its article links
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        self.links(&document).collect()
    }

    fn matches(&self, anchor: &ElementRef<'_>) -> bool {
        let text: String = anchor.text().collect();
        self.pattern.is_match(&text)
    }
}

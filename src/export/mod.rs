//! PDF export with caching and bounded retries
//!
//! Each article is rendered from its print layout into the PDF cache. An
//! article already in the cache is never rendered again. Render failures are
//! retried with a linear backoff; when every attempt fails the article is
//! given up on and the outcome says so, so the crawl can move on.

mod renderer;

pub use renderer::{RenderError, Renderer, WkhtmltopdfRenderer};

use crate::cache::{cache_key, CacheError, ContentCache, PDF_EXTENSION};
use crate::config::ExportConfig;
use std::path::PathBuf;
use std::time::Duration;

/// What happened to one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The URL was empty; nothing was done
    Skipped,

    /// A PDF was already cached at `path`
    Cached { path: PathBuf },

    /// A new PDF was written to `path` on attempt number `attempts`
    Rendered { path: PathBuf, attempts: u32 },

    /// Every attempt failed; no PDF was produced
    Exhausted { attempts: u32, last_error: String },
}

impl ExportOutcome {
    /// True when a PDF for the article exists after the export
    pub fn has_pdf(&self) -> bool {
        matches!(self, Self::Cached { .. } | Self::Rendered { .. })
    }
}

/// Builds the print-layout URL that gets rendered
pub fn render_target(url: &str, print_query: &str) -> String {
    format!("{}{}", url.trim(), print_query)
}

/// Pause after failed attempt `attempt` (counting from 0): `2 * attempt` units
pub fn backoff_delay(attempt: u32, unit: Duration) -> Duration {
    unit.saturating_mul(attempt.saturating_mul(2))
}

/// Renders articles into a PDF cache
pub struct PdfExporter<R> {
    renderer: R,
    cache: ContentCache,
    attempts: u32,
    backoff_unit: Duration,
    render_timeout: Duration,
    print_query: String,
}

impl<R: Renderer> PdfExporter<R> {
    pub fn new(renderer: R, cache: ContentCache, config: &ExportConfig) -> Self {
        Self {
            renderer,
            cache,
            attempts: config.attempts,
            backoff_unit: config.backoff_unit(),
            render_timeout: config.render_timeout(),
            print_query: config.print_query.clone(),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// Exports `url` as a PDF unless it is empty or already cached
    ///
    /// Render failures never surface as errors; they end in
    /// [`ExportOutcome::Exhausted`]. Only a PDF directory that cannot be
    /// created is reported as `Err`. A whitespace-only URL counts as empty.
    pub async fn export(&self, url: &str) -> Result<ExportOutcome, CacheError> {
        tracing::info!("CRAWL: {}", url);
        if url.trim().is_empty() {
            return Ok(ExportOutcome::Skipped);
        }

        let target = render_target(url, &self.print_query);
        let key = cache_key(&target, PDF_EXTENSION);
        self.cache.ensure_root().await?;
        let path = self.cache.path_for(&key);

        if self.cache.contains(&key).await {
            tracing::debug!(url = %target, path = %path.display(), "PDF already cached");
            return Ok(ExportOutcome::Cached { path });
        }

        let mut last_error = String::new();
        for attempt in 0..self.attempts {
            tracing::info!("PDF: {}", path.display());

            match self.render_once(&target, &path).await {
                Ok(()) => {
                    return Ok(ExportOutcome::Rendered {
                        path,
                        attempts: attempt + 1,
                    });
                }
                Err(e) => {
                    tracing::warn!(url = %target, attempt, "ERROR: {}", e);
                    discard_partial(&path).await;
                    last_error = e.to_string();
                    tokio::time::sleep(backoff_delay(attempt, self.backoff_unit)).await;
                }
            }
        }

        tracing::error!(
            url = %target,
            "Giving up after {} render attempts: {}",
            self.attempts,
            last_error
        );
        Ok(ExportOutcome::Exhausted {
            attempts: self.attempts,
            last_error,
        })
    }

    async fn render_once(&self, target: &str, path: &std::path::Path) -> Result<(), RenderError> {
        match tokio::time::timeout(self.render_timeout, self.renderer.render(target, path)).await {
            Ok(result) => result,
            Err(_) => Err(RenderError::Timeout(self.render_timeout)),
        }
    }
}

/// Removes whatever a failed attempt left behind so it is not mistaken for
/// a cached PDF on the next run
async fn discard_partial(path: &std::path::Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!("Removed partial output {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove partial output {}: {}", path.display(), e),
    }
}

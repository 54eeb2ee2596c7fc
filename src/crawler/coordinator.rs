//! Crawler coordinator - main crawl orchestration logic
//!
//! The crawl walks index pages in ascending order starting at page 1. Each
//! page is loaded through the HTML cache, its article links are extracted,
//! and every link is exported to PDF in document order. The first page
//! without a single article link ends the crawl, as does reaching the
//! configured page cap.

use crate::cache::ContentCache;
use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::LinkExtractor;
use crate::export::{ExportOutcome, PdfExporter, Renderer, WkhtmltopdfRenderer};
use crate::CrawlError;
use std::time::Instant;

/// Totals for a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Index pages loaded, cached or not
    pub pages: u32,

    /// Article links found across all pages
    pub links: usize,

    pub rendered: usize,
    pub cached: usize,
    pub skipped: usize,

    /// Articles given up on after every render attempt failed
    pub exhausted: usize,
}

impl CrawlSummary {
    fn record(&mut self, outcome: &ExportOutcome) {
        match outcome {
            ExportOutcome::Skipped => self.skipped += 1,
            ExportOutcome::Cached { .. } => self.cached += 1,
            ExportOutcome::Rendered { .. } => self.rendered += 1,
            ExportOutcome::Exhausted { .. } => self.exhausted += 1,
        }
    }
}

/// Main crawler coordinator structure
pub struct Coordinator<R> {
    config: Config,
    fetcher: PageFetcher,
    extractor: LinkExtractor,
    exporter: PdfExporter<R>,
}

impl<R: Renderer> Coordinator<R> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `renderer` - The backend used to turn article pages into PDFs
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlError)` - The HTTP client or link pattern could not be built
    pub fn new(config: Config, renderer: R) -> Result<Self, CrawlError> {
        let html_cache = ContentCache::new(config.cache.html_dir());
        let pdf_cache = ContentCache::new(&config.cache.pdf_dir);

        let fetcher = PageFetcher::from_config(&config.fetch, html_cache)?;
        let extractor = LinkExtractor::new(&config.crawl.link_text)?;
        let exporter = PdfExporter::new(renderer, pdf_cache, &config.export);

        Ok(Self {
            config,
            fetcher,
            extractor,
            exporter,
        })
    }

    pub fn exporter(&self) -> &PdfExporter<R> {
        &self.exporter
    }

    /// Runs the main crawl loop
    ///
    /// An index page that cannot be fetched aborts the crawl with its error;
    /// pages already cached stay cached for the next run. Articles that fail
    /// to render are counted in the summary and skipped.
    pub async fn run(&self) -> Result<CrawlSummary, CrawlError> {
        let start_time = Instant::now();
        let mut summary = CrawlSummary::default();

        for page in 1..=self.config.crawl.max_page {
            let url = self.config.crawl.index_url(page);
            tracing::debug!(page, "Loading index page {}", url);

            let html = self.fetcher.load(&url).await?;
            summary.pages += 1;

            let links = self.extractor.extract(&html);
            if links.is_empty() {
                tracing::info!(page, "No article links on {}, stopping", url);
                break;
            }

            tracing::info!(page, "Found {} article links", links.len());
            summary.links += links.len();

            for link in &links {
                let outcome = self.exporter.export(link).await?;
                if let ExportOutcome::Exhausted { attempts, .. } = &outcome {
                    tracing::warn!("Skipping {} after {} failed render attempts", link, attempts);
                }
                summary.record(&outcome);
            }

            if page == self.config.crawl.max_page {
                tracing::warn!("Reached page cap {}, stopping", page);
            }
        }

        tracing::info!(
            "Crawl completed: {} pages, {} links ({} rendered, {} cached, {} failed) in {:?}",
            summary.pages,
            summary.links,
            summary.rendered,
            summary.cached,
            summary.exhausted,
            start_time.elapsed()
        );

        Ok(summary)
    }
}

/// Runs a complete crawl with the external `wkhtmltopdf` renderer
///
/// # Example
///
/// ```no_run
/// use blog_pdf::config::Config;
/// use blog_pdf::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_crawl(Config::default()).await?;
/// println!("{} PDFs rendered", summary.rendered);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlSummary, CrawlError> {
    let renderer = WkhtmltopdfRenderer::new(
        config.export.renderer.clone(),
        config.export.renderer_args.clone(),
    );
    let coordinator = Coordinator::new(config, renderer)?;
    coordinator.run().await
}

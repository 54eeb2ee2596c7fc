//! blog-pdf main entry point
//!
//! Command-line interface for the blog-to-PDF crawler.

use anyhow::Context;
use blog_pdf::config::{load_config_with_hash, Config};
use blog_pdf::crawler::run_crawl;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// blog-pdf: export a blog's articles as PDFs
///
/// Walks the paginated blog index from page 1, follows every "Read More"
/// link and renders each article's print layout to a PDF. Pages and PDFs
/// are cached on disk, so an interrupted run picks up where it left off.
#[derive(Parser, Debug)]
#[command(name = "blog-pdf")]
#[command(version)]
#[command(about = "Export a paginated blog as PDFs", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let summary = run_crawl(config).await.context("crawl failed")?;
    if summary.exhausted > 0 {
        tracing::warn!("{} articles could not be rendered", summary.exhausted);
    }

    println!("Crawled successfully!");
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("blog_pdf=info,warn"),
            1 => EnvFilter::new("blog_pdf=debug,info"),
            2 => EnvFilter::new("blog_pdf=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== blog-pdf Dry Run ===\n");

    println!("Crawl:");
    println!("  First index page: {}", config.crawl.index_url(1));
    println!("  Page cap: {}", config.crawl.max_page);
    println!("  Link text pattern: {}", config.crawl.link_text);

    println!("\nFetch:");
    println!("  User agent: {}", config.fetch.user_agent);
    println!("  Request timeout: {:?}", config.fetch.request_timeout());
    println!("  Connect timeout: {:?}", config.fetch.connect_timeout());
    println!("  Throttle: up to {:?}", config.fetch.throttle_max());

    println!("\nExport:");
    println!(
        "  Renderer: {} {}",
        config.export.renderer,
        config.export.renderer_args.join(" ")
    );
    println!("  Attempts: {}", config.export.attempts);
    println!("  Backoff unit: {:?}", config.export.backoff_unit());
    println!("  Render timeout: {:?}", config.export.render_timeout());
    println!("  Print query: {}", config.export.print_query);

    println!("\nCache:");
    println!("  HTML: {}", config.cache.html_dir().display());
    println!("  PDF: {}", config.cache.pdf_dir.display());

    println!("\n✓ Configuration is valid");
}

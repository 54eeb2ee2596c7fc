use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Index page URL template; `{page}` is replaced by the page number
pub const DEFAULT_ROOT_URL: &str = "https://jackkruse.com/blogindex/page/{page}/";

/// Last index page the crawler will ever request
pub const DEFAULT_MAX_PAGE: u32 = 99;

/// Anchor text that marks an article link
pub const DEFAULT_LINK_TEXT: &str = "Read More";

/// Render attempts per article before giving up
pub const DEFAULT_ATTEMPTS: u32 = 100;

/// Query appended to an article URL to request its print layout
pub const DEFAULT_PRINT_QUERY: &str = "?print=print";

/// Main configuration structure
///
/// Every section is optional; `Config::default()` is the configuration the
/// crawler runs with when no file is given.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub fetch: FetchConfig,
    pub export: ExportConfig,
    pub cache: CacheConfig,
}

/// Which index pages to walk and which links to follow
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CrawlConfig {
    /// Index URL template containing a `{page}` placeholder
    pub root_url: String,

    /// Highest page number to request (inclusive)
    pub max_page: u32,

    /// Regex matched against anchor text
    pub link_text: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
            max_page: DEFAULT_MAX_PAGE,
            link_text: DEFAULT_LINK_TEXT.to_string(),
        }
    }
}

impl CrawlConfig {
    /// Builds the index URL for a page number
    pub fn index_url(&self, page: u32) -> String {
        self.root_url.replace("{page}", &page.to_string())
    }
}

/// HTTP client behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FetchConfig {
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    pub request_timeout: u64,

    /// TCP connect timeout (seconds)
    pub connect_timeout: u64,

    /// Upper bound of the random pause after a network fetch (milliseconds)
    pub throttle_max_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            request_timeout: 30,
            connect_timeout: 10,
            throttle_max_ms: 5_000,
        }
    }
}

impl FetchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn throttle_max(&self) -> Duration {
        Duration::from_millis(self.throttle_max_ms)
    }
}

/// PDF rendering and retry policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExportConfig {
    /// Maximum render attempts per article
    pub attempts: u32,

    /// Backoff unit (milliseconds); attempt `i` failing sleeps `2 * i` units
    pub backoff_unit_ms: u64,

    /// Limit on a single render invocation (seconds)
    pub render_timeout: u64,

    pub print_query: String,

    /// Renderer executable
    pub renderer: String,

    /// Extra arguments passed to the renderer before the URL and output path
    pub renderer_args: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            backoff_unit_ms: 1_000,
            render_timeout: 300,
            print_query: DEFAULT_PRINT_QUERY.to_string(),
            renderer: "wkhtmltopdf".to_string(),
            renderer_args: vec!["--quiet".to_string()],
        }
    }
}

impl ExportConfig {
    pub fn backoff_unit(&self) -> Duration {
        Duration::from_millis(self.backoff_unit_ms)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout)
    }
}

/// Where cached artifacts live
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CacheConfig {
    /// HTML cache directory; the system temp directory when unset
    pub html_dir: Option<PathBuf>,

    /// PDF output directory, relative to the working directory unless absolute
    pub pdf_dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            html_dir: None,
            pdf_dir: PathBuf::from("pdf"),
        }
    }
}

impl CacheConfig {
    pub fn html_dir(&self) -> PathBuf {
        self.html_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

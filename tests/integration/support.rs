use blog_pdf::config::Config;
use blog_pdf::export::{RenderError, Renderer};
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renderer that records the URLs it is asked to render
#[derive(Default)]
pub struct RecordingRenderer {
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn always_failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    async fn render(&self, url: &str, dest: &Path) -> Result<(), RenderError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(RenderError::Other("renderer crashed".to_string()));
        }
        tokio::fs::write(dest, format!("%PDF-1.4 {}", url))
            .await
            .map_err(|e| RenderError::Other(e.to_string()))
    }
}

/// Creates a configuration pointed at the mock server, with no throttling
/// or backoff and both caches inside `dir`
pub fn create_test_config(base_url: &str, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.crawl.root_url = format!("{}/blogindex/page/{{page}}/", base_url);
    config.fetch.throttle_max_ms = 0;
    config.export.backoff_unit_ms = 0;
    config.cache.html_dir = Some(dir.path().join("html"));
    config.cache.pdf_dir = dir.path().join("pdf");
    config
}

pub fn index_path(page: u32) -> String {
    format!("/blogindex/page/{}/", page)
}

/// Index page HTML with one "Read More" anchor per link, plus some noise
pub fn index_html(links: &[&str]) -> String {
    let mut body = String::from(
        r#"<html><head><title>Blog Index</title></head><body>
        <a href="/about">About</a>
        <a href="https://example.org/elsewhere">Elsewhere</a>"#,
    );
    for link in links {
        body.push_str(&format!(
            r#"<article><h2>Post</h2><a href="{}">Read More</a></article>"#,
            link
        ));
    }
    body.push_str("</body></html>");
    body
}

/// Mounts an index page that must be requested exactly `times` times
pub async fn mount_index(server: &MockServer, page: u32, links: &[&str], times: u64) {
    Mock::given(method("GET"))
        .and(path(index_path(page)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(index_html(links))
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Mounts an index page answering with `status`
pub async fn mount_status(server: &MockServer, page: u32, status: u16, times: u64) {
    Mock::given(method("GET"))
        .and(path(index_path(page)))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .mount(server)
        .await;
}

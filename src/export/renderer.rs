//! HTML-to-PDF rendering backends

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Longest stderr excerpt kept in a [`RenderError::Failed`]
const STDERR_TAIL: usize = 512;

/// Why a single render attempt failed
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch renderer {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Renderer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Renderer produced no output at {}", .path.display())]
    MissingOutput { path: PathBuf },

    #[error("Render timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Other(String),
}

/// Renders a URL into a PDF file
///
/// Implementations are only ever invoked one at a time.
pub trait Renderer: Send + Sync {
    /// Writes the page at `url` as a PDF to `dest`
    fn render(
        &self,
        url: &str,
        dest: &Path,
    ) -> impl Future<Output = Result<(), RenderError>> + Send;
}

/// Renders by running `wkhtmltopdf [args...] <url> <dest>`
#[derive(Debug, Clone)]
pub struct WkhtmltopdfRenderer {
    program: String,
    args: Vec<String>,
}

impl WkhtmltopdfRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for WkhtmltopdfRenderer {
    fn default() -> Self {
        Self::new("wkhtmltopdf", vec!["--quiet".to_string()])
    }
}

impl Renderer for WkhtmltopdfRenderer {
    async fn render(&self, url: &str, dest: &Path) -> Result<(), RenderError> {
        // The child is killed if the caller's timeout drops this future
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .arg(dest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RenderError::Failed {
                status: output.status.to_string(),
                stderr: stderr_tail(&output.stderr),
            });
        }

        if !tokio::fs::try_exists(dest).await.unwrap_or(false) {
            return Err(RenderError::MissingOutput {
                path: dest.to_path_buf(),
            });
        }

        Ok(())
    }
}

/// Last few hundred bytes of stderr, trimmed
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    let mut start = text.len().saturating_sub(STDERR_TAIL);
    while !text.is_char_boundary(start) {
        start += 1;
    }
    text[start..].to_string()
}

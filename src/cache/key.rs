use md5::{Digest, Md5};

/// Extension for cached index and article HTML
pub const HTML_EXTENSION: &str = ".html";

/// Extension for rendered PDFs
pub const PDF_EXTENSION: &str = ".pdf";

/// Builds the cache filename for a URL: hex MD5 of the URL plus `extension`
///
/// Distinct URLs sharing a digest would share an entry. That is accepted;
/// there is no collision detection.
///
/// # Example
///
/// ```
/// use blog_pdf::cache_key;
///
/// assert_eq!(cache_key("", ".html"), "d41d8cd98f00b204e9800998ecf8427e.html");
/// ```
pub fn cache_key(url: &str, extension: &str) -> String {
    let digest = Md5::digest(url.as_bytes());
    format!("{}{}", hex::encode(digest), extension)
}

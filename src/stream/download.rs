//! Episode download and placeholder rewrite
//!
//! The catalog's video reference is an HLS playlist whose segment URLs are
//! prefixed with a `{PROXY_URL}` placeholder. It is fetched as one document,
//! stored locally, then the placeholder is substituted in place.

use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Placeholder token embedded in downloaded playlists
pub const PROXY_PLACEHOLDER: &str = "{PROXY_URL}";

/// Proxy substituted for the placeholder by default
pub const DEFAULT_PROXY_URL: &str = "https://proxy.ketsuna.com";

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Download failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Download returned status {0}")]
    Status(u16),
    #[error("File error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl DownloadError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        DownloadError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// HTTP downloader for video references
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch `uri` and write the whole body to `dest`, returning its size
    pub async fn download(&self, uri: &str, dest: &Path) -> Result<u64, DownloadError> {
        debug!(%uri, dest = %dest.display(), "downloading");

        let response = self.client.get(uri).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;

        let mut file = fs::File::create(dest)
            .await
            .map_err(|e| DownloadError::io(dest, e))?;
        file.write_all(&bytes)
            .await
            .map_err(|e| DownloadError::io(dest, e))?;
        file.flush().await.map_err(|e| DownloadError::io(dest, e))?;

        Ok(bytes.len() as u64)
    }
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace every placeholder occurrence in `content` with `proxy_url`
pub fn replace_placeholder(content: &str, proxy_url: &str) -> String {
    content.replace(PROXY_PLACEHOLDER, proxy_url)
}

/// Byte-level variant of [`replace_placeholder`], returning the new content
/// and the number of substitutions. Bytes outside the placeholder are copied
/// as is, whatever their encoding.
pub fn replace_placeholder_bytes(content: &[u8], proxy_url: &str) -> (Vec<u8>, usize) {
    let needle = PROXY_PLACEHOLDER.as_bytes();
    let mut output = Vec::with_capacity(content.len());
    let mut count = 0;
    let mut rest = content;

    while let Some(pos) = rest.windows(needle.len()).position(|w| w == needle) {
        output.extend_from_slice(&rest[..pos]);
        output.extend_from_slice(proxy_url.as_bytes());
        rest = &rest[pos + needle.len()..];
        count += 1;
    }
    output.extend_from_slice(rest);

    (output, count)
}

/// Rewrite the placeholder inside a downloaded file, in place.
///
/// Returns the number of substitutions made.
pub async fn rewrite_placeholder(path: &Path, proxy_url: &str) -> Result<usize, DownloadError> {
    let input = fs::read(path)
        .await
        .map_err(|e| DownloadError::io(path, e))?;

    let (output, count) = replace_placeholder_bytes(&input, proxy_url);

    fs::write(path, output)
        .await
        .map_err(|e| DownloadError::io(path, e))?;

    debug!(path = %path.display(), count, "placeholder rewritten");
    Ok(count)
}

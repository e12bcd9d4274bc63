//! # HTTP Download (`common::network::download`)
//!
//! File: cli/src/common/network/download.rs
//!
//! Streams an HTTP response body into a file. The body is written as it
//! arrives, so large archives are never held in memory.
//!
use crate::core::error::{Result, TfstrapError};
use anyhow::Context;
use futures_util::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Builds the HTTP client used for release downloads.
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("tfstrap/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")
}

/// Downloads `url` into `dest`, replacing any existing file.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// - the request cannot be sent or the body stream fails mid-transfer;
/// - the server answers with a non-success status (`TfstrapError::Download`);
/// - `dest` cannot be created or written.
pub async fn download_to_file(client: &reqwest::Client, url: &str, dest: &Path) -> Result<u64> {
    let file_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!("Downloading {} from {}", file_name, url);

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to request {}", url))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!(TfstrapError::Download {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let mut file = tokio::fs::File::create(dest)
        .await
        .with_context(|| format!("Failed to create {:?}", dest))?;

    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.with_context(|| format!("Failed to read response body from {}", url))?;
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write {:?}", dest))?;
        written += chunk.len() as u64;
    }
    file.sync_all()
        .await
        .with_context(|| format!("Failed to flush {:?}", dest))?;

    debug!("Downloaded {} bytes to {:?}", written, dest);
    Ok(written)
}

// --- Unit Tests ---
#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    /// Serves exactly one canned HTTP response on a loopback port and returns its base URL.
    pub(crate) async fn serve_once(response: impl AsRef<[u8]> + Send + 'static) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_ref()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}", addr)
    }

    pub(crate) fn local_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn test_download_writes_body_to_file() {
        let base = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 11\r\nConnection: close\r\n\r\nzip-payload",
        )
        .await;
        let dir = tempdir().unwrap();
        let dest = dir.path().join("terraform.zip");

        let written = download_to_file(&local_client(), &format!("{}/tf.zip", base), &dest)
            .await
            .unwrap();

        assert_eq!(written, 11);
        assert_eq!(std::fs::read(&dest).unwrap(), b"zip-payload");
    }

    #[tokio::test]
    async fn test_download_non_success_status_is_typed_error() {
        let base = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
        )
        .await;
        let dir = tempdir().unwrap();
        let dest = dir.path().join("terraform.zip");

        let err = download_to_file(&local_client(), &format!("{}/missing.zip", base), &dest)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TfstrapError>(),
            Some(TfstrapError::Download { status: 404, .. })
        ));
        assert!(!dest.exists());
    }

    #[test]
    fn test_http_client_builds() {
        assert!(http_client().is_ok());
    }
}

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider Downloads
//!
//! Fetches a provider release archive over HTTP and unpacks it into the
//! plugin directory.
//!
//! # Integrity
//!
//! Installed providers are executed later on the sole basis that they exist,
//! so a download is only accepted when:
//!
//! - the server answered `200 OK`
//! - exactly as many bytes as announced by `Content-Length` were received
//!
//! The archive is staged in a temporary file that is removed whatever the
//! outcome.

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use reqwest::{Client, StatusCode};
use std::io;
use std::path::Path;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::decompressor::ZipDecompressor;
use super::platform::Platform;
use super::provider_config::provider_url;
use crate::config::DownloaderConfig;

/// Errors that can occur while downloading a provider
#[derive(Debug, Error)]
pub enum DownloadError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server did not answer `200 OK`
    #[error("unsuccessful request to {url}: {status}")]
    UnsuccessfulRequest {
        /// Requested URL
        url: String,
        /// Status line returned
        status: String,
    },

    /// Body length differs from the announced `Content-Length`
    #[error("incorrect response size: expected {expected} bytes, but got {got} bytes")]
    IncorrectSize {
        /// Announced length
        expected: u64,
        /// Bytes received
        got: u64,
    },

    /// The staging file could not be created
    #[error("failed to open temporary file to download from {url}: {source}")]
    TempFile {
        /// URL being downloaded
        url: String,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed archive
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Archive entry pointing outside the destination directory
    #[error("archive entry escapes destination: {0}")]
    UnsafeArchiveEntry(String),
}

/// Fetches provider archives and unpacks them
#[async_trait]
pub trait ProviderDownloader: Send + Sync {
    /// Download the archive at `url` and extract it into the directory `path`
    async fn download(&self, url: &str, path: &Path) -> Result<(), DownloadError>;

    /// Archive URL of provider `name` at `version` for the running platform
    fn provider_url(&self, name: &str, version: &str) -> String {
        provider_url(name, version, &Platform::current())
    }
}

/// [`ProviderDownloader`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpProviderDownloader {
    client: Client,
    unzip: ZipDecompressor,
}

impl HttpProviderDownloader {
    /// Create a downloader with its own HTTP client
    pub fn new(config: &DownloaderConfig) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self::with_client(client))
    }

    /// Create a downloader sharing an existing HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            unzip: ZipDecompressor::new(),
        }
    }
}

#[async_trait]
impl ProviderDownloader for HttpProviderDownloader {
    async fn download(&self, url: &str, path: &Path) -> Result<(), DownloadError> {
        debug!(url, path = %path.display(), "Downloading provider");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(DownloadError::UnsuccessfulRequest {
                url: url.to_string(),
                status: status.to_string(),
            });
        }

        let archive = tempfile::Builder::new()
            .prefix("terraform-provider")
            .suffix(".zip")
            .tempfile()
            .map_err(|source| DownloadError::TempFile {
                url: url.to_string(),
                source,
            })?;

        let expected = response.content_length();
        {
            let mut file = tokio::fs::File::from_std(archive.as_file().try_clone()?);
            copy_verified(response.bytes_stream(), &mut file, expected).await?;
        }

        debug!(
            src = %archive.path().display(),
            dst = %path.display(),
            "Decompressing archive"
        );
        let unzip = self.unzip;
        let src = archive.path().to_path_buf();
        let dst = path.to_path_buf();
        tokio::task::spawn_blocking(move || unzip.decompress(&dst, &src, 0))
            .await
            .map_err(|e| DownloadError::Io(io::Error::other(e)))??;

        Ok(())
    }
}

/// Copy a body stream into `out`, checking its length against `expected`
///
/// Returns the number of bytes written. When `expected` is `None` any length
/// is accepted.
pub async fn copy_verified<S, B, E, W>(
    body: S,
    out: &mut W,
    expected: Option<u64>,
) -> Result<u64, DownloadError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    DownloadError: From<E>,
    W: AsyncWrite + Unpin,
{
    let mut body = std::pin::pin!(body);
    let mut written: u64 = 0;

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        let bytes = chunk.as_ref();
        out.write_all(bytes).await?;
        written += bytes.len() as u64;
    }
    out.flush().await?;

    match expected {
        Some(expected) if expected != written => Err(DownloadError::IncorrectSize {
            expected,
            got: written,
        }),
        _ => Ok(written),
    }
}

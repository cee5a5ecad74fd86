// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for driftctl-core
//!
//! Scripted suppliers, a normalizable resource, a recording downloader and a
//! throwaway HTTP server serving provider archives.
#![allow(dead_code)]

use async_trait::async_trait;
use std::future;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use driftctl_core::terraform::{provider_url, DownloadError, Platform, ProviderDownloader};
use driftctl_core::{
    AbstractResource, EnumerationError, NormalizeError, NormalizedResource, Resource,
    ResourceSupplier,
};

// ============================================================================
// Resources
// ============================================================================

/// Resource whose canonical form has a lower-cased identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route53Record {
    pub id: String,
    pub fail: bool,
}

impl Route53Record {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            fail: false,
        }
    }

    pub fn broken(id: &str) -> Self {
        Self {
            id: id.to_string(),
            fail: true,
        }
    }
}

impl Resource for Route53Record {
    fn terraform_id(&self) -> &str {
        &self.id
    }

    fn terraform_type(&self) -> &str {
        "aws_route53_record"
    }

    fn as_normalized(&self) -> Option<&dyn NormalizedResource> {
        Some(self)
    }
}

impl NormalizedResource for Route53Record {
    fn normalize_for_provider(&self) -> Result<Box<dyn Resource>, NormalizeError> {
        if self.fail {
            return Err(NormalizeError::new(self, "record has no zone"));
        }
        Ok(Box::new(Route53Record::new(&self.id.to_lowercase())))
    }
}

/// `(id, type)` pairs of a result set, sorted
pub fn ids(resources: &[Box<dyn Resource>]) -> Vec<(String, String)> {
    let mut ids: Vec<_> = resources
        .iter()
        .map(|r| (r.terraform_id().to_string(), r.terraform_type().to_string()))
        .collect();
    ids.sort();
    ids
}

// ============================================================================
// Suppliers
// ============================================================================

/// Supplier returning a fixed list of resources
pub struct StaticSupplier {
    name: String,
    build: Box<dyn Fn() -> Vec<Box<dyn Resource>> + Send + Sync>,
}

impl StaticSupplier {
    pub fn abstract_resources(resource_type: &str, ids: &[&str]) -> Arc<dyn ResourceSupplier> {
        let resource_type = resource_type.to_string();
        let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        Arc::new(Self {
            name: resource_type.clone(),
            build: Box::new(move || {
                ids.iter()
                    .map(|id| {
                        Box::new(AbstractResource::new(id.as_str(), resource_type.as_str()))
                            as Box<dyn Resource>
                    })
                    .collect()
            }),
        })
    }

    pub fn from_fn<F>(name: &str, build: F) -> Arc<dyn ResourceSupplier>
    where
        F: Fn() -> Vec<Box<dyn Resource>> + Send + Sync + 'static,
    {
        Arc::new(Self {
            name: name.to_string(),
            build: Box::new(build),
        })
    }
}

#[async_trait]
impl ResourceSupplier for StaticSupplier {
    async fn resources(&self) -> Result<Vec<Box<dyn Resource>>, EnumerationError> {
        Ok((self.build)())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Supplier that always fails with the given error
pub struct FailingSupplier(pub EnumerationError);

impl FailingSupplier {
    pub fn access_denied(resource_type: &str) -> Arc<dyn ResourceSupplier> {
        Arc::new(Self(EnumerationError::AccessDenied {
            resource_type: resource_type.to_string(),
            listed_type: resource_type.to_string(),
        }))
    }

    pub fn failed(resource_type: &str, message: &str) -> Arc<dyn ResourceSupplier> {
        Arc::new(Self(EnumerationError::Failed {
            resource_type: resource_type.to_string(),
            message: message.to_string(),
        }))
    }
}

#[async_trait]
impl ResourceSupplier for FailingSupplier {
    async fn resources(&self) -> Result<Vec<Box<dyn Resource>>, EnumerationError> {
        Err(self.0.clone())
    }

    fn name(&self) -> &str {
        self.0.resource_type()
    }
}

/// Supplier that never answers
pub struct PendingSupplier;

#[async_trait]
impl ResourceSupplier for PendingSupplier {
    async fn resources(&self) -> Result<Vec<Box<dyn Resource>>, EnumerationError> {
        future::pending().await
    }

    fn name(&self) -> &str {
        "pending"
    }
}

/// Supplier tracking how many suppliers sharing its gauge run at once
pub struct GaugedSupplier {
    pub in_flight: Arc<AtomicUsize>,
    pub peak: Arc<AtomicUsize>,
}

#[async_trait]
impl ResourceSupplier for GaugedSupplier {
    async fn resources(&self) -> Result<Vec<Box<dyn Resource>>, EnumerationError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "gauged"
    }
}

// ============================================================================
// Downloads
// ============================================================================

/// What a [`RecordingDownloader`] does when called
#[derive(Debug, Clone)]
pub enum DownloadBehaviour {
    /// Create the named file inside the target directory
    WriteBinary(String),
    /// Succeed without touching the filesystem
    Nothing,
    /// Fail with a short-read error
    ShortRead,
}

/// Downloader double recording every call
pub struct RecordingDownloader {
    behaviour: DownloadBehaviour,
    mirror: Option<String>,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl RecordingDownloader {
    pub fn new(behaviour: DownloadBehaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            mirror: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Double resolving provider URLs against `mirror` instead of the release server
    pub fn with_mirror(behaviour: DownloadBehaviour, mirror: &str) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            mirror: Some(mirror.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderDownloader for RecordingDownloader {
    async fn download(&self, url: &str, path: &Path) -> Result<(), DownloadError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), path.to_path_buf()));

        match &self.behaviour {
            DownloadBehaviour::WriteBinary(name) => {
                tokio::fs::create_dir_all(path).await?;
                tokio::fs::write(path.join(name), b"provider").await?;
                Ok(())
            }
            DownloadBehaviour::Nothing => Ok(()),
            DownloadBehaviour::ShortRead => Err(DownloadError::IncorrectSize {
                expected: 1024,
                got: 12,
            }),
        }
    }

    fn provider_url(&self, name: &str, version: &str) -> String {
        match &self.mirror {
            Some(mirror) => format!("{}/{}/{}.zip", mirror, name, version),
            None => provider_url(name, version, &Platform::current()),
        }
    }
}

/// Zip archive holding the given files
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        zip.start_file(*name, SimpleFileOptions::default().unix_permissions(0o755))
            .unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Raw HTTP/1.1 response announcing `declared_len` bytes of body
pub fn http_response(status: &str, declared_len: usize, body: &[u8]) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status, declared_len
    )
    .into_bytes();
    response.extend_from_slice(body);
    response
}

/// Local HTTP server answering every request with the same raw response
pub struct TestServer {
    pub base_url: String,
    pub hits: Arc<AtomicUsize>,
}

impl TestServer {
    pub async fn start(response: Vec<u8>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let response = response.clone();
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    loop {
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        if n == 0 {
                            break;
                        }
                        request.extend_from_slice(&buf[..n]);
                        if request.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    let _ = socket.write_all(&response).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { base_url, hits }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// HTTP client that ignores proxy settings from the environment
pub fn local_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

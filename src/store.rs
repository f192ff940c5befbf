// src/store.rs
//
// Capability seam over the remote store's client library. The adapter only
// needs four things from Azure: build a service-level client, derive
// container- and object-scoped clients from it, probe object metadata, and
// download an object's full content. Keeping those behind object-safe traits
// lets tests substitute an in-memory store for the real SDK.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

use crate::config::AbfssConfig;
use crate::error::Result;

/// Minimal properties surfaced by a metadata probe.
#[derive(Debug, Clone)]
pub struct FileProperties {
    pub content_length: u64,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

/// Builds the service-level client from configuration.
///
/// Injected into [`crate::AbfssFileSystem`] so tests can swap the Azure SDK
/// for a fake store; the default provider is
/// [`crate::azure_client::AzureClientProvider`].
pub trait ClientProvider: Send + Sync {
    fn build(&self, conf: &AbfssConfig) -> Result<Arc<dyn ServiceClient>>;
}

/// Root client for one storage account, from which container- and
/// object-scoped clients are derived. Derivation is local; no I/O.
pub trait ServiceClient: Send + Sync {
    fn file_client(&self, container: &str, path: &str) -> Box<dyn FileClient>;
    fn file_system_client(&self, container: &str) -> Box<dyn FileSystemClient>;
}

/// Client scoped to one container.
pub trait FileSystemClient: Send + Sync {
    fn container(&self) -> &str;
    fn file_client(&self, path: &str) -> Box<dyn FileClient>;
}

/// Client scoped to one object.
#[async_trait]
pub trait FileClient: Send + Sync {
    /// Metadata probe (HEAD-like). Fails with
    /// [`crate::AbfssError::NotFound`] when the object does not exist.
    async fn properties(&self) -> Result<FileProperties>;

    /// Initiate a download, reporting the total size up front.
    async fn open_read(&self) -> Result<Box<dyn DownloadStream>>;
}

/// An initiated download: total size plus the (not yet transferred) body.
#[async_trait]
pub trait DownloadStream: Send + Sync {
    /// Remote-reported total content length.
    fn size(&self) -> u64;

    /// Drain the whole body into one buffer. Full-object download by design;
    /// there is no chunked or range read path in this adapter.
    async fn read_all(&mut self) -> Result<Bytes>;
}

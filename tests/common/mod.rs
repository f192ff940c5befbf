// tests/common/mod.rs
//
// In-memory mock of the store traits so the adapter and file-handle tests
// are deterministic and do not need an Azure account. The mock counts
// service-client constructions, metadata probes and full-body downloads so
// tests can assert on caching behavior.

#![allow(dead_code)] // not every test binary uses every helper

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use abfss_fs::{
    AbfssConfig, AbfssError, AbfssFileSystem, ClientProvider, DownloadStream, FileClient,
    FileProperties, FileSystemClient, Result, ServiceClient, STORAGE_ACCOUNT_KEY,
    STORAGE_ACCOUNT_NAME,
};

#[derive(Clone, Default)]
pub struct MockStore {
    objects: Arc<Mutex<HashMap<String, Bytes>>>,
    constructions: Arc<AtomicUsize>,
    downloads: Arc<AtomicUsize>,
    probes: Arc<AtomicUsize>,
    probe_outage: Arc<Mutex<bool>>,
    construct_failures: Arc<AtomicUsize>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object under `container/path`.
    pub fn insert(&self, container: &str, path: &str, body: impl Into<Bytes>) {
        self.objects
            .lock()
            .unwrap()
            .insert(format!("{container}/{path}"), body.into());
    }

    /// Make every subsequent probe fail with a generic transport error.
    pub fn set_probe_outage(&self, outage: bool) {
        *self.probe_outage.lock().unwrap() = outage;
    }

    /// Make the next `n` service-client constructions fail.
    pub fn fail_constructions(&self, n: usize) {
        self.construct_failures.store(n, Ordering::SeqCst);
    }

    pub fn construction_count(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    pub fn download_count(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    fn get(&self, key: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(key).cloned()
    }
}

pub struct MockProvider {
    store: MockStore,
}

impl MockProvider {
    pub fn new(store: MockStore) -> Box<Self> {
        Box::new(Self { store })
    }
}

impl ClientProvider for MockProvider {
    fn build(&self, _conf: &AbfssConfig) -> Result<Arc<dyn ServiceClient>> {
        self.store.constructions.fetch_add(1, Ordering::SeqCst);
        let remaining = self.store.construct_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.store
                .construct_failures
                .store(remaining - 1, Ordering::SeqCst);
            return Err(AbfssError::transport(std::io::Error::other(
                "simulated endpoint outage",
            )));
        }
        Ok(Arc::new(MockServiceClient {
            store: self.store.clone(),
        }))
    }
}

pub struct MockServiceClient {
    store: MockStore,
}

impl ServiceClient for MockServiceClient {
    fn file_client(&self, container: &str, path: &str) -> Box<dyn FileClient> {
        Box::new(MockFileClient {
            store: self.store.clone(),
            key: format!("{container}/{path}"),
            path: path.to_string(),
        })
    }

    fn file_system_client(&self, container: &str) -> Box<dyn FileSystemClient> {
        Box::new(MockFileSystemClient {
            store: self.store.clone(),
            container: container.to_string(),
        })
    }
}

pub struct MockFileSystemClient {
    store: MockStore,
    container: String,
}

impl FileSystemClient for MockFileSystemClient {
    fn container(&self) -> &str {
        &self.container
    }

    fn file_client(&self, path: &str) -> Box<dyn FileClient> {
        Box::new(MockFileClient {
            store: self.store.clone(),
            key: format!("{}/{}", self.container, path),
            path: path.to_string(),
        })
    }
}

pub struct MockFileClient {
    store: MockStore,
    key: String,
    path: String,
}

#[async_trait]
impl FileClient for MockFileClient {
    async fn properties(&self) -> Result<FileProperties> {
        self.store.probes.fetch_add(1, Ordering::SeqCst);
        if *self.store.probe_outage.lock().unwrap() {
            return Err(AbfssError::transport(std::io::Error::other(
                "simulated probe failure",
            )));
        }
        match self.store.get(&self.key) {
            Some(body) => Ok(FileProperties {
                content_length: body.len() as u64,
                etag: Some("\"mock-etag\"".to_string()),
                last_modified: None,
            }),
            None => Err(AbfssError::NotFound(self.path.clone())),
        }
    }

    async fn open_read(&self) -> Result<Box<dyn DownloadStream>> {
        let props = self.properties().await?;
        Ok(Box::new(MockDownload {
            store: self.store.clone(),
            key: self.key.clone(),
            size: props.content_length,
        }))
    }
}

pub struct MockDownload {
    store: MockStore,
    key: String,
    size: u64,
}

#[async_trait]
impl DownloadStream for MockDownload {
    fn size(&self) -> u64 {
        self.size
    }

    async fn read_all(&mut self) -> Result<Bytes> {
        self.store.downloads.fetch_add(1, Ordering::SeqCst);
        self.store
            .get(&self.key)
            .ok_or_else(|| AbfssError::NotFound(self.key.clone()))
    }
}

/// An adapter wired to a fresh mock store with valid configuration.
pub fn mock_fs() -> (AbfssFileSystem, MockStore) {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = MockStore::new();
    let fs = AbfssFileSystem::with_provider(MockProvider::new(store.clone()));
    let mut conf = AbfssConfig::new();
    conf.set(STORAGE_ACCOUNT_NAME, "lakeacct");
    conf.set(STORAGE_ACCOUNT_KEY, "0123abcd");
    fs.set_conf(conf);
    (fs, store)
}

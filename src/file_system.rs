// src/file_system.rs
//
// The store adapter: bridges generic file-system operations onto the remote
// store client, with exactly one shared service client per adapter. The
// process-wide instance lives behind a OnceLock; tests construct their own
// instances with an injected provider instead of touching the global.

use std::sync::{Arc, OnceLock, RwLock};

use log::{debug, error, warn};
use tokio::sync::OnceCell;

use crate::azure_client::AzureClientProvider;
use crate::config::{AbfssConfig, STORAGE_ACCOUNT_NAME};
use crate::error::{AbfssError, Result};
use crate::file::{AbfssFile, OpenMode};
use crate::store::{ClientProvider, FileClient, FileProperties, FileSystemClient, ServiceClient};
use crate::uri::parse_abfss_url;

static INSTANCE: OnceLock<AbfssFileSystem> = OnceLock::new();

pub struct AbfssFileSystem {
    provider: Box<dyn ClientProvider>,
    conf: RwLock<Option<AbfssConfig>>,
    // Lazily populated, never invalidated. If credentials rotate, the
    // process must be restarted; there is no refresh path.
    service: OnceCell<Arc<dyn ServiceClient>>,
}

impl AbfssFileSystem {
    /// The process-wide instance, backed by the Azure provider. First
    /// construction wins; every later call returns the same adapter.
    pub fn instance() -> &'static AbfssFileSystem {
        INSTANCE.get_or_init(|| AbfssFileSystem::with_provider(Box::new(AzureClientProvider)))
    }

    /// A standalone adapter with an injected provider. Used by tests and by
    /// callers that want to avoid process-wide state.
    pub fn with_provider(provider: Box<dyn ClientProvider>) -> Self {
        Self {
            provider,
            conf: RwLock::new(None),
            service: OnceCell::new(),
        }
    }

    /// Replace the configuration. No validation; missing settings surface
    /// at first client construction.
    pub fn set_conf(&self, conf: AbfssConfig) {
        let mut slot = self.conf.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(conf);
    }

    fn conf_snapshot(&self) -> Option<AbfssConfig> {
        self.conf.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The cached service client, constructed on first use. Concurrent first
    /// calls construct at most once; a failed construction leaves the cache
    /// unset so the next call retries.
    pub async fn service_client(&self) -> Result<Arc<dyn ServiceClient>> {
        let client = self
            .service
            .get_or_try_init(|| async {
                let conf = self
                    .conf_snapshot()
                    .ok_or(AbfssError::Config(STORAGE_ACCOUNT_NAME))?;
                self.provider
                    .build(&conf)
                    .inspect_err(|e| error!("abfss service client construction failed: {e}"))
            })
            .await?;
        Ok(Arc::clone(client))
    }

    /// Resolve `path` and derive a per-object client from the shared service
    /// client.
    ///
    /// The account segment of the URL is not cross-checked against the
    /// account the service client was built for; mixing accounts within one
    /// adapter is unsupported. A mismatch is logged, not corrected.
    pub async fn file_client(&self, path: &str) -> Result<Box<dyn FileClient>> {
        let loc = parse_abfss_url(path)?;
        let service = self.service_client().await?;
        if let Some(conf) = self.conf_snapshot() {
            if let Some(account) = conf.get(STORAGE_ACCOUNT_NAME) {
                if loc.account != account {
                    warn!(
                        "abfss url account '{}' differs from configured account '{}'",
                        loc.account, account
                    );
                }
            }
        }
        Ok(service.file_client(&loc.container, &loc.path))
    }

    /// A per-container client from the same shared service client.
    pub async fn file_system_client(&self, container: &str) -> Result<Box<dyn FileSystemClient>> {
        let service = self.service_client().await?;
        Ok(service.file_system_client(container))
    }

    /// Probe whether `path` exists. Not-found becomes `false`; every other
    /// probe failure is logged and re-raised.
    pub async fn exists(&self, path: &str) -> Result<bool> {
        debug!("looking for abfss path {path}");
        let client = self.file_client(path).await?;
        match client.properties().await {
            Ok(_) => Ok(true),
            Err(AbfssError::NotFound(_)) => Ok(false),
            Err(e) => {
                error!("abfss probe for '{path}' failed: {e}");
                Err(e)
            }
        }
    }

    /// Open a file handle. No implicit existence check; failures surface
    /// from handle construction.
    pub async fn open(&self, path: &str, mode: OpenMode) -> Result<AbfssFile> {
        AbfssFile::open(self, path, mode).await
    }

    /// Not implemented by this adapter.
    pub fn stat(&self, _path: &str) -> Result<FileProperties> {
        Err(AbfssError::Unsupported("stat"))
    }
}

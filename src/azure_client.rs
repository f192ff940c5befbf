// src/azure_client.rs
//
// Azure binding for the store traits, built on azure_storage_blobs with a
// shared-key credential. ADLS Gen2 objects are addressed as blobs; the
// service endpoint is the account's DFS endpoint carried as a custom cloud
// location.

use std::sync::Arc;

use azure_core::StatusCode;
use azure_core::auth::Secret;
use azure_storage::{CloudLocation, StorageCredentials};
use azure_storage_blobs::prelude::{BlobClient, BlobServiceClient, ClientBuilder, ContainerClient};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;

use crate::config::AbfssConfig;
use crate::error::{AbfssError, Result};
use crate::store::{
    ClientProvider, DownloadStream, FileClient, FileProperties, FileSystemClient, ServiceClient,
};

/// Public DFS endpoint for an account name.
fn account_url_from_account(account: &str) -> String {
    format!("https://{}.dfs.core.windows.net", account)
}

/// Narrow an SDK failure: HTTP 404 means the object is absent, everything
/// else is a transport error with the cause preserved.
fn classify(path: &str, err: azure_core::Error) -> AbfssError {
    if err
        .as_http_error()
        .is_some_and(|e| e.status() == StatusCode::NotFound)
    {
        AbfssError::NotFound(path.to_string())
    } else {
        AbfssError::transport(err)
    }
}

/// Default [`ClientProvider`]: builds the blob service client from the DFS
/// endpoint and the configured account key.
pub struct AzureClientProvider;

impl ClientProvider for AzureClientProvider {
    fn build(&self, conf: &AbfssConfig) -> Result<Arc<dyn ServiceClient>> {
        let account = conf.account_name()?.to_string();
        let key = conf.account_key()?.to_string();
        let credentials = StorageCredentials::access_key(account.clone(), Secret::new(key));
        let location = CloudLocation::Custom {
            uri: account_url_from_account(&account),
            account,
        };
        let service = ClientBuilder::with_location(location, credentials).blob_service_client();
        Ok(Arc::new(AzureServiceClient { service }))
    }
}

pub struct AzureServiceClient {
    service: BlobServiceClient,
}

impl ServiceClient for AzureServiceClient {
    fn file_client(&self, container: &str, path: &str) -> Box<dyn FileClient> {
        Box::new(AzureFileClient {
            blob: self.service.container_client(container).blob_client(path),
            path: path.to_string(),
        })
    }

    fn file_system_client(&self, container: &str) -> Box<dyn FileSystemClient> {
        Box::new(AzureFileSystemClient {
            client: self.service.container_client(container),
            container: container.to_string(),
        })
    }
}

pub struct AzureFileSystemClient {
    client: ContainerClient,
    container: String,
}

impl FileSystemClient for AzureFileSystemClient {
    fn container(&self) -> &str {
        &self.container
    }

    fn file_client(&self, path: &str) -> Box<dyn FileClient> {
        Box::new(AzureFileClient {
            blob: self.client.blob_client(path),
            path: path.to_string(),
        })
    }
}

pub struct AzureFileClient {
    blob: BlobClient,
    path: String,
}

#[async_trait]
impl FileClient for AzureFileClient {
    async fn properties(&self) -> Result<FileProperties> {
        let resp = self
            .blob
            .get_properties()
            .await
            .map_err(|e| classify(&self.path, e))?;
        Ok(FileProperties {
            content_length: resp.blob.properties.content_length,
            etag: Some(resp.blob.properties.etag.to_string()),
            last_modified: Some(resp.blob.properties.last_modified.to_string()),
        })
    }

    async fn open_read(&self) -> Result<Box<dyn DownloadStream>> {
        // The size is captured from a probe before the body is transferred;
        // the body itself is not pulled until `read_all`.
        let props = self.properties().await?;
        Ok(Box::new(AzureDownload {
            blob: self.blob.clone(),
            path: self.path.clone(),
            size: props.content_length,
        }))
    }
}

pub struct AzureDownload {
    blob: BlobClient,
    path: String,
    size: u64,
}

#[async_trait]
impl DownloadStream for AzureDownload {
    fn size(&self) -> u64 {
        self.size
    }

    async fn read_all(&mut self) -> Result<Bytes> {
        let mut stream = self.blob.get().into_stream();
        let mut body = Vec::with_capacity(self.size as usize);
        while let Some(chunk) = stream.next().await {
            let resp = chunk.map_err(|e| classify(&self.path, e))?;
            let data = resp
                .data
                .collect()
                .await
                .map_err(|e| classify(&self.path, e))?;
            body.extend_from_slice(&data);
        }
        Ok(Bytes::from(body))
    }
}

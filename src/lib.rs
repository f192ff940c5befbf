// src/lib.rs
//
// Crate root — public re-exports.
//
// abfss-fs exposes Azure Data Lake Storage Gen2 ("abfss://" URLs) through a
// small file-system-like surface: existence checks and line-oriented reads
// over fully buffered objects. All I/O, auth and retry behavior belongs to
// the Azure SDK underneath; this crate only resolves URLs, caches one
// service client per adapter, and hands out per-path file handles.

pub mod azure_client;
pub mod config;
pub mod error;
pub mod file;
pub mod file_system;
pub mod store;
pub mod uri;

pub use azure_client::AzureClientProvider;
pub use config::{AbfssConfig, STORAGE_ACCOUNT_KEY, STORAGE_ACCOUNT_NAME};
pub use error::{AbfssError, Result};
pub use file::{AbfssFile, OpenMode};
pub use file_system::AbfssFileSystem;
pub use store::{
    ClientProvider, DownloadStream, FileClient, FileProperties, FileSystemClient, ServiceClient,
};
pub use uri::{AbfssLocation, parse_abfss_url};

// src/config.rs
//
// Externally supplied configuration for the adapter. Only two settings are
// consumed: the storage account name and its access key. Nothing is
// validated up front; an absent setting is tolerated until the service
// client is first constructed.

use std::collections::HashMap;
use std::env;

use crate::error::{AbfssError, Result};

/// Setting name for the storage account.
pub const STORAGE_ACCOUNT_NAME: &str = "abfss_storage_account_name";
/// Setting name for the storage account access key.
pub const STORAGE_ACCOUNT_KEY: &str = "abfss_storage_account_key";

/// A mapping of named settings, set once by the caller before any adapter
/// operation.
#[derive(Debug, Clone, Default)]
pub struct AbfssConfig {
    settings: HashMap<String, String>,
}

impl AbfssConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the process environment (a `.env` file is honored
    /// when present): `ABFSS_STORAGE_ACCOUNT_NAME` / `ABFSS_STORAGE_ACCOUNT_KEY`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut conf = Self::new();
        if let Ok(v) = env::var("ABFSS_STORAGE_ACCOUNT_NAME") {
            conf.set(STORAGE_ACCOUNT_NAME, v);
        }
        if let Ok(v) = env::var("ABFSS_STORAGE_ACCOUNT_KEY") {
            conf.set(STORAGE_ACCOUNT_KEY, v);
        }
        conf
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// The configured account name, required at first client construction.
    pub fn account_name(&self) -> Result<&str> {
        self.get(STORAGE_ACCOUNT_NAME)
            .ok_or(AbfssError::Config(STORAGE_ACCOUNT_NAME))
    }

    /// The configured access key, required at first client construction.
    pub fn account_key(&self) -> Result<&str> {
        self.get(STORAGE_ACCOUNT_KEY)
            .ok_or(AbfssError::Config(STORAGE_ACCOUNT_KEY))
    }
}

impl From<HashMap<String, String>> for AbfssConfig {
    fn from(settings: HashMap<String, String>) -> Self {
        Self { settings }
    }
}

impl FromIterator<(String, String)> for AbfssConfig {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            settings: iter.into_iter().collect(),
        }
    }
}

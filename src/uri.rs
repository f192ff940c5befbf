// src/uri.rs
//! abfss URL resolution.
//!
//! Maps `abfss:/{container}@{account}.dfs.core.windows.net/{path}` to its
//! (container, account, path) triple. The pattern is the legacy one: a single
//! leading slash after the scheme colon, matched with search semantics. A
//! conventionally double-slashed `abfss://` URL does not match, and that is
//! load-bearing for compatibility with existing metadata.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AbfssError, Result};

static ABFSS_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"abfss:/(\w+)@([\w.]+).dfs.core.windows.net/([\w\-_/.]+)").unwrap());

/// A resolved abfss URL: container, storage account and path within the
/// container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbfssLocation {
    pub container: String,
    pub account: String,
    pub path: String,
}

/// Resolve an abfss URL into an [`AbfssLocation`].
///
/// Pure and deterministic; fails with [`AbfssError::Format`] when the input
/// is not a recognized remote-store URL.
pub fn parse_abfss_url(url: &str) -> Result<AbfssLocation> {
    let caps = ABFSS_URL_RE
        .captures(url)
        .ok_or_else(|| AbfssError::Format(url.to_string()))?;
    Ok(AbfssLocation {
        container: caps[1].to_string(),
        account: caps[2].to_string(),
        path: caps[3].to_string(),
    })
}

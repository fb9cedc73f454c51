//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading, allow-list parsing and fixed gate constants"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::storage::StorageScope;

/// Environment variable holding the comma-separated access codes
pub const ACCESS_CODES_ENV: &str = "FG_ACCESS_CODES";

/// Query parameter carrying the access code
pub const CODE_PARAM: &str = "fg_code";
/// Query parameter carrying the signing token (accepted, not verified)
pub const SIGNATURE_PARAM: &str = "fg_sig";
/// Query parameter carrying the link timestamp (accepted, not verified)
pub const TIMESTAMP_PARAM: &str = "fg_ts";

/// Every parameter consumed by a URL grant, in the order they are stripped
pub const GATE_PARAMS: [&str; 3] = [CODE_PARAM, SIGNATURE_PARAM, TIMESTAMP_PARAM];

/// Session-storage key holding the accepted access code
pub const SESSION_CODE_KEY: &str = "fg_access_code";

/// Default project config file name
pub const CONFIG_FILE: &str = ".fg.config.json";

/// @acp:summary "Immutable set of accepted access codes"
///
/// Built once at process start. An empty list disables the gate.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    codes: Arc<HashSet<String>>,
}

impl AllowList {
    /// Build from individual codes; blank entries are dropped
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        Self {
            codes: Arc::new(codes),
        }
    }

    /// @acp:summary "Parse the comma-separated environment format"
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Exact, case-sensitive membership
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }
}

/// @acp:summary "Project configuration file (.fg.config.json)"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Access codes used when the environment variable is not set
    #[serde(default)]
    pub access_codes: Vec<String>,

    /// Directory holding the file-backed storage areas
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_codes: Vec::new(),
            storage_dir: default_storage_dir(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".fg")
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Resolve the effective allow-list"
    ///
    /// A value taken from the environment wins over the file, even when it
    /// is empty: setting `FG_ACCESS_CODES=""` disables the gate.
    pub fn allow_list(&self, from_env: Option<&str>) -> AllowList {
        match from_env {
            Some(raw) => AllowList::parse(raw),
            None => AllowList::new(&self.access_codes),
        }
    }

    /// File backing the storage area for `scope`
    pub fn storage_path(&self, scope: StorageScope) -> PathBuf {
        self.storage_dir.join(format!("{}.json", scope))
    }

    pub fn session_path(&self) -> PathBuf {
        self.storage_path(StorageScope::Session)
    }

    pub fn local_path(&self) -> PathBuf {
        self.storage_path(StorageScope::Local)
    }
}

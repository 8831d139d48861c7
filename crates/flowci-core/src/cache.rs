use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde_json::Value;
use thiserror::Error;

/// The collections the editor reads from and writes to the local cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Flows,
    PluginCatalog,
    ConnectedAccount,
}

impl CacheKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flows => "flows",
            Self::PluginCatalog => "plugins",
            Self::ConnectedAccount => "account",
        }
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("could not resolve a cache directory for flowci")]
    CacheDirectoryUnavailable,
    #[error("failed to read cache entry '{key}' at {path}: {source}")]
    Read {
        key: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse cache entry '{key}' at {path}: {source}")]
    Parse {
        key: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize cache entry '{key}': {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write cache entry '{key}' at {path}: {source}")]
    Write {
        key: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read-store used to carry previously fetched collections between sessions.
pub trait CacheStore {
    fn get(&self, key: CacheKey) -> Result<Option<Value>, CacheError>;
    fn set(&self, key: CacheKey, value: &Value) -> Result<(), CacheError>;
}

/// One JSON document per key under the user cache directory. Writes go
/// through a temp file and a rename so a crash never leaves a partial entry.
#[derive(Debug)]
pub struct JsonFileCache {
    root: PathBuf,
}

impl JsonFileCache {
    pub fn open_default() -> Result<Self, CacheError> {
        let dirs =
            ProjectDirs::from("", "", "flowci").ok_or(CacheError::CacheDirectoryUnavailable)?;
        Ok(Self {
            root: dirs.cache_dir().to_path_buf(),
        })
    }

    pub fn at_root(root: PathBuf) -> Self {
        Self { root }
    }

    fn entry_path(&self, key: CacheKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

impl CacheStore for JsonFileCache {
    fn get(&self, key: CacheKey) -> Result<Option<Value>, CacheError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).map_err(|source| CacheError::Read {
            key: key.as_str(),
            path: path.clone(),
            source,
        })?;

        let value = serde_json::from_str(&raw).map_err(|source| CacheError::Parse {
            key: key.as_str(),
            path,
            source,
        })?;

        Ok(Some(value))
    }

    fn set(&self, key: CacheKey, value: &Value) -> Result<(), CacheError> {
        fs::create_dir_all(&self.root).map_err(|source| CacheError::Write {
            key: key.as_str(),
            path: self.root.clone(),
            source,
        })?;

        let serialized = serde_json::to_string(value).map_err(|source| CacheError::Serialize {
            key: key.as_str(),
            source,
        })?;

        let path = self.entry_path(key);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, serialized).map_err(|source| CacheError::Write {
            key: key.as_str(),
            path: temp_path.clone(),
            source,
        })?;

        fs::rename(&temp_path, &path).map_err(|source| CacheError::Write {
            key: key.as_str(),
            path,
            source,
        })?;

        Ok(())
    }
}

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::cache::{CacheError, CacheKey, CacheStore};
use crate::flow::{ConnectedAccount, Flow, Plugin};

/// The plugin catalog as persisted in the cache, stamped with the time it was
/// last fetched from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginCatalog {
    pub fetched_at: String,
    pub plugins: Vec<Plugin>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("flow '{name}' was not found in the cached flow list")]
    FlowNotFound { name: String },
    #[error("cached '{key}' collection does not match the expected shape: {source}")]
    MalformedCollection {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Cache(#[from] CacheError),
}

fn decode_entry<T: DeserializeOwned>(key: CacheKey, value: Value) -> Result<T, SnapshotError> {
    serde_json::from_value(value).map_err(|source| SnapshotError::MalformedCollection {
        key: key.as_str(),
        source,
    })
}

/// Cached flow list, or empty when nothing has been fetched yet.
pub fn load_flows(cache: &dyn CacheStore) -> Result<Vec<Flow>, SnapshotError> {
    match cache.get(CacheKey::Flows)? {
        Some(value) => decode_entry(CacheKey::Flows, value),
        None => Ok(Vec::new()),
    }
}

pub fn load_account(cache: &dyn CacheStore) -> Result<Option<ConnectedAccount>, SnapshotError> {
    match cache.get(CacheKey::ConnectedAccount)? {
        Some(value) => Ok(Some(decode_entry(CacheKey::ConnectedAccount, value)?)),
        None => Ok(None),
    }
}

pub fn load_catalog(cache: &dyn CacheStore) -> Result<Option<PluginCatalog>, SnapshotError> {
    match cache.get(CacheKey::PluginCatalog)? {
        Some(value) => Ok(Some(decode_entry(CacheKey::PluginCatalog, value)?)),
        None => Ok(None),
    }
}

/// First flow whose name matches exactly. A miss is a typed error: the editor
/// must refuse to open rather than proceed with a partial flow.
pub fn find_flow<'a>(flows: &'a [Flow], name: &str) -> Result<&'a Flow, SnapshotError> {
    flows
        .iter()
        .find(|flow| flow.name == name)
        .ok_or_else(|| SnapshotError::FlowNotFound {
            name: name.to_string(),
        })
}

/// Branch list of the flow's repository, or empty when no account is
/// connected or the repository is not in the account's list.
pub fn branches_for(flow: &Flow, account: Option<&ConnectedAccount>) -> Vec<String> {
    let Some(account) = account else {
        return Vec::new();
    };

    account
        .github_repos
        .iter()
        .find(|repo| repo.id == flow.repo_id)
        .map(|repo| repo.branches.clone())
        .unwrap_or_default()
}

/// Materializes the flow's plugin names against the catalog, preserving the
/// flow's order. Names with no catalog match are skipped.
pub fn plugins_for(flow: &Flow, catalog: &[Plugin]) -> Vec<Plugin> {
    flow.plugins
        .iter()
        .filter_map(|name| {
            catalog
                .iter()
                .find(|plugin| plugin.script_name == *name)
                .cloned()
        })
        .collect()
}

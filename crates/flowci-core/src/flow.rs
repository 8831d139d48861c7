use serde::{Deserialize, Serialize};

/// A CI pipeline configuration bound to one source repository. Field names on
/// the wire are camelCase to match the backend API and previously cached data.
///
/// A `Flow` is never mutated in place: every edit assembles a new value from
/// the current editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    /// Assigned by the backend; absent until the first successful creation.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub user_email: String,
    pub repo_origin: String,
    pub repo_id: i64,
    pub hook_id: i64,
    pub platform: String,
    pub version: String,
    /// Branches whose push events trigger this flow, in selection order.
    #[serde(default)]
    pub trigger_push: Vec<String>,
    /// Plugin script names in execution order.
    #[serde(default)]
    pub plugins: Vec<String>,
    /// Encoded environment-variable tokens, one per variable name.
    #[serde(default)]
    pub need_env: Vec<String>,
}

/// A unit of pipeline work from the plugin catalog, identified by its script
/// name. Descriptive metadata is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    pub script_name: String,
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Plugin {
    pub fn named(script_name: &str) -> Self {
        Self {
            script_name: script_name.to_string(),
            metadata: serde_json::Map::new(),
        }
    }
}

/// Payload for the destructive delete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFlowRequest {
    pub id: String,
    pub hook_id: i64,
    pub repo_id: i64,
}

/// The connected source-hosting account, as cached after authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedAccount {
    #[serde(default)]
    pub github_repos: Vec<AccountRepo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRepo {
    pub id: i64,
    // The backend spells this field "branchs"; keep the wire name.
    #[serde(rename = "branchs", default)]
    pub branches: Vec<String>,
}

use anyhow::{Context, Result};

use flowci_core::env_token::{self, EnvTokenError};
use flowci_core::flow::{ConnectedAccount, Flow, Plugin};
use flowci_core::ordered_set::OrderedUniqueSet;
use flowci_core::snapshot;

use crate::App;

/// One decoded environment variable owned by the editor. Names are validated
/// before an entry is created, so re-encoding cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub name: String,
    pub value: String,
}

impl EnvEntry {
    fn token(&self) -> String {
        env_token::join(&self.name, &self.value)
    }
}

fn plugin_matches(left: &Plugin, right: &Plugin) -> bool {
    left.script_name == right.script_name
}

fn branch_matches(left: &String, right: &String) -> bool {
    left == right
}

fn env_matches(left: &EnvEntry, right: &EnvEntry) -> bool {
    left.name == right.name
}

/// The editable state of one flow: its base fields plus the three ordered
/// unique selections (plugins, trigger branches, environment variables).
#[derive(Debug, Clone)]
pub struct EditorSession {
    base: Flow,
    available_branches: Vec<String>,
    plugins: OrderedUniqueSet<Plugin>,
    branches: OrderedUniqueSet<String>,
    env: OrderedUniqueSet<EnvEntry>,
}

impl<'a> App<'a> {
    /// Resolves a flow by name from the cached flow list. A miss is fatal to
    /// the edit session and stays downcastable as
    /// `SnapshotError::FlowNotFound`.
    pub fn load_flow(&self, flow_name: &str) -> Result<Flow> {
        let flows =
            snapshot::load_flows(self.cache).context("failed to load the cached flow list")?;
        Ok(snapshot::find_flow(&flows, flow_name)?.clone())
    }

    /// Rehydrates an editor session from the cached collections: the flow
    /// itself, the connected account's branch list, and the plugin catalog.
    pub fn open_editor(&self, flow_name: &str) -> Result<EditorSession> {
        let flow = self.load_flow(flow_name)?;
        let account = snapshot::load_account(self.cache)
            .context("failed to load the cached account record")?;
        let catalog =
            snapshot::load_catalog(self.cache).context("failed to load the cached plugin catalog")?;
        let catalog_plugins = catalog
            .as_ref()
            .map(|catalog| catalog.plugins.as_slice())
            .unwrap_or(&[]);

        EditorSession::from_snapshot(flow, account.as_ref(), catalog_plugins)
    }
}

impl EditorSession {
    pub(crate) fn from_snapshot(
        flow: Flow,
        account: Option<&ConnectedAccount>,
        catalog: &[Plugin],
    ) -> Result<Self> {
        let available_branches = snapshot::branches_for(&flow, account);
        let plugins = OrderedUniqueSet::seeded(snapshot::plugins_for(&flow, catalog), plugin_matches);
        let branches = OrderedUniqueSet::seeded(flow.trigger_push.clone(), branch_matches);

        let mut env = OrderedUniqueSet::new(env_matches);
        for token in &flow.need_env {
            let (name, value) = env_token::decode(token).with_context(|| {
                format!("flow '{}' carries a malformed environment token", flow.name)
            })?;
            env.replace(EnvEntry { name, value });
        }

        Ok(Self {
            base: flow,
            available_branches,
            plugins,
            branches,
            env,
        })
    }

    pub fn flow(&self) -> &Flow {
        &self.base
    }

    pub fn available_branches(&self) -> &[String] {
        &self.available_branches
    }

    pub fn selected_plugins(&self) -> &[Plugin] {
        self.plugins.items()
    }

    pub fn checked_branches(&self) -> &[String] {
        self.branches.items()
    }

    pub fn env_entries(&self) -> &[EnvEntry] {
        self.env.items()
    }

    /// Appends the plugin at the end of the execution order; adding an
    /// already-selected plugin leaves the selection unchanged.
    pub fn add_plugin(&mut self, plugin: Plugin) {
        self.plugins.add(plugin);
    }

    pub fn remove_plugin(&mut self, plugin: &Plugin) {
        self.plugins.remove(plugin);
    }

    pub fn set_branch_checked(&mut self, branch: &str, checked: bool) {
        self.branches.toggle(branch.to_string(), checked);
    }

    /// Sets a variable, replacing any previous value for the same name. The
    /// name is validated here so an invalid entry never reaches a commit.
    pub fn set_env_var(&mut self, name: &str, value: &str) -> Result<(), EnvTokenError> {
        env_token::validate_name(name)?;
        self.env.replace(EnvEntry {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    /// Assembles a new flow value from the base fields and the current
    /// selections. Pure; callable repeatedly without resetting anything.
    pub fn build_updated_flow(&self) -> Flow {
        let mut flow = self.base.clone();
        flow.plugins = self
            .plugins
            .items()
            .iter()
            .map(|plugin| plugin.script_name.clone())
            .collect();
        flow.trigger_push = self.branches.items().to_vec();
        flow.need_env = self.env.items().iter().map(EnvEntry::token).collect();
        flow
    }
}

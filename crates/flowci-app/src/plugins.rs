use anyhow::{Context, Result};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use flowci_core::cache::CacheKey;
use flowci_core::flow::Plugin;
use flowci_core::snapshot::PluginCatalog;

use crate::App;
use crate::commit::{ResponseShape, classify};

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogOutcome {
    Refreshed { plugins: Vec<Plugin> },
    Rejected { message: String },
    Malformed,
}

impl<'a> App<'a> {
    /// Fetches the plugin catalog from the server and, on success, persists
    /// it to the cache stamped with the fetch time. Same tri-state
    /// classification as the commit paths; success is discriminated by a
    /// non-null `plugins` field.
    pub fn refresh_plugin_catalog(&self) -> Result<CatalogOutcome> {
        let value = match self.transport.fetch_plugins() {
            Ok(value) => value,
            Err(error) => {
                return Ok(CatalogOutcome::Rejected {
                    message: format!("the plugin list could not be fetched: {error:#}"),
                });
            }
        };

        match classify(&value, "plugins") {
            ResponseShape::Success => {
                let plugins_value = value.get("plugins").cloned().unwrap_or(Value::Null);
                let Ok(plugins) = serde_json::from_value::<Vec<Plugin>>(plugins_value) else {
                    self.exceptions.report_malformed("fetching plugins", &value);
                    return Ok(CatalogOutcome::Malformed);
                };

                let catalog = PluginCatalog {
                    fetched_at: OffsetDateTime::now_utc()
                        .format(&Rfc3339)
                        .context("failed to format the catalog fetch timestamp")?,
                    plugins: plugins.clone(),
                };
                let encoded = serde_json::to_value(&catalog)
                    .context("failed to encode the plugin catalog for the cache")?;
                self.cache.set(CacheKey::PluginCatalog, &encoded)?;

                Ok(CatalogOutcome::Refreshed { plugins })
            }
            ResponseShape::DomainError { message } => Ok(CatalogOutcome::Rejected { message }),
            ResponseShape::Malformed => {
                self.exceptions.report_malformed("fetching plugins", &value);
                Ok(CatalogOutcome::Malformed)
            }
        }
    }
}

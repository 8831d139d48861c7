use anyhow::{Context, Result, bail};
use comfy_table::{Cell, ContentArrangement, Table};
use flowci_app::{App, CatalogOutcome, DeleteConfirmation, DeleteOutcome, EditOutcome};
use flowci_core::flow::Plugin;
use flowci_core::snapshot;

use crate::cli::{Cli, Command};
use crate::prompt::PromptDriver;

pub fn run_with_deps(cli: Cli, app: &App<'_>, prompt: &mut dyn PromptDriver) -> Result<()> {
    match cli.command {
        Command::Show { flow } => run_show(app, &flow),
        Command::Edit {
            flow,
            add_plugins,
            remove_plugins,
            check_branches,
            uncheck_branches,
            env,
        } => run_edit(
            app,
            &flow,
            &add_plugins,
            &remove_plugins,
            &check_branches,
            &uncheck_branches,
            &env,
        ),
        Command::Delete { flow, yes } => run_delete(app, prompt, &flow, yes),
        Command::Plugins { refresh } => run_plugins(app, refresh),
    }
}

fn run_show(app: &App<'_>, flow_name: &str) -> Result<()> {
    let session = app.open_editor(flow_name)?;
    let flow = session.flow();

    let plugins = session
        .selected_plugins()
        .iter()
        .map(|plugin| plugin.script_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let env = session
        .env_entries()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec![Cell::new("name"), Cell::new(&flow.name)]);
    table.add_row(vec![Cell::new("repository"), Cell::new(&flow.repo_origin)]);
    table.add_row(vec![Cell::new("owner"), Cell::new(&flow.user_email)]);
    table.add_row(vec![Cell::new("platform"), Cell::new(&flow.platform)]);
    table.add_row(vec![Cell::new("plugins"), Cell::new(plugins)]);
    table.add_row(vec![
        Cell::new("trigger branches"),
        Cell::new(session.checked_branches().join(", ")),
    ]);
    table.add_row(vec![
        Cell::new("available branches"),
        Cell::new(session.available_branches().join(", ")),
    ]);
    table.add_row(vec![Cell::new("env variables"), Cell::new(env)]);

    println!("{table}");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_edit(
    app: &App<'_>,
    flow_name: &str,
    add_plugins: &[String],
    remove_plugins: &[String],
    check_branches: &[String],
    uncheck_branches: &[String],
    env: &[String],
) -> Result<()> {
    let mut session = app.open_editor(flow_name)?;

    let catalog =
        snapshot::load_catalog(app.cache).context("failed to load the cached plugin catalog")?;
    let catalog_plugins = catalog
        .as_ref()
        .map(|catalog| catalog.plugins.as_slice())
        .unwrap_or(&[]);

    for name in add_plugins {
        let Some(plugin) = catalog_plugins
            .iter()
            .find(|plugin| plugin.script_name == *name)
        else {
            bail!(
                "plugin '{name}' is not in the cached catalog; run `flowci plugins --refresh` first"
            );
        };
        session.add_plugin(plugin.clone());
    }

    for name in remove_plugins {
        session.remove_plugin(&Plugin::named(name));
    }

    for branch in check_branches {
        session.set_branch_checked(branch, true);
    }

    for branch in uncheck_branches {
        session.set_branch_checked(branch, false);
    }

    for pair in env {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("--env expects NAME=VALUE, got '{pair}'");
        };
        session
            .set_env_var(name, value)
            .with_context(|| format!("invalid environment variable '{name}'"))?;
    }

    match app.commit_edit(&session)? {
        EditOutcome::Saved { flow } => {
            println!("Flow '{}' saved.", flow.name);
            Ok(())
        }
        EditOutcome::Rejected { message } => bail!("edit failed: {message}"),
        EditOutcome::Malformed => {
            bail!("edit failed: the server response did not match any known shape")
        }
    }
}

fn run_delete(
    app: &App<'_>,
    prompt: &mut dyn PromptDriver,
    flow_name: &str,
    yes: bool,
) -> Result<()> {
    let flow = app.load_flow(flow_name)?;

    let mut confirmation = DeleteConfirmation::new();
    confirmation.request()?;

    let confirmed = if yes {
        true
    } else {
        prompt.confirm(
            &format!("Really delete flow '{}'? This cannot be undone.", flow.name),
            false,
        )?
    };

    if !confirmed {
        app.cancel_delete(&mut confirmation)?;
        println!("Delete cancelled.");
        return Ok(());
    }

    match app.confirm_delete(&mut confirmation, &flow)? {
        DeleteOutcome::Deleted => {
            println!("Flow '{}' deleted.", flow.name);
            Ok(())
        }
        DeleteOutcome::Rejected { message } => bail!("delete failed: {message}"),
        DeleteOutcome::Malformed => {
            bail!("delete failed: the server response did not match any known shape")
        }
    }
}

fn run_plugins(app: &App<'_>, refresh: bool) -> Result<()> {
    if refresh {
        match app.refresh_plugin_catalog()? {
            CatalogOutcome::Refreshed { .. } => {}
            CatalogOutcome::Rejected { message } => bail!("plugin refresh failed: {message}"),
            CatalogOutcome::Malformed => {
                bail!("plugin refresh failed: the server response did not match any known shape")
            }
        }
    }

    let catalog =
        snapshot::load_catalog(app.cache).context("failed to load the cached plugin catalog")?;
    let Some(catalog) = catalog else {
        println!("No cached plugin catalog. Run `flowci plugins --refresh`.");
        return Ok(());
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Plugin", "Description"]);
    for plugin in &catalog.plugins {
        let describe = plugin
            .metadata
            .get("describe")
            .and_then(|value| value.as_str())
            .unwrap_or("");
        table.add_row(vec![
            Cell::new(plugin.script_name.as_str()),
            Cell::new(describe),
        ]);
    }

    println!("{table}");
    println!("fetched at {}", catalog.fetched_at);
    Ok(())
}

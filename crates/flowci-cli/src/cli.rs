use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "flowci")]
#[command(bin_name = "flowci")]
#[command(version)]
#[command(about = "Edit and delete CI flow configurations against the backend API")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Show a flow's editable state")]
    Show {
        #[arg(value_name = "FLOW")]
        flow: String,
    },
    #[command(about = "Apply edits to a flow and commit them")]
    Edit {
        #[arg(value_name = "FLOW")]
        flow: String,
        #[arg(long = "add-plugin", value_name = "SCRIPT")]
        add_plugins: Vec<String>,
        #[arg(long = "remove-plugin", value_name = "SCRIPT")]
        remove_plugins: Vec<String>,
        #[arg(long = "branch", value_name = "BRANCH")]
        check_branches: Vec<String>,
        #[arg(long = "no-branch", value_name = "BRANCH")]
        uncheck_branches: Vec<String>,
        #[arg(long = "env", value_name = "NAME=VALUE")]
        env: Vec<String>,
    },
    #[command(about = "Delete a flow after explicit confirmation")]
    Delete {
        #[arg(value_name = "FLOW")]
        flow: String,
        #[arg(long, help = "Skip the interactive confirmation")]
        yes: bool,
    },
    #[command(about = "List the plugin catalog")]
    Plugins {
        #[arg(long, help = "Fetch the catalog from the server before listing")]
        refresh: bool,
    },
}

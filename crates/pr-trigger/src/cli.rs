//! Command line arguments

use clap::{Parser, Subcommand};

/// Press pull request trigger buttons from the terminal
#[derive(Parser, Debug)]
#[command(name = "pr-trigger", version)]
#[command(about = "List and press the trigger buttons of a pull request")]
pub struct Cli {
    /// Server root, overrides the configured base_url
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the trigger buttons configured for a pull request
    List {
        /// Pull request page, e.g. /projects/PRJ/repos/repo/pull-requests/1/overview
        page: String,
    },

    /// Press one trigger button
    Press {
        /// Pull request page, e.g. /projects/PRJ/repos/repo/pull-requests/1/overview
        page: String,

        /// Button uuid or exact name
        trigger: String,

        /// Form value, `name=value`; checkbox options are comma separated
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, String)>,

        /// Submit the dialog without asking
        #[arg(short, long)]
        yes: bool,
    },
}

/// Parse `name=value`; the value may be empty or contain further `=`
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {:?}", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in {:?}", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

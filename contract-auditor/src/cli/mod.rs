//! Command-line arguments

use clap::{Parser, Subcommand};
use contract_auditor_sdk::{ExportFormat, Language};
use std::path::PathBuf;

mod commands;

pub use commands::run_command;

/// Submit smart contracts to a remote analysis service and review the findings
#[derive(Parser, Debug, Clone)]
#[command(name = "contract-auditor", version, about)]
pub struct Args {
    /// Base URL of the analysis service (overrides AUDITOR_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Use the built-in simulated service instead of the network
    #[arg(long, global = true)]
    pub offline: bool,

    /// Keep snippets and the token in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to the interactive UI
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze a contract file (`-` reads stdin)
    Analyze {
        file: PathBuf,

        /// solidity or vyper (default: from the file extension)
        #[arg(short, long)]
        language: Option<Language>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Also write the result as csv or json
        #[arg(long)]
        export: Option<ExportFormat>,

        /// Directory for --export (default: AUDITOR_EXPORT_DIR or .)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage saved snippets
    Snippets {
        #[command(subcommand)]
        action: SnippetAction,
    },

    /// List previous analyses
    History {
        #[arg(long)]
        json: bool,
    },

    /// Compare history entries by position
    Compare {
        #[arg(required = true, num_args = 2..)]
        positions: Vec<usize>,
    },

    /// Export a history entry
    Export {
        position: usize,

        #[arg(short, long)]
        format: ExportFormat,

        #[arg(long)]
        out: Option<PathBuf>,

        /// Let the service render the file
        #[arg(long)]
        remote: bool,
    },

    /// Show guidance for a vulnerability name
    Info { name: String },

    /// Manage the service token
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Interactive terminal UI
    Tui {
        /// Contract to load into the editor
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(short, long)]
        language: Option<Language>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SnippetAction {
    /// Save a contract file under a name
    Save {
        name: String,
        file: PathBuf,

        #[arg(short, long)]
        language: Option<Language>,
    },
    List,
    /// Print a snippet's code
    Show { index: usize },
    Delete { index: usize },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AuthAction {
    /// Store a bearer token
    SetToken { token: String },
    /// Remove the stored token
    Clear,
    /// Show which token is in use
    Status,
}

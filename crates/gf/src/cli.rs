//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the gf CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use group_filter_rs::{GroupId, PredicateName, UserId};

/// gf - Resolve group filter expressions into search parameters and predicates
#[derive(Parser, Debug)]
#[command(name = "gf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a request into search parameters
    #[command(alias = "n")]
    Normalize {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Normalize a request and compile it into predicate fragments
    #[command(alias = "c")]
    Compile {
        #[command(flatten)]
        request: RequestArgs,

        /// Drop a fragment from the output (repeatable)
        #[arg(long, value_name = "NAME")]
        without: Vec<PredicateName>,
    },

    /// Show how an expression is resolved, step by step
    #[command(alias = "x")]
    Explain {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// View and create configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Request attributes and viewer context shared by the filter commands.
#[derive(Args, Debug, Clone, Default)]
pub struct RequestArgs {
    /// Group expression (e.g., "5,-7,book-club", "my", "this", "0")
    #[arg(short, long, allow_hyphen_values = true)]
    pub group: Option<String>,

    /// Native inclusion list (comma-separated ids)
    #[arg(long, value_name = "IDS")]
    pub group_in: Option<String>,

    /// Native exclusion list (comma-separated ids)
    #[arg(long, value_name = "IDS")]
    pub group_not_in: Option<String>,

    /// Existing search parameters as a JSON object
    #[arg(long, value_name = "JSON")]
    pub params: Option<String>,

    /// Group directory fixture (TOML with [groups] and [members] tables)
    #[arg(short, long, env = "GF_DIRECTORY", value_name = "FILE")]
    pub directory: Option<PathBuf>,

    /// Logged-in viewer's user id (anonymous when omitted)
    #[arg(long, value_name = "USER_ID")]
    pub viewer: Option<UserId>,

    /// Group whose page the request comes from
    #[arg(long, value_name = "GROUP_ID")]
    pub current_group: Option<GroupId>,
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print config file path
    Path,

    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

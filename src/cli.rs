//! CLI argument definitions for tbh.
//!
//! Uses clap with derive macros for argument parsing.
//!
//! # Example
//!
//! ```no_run
//! use terabox_history::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! println!("Store override: {:?}", cli.store);
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use serde_json::Value;

/// Recently fetched files, kept for 24 hours.
#[derive(Parser, Debug)]
#[command(name = "tbh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the storage file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<CliShell>,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a fetched file to the history
    Add {
        /// File name (the dedup key)
        #[arg(value_name = "FILE_NAME")]
        file_name: String,

        /// Extra metadata field (can be repeated)
        #[arg(short, long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(String, Value)>,

        /// Fetch timestamp (ISO-8601, default: now)
        #[arg(long, value_name = "TIMESTAMP")]
        fetched_at: Option<String>,

        /// Maximum number of items to keep
        #[arg(short, long, value_name = "N")]
        max: Option<usize>,

        /// Print the resulting history as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the history with expired items removed
    List {
        /// Only show items whose file name matches
        #[arg(short = 'q', long, value_name = "QUERY")]
        filter: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show storage and config file locations
    Path,

    /// Print an example configuration file
    ExampleConfig,
}

impl Default for Command {
    fn default() -> Self {
        Command::List {
            filter: None,
            json: false,
        }
    }
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliShell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    Powershell,
    /// Elvish shell
    Elvish,
}

/// Parse a `KEY=VALUE` metadata field.
///
/// Values that are valid JSON (numbers, booleans, null, ...) are stored as
/// such; anything else is stored as a string.
pub fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    if key == "file_name" || key == "fetchedAt" {
        return Err(format!("'{key}' cannot be set as a metadata field"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    Ok((key.to_string(), value))
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The subcommand to run, `list` when none was given.
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }

    /// Generate shell completions and write to stdout.
    pub fn generate_completions(shell: CliShell) {
        let mut cmd = Cli::command();
        let shell = match shell {
            CliShell::Bash => Shell::Bash,
            CliShell::Zsh => Shell::Zsh,
            CliShell::Fish => Shell::Fish,
            CliShell::Powershell => Shell::PowerShell,
            CliShell::Elvish => Shell::Elvish,
        };
        generate(shell, &mut cmd, "tbh", &mut std::io::stdout());
    }
}

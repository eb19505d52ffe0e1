//! Build script for tbh.
//!
//! Generates man pages using clap_mangen.

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

/// Minimal CLI struct for man page generation.
///
/// This duplicates the CLI definition to avoid build dependency issues.
#[derive(Parser)]
#[command(name = "tbh")]
#[command(author, version, about = "Recently fetched files, kept for 24 hours")]
#[command(
    long_about = "tbh keeps a short history of fetched files in a local key-value store. \
    Entries are listed newest first, deduplicated by file name, capped at a \
    configurable size (default 10) and dropped once they are older than 24 hours.\n\n\
    Run without a subcommand to list the current history."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to the storage file
    #[arg(short, long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, global = true)]
    no_config: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<Shell>,
}

#[derive(Subcommand)]
enum Command {
    /// Add a fetched file to the history
    Add {
        /// File name (the dedup key)
        #[arg(value_name = "FILE_NAME")]
        file_name: String,

        /// Extra metadata field (can be repeated)
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,

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

#[derive(Clone, Copy, ValueEnum)]
enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
    Elvish,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Only generate man pages for release builds or when explicitly requested
    let profile = env::var("PROFILE").unwrap_or_default();
    if profile != "release" && env::var("TBH_GEN_MANPAGE").is_err() {
        return;
    }

    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        return;
    };

    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);

    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("Failed to generate man page");

    let man_path = out_dir.join("tbh.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");

    // Also copy to docs directory for distribution
    if let Some(manifest_dir) = env::var_os("CARGO_MANIFEST_DIR") {
        let docs_dir = PathBuf::from(manifest_dir).join("docs");
        if docs_dir.exists() {
            let _ = fs::copy(&man_path, docs_dir.join("tbh.1"));
        }
    }
}

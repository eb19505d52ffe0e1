//! tbh - terabox history
//!
//! Entry point for the tbh CLI application.

use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use terabox_history::cli::{Cli, Command};
use terabox_history::config::{generate_example_config, load_config, Config};
use terabox_history::error::{exit_code, HistoryError};
use terabox_history::filter::filter_items;
use terabox_history::history::{FileRecord, HistoryItem, HistoryStore};
use terabox_history::storage::FileStore;
use terabox_history::utils::{global_config_file, local_config_file, storage_file};

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            if let Some(history_err) = err.downcast_ref::<HistoryError>() {
                eprintln!("Error: {history_err}");
                return ExitCode::from(history_err.exit_code() as u8);
            }
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code::GENERAL_ERROR as u8)
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse_args();

    init_tracing(cli.debug);

    if let Some(shell) = cli.completions {
        Cli::generate_completions(shell);
        return Ok(exit_code::SUCCESS);
    }

    tracing::debug!(?cli, "parsed arguments");

    let work_dir = std::env::current_dir().context("Failed to determine current directory")?;

    let config = if cli.no_config {
        Config::default()
    } else {
        load_config(cli.config.as_deref(), &work_dir)?
    };

    let store_path = cli
        .store
        .clone()
        .or_else(|| config.storage.path.clone())
        .or_else(storage_file)
        .context("Could not determine data directory")?;

    tracing::debug!(path = %store_path.display(), "using storage file");

    match cli.selected_command() {
        Command::Add {
            file_name,
            fields,
            fetched_at,
            max,
            json,
        } => {
            let file = fields
                .into_iter()
                .fold(FileRecord::new(file_name), |file, (key, value)| {
                    file.with_field(key, value)
                });
            let item = match fetched_at {
                Some(raw) => HistoryItem::with_raw_timestamp(file, raw),
                None => HistoryItem::new(file),
            };
            let max_items = max.unwrap_or(config.history.max_items);

            let mut store = HistoryStore::with_config(FileStore::new(&store_path), &config.history);
            let history = store.add(item, max_items)?;

            print_history(&history, json)
        }
        Command::List { filter, json } => {
            let mut store = HistoryStore::with_config(FileStore::new(&store_path), &config.history);
            let history = store.get_cleaned()?;

            match filter.as_deref() {
                Some(query) => {
                    let found: Vec<HistoryItem> = filter_items(query, &history, &config.filter)
                        .into_iter()
                        .map(|(idx, _)| history[idx].clone())
                        .collect();
                    if found.is_empty() && !json {
                        println!("No history items match '{query}'");
                        return Ok(exit_code::SUCCESS);
                    }
                    print_history(&found, json)
                }
                None => print_history(&history, json),
            }
        }
        Command::Path => {
            print_paths(&store_path, &work_dir);
            Ok(exit_code::SUCCESS)
        }
        Command::ExampleConfig => {
            print!("{}", generate_example_config());
            Ok(exit_code::SUCCESS)
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence.
fn init_tracing(debug: bool) {
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    if debug {
        if let Ok(parsed) = "terabox_history=debug".parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

/// Print history items, newest first.
fn print_history(items: &[HistoryItem], json: bool) -> Result<i32> {
    if json {
        println!(
            "{}",
            serde_json::to_string(items).context("Failed to serialize history")?
        );
        return Ok(exit_code::SUCCESS);
    }

    if items.is_empty() {
        println!("No history yet");
        return Ok(exit_code::SUCCESS);
    }

    let use_colors = io::stdout().is_terminal();
    let now = Utc::now();

    let max_name_len = items
        .iter()
        .map(|i| i.file_name().chars().count())
        .max()
        .unwrap_or(0)
        .min(40);

    for (idx, item) in items.iter().enumerate() {
        let name = truncate_string(item.file_name(), 40);
        let age = describe_age(item.fetched_time(), now);
        let size = item.file.field_text("size");

        if use_colors {
            print!("\x1b[2m{:>2}.\x1b[0m ", idx + 1);
            print!("\x1b[1;32m{:width$}\x1b[0m", name, width = max_name_len);
            if let Some(size) = size {
                print!("  \x1b[33m{}\x1b[0m", size);
            }
            print!("  \x1b[2m{}\x1b[0m", age);
        } else {
            print!("{:>2}. {:width$}", idx + 1, name, width = max_name_len);
            if let Some(size) = size {
                print!("  {}", size);
            }
            print!("  {}", age);
        }

        println!();
    }

    Ok(exit_code::SUCCESS)
}

/// Human-readable time since fetch.
fn describe_age(fetched: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(fetched) = fetched else {
        return "unknown".to_string();
    };

    let elapsed = now - fetched;
    if elapsed.num_minutes() < 1 {
        "just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else {
        format!("{}h ago", elapsed.num_hours())
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Print storage and config file locations.
fn print_paths(store_path: &Path, work_dir: &Path) {
    println!(
        "Storage file: {} (exists: {})",
        store_path.display(),
        store_path.exists()
    );

    match global_config_file() {
        Some(cfg) => println!(
            "Global config: {} (exists: {})",
            cfg.display(),
            cfg.exists()
        ),
        None => println!("Global config: <not available>"),
    }

    match local_config_file(work_dir) {
        Some(cfg) => println!("Local config: {} (exists: true)", cfg.display()),
        None => println!(
            "Local config: {}/.tbhrc.toml (exists: false)",
            work_dir.display()
        ),
    }
}

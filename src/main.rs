//! compactor - rule-driven inventory compaction
//!
//! Runs one `compact` invocation against a rule store and an optional player session.

mod commands;
mod config;
mod session;
mod state;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Console;
use compactor_core::ItemCatalog;
use config::ConfigStore;
use session::Player;
use state::Compactor;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rule-driven inventory compactor", long_about = None)]
struct Args {
    /// Rule configuration (TOML); created with defaults when missing
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Item catalog (JSON list of item keys, air first); built-in list when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Player session (JSON); the command runs as the console when omitted
    #[arg(long)]
    session: Option<PathBuf>,

    /// Print tab-completion hints for the arguments instead of running them
    #[arg(long)]
    complete: bool,

    /// Arguments to `compact`, e.g. `add cobblestone 64 cobblestone_block`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Args::parse();
    info!("Starting compactor v{}", env!("CARGO_PKG_VERSION"));

    let catalog = match &cli.catalog {
        Some(path) => ItemCatalog::from_file(path)
            .with_context(|| format!("Failed to load item catalog {}", path.display()))?,
        None => ItemCatalog::vanilla(),
    };
    let args: Vec<&str> = cli.args.iter().map(String::as_str).collect();

    if cli.complete {
        for hint in commands::complete(&catalog, &args) {
            println!("{hint}");
        }
        return Ok(());
    }

    let mut compactor = Compactor::start(catalog, ConfigStore::new(&cli.config));

    let output = match &cli.session {
        Some(path) => {
            let mut player = Player::load(path, compactor.catalog())?;
            let output = commands::run(&mut compactor, &mut player, &args);
            player.save(path, compactor.catalog())?;
            output
        }
        None => commands::run(&mut compactor, &mut Console, &args),
    };

    for line in &output.lines {
        println!("{line}");
    }
    if !output.handled {
        for line in commands::usage_lines() {
            eprintln!("{line}");
        }
    }
    Ok(())
}

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use household_ledger::cli::{start_session, Shell};
use household_ledger::clock::SystemClock;
use household_ledger::config::{LedgerPaths, Settings};
use household_ledger::logging;
use household_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    author = "Kaylee Beyene",
    version,
    about = "In-memory household ledger with a 30-day trash",
    long_about = "Record income and expense entries, see per-category totals \
                  and the running balance, and recover deleted entries from \
                  the trash for up to 30 days."
)]
struct Cli {
    /// Use this directory for config.json instead of the default
    #[arg(long, global = true, env = "HOUSEHOLD_LEDGER_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Start with the sample household entries
    #[arg(long, global = true)]
    sample: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Show configuration and paths
    Config {
        /// Write the default config.json if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::resolve(cli.config_dir.as_deref())?;
    let settings = Settings::load_or_create(&paths)
        .with_context(|| format!("loading {}", paths.settings_file().display()))?;

    logging::init(&settings.log_filter, settings.log_format, cli.verbose);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => run_shell(settings, cli.sample),
        Commands::Config { init } => show_config(&paths, &settings, init),
    }
}

fn run_shell(settings: Settings, sample: bool) -> Result<()> {
    let (shared, sweeper) = start_session(Storage::new(), SystemClock, &settings, sample)?;

    let interactive = io::stdin().is_terminal();
    if interactive {
        println!("Household ledger. Type 'help' for commands, 'quit' to leave.");
    }

    let shell = Shell::new(shared, settings).with_prompt(interactive);
    let result = shell.run(io::stdin().lock(), io::stdout().lock());

    sweeper.stop();
    if let Err(e) = &result {
        warn!(error = %e, "shell ended with an error");
    }
    Ok(result?)
}

fn show_config(paths: &LedgerPaths, settings: &Settings, init: bool) -> Result<()> {
    if init {
        if paths.is_initialized() {
            println!("Config already exists at: {}", paths.settings_file().display());
        } else {
            settings.save(paths)?;
            println!("Wrote default config to: {}", paths.settings_file().display());
        }
        println!();
    }

    println!("Household Ledger Configuration");
    println!("==============================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:  {:?}", settings.currency_symbol);
    println!("  Date format:      {}", settings.date_format);
    println!("  Sweep interval:   {}s", settings.sweep_interval_secs);
    println!("  Sample data:      {}", settings.seed_sample_data);
    println!("  Log filter:       {}", settings.log_filter);
    println!("  Log format:       {:?}", settings.log_format);
    Ok(())
}

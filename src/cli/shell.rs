//! Interactive shell
//!
//! Reads one command per line, runs it against a [`SharedLedger`], and
//! writes results to the given writer. Command failures are reported and
//! the loop carries on; only failing to write to `out` ends it.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, info, warn};

use super::commands::{tokenize, ExportFormat, ShellCommand, ShellLine};
use crate::clock::Clock;
use crate::config::Settings;
use crate::display::{
    format_breakdown, format_entry_line, format_entry_list, format_summary, format_trash_list,
};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_entries_csv, export_json, export_trash_csv};
use crate::models::RETENTION_DAYS;
use crate::services::{ExpirySweeper, Ledger, SharedLedger};
use crate::storage::Storage;

/// Open a ledger for a shell session
///
/// Runs the startup expiry sweep, loads the sample entries when asked, and
/// starts the periodic sweeper at the configured interval.
pub fn start_session<C: Clock + 'static>(
    storage: Storage,
    clock: C,
    settings: &Settings,
    sample: bool,
) -> LedgerResult<(SharedLedger<C>, ExpirySweeper)> {
    let mut ledger = Ledger::open(storage, clock);
    if sample || settings.seed_sample_data {
        ledger.seed_sample_entries()?;
    }

    let shared = SharedLedger::new(ledger);
    let sweeper = shared.spawn_sweeper(settings.sweep_interval())?;
    info!(
        interval_secs = settings.sweep_interval_secs,
        "expiry sweeper started"
    );
    Ok((shared, sweeper))
}

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive command loop over a shared ledger
pub struct Shell<C: Clock> {
    ledger: SharedLedger<C>,
    settings: Settings,
    prompt: bool,
}

impl<C: Clock> Shell<C> {
    /// Create a shell over `ledger` using display settings from `settings`
    pub fn new(ledger: SharedLedger<C>, settings: Settings) -> Self {
        Self {
            ledger,
            settings,
            prompt: false,
        }
    }

    /// Print a prompt before each line (for terminals)
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Run until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut out: W) -> LedgerResult<()> {
        let mut lines = input.lines();

        loop {
            if self.prompt {
                write!(out, "ledger> ")?;
                out.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            if self.handle_line(&line?, &mut out)? == Flow::Quit {
                break;
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Parse and execute one line, reporting command errors to `out`
    pub fn handle_line<W: Write>(&self, line: &str, out: &mut W) -> LedgerResult<Flow> {
        let words = match tokenize(line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };
        if words.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                match e.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        write!(out, "{}", e.render())?
                    }
                    _ => write!(out, "Error: {}", strip_clap_prefix(&e.render().to_string()))?,
                }
                return Ok(Flow::Continue);
            }
        };

        debug!(?command, "shell command");
        match self.execute(command, out) {
            Ok(flow) => Ok(flow),
            Err(e) => {
                warn!(error = %e, "command rejected");
                writeln!(out, "Error: {}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Execute a parsed command
    pub fn execute<W: Write>(&self, command: ShellCommand, out: &mut W) -> LedgerResult<Flow> {
        let symbol = self.settings.currency_symbol.as_str();
        let date_format = self.settings.date_format.as_str();

        match command {
            ShellCommand::Add {
                kind,
                category,
                amount,
            } => {
                let entry = self.ledger.create_entry(kind, &category, amount)?;
                writeln!(out, "Added {}", format_entry_line(&entry, symbol))?;
            }
            ShellCommand::List { kind } => {
                let entries = {
                    let ledger = self.ledger.read()?;
                    match kind {
                        Some(kind) => ledger.active_entries_of(kind),
                        None => ledger.active_entries(),
                    }
                };
                write!(out, "{}", format_entry_list(&entries, symbol, date_format))?;
            }
            ShellCommand::Delete { id } => {
                let id = self.ledger.read()?.resolve_active(&id)?;
                let trashed = self.ledger.delete_entry(id)?;
                writeln!(
                    out,
                    "Moved {} to trash (restorable for {} days)",
                    format_entry_line(&trashed.entry, symbol),
                    RETENTION_DAYS
                )?;
            }
            ShellCommand::Trash => {
                let (trashed, now) = {
                    let ledger = self.ledger.read()?;
                    (ledger.trashed_entries(), ledger.now())
                };
                write!(out, "{}", format_trash_list(&trashed, now, symbol, date_format))?;
            }
            ShellCommand::Restore { id } => {
                let id = self.ledger.read()?.resolve_trashed(&id)?;
                let entry = self.ledger.restore_entry(id)?;
                writeln!(out, "Restored {}", format_entry_line(&entry, symbol))?;
            }
            ShellCommand::Purge { id } => {
                let id = self.ledger.read()?.resolve_trashed(&id)?;
                let purged = self.ledger.purge_entry(id)?;
                writeln!(
                    out,
                    "Permanently deleted {}",
                    format_entry_line(&purged.entry, symbol)
                )?;
            }
            ShellCommand::Sweep => {
                let purged = self.ledger.sweep_now()?;
                writeln!(out, "Purged {} expired entr{}", purged, plural_y(purged))?;
            }
            ShellCommand::Breakdown { kind } => {
                let breakdown = self.ledger.breakdown(kind)?;
                write!(out, "{}", format_breakdown(&breakdown, symbol))?;
            }
            ShellCommand::Summary => {
                let summary = self.ledger.summary()?;
                write!(out, "{}", format_summary(&summary, symbol))?;
            }
            ShellCommand::Export {
                format,
                trash,
                output,
            } => match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| {
                        LedgerError::Export(format!("Cannot create {}: {}", path.display(), e))
                    })?;
                    let mut writer = BufWriter::new(file);
                    self.export(format, trash, &mut writer)?;
                    writer.flush()?;
                    info!(path = %path.display(), ?format, "exported ledger");
                    writeln!(out, "Exported to {}", path.display())?;
                }
                None => self.export(format, trash, &mut *out)?,
            },
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn export<W: Write>(&self, format: ExportFormat, trash: bool, writer: W) -> LedgerResult<()> {
        let ledger = self.ledger.read()?;
        match (format, trash) {
            (ExportFormat::Csv, false) => export_entries_csv(&ledger.active_entries(), writer),
            (ExportFormat::Csv, true) => {
                export_trash_csv(&ledger.trashed_entries(), ledger.now(), writer)
            }
            (ExportFormat::Json, include_trash) => {
                let mut writer = writer;
                export_json(&*ledger, include_trash, &mut writer)?;
                writeln!(writer)?;
                Ok(())
            }
        }
    }
}

fn plural_y(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}

/// clap renders "error: ..."; the shell uses its own "Error: " prefix
fn strip_clap_prefix(rendered: &str) -> &str {
    rendered.strip_prefix("error: ").unwrap_or(rendered)
}

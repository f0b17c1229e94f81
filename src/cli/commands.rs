//! Shell command definitions
//!
//! Each input line is tokenized and parsed with clap as if it were its own
//! command line, without a binary name.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{EntryKind, Money};

/// One line of shell input
#[derive(Parser, Debug)]
#[command(
    name = "ledger",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]"
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands available in the interactive shell
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Record a new entry
    Add {
        /// income (in, 収入) or expense (out, 支出)
        kind: EntryKind,
        /// Category label
        category: String,
        /// Amount (e.g., "500", "1,200.50", "¥3000")
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        amount: Money,
    },

    /// List active entries, most recent first
    #[command(alias = "ls")]
    List {
        /// Only show one kind
        #[arg(short, long)]
        kind: Option<EntryKind>,
    },

    /// Move an entry to the trash
    #[command(alias = "rm")]
    Delete {
        /// Entry ID or unique ID prefix
        id: String,
    },

    /// List trashed entries with days left before expiry
    Trash,

    /// Move a trashed entry back to the active list
    Restore {
        /// Trashed entry ID or unique ID prefix
        id: String,
    },

    /// Permanently delete a trashed entry
    Purge {
        /// Trashed entry ID or unique ID prefix
        id: String,
    },

    /// Purge trashed entries past the retention period now
    Sweep,

    /// Per-category totals for one kind
    Breakdown {
        /// income or expense
        kind: EntryKind,
    },

    /// Both breakdowns plus income, expense and balance
    #[command(alias = "balance")]
    Summary,

    /// Export entries to CSV or JSON
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,
        /// Export the trash instead of (CSV) or alongside (JSON) active entries
        #[arg(long)]
        trash: bool,
        /// Write to a file instead of the terminal
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Export file formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

fn parse_amount(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

/// Split a line into words, honouring single and double quotes
pub fn tokenize(line: &str) -> LedgerResult<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(LedgerError::Validation("Unterminated quote".into()));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

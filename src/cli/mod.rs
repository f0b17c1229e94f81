//! Interactive shell for the household ledger
//!
//! Each line typed at the prompt is parsed with clap into a
//! [`ShellCommand`] and executed against the shared ledger.

pub mod commands;
pub mod shell;

pub use commands::{tokenize, ExportFormat, ShellCommand, ShellLine};
pub use shell::{start_session, Flow, Shell};

use std::io;
use thiserror::Error;

/// Errors that can occur during source discovery
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no main entry found: expected src/main.{{ts,tsx,js,jsx}} or a `main` override in the descriptor")]
    MissingMainEntry,

    #[error("declared {kind} entry '{path}' does not exist")]
    MissingDeclaredEntry { kind: &'static str, path: String },

    #[error("{file}: invalid @{directive} directive: {reason}")]
    Directive {
        file: String,
        directive: &'static str,
        reason: String,
    },
}

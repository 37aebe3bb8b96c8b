use std::io;
use thiserror::Error;

/// Errors that can occur while loading the project descriptor
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse package.json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),
}

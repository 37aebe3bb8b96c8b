use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while driving a bundler engine
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("bundler engine '{engine}' not found on PATH")]
    EngineNotFound { engine: &'static str },

    #[error("failed to parse bundler profile {path}: {source}")]
    Profile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors from the advisory typecheck runner
#[derive(Error, Debug)]
pub enum TypecheckError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("typescript compiler (tsc) not found on PATH")]
    ToolNotFound,
}

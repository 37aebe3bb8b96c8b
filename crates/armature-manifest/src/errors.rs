use std::io;
use thiserror::Error;

/// Errors in the derived command structure, localized to one command
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("command '{command}' declares duplicate parameter key '{key}'")]
    DuplicateParameterKey { command: String, key: String },
}

/// Errors from the post-merge manifest checks
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("manifest field '{0}' is required and must be non-empty")]
    MissingField(&'static str),

    #[error("manifest field 'editorType' must list at least one editor target")]
    EmptyEditorType,

    #[error("manifest field '{field}' must be a build-relative path, got '{path}'")]
    AbsoluteOutputPath { field: &'static str, path: String },

    #[error("relaunch button #{0} must declare a command or a name")]
    InvalidRelaunchButton(usize),

    #[error("manifest augmentation produced an invalid document: {0}")]
    Augmentation(String),
}

/// Errors while persisting or reading a manifest document
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

//! Centralized error type for a build invocation.
//!
//! Scanner, schema, and validation failures abort the invocation
//! immediately. Compile failures from the two bundling legs are collected
//! into the `Bundling` variant together, so a developer fixing one leg
//! does not have to re-run to discover the other.

use thiserror::Error;

use armature_bundler::{BuildResult, TypecheckReport};

/// Errors that can occur during one build invocation
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] armature_config::ConfigError),

    #[error("{0}")]
    Scan(#[from] armature_scan::ScanError),

    #[error("{0}")]
    Schema(#[from] armature_manifest::SchemaError),

    #[error("{0}")]
    Validation(#[from] armature_manifest::ValidationError),

    #[error("{0}")]
    Bundle(#[from] armature_bundler::BundleError),

    #[error("bundling failed")]
    Bundling { results: Vec<BuildResult> },

    #[error("typecheck failed")]
    Typecheck { report: TypecheckReport },

    #[error("{0}")]
    TypecheckTool(#[from] armature_bundler::TypecheckError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] armature_manifest::ManifestError),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! CLI command implementations.

pub mod build;
pub mod init;
pub mod manifest;

use std::path::PathBuf;

use armature_config::ProjectRoot;

use crate::errors::BuildError;

/// Resolve the project root once, at the CLI boundary. Everything below
/// receives the explicit [`ProjectRoot`] instead of consulting the working
/// directory.
pub fn resolve_root(project: Option<PathBuf>) -> Result<ProjectRoot, BuildError> {
    let path = match project {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    Ok(ProjectRoot::new(path))
}

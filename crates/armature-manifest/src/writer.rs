//! Manifest persistence.
//!
//! The manifest is fully overwritten on every successful build, via a temp
//! file and rename so the host never observes a partial write. Output is
//! deterministic: the same sources yield byte-identical files.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::ManifestError;
use crate::types::ManifestDocument;

/// Render the document as the pretty-printed JSON the host reads.
pub fn to_json_string(doc: &ManifestDocument) -> Result<String, ManifestError> {
    let mut json = serde_json::to_string_pretty(doc)?;
    json.push('\n');
    Ok(json)
}

/// Write the manifest atomically (temp file + rename).
pub fn write_to_path(doc: &ManifestDocument, path: &Path) -> Result<(), ManifestError> {
    debug!("Writing manifest to {:?}", path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = to_json_string(doc)?;
    let temp_path = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
    }
    fs::rename(&temp_path, path)?;

    info!("Manifest written to {:?}", path);
    Ok(())
}

/// Read a manifest back from disk (primarily for tests and tooling).
pub fn read_from_path(path: &Path) -> Result<ManifestDocument, ManifestError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

//! Post-merge manifest invariants.

use std::path::Path;

use crate::errors::ValidationError;
use crate::types::ManifestDocument;

/// Check the invariants every merged manifest must satisfy. Runs after all
/// merge layers, so user augmentation cannot sneak an invalid document
/// past it.
pub fn validate(doc: &ManifestDocument) -> Result<(), ValidationError> {
    required(&doc.id, "id")?;
    required(&doc.name, "name")?;
    required(&doc.api, "api")?;
    required(&doc.main, "main")?;

    if doc.editor_type.is_empty() {
        return Err(ValidationError::EmptyEditorType);
    }

    relative(&doc.main, "main")?;
    if let Some(ui) = &doc.ui {
        relative(ui, "ui")?;
    }

    for (index, button) in doc.relaunch_buttons.iter().enumerate() {
        let command = button.command.as_deref().unwrap_or("");
        let name = button.name.as_deref().unwrap_or("");
        if command.is_empty() && name.is_empty() {
            return Err(ValidationError::InvalidRelaunchButton(index));
        }
    }

    Ok(())
}

fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn relative(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if Path::new(value).is_absolute() {
        return Err(ValidationError::AbsoluteOutputPath {
            field,
            path: value.to_string(),
        });
    }
    Ok(())
}

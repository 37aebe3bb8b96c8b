//! Layered manifest synthesis.
//!
//! Four sources feed one document, applied in precedence order: descriptor
//! defaults, the derived command tree, computed build-output paths, then
//! user augmentation (static table first, programmatic hook last). Later
//! layers win on key collision; `menu` and the other array fields are
//! replaced wholesale, never deep-merged. Output paths are not
//! user-overridable through the descriptor - a plugin that wants a
//! different entry moves the source file.

use serde_json::{Map, Value};
use smallvec::SmallVec;
use tracing::debug;

use armature_config::PluginDescriptor;

use crate::command_tree::CommandTree;
use crate::errors::ValidationError;
use crate::types::ManifestDocument;
use crate::validate::validate;

/// Root-relative bundle paths computed by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutputs {
    pub main: String,
    pub ui: Option<String>,
}

/// Programmatic augmentation hook: a pure transformation applied as the
/// final merge layer. Side effects are forbidden by contract, not
/// enforcement.
pub type AugmentFn = dyn Fn(ManifestDocument) -> ManifestDocument;

/// Merge all layers into a validated [`ManifestDocument`].
pub fn synthesize(
    descriptor: &PluginDescriptor,
    tree: &CommandTree,
    outputs: &BuildOutputs,
    augment: Option<&AugmentFn>,
) -> Result<ManifestDocument, ValidationError> {
    // Layer 1: descriptor defaults.
    let mut doc = ManifestDocument {
        id: descriptor.id.clone(),
        name: descriptor.name.clone(),
        api: descriptor.api.clone(),
        editor_type: SmallVec::from_vec(descriptor.editor_type.clone()),
        main: String::new(),
        ui: None,
        menu: None,
        parameters: None,
        parameter_only: None,
        contains_widget: descriptor.contains_widget,
        widget_api: descriptor.widget_api.clone(),
        enable_proposed_api: descriptor.enable_proposed_api,
        enable_private_plugin_api: descriptor.enable_private_plugin_api,
        permissions: descriptor.permissions.clone(),
        capabilities: descriptor.capabilities.clone(),
        relaunch_buttons: descriptor.relaunch_buttons.clone(),
        extra: Map::new(),
    };

    // Layer 2: derived command structure.
    match tree {
        CommandTree::Empty => {}
        CommandTree::Single(command) => {
            doc.parameters = command.parameters.clone();
            doc.parameter_only = command.parameter_only;
        }
        CommandTree::Menu(menu) => {
            doc.menu = Some(menu.clone());
        }
    }

    // Layer 3: build output paths, set last among structural fields.
    doc.main = outputs.main.clone();
    doc.ui = outputs.ui.clone();

    // Layer 4: user augmentation.
    if !descriptor.augmentation.is_empty() {
        debug!(
            "Applying {} augmentation key(s)",
            descriptor.augmentation.len()
        );
        doc = apply_overrides(doc, &descriptor.augmentation)?;
    }
    if let Some(augment) = augment {
        doc = augment(doc);
    }

    validate(&doc)?;
    Ok(doc)
}

/// Apply a static override table on top of a document. Top-level keys
/// replace whatever the earlier layers produced, arrays included.
fn apply_overrides(
    doc: ManifestDocument,
    overrides: &Map<String, Value>,
) -> Result<ManifestDocument, ValidationError> {
    let mut value =
        serde_json::to_value(&doc).map_err(|e| ValidationError::Augmentation(e.to_string()))?;
    let Value::Object(map) = &mut value else {
        unreachable!("a manifest document serializes to an object");
    };
    for (key, replacement) in overrides {
        map.insert(key.clone(), replacement.clone());
    }
    serde_json::from_value(value).map_err(|e| ValidationError::Augmentation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommandNode, MenuNode};
    use armature_config::{EditorType, RelaunchButton};
    use serde_json::json;

    fn descriptor() -> PluginDescriptor {
        PluginDescriptor {
            id: "42".to_string(),
            name: "a".to_string(),
            api: "1.0.0".to_string(),
            editor_type: vec![EditorType::Design],
            contains_widget: false,
            widget_api: None,
            enable_proposed_api: false,
            enable_private_plugin_api: false,
            permissions: Vec::new(),
            capabilities: Vec::new(),
            relaunch_buttons: Vec::new(),
            main: None,
            ui: None,
            augmentation: Map::new(),
        }
    }

    fn outputs(ui: bool) -> BuildOutputs {
        BuildOutputs {
            main: "build/main.js".to_string(),
            ui: ui.then(|| "build/ui.js".to_string()),
        }
    }

    fn command(name: &str) -> CommandNode {
        CommandNode {
            name: name.to_string(),
            command: format!("src/commands/{name}.ts--default"),
            parameters: None,
            parameter_only: None,
        }
    }

    #[test]
    fn test_single_command_has_no_menu_field() {
        let doc = synthesize(
            &descriptor(),
            &CommandTree::Single(command("zoom")),
            &outputs(false),
            None,
        )
        .unwrap();
        assert!(doc.menu.is_none());
        assert_eq!(doc.main, "build/main.js");
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("menu").is_none());
    }

    #[test]
    fn test_menu_tree_lands_in_manifest() {
        let tree = CommandTree::Menu(vec![
            MenuNode::Command(command("foo")),
            MenuNode::separator(),
            MenuNode::Command(command("bar")),
        ]);
        let doc = synthesize(&descriptor(), &tree, &outputs(true), None).unwrap();
        assert_eq!(doc.menu.as_ref().unwrap().len(), 3);
        assert_eq!(doc.ui.as_deref(), Some("build/ui.js"));
    }

    #[test]
    fn test_ui_omitted_without_ui_output() {
        let doc = synthesize(&descriptor(), &CommandTree::Empty, &outputs(false), None).unwrap();
        assert!(doc.ui.is_none());
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("ui").is_none());
    }

    #[test]
    fn test_static_augmentation_wins_on_collision() {
        let mut descriptor = descriptor();
        descriptor
            .augmentation
            .insert("api".to_string(), json!("99.0.0"));
        descriptor.augmentation.insert("x".to_string(), json!("y"));
        let doc = synthesize(&descriptor, &CommandTree::Empty, &outputs(false), None).unwrap();
        assert_eq!(doc.api, "99.0.0");
        assert_eq!(doc.extra["x"], "y");
    }

    #[test]
    fn test_augmentation_replaces_arrays_wholesale() {
        let mut descriptor = descriptor();
        descriptor.permissions = vec!["activeusers".to_string()];
        descriptor
            .augmentation
            .insert("permissions".to_string(), json!(["payments"]));
        let doc = synthesize(&descriptor, &CommandTree::Empty, &outputs(false), None).unwrap();
        assert_eq!(doc.permissions, vec!["payments"]);
    }

    #[test]
    fn test_compute_hook_runs_last() {
        let mut descriptor = descriptor();
        descriptor
            .augmentation
            .insert("api".to_string(), json!("99.0.0"));
        let hook = |mut doc: ManifestDocument| {
            doc.api = "100.0.0".to_string();
            doc
        };
        let doc = synthesize(
            &descriptor,
            &CommandTree::Empty,
            &outputs(false),
            Some(&hook),
        )
        .unwrap();
        assert_eq!(doc.api, "100.0.0");
    }

    #[test]
    fn test_augmentation_emptying_identity_field_fails_validation() {
        let mut descriptor = descriptor();
        descriptor.augmentation.insert("id".to_string(), json!(""));
        let err = synthesize(&descriptor, &CommandTree::Empty, &outputs(false), None)
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingField("id")));
    }

    #[test]
    fn test_augmentation_with_invalid_shape_fails() {
        let mut descriptor = descriptor();
        descriptor
            .augmentation
            .insert("editorType".to_string(), json!("not-an-array"));
        let err = synthesize(&descriptor, &CommandTree::Empty, &outputs(false), None)
            .unwrap_err();
        assert!(matches!(err, ValidationError::Augmentation(_)));
    }

    #[test]
    fn test_relaunch_buttons_pass_through() {
        let mut descriptor = descriptor();
        descriptor.relaunch_buttons = vec![RelaunchButton {
            command: Some("open".to_string()),
            name: Some("Open".to_string()),
            multiple_selection: Some(true),
        }];
        let doc = synthesize(&descriptor, &CommandTree::Empty, &outputs(true), None).unwrap();
        assert_eq!(doc.relaunch_buttons.len(), 1);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json["relaunchButtons"][0],
            json!({"command": "open", "name": "Open", "multipleSelection": true})
        );
    }
}

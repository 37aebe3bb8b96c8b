//! Project descriptor loading.
//!
//! The plugin's identity lives under the `"plugin"` key of its
//! `package.json`. Every field is optional in the file; defaults are
//! derived from the package name so that a bare project still builds into
//! a valid manifest. The descriptor is loaded once per invocation and is
//! immutable afterwards.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use tracing::debug;

use crate::constants;
use crate::errors::ConfigError;
use crate::project::ProjectRoot;

/// Host editor surfaces a plugin can target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EditorType {
    Design,
    Board,
    Dev,
}

/// A relaunch button surfaced by the host on nodes the plugin touched.
///
/// `command` and `name` are validated after the manifest merge, not here,
/// so that user augmentation gets a chance to fill them in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RelaunchButton {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_selection: Option<bool>,
}

/// The plugin's identity and capability flags, resolved from the project
/// descriptor file with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginDescriptor {
    pub id: String,
    pub name: String,
    pub api: String,
    pub editor_type: Vec<EditorType>,
    pub contains_widget: bool,
    pub widget_api: Option<String>,
    pub enable_proposed_api: bool,
    pub enable_private_plugin_api: bool,
    pub permissions: Vec<String>,
    pub capabilities: Vec<String>,
    pub relaunch_buttons: Vec<RelaunchButton>,
    /// Root-relative override for the main entry source file.
    pub main: Option<String>,
    /// Root-relative override for the UI entry source file.
    pub ui: Option<String>,
    /// Static manifest augmentation, applied as the last merge layer.
    pub augmentation: Map<String, Value>,
}

/// Raw `"plugin"` table as it appears in `package.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescriptorFields {
    id: Option<String>,
    name: Option<String>,
    api: Option<String>,
    editor_type: Option<Vec<EditorType>>,
    #[serde(default)]
    contains_widget: bool,
    widget_api: Option<String>,
    #[serde(default)]
    enable_proposed_api: bool,
    #[serde(default)]
    enable_private_plugin_api: bool,
    #[serde(default)]
    permissions: Vec<String>,
    #[serde(default)]
    capabilities: Vec<String>,
    #[serde(default)]
    relaunch_buttons: Vec<RelaunchButton>,
    main: Option<String>,
    ui: Option<String>,
    #[serde(default)]
    manifest: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct PackageFile {
    name: Option<String>,
    #[serde(rename = "plugin")]
    descriptor: Option<DescriptorFields>,
}

impl PluginDescriptor {
    /// Load the descriptor for a project, applying defaults.
    ///
    /// An absent `package.json` yields the all-defaults descriptor; a
    /// present but malformed one is an error.
    pub fn load(root: &ProjectRoot) -> Result<Self, ConfigError> {
        let path = root.descriptor_path();
        if !path.exists() {
            debug!("No descriptor file at {:?}, using defaults", path);
            return Ok(Self::from_parts(None, DescriptorFields::default()));
        }

        let content = fs::read_to_string(&path)?;
        let package: PackageFile = serde_json::from_str(&content)?;
        debug!(
            "Loaded descriptor from {:?} (package name: {:?})",
            path, package.name
        );
        Ok(Self::from_parts(
            package.name,
            package.descriptor.unwrap_or_default(),
        ))
    }

    fn from_parts(package_name: Option<String>, fields: DescriptorFields) -> Self {
        let fallback =
            package_name.unwrap_or_else(|| constants::DEFAULT_PLUGIN_NAME.to_string());
        let name = fields.name.unwrap_or_else(|| fallback.clone());
        let id = fields.id.unwrap_or_else(|| fallback.clone());
        PluginDescriptor {
            id,
            name,
            api: fields.api.unwrap_or_else(|| constants::DEFAULT_API.to_string()),
            editor_type: fields
                .editor_type
                .unwrap_or_else(|| vec![EditorType::Design]),
            contains_widget: fields.contains_widget,
            widget_api: fields.widget_api,
            enable_proposed_api: fields.enable_proposed_api,
            enable_private_plugin_api: fields.enable_private_plugin_api,
            permissions: fields.permissions,
            capabilities: fields.capabilities,
            relaunch_buttons: fields.relaunch_buttons,
            main: fields.main,
            ui: fields.ui,
            augmentation: fields.manifest,
        }
    }
}

//! Manifest document model
//!
//! Serde shapes mirror the JSON the host application reads. Optional
//! fields are omitted rather than serialized as null, and boolean flags
//! are omitted when false, so two runs over unchanged sources produce
//! byte-identical output.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;

pub use armature_config::{EditorType, RelaunchButton};

fn is_false(flag: &bool) -> bool {
    !*flag
}

// =============================================================================
// PARAMETER - invocation-time input declared by a command
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_freeform: bool,
}

// =============================================================================
// MENU NODES - command / separator / submenu
// =============================================================================

/// A named, invocable unit. `command` is the handler reference
/// (`<relativePath>--<exportName>`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommandNode {
    pub name: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<SmallVec<[ParameterSpec; 4]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_only: Option<bool>,
}

/// Structural divider, serialized as `{"separator": true}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeparatorNode {
    pub separator: bool,
}

impl Default for SeparatorNode {
    fn default() -> Self {
        SeparatorNode { separator: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmenuNode {
    pub name: String,
    pub menu: Vec<MenuNode>,
}

/// One entry of a `menu` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MenuNode {
    Command(CommandNode),
    Submenu(SubmenuNode),
    Separator(SeparatorNode),
}

impl MenuNode {
    pub fn separator() -> Self {
        MenuNode::Separator(SeparatorNode::default())
    }
}

// =============================================================================
// MANIFEST DOCUMENT - the merged output
// =============================================================================

/// The final merged manifest. Required fields are always present and
/// non-empty after [`crate::validate::validate`]; `main`/`ui` are
/// build-output-relative paths, never absolute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDocument {
    pub id: String,
    pub name: String,
    pub api: String,
    pub editor_type: SmallVec<[EditorType; 2]>,
    pub main: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<Vec<MenuNode>>,
    /// Hoisted parameters for the single-command case (no `menu` field).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<SmallVec<[ParameterSpec; 4]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_only: Option<bool>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub contains_widget: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_api: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub enable_proposed_api: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub enable_private_plugin_api: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relaunch_buttons: Vec<RelaunchButton>,
    /// Arbitrary user-declared keys, passed through to the host verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

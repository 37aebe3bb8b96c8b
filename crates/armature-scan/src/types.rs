//! Scanned source file model.

use std::path::PathBuf;

/// Detected role of a file under the source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRole {
    /// The background/controller entry compiled into `build/main.js`.
    Main,
    /// The panel entry compiled into `build/ui.js`.
    Ui,
    /// A file under `src/commands/` with a default export.
    CommandHandler,
    /// Anything else under `src/` (imported modules, images, styles).
    Asset,
}

/// One parsed `// @parameter` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDirective {
    pub key: String,
    /// Display name; defaults to a humanized form of the key downstream.
    pub name: Option<String>,
    pub description: Option<String>,
    pub optional: bool,
    pub allow_freeform: bool,
}

/// Directive metadata collected from a command handler file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandAnnotations {
    /// Explicit display name from `// @command`.
    pub display_name: Option<String>,
    /// Explicit menu group path from `// @menu` (overrides folder nesting).
    pub menu: Option<Vec<String>>,
    pub parameters: Vec<ParameterDirective>,
    /// `// @parameterOnly`: the command has no bare invocation path.
    pub parameter_only: bool,
}

/// A classified source file. Created during the scan, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Root-relative path, e.g. `src/commands/shapes/circle.ts`.
    pub path: PathBuf,
    pub role: SourceRole,
    /// For command handlers: the default export's symbol name, when named.
    pub export_name: Option<String>,
    pub annotations: CommandAnnotations,
    /// Folder-derived group path below `src/commands/`, or the `@menu`
    /// override when present. Empty for top-level handlers.
    pub group: Vec<String>,
}

impl SourceFile {
    /// Handler reference as the manifest records it:
    /// `<relativePath>--<exportName>`. The export is always the default.
    pub fn handler_ref(&self) -> String {
        format!("{}--default", self.path.display())
    }

    /// File stem without extension, used as a naming fallback.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

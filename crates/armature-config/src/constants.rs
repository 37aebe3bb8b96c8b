//! Fixed file-layout conventions shared across the toolkit.
//!
//! Output filenames are conventions of the host application loader and are
//! deliberately not configurable; a plugin that wants a different entry
//! point moves the source file, not the output.

/// Source directory, relative to the project root.
pub const SRC_DIR: &str = "src";

/// Command handler subtree, relative to the source directory.
pub const COMMANDS_DIR: &str = "commands";

/// Bundle output directory, relative to the project root.
pub const BUILD_DIR: &str = "build";

/// Manifest output file, relative to the project root.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Project descriptor file, relative to the project root.
pub const DESCRIPTOR_FILE: &str = "package.json";

/// Key inside the descriptor file that holds the plugin configuration.
pub const DESCRIPTOR_KEY: &str = "plugin";

/// Basename of the conventional main (controller) entry.
pub const MAIN_BASENAME: &str = "main";

/// Basename of the conventional UI (panel) entry.
pub const UI_BASENAME: &str = "ui";

/// Extensions tried, in order, when resolving a conventional entry.
pub const SOURCE_EXTENSIONS: [&str; 4] = ["ts", "tsx", "js", "jsx"];

/// Emitted main bundle, relative to the project root.
pub const MAIN_OUTPUT: &str = "build/main.js";

/// Emitted UI bundle, relative to the project root.
pub const UI_OUTPUT: &str = "build/ui.js";

/// API version used when the descriptor does not declare one.
pub const DEFAULT_API: &str = "1.0.0";

/// Fallback plugin id/name when the descriptor file is absent entirely.
pub const DEFAULT_PLUGIN_NAME: &str = "plugin";

//! Armature manifest synthesis
//!
//! This crate turns discovered command handlers and the project descriptor
//! into the `manifest.json` document the host application loads:
//!
//! - [`command_tree`] derives the menu structure from handlers in discovery
//!   order (grouping, separators, humanized display names).
//! - [`merge`] layers descriptor defaults, the derived tree, build output
//!   paths, and user augmentation into one [`ManifestDocument`], later
//!   layers winning on key collision and array fields replaced wholesale.
//! - [`validate`] enforces the required-field invariants after the merge.
//! - [`writer`] persists the document atomically as pretty-printed JSON.

pub mod command_tree;
pub mod errors;
pub mod merge;
pub mod types;
pub mod validate;
pub mod writer;

pub use command_tree::{build_command_tree, humanize, CommandTree};
pub use errors::{ManifestError, SchemaError, ValidationError};
pub use merge::{synthesize, AugmentFn, BuildOutputs};
pub use types::{
    CommandNode, ManifestDocument, MenuNode, ParameterSpec, SeparatorNode, SubmenuNode,
};
pub use validate::validate;
pub use writer::{read_from_path, to_json_string, write_to_path};

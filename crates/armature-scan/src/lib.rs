//! Convention-driven source discovery
//!
//! This crate turns a plugin project's source tree into a classified,
//! ordered set of [`SourceFile`] entries:
//!
//! 1. A [`SourceListing`] supplies root-relative file paths and contents.
//!    The production implementation walks `src/` on disk; tests supply an
//!    in-memory listing.
//! 2. [`scan`] applies the naming rules: the conventional (or overridden)
//!    main and UI entries, and command handlers under `src/commands/`
//!    identified by the presence of a default export. Files under the
//!    commands subtree without a default export are co-located helpers and
//!    are skipped silently.
//! 3. Handler files are read for `// @command`, `// @menu`, `// @parameter`
//!    and `// @parameterOnly` directive comments.
//!
//! Classification is a pure function of the listing; no disk access happens
//! outside the listing implementation.

pub mod directives;
pub mod errors;
pub mod exports;
pub mod listing;
pub mod scanner;
pub mod types;

pub use errors::ScanError;
pub use listing::{DiskListing, MemoryListing, SourceListing};
pub use scanner::{scan, EntryOverrides, SourceSet};
pub use types::{CommandAnnotations, ParameterDirective, SourceFile, SourceRole};

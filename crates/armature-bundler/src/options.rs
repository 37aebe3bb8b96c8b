//! Orchestrator-facing bundling contract.

use std::path::PathBuf;

use armature_config::{Leg, ProjectRoot};

/// Intent for one bundling leg, independent of the engine that runs it.
#[derive(Debug, Clone)]
pub struct BundleOptions {
    pub root: ProjectRoot,
    pub leg: Leg,
    /// Absolute path of the resolved entry source file.
    pub entry: PathBuf,
    pub minify: bool,
    /// Inline source maps for the emitted bundle.
    pub sourcemap: bool,
    /// Engine-native watch; the orchestrator's own watch loop uses
    /// one-shot invocations instead.
    pub watch: bool,
}

impl BundleOptions {
    /// Absolute path of the bundle this leg emits (fixed by convention).
    pub fn outfile(&self) -> PathBuf {
        self.root.output_path(self.leg)
    }

    /// The `process.env.NODE_ENV` value substituted into the bundle,
    /// identical under both engines.
    pub fn node_env(&self) -> &'static str {
        if self.minify {
            "production"
        } else {
            "development"
        }
    }
}

/// One message from an engine or the typechecker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl Diagnostic {
    pub fn message(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            file: None,
            line: None,
        }
    }
}

/// Outcome of one leg. Produced once per invocation, never persisted.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub leg: Leg,
    pub success: bool,
    /// Emitted bundle, or `None` when the leg was skipped or failed.
    pub output: Option<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildResult {
    /// A leg with no entry (e.g. a plugin without a UI) settles
    /// successfully without emitting a file.
    pub fn skipped(leg: Leg) -> Self {
        BuildResult {
            leg,
            success: true,
            output: None,
            diagnostics: Vec::new(),
        }
    }
}

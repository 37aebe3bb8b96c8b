//! The build orchestrator: one state machine per invocation.
//!
//! `Idle → Scanning → Typechecking (optional) → Bundling (main ∥ ui) →
//! ManifestWriting → Done`, with `Failed` absorbing from any stage. The two
//! legs bundle concurrently and both settle before any decision is made,
//! so a developer sees the diagnostics of both together. The manifest is
//! written only after both present legs succeed; partial bundle output is
//! left on disk on failure, the manifest never is.

use std::path::Path;
use std::time::Instant;

use tracing::debug;

use armature_bundler::{
    run_typecheck, BuildResult, BundleError, BundleOptions, BundlerEngine, TypecheckError,
    TypecheckReport,
};
use armature_config::{Leg, PluginDescriptor, ProjectRoot};
use armature_manifest::{
    build_command_tree, synthesize, write_to_path, AugmentFn, BuildOutputs, CommandTree,
    ManifestDocument,
};
use armature_scan::{scan, DiskListing, EntryOverrides, SourceSet};

use crate::errors::BuildError;
use crate::logger;

use super::format_duration;

/// Stages of one build invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Idle,
    Scanning,
    Typechecking,
    Bundling,
    ManifestWriting,
    Done,
    Failed,
}

/// Behavior flags for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct BuildSettings {
    pub minify: bool,
    /// Run the advisory typecheck pass.
    pub typecheck: bool,
    /// Escalate typecheck failures to build failures.
    pub strict_typecheck: bool,
}

/// Picks the engine for a leg. The default consults the project's bundler
/// profile files; tests substitute stub engines.
pub trait EngineSelector: Send + Sync {
    fn select(&self, root: &ProjectRoot, leg: Leg) -> Result<Box<dyn BundlerEngine>, BundleError>;
}

pub struct DefaultEngineSelector;

impl EngineSelector for DefaultEngineSelector {
    fn select(&self, root: &ProjectRoot, leg: Leg) -> Result<Box<dyn BundlerEngine>, BundleError> {
        armature_bundler::engine_for_leg(root, leg)
    }
}

/// Outcome of a successful invocation.
#[derive(Debug)]
pub struct BuildSummary {
    pub manifest: ManifestDocument,
    pub results: Vec<BuildResult>,
    pub typecheck: Option<TypecheckReport>,
}

/// Scan products cached between watch cycles. A change batch that touches
/// scanner-sensitive files invalidates it; anything else re-enters
/// `Bundling` directly.
struct ScanCache {
    descriptor: PluginDescriptor,
    sources: SourceSet,
    tree: CommandTree,
}

pub struct Orchestrator {
    root: ProjectRoot,
    settings: BuildSettings,
    engines: Box<dyn EngineSelector>,
    augment: Option<Box<AugmentFn>>,
    stage: BuildStage,
    cache: Option<ScanCache>,
}

impl Orchestrator {
    pub fn new(root: ProjectRoot, settings: BuildSettings) -> Self {
        Self::with_engines(root, settings, Box::new(DefaultEngineSelector))
    }

    pub fn with_engines(
        root: ProjectRoot,
        settings: BuildSettings,
        engines: Box<dyn EngineSelector>,
    ) -> Self {
        Orchestrator {
            root,
            settings,
            engines,
            augment: None,
            stage: BuildStage::Idle,
            cache: None,
        }
    }

    /// Install a programmatic augmentation hook, applied as the manifest's
    /// final merge layer.
    pub fn augment_with(mut self, augment: Box<AugmentFn>) -> Self {
        self.augment = Some(augment);
        self
    }

    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    /// Full build: scan, typecheck, bundle both legs, write the manifest.
    pub fn run(&mut self) -> Result<BuildSummary, BuildError> {
        self.cache = None;
        self.complete()
    }

    /// Watch-cycle build: reuse the previous scan when available and
    /// re-enter `Bundling` directly; falls back to a full run otherwise.
    pub fn rebuild(&mut self) -> Result<BuildSummary, BuildError> {
        self.complete()
    }

    fn complete(&mut self) -> Result<BuildSummary, BuildError> {
        let outcome = self.execute();
        self.stage = match outcome {
            Ok(_) => BuildStage::Done,
            Err(_) => BuildStage::Failed,
        };
        outcome
    }

    fn execute(&mut self) -> Result<BuildSummary, BuildError> {
        let fresh_scan = self.cache.is_none();
        if fresh_scan {
            self.stage = BuildStage::Scanning;
            let descriptor = PluginDescriptor::load(&self.root)?;
            let listing = DiskListing::new(self.root.clone());
            let overrides = EntryOverrides {
                main: descriptor.main.clone(),
                ui: descriptor.ui.clone(),
            };
            let sources = scan(&listing, &overrides)?;
            let tree = build_command_tree(&sources.handlers)?;
            self.cache = Some(ScanCache {
                descriptor,
                sources,
                tree,
            });
        } else {
            debug!("Reusing cached scan, re-entering Bundling");
        }

        let Some(cache) = self.cache.as_ref() else {
            unreachable!("cache populated above");
        };
        let descriptor = cache.descriptor.clone();
        let tree = cache.tree.clone();
        let main_entry = cache.sources.main.path.clone();
        let ui_entry = cache.sources.ui.as_ref().map(|ui| ui.path.clone());

        // Advisory typecheck on its own thread; it never delays leg start.
        let typecheck_handle = (fresh_scan && self.settings.typecheck).then(|| {
            self.stage = BuildStage::Typechecking;
            let root = self.root.clone();
            std::thread::spawn(move || run_typecheck(&root))
        });

        self.stage = BuildStage::Bundling;
        let main_engine = self.engines.select(&self.root, Leg::Main)?;
        let ui_engine = self.engines.select(&self.root, Leg::Ui)?;
        let main_options = self.leg_options(Leg::Main, &main_entry);
        let ui_options = ui_entry
            .as_ref()
            .map(|entry| self.leg_options(Leg::Ui, entry));

        let legs = if ui_options.is_some() { "main + ui" } else { "main" };
        logger::spinner_start(&format!("Bundling {legs}"));
        let started = Instant::now();
        let (main_result, ui_result) = rayon::join(
            move || main_engine.invoke(&main_options),
            move || match ui_options {
                Some(options) => ui_engine.invoke(&options),
                None => Ok(BuildResult::skipped(Leg::Ui)),
            },
        );
        let results = match (main_result, ui_result) {
            (Ok(main), Ok(ui)) => vec![main, ui],
            (main, ui) => {
                logger::spinner_stop();
                main?;
                ui?;
                unreachable!("at least one leg returned an engine error");
            }
        };

        let (typecheck, typecheck_error) = self.settle_typecheck(typecheck_handle);

        if results.iter().any(|result| !result.success) {
            logger::spinner_error(&format!("{legs} ({})", format_duration(started.elapsed())));
            return Err(BuildError::Bundling { results });
        }
        logger::spinner_success(&format!("{legs} ({})", format_duration(started.elapsed())));

        // Escalated typecheck failures abort after the legs have reported,
        // but always before the manifest is written.
        if let Some(error) = typecheck_error {
            return Err(error);
        }

        self.stage = BuildStage::ManifestWriting;
        let outputs = BuildOutputs {
            main: Leg::Main.output().to_string(),
            ui: ui_entry.is_some().then(|| Leg::Ui.output().to_string()),
        };
        let manifest = synthesize(&descriptor, &tree, &outputs, self.augment.as_deref())?;
        write_to_path(&manifest, &self.root.manifest_path())?;

        Ok(BuildSummary {
            manifest,
            results,
            typecheck,
        })
    }

    /// Join the typecheck thread, report its findings, and decide whether
    /// the invocation must fail (`--strict-typecheck` only).
    fn settle_typecheck(
        &self,
        handle: Option<std::thread::JoinHandle<Result<TypecheckReport, TypecheckError>>>,
    ) -> (Option<TypecheckReport>, Option<BuildError>) {
        let Some(handle) = handle else {
            return (None, None);
        };
        let strict = self.settings.strict_typecheck;
        match handle.join() {
            Ok(Ok(report)) => {
                if !report.ok {
                    for diagnostic in &report.diagnostics {
                        logger::warn(&format!(
                            "typecheck: {}{}",
                            diagnostic.message,
                            location_suffix(diagnostic.file.as_deref(), diagnostic.line)
                        ));
                    }
                    let error = strict.then(|| BuildError::Typecheck {
                        report: report.clone(),
                    });
                    return (Some(report), error);
                }
                (Some(report), None)
            }
            Ok(Err(error)) => {
                logger::warn(&format!("skipping typecheck: {error}"));
                (None, strict.then(|| BuildError::TypecheckTool(error)))
            }
            Err(_) => {
                logger::warn("typecheck thread panicked; ignoring");
                (None, None)
            }
        }
    }

    fn leg_options(&self, leg: Leg, entry: &Path) -> BundleOptions {
        BundleOptions {
            root: self.root.clone(),
            leg,
            entry: self.root.join(entry),
            minify: self.settings.minify,
            sourcemap: !self.settings.minify,
            watch: false,
        }
    }
}

fn location_suffix(file: Option<&str>, line: Option<u32>) -> String {
    match (file, line) {
        (Some(file), Some(line)) => format!(" ({file}:{line})"),
        (Some(file), None) => format!(" ({file})"),
        _ => String::new(),
    }
}

//! The engine capability and shared invocation plumbing.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use armature_config::{Leg, ProjectRoot};

use crate::errors::BundleError;
use crate::esbuild::EsbuildEngine;
use crate::options::{BuildResult, BundleOptions, Diagnostic};
use crate::profile;
use crate::webpack::WebpackEngine;

/// Generated config file an engine wants on disk before invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Concrete invocation plan produced by [`BundlerEngine::resolve_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub program: &'static str,
    pub args: Vec<String>,
    /// Working directory for the engine process, always the project root.
    pub cwd: PathBuf,
    pub config_file: Option<ConfigFile>,
}

/// One interchangeable bundler engine.
pub trait BundlerEngine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Map orchestrator intent onto an engine-specific invocation. Pure.
    fn resolve_config(&self, options: &BundleOptions) -> EngineConfig;

    /// Turn one line of engine output into a diagnostic, if it carries one.
    fn parse_diagnostic(&self, line: &str) -> Option<Diagnostic>;

    /// Run the engine for one leg. Compile failures come back as an
    /// unsuccessful [`BuildResult`]; only spawn-level problems are errors.
    fn invoke(&self, options: &BundleOptions) -> Result<BuildResult, BundleError> {
        let config = self.resolve_config(options);

        if let Some(file) = &config.config_file {
            if let Some(parent) = file.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&file.path, &file.contents)?;
        }

        let program = which::which(config.program)
            .map_err(|_| BundleError::EngineNotFound {
                engine: config.program,
            })?;
        let outfile = options.outfile();
        if let Some(parent) = outfile.parent() {
            fs::create_dir_all(parent)?;
        }

        debug!(
            "Invoking {} for the {} leg: {:?}",
            self.name(),
            options.leg,
            config.args
        );
        let output = Command::new(program)
            .args(&config.args)
            .current_dir(&config.cwd)
            .output()?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if output.status.success() {
            info!("{} leg bundled to {:?}", options.leg, outfile);
            return Ok(BuildResult {
                leg: options.leg,
                success: true,
                output: Some(outfile),
                diagnostics: Vec::new(),
            });
        }

        let mut diagnostics: Vec<Diagnostic> = stderr
            .lines()
            .filter_map(|line| self.parse_diagnostic(line))
            .collect();
        if diagnostics.is_empty() {
            let message = stderr.trim();
            diagnostics.push(Diagnostic::message(if message.is_empty() {
                format!("{} exited with {}", self.name(), output.status)
            } else {
                message.to_string()
            }));
        }
        Ok(BuildResult {
            leg: options.leg,
            success: false,
            output: None,
            diagnostics,
        })
    }
}

/// Select the engine for a leg: a `bundler.<leg>.toml` profile switches the
/// leg to webpack with the profile merged in; otherwise esbuild.
pub fn engine_for_leg(
    root: &ProjectRoot,
    leg: Leg,
) -> Result<Box<dyn BundlerEngine>, BundleError> {
    let profile_path = root.bundler_profile(leg);
    if profile_path.exists() {
        debug!("Using webpack for the {} leg (profile {:?})", leg, profile_path);
        let overrides = profile::load(&profile_path)?;
        return Ok(Box::new(WebpackEngine::new(overrides)));
    }
    Ok(Box::new(EsbuildEngine))
}

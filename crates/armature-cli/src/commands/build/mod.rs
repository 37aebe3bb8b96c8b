//! `armature build` - the full pipeline entry point.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::common::GlobalOpts;
use crate::errors::BuildError;
use crate::logger;

mod orchestrator;
mod watch;

pub use orchestrator::{
    BuildSettings, BuildStage, BuildSummary, DefaultEngineSelector, EngineSelector, Orchestrator,
};

#[derive(Parser, Debug)]
pub struct BuildCommand {
    /// Minify bundles for production (compiles NODE_ENV to "production")
    #[arg(long)]
    pub minify: bool,

    /// Skip the advisory typecheck pass
    #[arg(long)]
    pub no_typecheck: bool,

    /// Treat typecheck failures as build failures
    #[arg(long, conflicts_with = "no_typecheck")]
    pub strict_typecheck: bool,

    /// Stay resident and rebuild when sources change
    #[arg(long)]
    pub watch: bool,

    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    pub project: Option<PathBuf>,
}

pub fn handle_build(cmd: BuildCommand, _opts: &GlobalOpts) -> Result<(), BuildError> {
    let root = super::resolve_root(cmd.project)?;
    let settings = BuildSettings {
        minify: cmd.minify,
        typecheck: !cmd.no_typecheck,
        strict_typecheck: cmd.strict_typecheck,
    };
    let mut orchestrator = Orchestrator::new(root.clone(), settings);

    if cmd.watch {
        if let Some(log_path) = logger::get_log_path() {
            eprintln!("  Log file: {}", log_path.display());
        }
        return watch::watch(&mut orchestrator, &root);
    }

    let summary = orchestrator.run()?;
    let bundles = summary
        .results
        .iter()
        .filter(|result| result.output.is_some())
        .count();
    logger::success(&format!(
        "Built {} ({} bundle(s), manifest.json)",
        summary.manifest.name, bundles
    ));
    Ok(())
}

/// Print a build failure the way a developer wants to read it: every leg's
/// diagnostics at once, locations attached where the engine gave any.
pub fn report_error(error: &BuildError) {
    match error {
        BuildError::Bundling { results } => {
            for result in results.iter().filter(|result| !result.success) {
                for diagnostic in &result.diagnostics {
                    let location = match (&diagnostic.file, diagnostic.line) {
                        (Some(file), Some(line)) => format!(" ({file}:{line})"),
                        (Some(file), None) => format!(" ({file})"),
                        _ => String::new(),
                    };
                    logger::error(&format!(
                        "{} leg: {}{}",
                        result.leg, diagnostic.message, location
                    ));
                }
            }
        }
        BuildError::Typecheck { report } => {
            logger::error(&format!(
                "typecheck failed with {} error(s)",
                report.diagnostics.len()
            ));
        }
        other => logger::error(&other.to_string()),
    }
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
    }
}

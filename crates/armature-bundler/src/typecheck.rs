//! Advisory typecheck side channel.
//!
//! Runs `tsc --noEmit` over the project. The result is developer feedback:
//! the orchestrator reports failures but keeps building unless the caller
//! escalated the check to fatal.

use std::process::Command;

use tracing::debug;

use armature_config::ProjectRoot;

use crate::errors::TypecheckError;
use crate::options::Diagnostic;

/// Outcome of one typecheck pass.
#[derive(Debug, Clone)]
pub struct TypecheckReport {
    pub ok: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the typechecker for the project. `ToolNotFound` is left to the
/// caller; an absent compiler downgrades the check to a warning there.
pub fn run_typecheck(root: &ProjectRoot) -> Result<TypecheckReport, TypecheckError> {
    let tsc = which::which("tsc").map_err(|_| TypecheckError::ToolNotFound)?;

    debug!("Running tsc --noEmit in {:?}", root.as_path());
    let output = Command::new(tsc)
        .args(["--noEmit", "--pretty", "false"])
        .current_dir(root.as_path())
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let diagnostics = stdout.lines().filter_map(parse_tsc_line).collect();

    Ok(TypecheckReport {
        ok: output.status.success(),
        diagnostics,
    })
}

/// `src/main.ts(3,5): error TS2322: Type 'x' is not assignable ...`
fn parse_tsc_line(line: &str) -> Option<Diagnostic> {
    let (location, message) = line.split_once("): error ")?;
    let (file, position) = location.split_once('(')?;
    let line_number = position.split(',').next().and_then(|n| n.parse().ok());
    Some(Diagnostic {
        message: message.trim().to_string(),
        file: Some(file.trim().to_string()),
        line: line_number,
    })
}

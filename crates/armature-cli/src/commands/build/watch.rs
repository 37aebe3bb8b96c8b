//! Watch mode: stay resident, rebuild on change batches.
//!
//! One watcher covers the source tree plus the project root (descriptor
//! and bundler profiles). Events are debounced into batches and each batch
//! is handled to completion before the next is accepted - there is exactly
//! one writer for every output artifact, so no further locking is needed.
//! A batch touching scanner-sensitive paths forces a full re-scan;
//! anything else re-enters bundling with the cached scan. A failed cycle
//! keeps the session alive: the next change is a fresh attempt.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{EventKind, RecursiveMode, Watcher};

use armature_config::{constants, ProjectRoot};

use crate::errors::BuildError;
use crate::logger;

use super::orchestrator::Orchestrator;
use super::report_error;

const DEBOUNCE: Duration = Duration::from_millis(250);

pub fn watch(orchestrator: &mut Orchestrator, root: &ProjectRoot) -> Result<(), BuildError> {
    // Initial full build; failures are reported but keep the session
    // resident, matching the edit-save-rebuild loop.
    match orchestrator.run() {
        Ok(summary) => logger::success(&format!("Built {}", summary.manifest.name)),
        Err(error) => report_error(&error),
    }

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |event| {
        let _ = tx.send(event);
    })?;

    if root.src_dir().is_dir() {
        watcher.watch(&root.src_dir(), RecursiveMode::Recursive)?;
    }
    // Non-recursive root watch picks up package.json and profile edits.
    watcher.watch(root.as_path(), RecursiveMode::NonRecursive)?;

    logger::success("Watching for changes...");

    loop {
        let Ok(first) = rx.recv() else {
            // Watcher gone; the session ends with process termination.
            return Ok(());
        };

        let mut changes = Vec::new();
        collect_changes(first, &mut changes);
        while let Ok(event) = rx.recv_timeout(DEBOUNCE) {
            collect_changes(event, &mut changes);
        }

        let relevant: Vec<_> = changes
            .iter()
            .filter(|(_, path)| is_relevant(root, path))
            .collect();
        if relevant.is_empty() {
            continue;
        }

        let rescan = relevant
            .iter()
            .any(|(kind, path)| is_scanner_sensitive(root, *kind, path));
        logger::debug(&format!(
            "Change batch: {} path(s), rescan={}",
            relevant.len(),
            rescan
        ));

        let outcome = if rescan {
            orchestrator.run()
        } else {
            orchestrator.rebuild()
        };
        match outcome {
            Ok(summary) => logger::success(&format!("Rebuilt {}", summary.manifest.name)),
            Err(error) => report_error(&error),
        }
    }
}

fn collect_changes(
    event: Result<notify::Event, notify::Error>,
    changes: &mut Vec<(EventKind, PathBuf)>,
) {
    match event {
        Ok(event) => {
            for path in event.paths {
                changes.push((event.kind, path));
            }
        }
        Err(error) => logger::warn(&format!("watch error: {error}")),
    }
}

/// Output artifacts also live under the project root; changes to them are
/// our own writes, not author edits.
fn is_relevant(root: &ProjectRoot, path: &Path) -> bool {
    let Ok(rel) = path.strip_prefix(root.as_path()) else {
        return false;
    };
    if rel.starts_with(constants::BUILD_DIR) || rel == Path::new(constants::MANIFEST_FILE) {
        return false;
    }
    // Generated webpack config files are ours too.
    !rel.to_string_lossy().starts_with(".armature-")
}

/// Paths the Scanner is sensitive to: anything under the commands subtree
/// (handlers appearing, disappearing, or changing their directives), the
/// descriptor, the bundler profiles, and - for creation/removal only - the
/// conventional entry slots. Content edits to an existing entry re-bundle
/// without a re-scan.
fn is_scanner_sensitive(root: &ProjectRoot, kind: EventKind, path: &Path) -> bool {
    let Ok(rel) = path.strip_prefix(root.as_path()) else {
        return false;
    };
    if rel.starts_with(Path::new(constants::SRC_DIR).join(constants::COMMANDS_DIR)) {
        return true;
    }
    if rel == Path::new(constants::DESCRIPTOR_FILE) {
        return true;
    }
    let name = rel.to_string_lossy();
    if name.starts_with("bundler.") && name.ends_with(".toml") {
        return true;
    }

    let is_entry_slot = rel.parent() == Some(Path::new(constants::SRC_DIR))
        && rel
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| {
                stem == constants::MAIN_BASENAME || stem == constants::UI_BASENAME
            });
    is_entry_slot && matches!(kind, EventKind::Create(_) | EventKind::Remove(_))
}

//! Classification of listed files into roles.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use armature_config::constants;

use crate::directives::parse_directives;
use crate::errors::ScanError;
use crate::exports::detect_default_export;
use crate::listing::SourceListing;
use crate::types::{CommandAnnotations, SourceFile, SourceRole};

/// Entry-path overrides from the project descriptor.
#[derive(Debug, Clone, Default)]
pub struct EntryOverrides {
    pub main: Option<String>,
    pub ui: Option<String>,
}

/// Outcome of a scan: the classified source files of one project.
#[derive(Debug, Clone)]
pub struct SourceSet {
    pub main: SourceFile,
    pub ui: Option<SourceFile>,
    /// Command handlers in discovery order.
    pub handlers: Vec<SourceFile>,
    /// Remaining files under `src/` (imported modules, images, styles).
    pub assets: Vec<SourceFile>,
}

/// Classify the listing into a [`SourceSet`].
///
/// Fails when neither the conventional main entry nor a declared override
/// resolves to a listed file; a plugin must have a main entry. A missing UI
/// entry is not an error.
pub fn scan(
    listing: &dyn SourceListing,
    overrides: &EntryOverrides,
) -> Result<SourceSet, ScanError> {
    let files = listing.files()?;

    let main_path = resolve_entry(&files, overrides.main.as_deref(), constants::MAIN_BASENAME)?
        .ok_or(ScanError::MissingMainEntry)?;
    let ui_path = resolve_entry(&files, overrides.ui.as_deref(), constants::UI_BASENAME)?;

    let mut handlers = Vec::new();
    let mut assets = Vec::new();

    for path in files {
        if path == main_path || Some(&path) == ui_path.as_ref() {
            continue;
        }
        if is_command_candidate(&path) {
            let source = listing.read_to_string(&path)?;
            if let Some(export) = detect_default_export(&source) {
                let file_name = path.display().to_string();
                let annotations = parse_directives(&file_name, &source)?;
                let group = group_path(&path, &annotations);
                handlers.push(SourceFile {
                    path,
                    role: SourceRole::CommandHandler,
                    export_name: export.symbol,
                    annotations,
                    group,
                });
                continue;
            }
            debug!("Skipping {:?}: no default export (helper module)", path);
        }
        assets.push(SourceFile {
            path,
            role: SourceRole::Asset,
            export_name: None,
            annotations: CommandAnnotations::default(),
            group: Vec::new(),
        });
    }

    debug!(
        "Scan complete: main={:?} ui={:?} handlers={} assets={}",
        main_path,
        ui_path,
        handlers.len(),
        assets.len()
    );

    Ok(SourceSet {
        main: entry_file(main_path, SourceRole::Main),
        ui: ui_path.map(|path| entry_file(path, SourceRole::Ui)),
        handlers,
        assets,
    })
}

fn entry_file(path: PathBuf, role: SourceRole) -> SourceFile {
    SourceFile {
        path,
        role,
        export_name: None,
        annotations: CommandAnnotations::default(),
        group: Vec::new(),
    }
}

/// Resolve an entry: a declared override must exist; otherwise try the
/// conventional `src/<basename>.<ext>` candidates in extension order.
fn resolve_entry(
    files: &[PathBuf],
    declared: Option<&str>,
    basename: &str,
) -> Result<Option<PathBuf>, ScanError> {
    if let Some(declared) = declared {
        let path = PathBuf::from(declared);
        if files.contains(&path) {
            return Ok(Some(path));
        }
        return Err(ScanError::MissingDeclaredEntry {
            kind: if basename == constants::MAIN_BASENAME {
                "main"
            } else {
                "ui"
            },
            path: declared.to_string(),
        });
    }

    for ext in constants::SOURCE_EXTENSIONS {
        let candidate = Path::new(constants::SRC_DIR).join(format!("{basename}.{ext}"));
        if files.contains(&candidate) {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// A file is a handler candidate when it sits under `src/commands/` and has
/// a source extension.
fn is_command_candidate(path: &Path) -> bool {
    let mut components = path.components();
    let under_commands = components.next()
        == Some(Component::Normal(constants::SRC_DIR.as_ref()))
        && components.next() == Some(Component::Normal(constants::COMMANDS_DIR.as_ref()));
    if !under_commands {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| constants::SOURCE_EXTENSIONS.contains(&ext))
}

/// Folder nesting below `src/commands/` becomes the menu group path, unless
/// an explicit `@menu` directive overrides it.
fn group_path(path: &Path, annotations: &CommandAnnotations) -> Vec<String> {
    if let Some(menu) = &annotations.menu {
        return menu.clone();
    }
    path.components()
        .skip(2) // src, commands
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .split_last()
        .map(|(_file, folders)| folders.to_vec())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::MemoryListing;

    const HANDLER: &str = "export default function run() {}\n";

    #[test]
    fn test_missing_main_entry_fails() {
        let listing = MemoryListing::new().with("src/helper.ts", "export const X = 1\n");
        let err = scan(&listing, &EntryOverrides::default()).unwrap_err();
        assert!(matches!(err, ScanError::MissingMainEntry));
    }

    #[test]
    fn test_conventional_entries_resolve() {
        let listing = MemoryListing::new()
            .with("src/main.ts", "")
            .with("src/ui.tsx", "");
        let set = scan(&listing, &EntryOverrides::default()).unwrap();
        assert_eq!(set.main.path, PathBuf::from("src/main.ts"));
        assert_eq!(set.main.role, SourceRole::Main);
        assert_eq!(set.ui.unwrap().path, PathBuf::from("src/ui.tsx"));
    }

    #[test]
    fn test_extension_preference_order() {
        let listing = MemoryListing::new()
            .with("src/main.js", "")
            .with("src/main.ts", "");
        let set = scan(&listing, &EntryOverrides::default()).unwrap();
        assert_eq!(set.main.path, PathBuf::from("src/main.ts"));
    }

    #[test]
    fn test_declared_override_wins() {
        let listing = MemoryListing::new()
            .with("src/entry.ts", "")
            .with("src/main.ts", "");
        let overrides = EntryOverrides {
            main: Some("src/entry.ts".to_string()),
            ui: None,
        };
        let set = scan(&listing, &overrides).unwrap();
        assert_eq!(set.main.path, PathBuf::from("src/entry.ts"));
        // The unclaimed conventional entry is just an asset now.
        assert!(set.assets.iter().any(|f| f.path.ends_with("main.ts")));
    }

    #[test]
    fn test_declared_override_must_exist() {
        let listing = MemoryListing::new().with("src/main.ts", "");
        let overrides = EntryOverrides {
            main: Some("src/entry.ts".to_string()),
            ui: None,
        };
        let err = scan(&listing, &overrides).unwrap_err();
        assert!(matches!(err, ScanError::MissingDeclaredEntry { kind: "main", .. }));
    }

    #[test]
    fn test_handlers_classified_with_groups() {
        let listing = MemoryListing::new()
            .with("src/main.ts", "")
            .with("src/commands/zoom.ts", HANDLER)
            .with("src/commands/shapes/circle.ts", HANDLER)
            .with("src/commands/shapes/square.ts", HANDLER);
        let set = scan(&listing, &EntryOverrides::default()).unwrap();
        let paths: Vec<_> = set.handlers.iter().map(|h| h.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("src/commands/zoom.ts"),
                PathBuf::from("src/commands/shapes/circle.ts"),
                PathBuf::from("src/commands/shapes/square.ts"),
            ]
        );
        assert!(set.handlers[0].group.is_empty());
        assert_eq!(set.handlers[1].group, vec!["shapes".to_string()]);
    }

    #[test]
    fn test_helpers_without_default_export_are_skipped() {
        let listing = MemoryListing::new()
            .with("src/main.ts", "")
            .with("src/commands/zoom.ts", HANDLER)
            .with("src/commands/util.ts", "export function shared() {}\n");
        let set = scan(&listing, &EntryOverrides::default()).unwrap();
        assert_eq!(set.handlers.len(), 1);
        assert!(set.assets.iter().any(|f| f.path.ends_with("util.ts")));
    }

    #[test]
    fn test_menu_directive_overrides_folder_group() {
        let listing = MemoryListing::new().with("src/main.ts", "").with(
            "src/commands/deep/nested/cmd.ts",
            "// @menu Tools\nexport default function cmd() {}\n",
        );
        let set = scan(&listing, &EntryOverrides::default()).unwrap();
        assert_eq!(set.handlers[0].group, vec!["Tools".to_string()]);
    }

    #[test]
    fn test_handler_ref_format() {
        let listing = MemoryListing::new()
            .with("src/main.ts", "")
            .with("src/commands/zoom.ts", HANDLER);
        let set = scan(&listing, &EntryOverrides::default()).unwrap();
        assert_eq!(set.handlers[0].handler_ref(), "src/commands/zoom.ts--default");
        assert_eq!(set.handlers[0].export_name.as_deref(), Some("run"));
    }

    #[test]
    fn test_non_source_files_are_assets() {
        let listing = MemoryListing::new()
            .with("src/main.ts", "")
            .with("src/commands/icon.svg", "<svg/>");
        let set = scan(&listing, &EntryOverrides::default()).unwrap();
        assert!(set.handlers.is_empty());
        assert_eq!(set.assets.len(), 1);
        assert_eq!(set.assets[0].role, SourceRole::Asset);
    }
}

//! `armature init` - scaffold a new plugin project.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use serde_json::json;

use crate::common::GlobalOpts;
use crate::logger;

const MAIN_TEMPLATE: &str = r#"export default function () {
  // Runs on the main thread when the plugin is invoked
  console.log('Hello from the main thread')
}
"#;

const UI_TEMPLATE: &str = r#"// Runs inside the plugin's panel
document.body.textContent = 'Hello from the UI'
"#;

/// Scaffold a plugin project under `name` (or the current directory).
pub fn handle_init(name: Option<String>, with_ui: bool, _opts: GlobalOpts) {
    logger::debug("Handling init command");

    let target = name.unwrap_or_else(|| ".".to_string());
    let root = Path::new(&target);
    let descriptor_path = root.join("package.json");

    if descriptor_path.exists() {
        // Check for skip confirmation flag
        let should_skip = std::env::var("ARMATURE_INIT_YES").is_ok();

        if !should_skip {
            print!(
                "{} '{}' already has a package.json. Overwrite? {} ",
                "?".bold().cyan(),
                target,
                "[y/n] ›".dimmed()
            );
            let _ = io::stdout().flush();

            let mut response = String::new();
            if io::stdin().read_line(&mut response).is_ok() {
                let response = response.trim().to_lowercase();
                if response != "y" && response != "yes" {
                    logger::info("Operation cancelled by user");
                    println!("Operation cancelled.");
                    return;
                }
            } else {
                logger::error("Failed to read input");
                return;
            }
        } else {
            logger::debug("Skipping confirmation (ARMATURE_INIT_YES set)");
        }
    }

    let plugin_name = if target == "." {
        "plugin".to_string()
    } else {
        target.clone()
    };

    if let Err(e) = scaffold(root, &plugin_name, with_ui) {
        logger::error(&format!("Failed to scaffold project: {}", e));
        return;
    }

    logger::success(&format!("Created plugin project: {}", plugin_name));
    println!();
    println!("Next steps:");
    if target != "." {
        println!("  1. cd {}", target.bold());
        println!("  2. Add commands under src/commands/");
        println!("  3. Build: armature build");
    } else {
        println!("  1. Add commands under src/commands/");
        println!("  2. Build: armature build");
    }
    println!("  Preview the manifest any time: armature manifest");
}

fn scaffold(root: &Path, plugin_name: &str, with_ui: bool) -> io::Result<()> {
    fs::create_dir_all(root.join("src"))?;

    let package = json!({
        "name": plugin_name,
        "version": "0.0.0",
        "plugin": {
            "name": plugin_name,
            "editorType": ["design"]
        }
    });
    let mut contents = serde_json::to_string_pretty(&package)?;
    contents.push('\n');
    fs::write(root.join("package.json"), contents)?;
    fs::write(root.join("src").join("main.ts"), MAIN_TEMPLATE)?;
    if with_ui {
        fs::write(root.join("src").join("ui.ts"), UI_TEMPLATE)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scaffold_without_ui() {
        let dir = TempDir::new().unwrap();
        scaffold(dir.path(), "icon-tools", false).unwrap();
        assert!(dir.path().join("package.json").exists());
        assert!(dir.path().join("src/main.ts").exists());
        assert!(!dir.path().join("src/ui.ts").exists());

        let package = fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(package.contains("\"name\": \"icon-tools\""));
        assert!(package.contains("\"editorType\""));
    }

    #[test]
    fn test_scaffold_with_ui() {
        let dir = TempDir::new().unwrap();
        scaffold(dir.path(), "icon-tools", true).unwrap();
        assert!(dir.path().join("src/ui.ts").exists());
    }

    #[test]
    fn test_main_template_has_default_export() {
        assert!(MAIN_TEMPLATE.contains("export default function"));
    }
}

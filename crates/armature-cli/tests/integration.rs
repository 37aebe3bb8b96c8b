//! Integration tests for armature

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn armature_cmd() -> Command {
    cargo_bin_cmd!("armature")
}

/// Lay down a plugin project in `dir`.
fn write_project(dir: &Path, descriptor: &str, files: &[(&str, &str)]) {
    fs::write(dir.join("package.json"), descriptor).unwrap();
    for (rel, contents) in files {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

const DESCRIPTOR: &str = r#"{ "name": "a", "plugin": { "id": "42" } }"#;
const HANDLER: &str = "export default function run() {}\n";

#[test]
fn test_version() {
    armature_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("armature"));
}

#[test]
fn test_help() {
    armature_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Build toolkit for design-tool plugins"));
}

#[test]
fn test_invalid_command() {
    armature_cmd().arg("invalid").assert().failure();
}

#[test]
fn test_manifest_defaults_without_commands() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), DESCRIPTOR, &[("src/main.ts", "")]);
    let output = armature_cmd()
        .args(["manifest", "-C"])
        .arg(dir.path())
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let manifest: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(manifest["id"], "42");
    assert_eq!(manifest["name"], "a");
    assert_eq!(manifest["api"], "1.0.0");
    assert_eq!(manifest["editorType"], serde_json::json!(["design"]));
    assert_eq!(manifest["main"], "build/main.js");
    assert!(manifest.get("ui").is_none());
    assert!(manifest.get("menu").is_none());
}

#[test]
fn test_manifest_single_command_has_no_menu() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        DESCRIPTOR,
        &[("src/main.ts", ""), ("src/commands/zoom.ts", HANDLER)],
    );
    let output = armature_cmd()
        .args(["manifest", "-C"])
        .arg(dir.path())
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let manifest: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(manifest.get("menu").is_none());
}

#[test]
fn test_manifest_menu_with_group_and_separator() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        DESCRIPTOR,
        &[
            ("src/main.ts", ""),
            ("src/ui.ts", ""),
            (
                "src/commands/foo.ts",
                "// @command b\nexport default function foo() {}\n",
            ),
            ("src/commands/shapes/circle.ts", HANDLER),
        ],
    );
    let output = armature_cmd()
        .args(["manifest", "-C"])
        .arg(dir.path())
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let manifest: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(manifest["ui"], "build/ui.js");
    let menu = manifest["menu"].as_array().unwrap();
    assert_eq!(menu.len(), 3);
    assert_eq!(
        menu[0],
        serde_json::json!({"name": "b", "command": "src/commands/foo.ts--default"})
    );
    assert_eq!(menu[1], serde_json::json!({"separator": true}));
    assert_eq!(menu[2]["name"], "shapes");
}

#[test]
fn test_manifest_parameters_round_trip() {
    let dir = TempDir::new().unwrap();
    let handler = concat!(
        "// @parameter size \"Size\" \"Icon size in pixels\" optional freeform\n",
        "export default function resize() {}\n",
    );
    write_project(
        dir.path(),
        DESCRIPTOR,
        &[("src/main.ts", ""), ("src/commands/resize.ts", handler)],
    );
    let output = armature_cmd()
        .args(["manifest", "-C"])
        .arg(dir.path())
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let manifest: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        manifest["parameters"],
        serde_json::json!([{
            "key": "size",
            "name": "Size",
            "description": "Icon size in pixels",
            "optional": true,
            "allowFreeform": true
        }])
    );
    assert_eq!(manifest["parameterOnly"], false);
}

#[test]
fn test_duplicate_parameter_keys_fail() {
    let dir = TempDir::new().unwrap();
    let handler = concat!(
        "// @parameter size\n",
        "// @parameter size\n",
        "export default function resize() {}\n",
    );
    write_project(
        dir.path(),
        DESCRIPTOR,
        &[("src/main.ts", ""), ("src/commands/resize.ts", handler)],
    );
    armature_cmd()
        .args(["manifest", "-C"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate parameter key"));
}

#[test]
fn test_missing_main_entry_fails() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), DESCRIPTOR, &[("src/helper.ts", "")]);
    armature_cmd()
        .args(["manifest", "-C"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no main entry"));
}

#[test]
fn test_augmentation_overrides_derived_fields() {
    let dir = TempDir::new().unwrap();
    let descriptor = r#"{
        "name": "a",
        "plugin": {
            "id": "42",
            "manifest": { "api": "99.0.0", "x": "y" }
        }
    }"#;
    write_project(dir.path(), descriptor, &[("src/main.ts", "")]);
    let output = armature_cmd()
        .args(["manifest", "-C"])
        .arg(dir.path())
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let manifest: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(manifest["api"], "99.0.0");
    assert_eq!(manifest["x"], "y");
}

#[test]
fn test_augmentation_cannot_empty_identity_fields() {
    let dir = TempDir::new().unwrap();
    let descriptor = r#"{ "name": "a", "plugin": { "manifest": { "id": "" } } }"#;
    write_project(dir.path(), descriptor, &[("src/main.ts", "")]);
    armature_cmd()
        .args(["manifest", "-C"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_init_then_manifest() {
    let dir = TempDir::new().unwrap();
    armature_cmd()
        .arg("init")
        .arg("my-plugin")
        .env("ARMATURE_INIT_YES", "1")
        .current_dir(dir.path())
        .assert()
        .success();

    let project = dir.path().join("my-plugin");
    assert!(project.join("package.json").exists());
    assert!(project.join("src/main.ts").exists());

    let output = armature_cmd()
        .args(["manifest", "-C"])
        .arg(&project)
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let manifest: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(manifest["name"], "my-plugin");
    assert_eq!(manifest["main"], "build/main.js");
}

#[test]
fn test_build_fails_before_bundling_without_main() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), DESCRIPTOR, &[("src/helper.ts", "")]);
    armature_cmd()
        .args(["build", "--no-typecheck", "-C"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no main entry"));
    assert!(!dir.path().join("build").exists());
    assert!(!dir.path().join("manifest.json").exists());
}

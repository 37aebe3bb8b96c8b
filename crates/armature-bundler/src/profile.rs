//! Bundler profile files.
//!
//! A profile is a TOML table the user writes next to `package.json`
//! (`bundler.main.toml`, `bundler.ui.toml`). Its top-level keys are merged
//! over the generated engine config, user values winning. No deep merge:
//! overriding `output` replaces the whole `output` table.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::errors::BundleError;

/// Load a profile as a JSON object ready to merge into an engine config.
pub fn load(path: &Path) -> Result<Map<String, Value>, BundleError> {
    let text = fs::read_to_string(path)?;
    let table: toml::Table = text.parse().map_err(|source| BundleError::Profile {
        path: path.to_path_buf(),
        source,
    })?;
    match serde_json::to_value(table) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Ok(Map::new()),
    }
}

/// Overlay `overrides` onto `base`, top-level keys only.
pub fn merge(base: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        base.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_profile_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bundler.main.toml");
        fs::write(
            &path,
            "devtool = \"source-map\"\n\n[output]\nfilename = \"main.js\"\npathinfo = true\n",
        )
        .unwrap();
        let profile = load(&path).unwrap();
        assert_eq!(profile["devtool"], "source-map");
        assert_eq!(profile["output"]["pathinfo"], json!(true));
    }

    #[test]
    fn test_merge_replaces_tables_wholesale() {
        let mut base = Map::new();
        base.insert("mode".to_string(), json!("production"));
        base.insert(
            "output".to_string(),
            json!({"path": "/p", "filename": "main.js"}),
        );
        let mut overrides = Map::new();
        overrides.insert("output".to_string(), json!({"filename": "custom.js"}));
        merge(&mut base, &overrides);
        assert_eq!(base["mode"], "production");
        // No deep merge: the generated `path` key is gone.
        assert_eq!(base["output"], json!({"filename": "custom.js"}));
    }
}

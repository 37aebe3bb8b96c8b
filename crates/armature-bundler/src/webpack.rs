//! webpack engine: configured through a generated config file with the
//! user's profile table merged on top.

use serde_json::{json, Map, Value};

use crate::engine::{BundlerEngine, ConfigFile, EngineConfig};
use crate::options::{BundleOptions, Diagnostic};
use crate::profile;

pub struct WebpackEngine {
    overrides: Map<String, Value>,
}

impl WebpackEngine {
    pub fn new(overrides: Map<String, Value>) -> Self {
        WebpackEngine { overrides }
    }

    /// The generated config before the user profile is applied.
    fn base_config(options: &BundleOptions) -> Map<String, Value> {
        let outfile = options.outfile();
        let filename = outfile
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output_dir = outfile
            .parent()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        let config = json!({
            "mode": options.node_env(),
            "entry": options.entry.display().to_string(),
            "output": { "path": output_dir, "filename": filename },
            "devtool": if options.sourcemap { Value::from("inline-cheap-source-map") } else { Value::from(false) },
            "optimization": { "minimize": options.minify },
            "watch": options.watch,
            // Same substitution as the esbuild leg so conditional code
            // compiles identically under either engine.
            "define": { "process.env.NODE_ENV": format!("\"{}\"", options.node_env()) },
        });
        match config {
            Value::Object(map) => map,
            _ => unreachable!("json! object literal"),
        }
    }
}

impl BundlerEngine for WebpackEngine {
    fn name(&self) -> &'static str {
        "webpack"
    }

    fn resolve_config(&self, options: &BundleOptions) -> EngineConfig {
        let mut config = Self::base_config(options);
        profile::merge(&mut config, &self.overrides);

        let config_path = options
            .root
            .join(format!(".armature-webpack.{}.js", options.leg));
        let contents = format!(
            "module.exports = {};\n",
            serde_json::to_string_pretty(&Value::Object(config)).unwrap_or_default()
        );

        EngineConfig {
            program: "webpack",
            args: vec![
                "--config".to_string(),
                config_path.display().to_string(),
            ],
            cwd: options.root.as_path().to_path_buf(),
            config_file: Some(ConfigFile {
                path: config_path,
                contents,
            }),
        }
    }

    /// webpack error lines look like
    /// `ERROR in ./src/main.ts 3:20-35` followed by indented detail; the
    /// header line carries the location, the detail is collected raw.
    fn parse_diagnostic(&self, line: &str) -> Option<Diagnostic> {
        let rest = line.trim().strip_prefix("ERROR in ")?;
        let mut parts = rest.split_whitespace();
        let file = parts.next().map(|f| f.trim_start_matches("./").to_string());
        let line_number = parts
            .next()
            .and_then(|span| span.split(':').next())
            .and_then(|n| n.parse().ok());
        Some(Diagnostic {
            message: rest.to_string(),
            file,
            line: line_number,
        })
    }
}

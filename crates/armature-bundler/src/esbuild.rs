//! esbuild engine: the default, configured entirely through argv.

use crate::engine::{BundlerEngine, EngineConfig};
use crate::options::{BundleOptions, Diagnostic};

pub struct EsbuildEngine;

impl BundlerEngine for EsbuildEngine {
    fn name(&self) -> &'static str {
        "esbuild"
    }

    fn resolve_config(&self, options: &BundleOptions) -> EngineConfig {
        let mut args = vec![
            options.entry.display().to_string(),
            "--bundle".to_string(),
            format!("--outfile={}", options.outfile().display()),
            "--target=es2017".to_string(),
            "--log-level=warning".to_string(),
            // Injected identically under both engines so conditional code
            // behaves the same whichever engine built the bundle.
            format!(
                "--define:process.env.NODE_ENV=\"{}\"",
                options.node_env()
            ),
        ];
        if options.minify {
            args.push("--minify".to_string());
        }
        if options.sourcemap {
            args.push("--sourcemap=inline".to_string());
        }
        if options.watch {
            args.push("--watch".to_string());
        }
        EngineConfig {
            program: "esbuild",
            args,
            cwd: options.root.as_path().to_path_buf(),
            config_file: None,
        }
    }

    /// esbuild error lines look like
    /// `✘ [ERROR] Could not resolve "./missing" [src/main.ts:3:20]` or the
    /// two-line form with a ` file:line:col:` location underneath; only the
    /// single-line form is parsed, the rest falls back to raw stderr.
    fn parse_diagnostic(&self, line: &str) -> Option<Diagnostic> {
        let trimmed = line.trim_start_matches('\u{2718}').trim();
        let rest = trimmed.strip_prefix("[ERROR]")?.trim();
        let (message, location) = match rest.rsplit_once('[') {
            Some((message, location)) if location.ends_with(']') => {
                (message.trim(), Some(location.trim_end_matches(']')))
            }
            _ => (rest, None),
        };
        let (file, line_number) = location
            .map(|loc| {
                let mut parts = loc.split(':');
                let file = parts.next().map(ToString::to_string);
                let line_number = parts.next().and_then(|n| n.parse().ok());
                (file, line_number)
            })
            .unwrap_or((None, None));
        Some(Diagnostic {
            message: message.to_string(),
            file,
            line: line_number,
        })
    }
}

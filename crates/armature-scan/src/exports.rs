//! Structural default-export detection.
//!
//! A command handler is identified by the presence of a default export in
//! its source text. Full parsing is unnecessary here: the export statement
//! is a line-level construct in every supported authoring style, so a pair
//! of anchored patterns is enough.

use once_cell::sync::Lazy;
use regex::Regex;

/// `export default function name(`, `export default async function (`,
/// `export default ident`, `export default (` / `export default {`.
static DEFAULT_EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*export\s+default\s+(?:async\s+)?(?:function\s*(?:([A-Za-z_$][A-Za-z0-9_$]*))?\s*\(|([A-Za-z_$][A-Za-z0-9_$]*)|[({\[])",
    )
    .expect("default export pattern")
});

/// `export { name as default }` re-export form.
static AS_DEFAULT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*export\s*\{[^}]*?\b([A-Za-z_$][A-Za-z0-9_$]*)\s+as\s+default\b")
        .expect("as-default pattern")
});

/// The file's default export, if it has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultExport {
    /// Symbol name when the export is a named function or identifier.
    pub symbol: Option<String>,
}

/// Detect a default export in `source`. Returns `None` when the file has
/// none (a co-located helper rather than a command handler).
pub fn detect_default_export(source: &str) -> Option<DefaultExport> {
    if let Some(captures) = DEFAULT_EXPORT.captures(source) {
        let symbol = captures
            .get(1)
            .or_else(|| captures.get(2))
            .map(|m| m.as_str().to_string())
            // keywords the identifier arm can swallow are not symbol names
            .filter(|s| !matches!(s.as_str(), "async" | "function" | "class" | "new"));
        return Some(DefaultExport { symbol });
    }
    if let Some(captures) = AS_DEFAULT.captures(source) {
        return Some(DefaultExport {
            symbol: captures.get(1).map(|m| m.as_str().to_string()),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_function_export() {
        let export = detect_default_export("export default function insertBigImage() {}\n");
        assert_eq!(
            export,
            Some(DefaultExport {
                symbol: Some("insertBigImage".to_string())
            })
        );
    }

    #[test]
    fn test_async_function_export() {
        let export = detect_default_export("export default async function run() {}\n");
        assert_eq!(export.unwrap().symbol.as_deref(), Some("run"));
    }

    #[test]
    fn test_anonymous_function_export() {
        let export = detect_default_export("export default function () {}\n");
        assert_eq!(export, Some(DefaultExport { symbol: None }));
    }

    #[test]
    fn test_identifier_export() {
        let source = "function doIt() {}\nexport default doIt\n";
        let export = detect_default_export(source);
        assert_eq!(export.unwrap().symbol.as_deref(), Some("doIt"));
    }

    #[test]
    fn test_as_default_reexport() {
        let source = "function doIt() {}\nexport { doIt as default }\n";
        let export = detect_default_export(source);
        assert_eq!(export.unwrap().symbol.as_deref(), Some("doIt"));
    }

    #[test]
    fn test_arrow_expression_export() {
        let export = detect_default_export("export default () => {}\n");
        assert_eq!(export, Some(DefaultExport { symbol: None }));
    }

    #[test]
    fn test_helper_without_default_export() {
        let source = "export function helper() {}\nexport const X = 1\n";
        assert_eq!(detect_default_export(source), None);
    }

    #[test]
    fn test_indented_export_inside_block_is_still_found() {
        // Directive detection is line-anchored but tolerates leading space.
        let source = "  export default function f() {}\n";
        assert!(detect_default_export(source).is_some());
    }
}

//! Normalization of Istanbul / V8-style raw coverage JSON.
//!
//! Reference: https://github.com/istanbuljs/istanbuljs
//!
//! The raw payload is a JSON object keyed by file path. Each value holds:
//!   - `statementMap`: `{ "0": { "start": { "line": 1, "column": 0 }, ... }, ... }`
//!   - `s`:            `{ "0": 5, "1": 0, ... }` — hit counts per statement
//!   - `b`:            `{ "0": [5, 0], ... }` — hit counts per branch path
//!   - `f`:            `{ "0": 3, ... }` — hit counts per function
//!   - `path`:         optional absolute path, preferred over the map key
//!
//! Some producers nest the per-file map one level deeper under a `data`
//! field, at the top level and/or per file. [`normalize`] unwraps exactly
//! one such level at each position before validating a record.

use serde_json::Value;

/// One statement unit: its hit count and, when the statement map knows
/// it, the source line it starts on.
#[derive(Debug, Clone)]
pub struct Statement {
    pub count: u64,
    pub line: Option<u64>,
}

/// A single file's raw coverage, converted from the heterogeneous JSON
/// maps into ordered lists. Order matches the JSON document, which for
/// Istanbul output is declaration order.
#[derive(Debug, Clone, Default)]
pub struct RawFileCoverage {
    /// Absolute path as recorded by the instrumenter, if present.
    pub path: Option<String>,
    pub statements: Vec<Statement>,
    /// Hit counts per function.
    pub functions: Vec<u64>,
    /// Hit counts per branch path, one inner list per branch id.
    pub branches: Vec<Vec<u64>>,
}

/// Normalize a raw coverage payload into per-file records, in document
/// order. Records missing any of `s`, `f`, `b` are dropped; partial
/// payloads are expected during mixed-provider runs and are not an error.
#[must_use]
pub fn normalize(raw: &Value) -> Vec<(String, RawFileCoverage)> {
    let entries = match unwrap_data(raw).as_object() {
        Some(map) => map,
        None => return Vec::new(),
    };

    let mut files = Vec::new();
    for (key, entry) in entries {
        let entry = unwrap_data(entry);
        if !has_field(entry, "s") || !has_field(entry, "f") || !has_field(entry, "b") {
            continue;
        }
        files.push((key.clone(), normalize_file(entry)));
    }
    files
}

/// Unwrap one optional `data` indirection level.
fn unwrap_data(value: &Value) -> &Value {
    match value.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => value,
    }
}

fn has_field(entry: &Value, key: &str) -> bool {
    matches!(entry.get(key), Some(v) if !v.is_null())
}

fn normalize_file(entry: &Value) -> RawFileCoverage {
    let mut file = RawFileCoverage {
        path: entry
            .get("path")
            .and_then(|p| p.as_str())
            .filter(|p| !p.is_empty())
            .map(str::to_string),
        ..Default::default()
    };

    let stmt_map = entry.get("statementMap").and_then(|v| v.as_object());
    if let Some(s) = entry.get("s").and_then(|v| v.as_object()) {
        for (id, count) in s {
            let line = stmt_map
                .and_then(|m| m.get(id.as_str()))
                .and_then(|loc| loc.get("start"))
                .and_then(|start| start.get("line"))
                .and_then(|l| l.as_u64());
            file.statements.push(Statement {
                count: count.as_u64().unwrap_or(0),
                line,
            });
        }
    }

    if let Some(f) = entry.get("f").and_then(|v| v.as_object()) {
        for count in f.values() {
            file.functions.push(count.as_u64().unwrap_or(0));
        }
    }

    if let Some(b) = entry.get("b").and_then(|v| v.as_object()) {
        for paths in b.values() {
            let counts = paths
                .as_array()
                .map(|arr| arr.iter().map(|c| c.as_u64().unwrap_or(0)).collect())
                .unwrap_or_default();
            file.branches.push(counts);
        }
    }

    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_basic_entry() {
        let raw = json!({
            "/src/app.js": {
                "path": "/src/app.js",
                "statementMap": {
                    "0": { "start": { "line": 1, "column": 0 } },
                    "1": { "start": { "line": 2, "column": 0 } }
                },
                "s": { "0": 5, "1": 0 },
                "branchMap": {},
                "b": { "0": [5, 0] },
                "fnMap": {},
                "f": { "0": 3 }
            }
        });
        let files = normalize(&raw);
        assert_eq!(files.len(), 1);

        let (key, file) = &files[0];
        assert_eq!(key, "/src/app.js");
        assert_eq!(file.path.as_deref(), Some("/src/app.js"));
        assert_eq!(file.statements.len(), 2);
        assert_eq!(file.statements[0].count, 5);
        assert_eq!(file.statements[0].line, Some(1));
        assert_eq!(file.statements[1].count, 0);
        assert_eq!(file.functions, vec![3]);
        assert_eq!(file.branches, vec![vec![5, 0]]);
    }

    #[test]
    fn test_normalize_unwraps_top_level_data() {
        let raw = json!({
            "data": {
                "/src/a.js": { "s": { "0": 1 }, "f": {}, "b": {} }
            }
        });
        let files = normalize(&raw);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "/src/a.js");
    }

    #[test]
    fn test_normalize_unwraps_per_file_data() {
        let raw = json!({
            "/src/a.js": {
                "data": {
                    "path": "/src/a.js",
                    "s": { "0": 1 },
                    "f": {},
                    "b": {}
                }
            }
        });
        let files = normalize(&raw);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].1.statements.len(), 1);
    }

    #[test]
    fn test_normalize_skips_record_missing_required_map() {
        let raw = json!({
            "/src/no-branches.js": { "s": { "0": 1 }, "f": {} },
            "/src/ok.js": { "s": { "0": 1 }, "f": {}, "b": {} },
            "/src/null-s.js": { "s": null, "f": {}, "b": {} }
        });
        let files = normalize(&raw);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "/src/ok.js");
    }

    #[test]
    fn test_normalize_empty_and_non_object_payloads() {
        assert!(normalize(&json!({})).is_empty());
        assert!(normalize(&json!([])).is_empty());
        assert!(normalize(&json!(null)).is_empty());
    }

    #[test]
    fn test_normalize_statement_without_map_entry_has_no_line() {
        let raw = json!({
            "/src/a.js": {
                "statementMap": { "0": { "start": { "line": 7 } } },
                "s": { "0": 0, "1": 0 },
                "f": {},
                "b": {}
            }
        });
        let files = normalize(&raw);
        let stmts = &files[0].1.statements;
        assert_eq!(stmts[0].line, Some(7));
        assert_eq!(stmts[1].line, None);
    }

    #[test]
    fn test_normalize_ignores_empty_path_field() {
        let raw = json!({
            "/src/a.js": { "path": "", "s": {}, "f": {}, "b": {} }
        });
        let files = normalize(&raw);
        assert_eq!(files[0].1.path, None);
    }

    #[test]
    fn test_normalize_non_array_branch_counts() {
        let raw = json!({
            "/src/a.js": { "s": {}, "f": {}, "b": { "0": 5 } }
        });
        let files = normalize(&raw);
        assert_eq!(files[0].1.branches, vec![Vec::<u64>::new()]);
    }
}

//! Line-oriented namespace declaration scan.
//!
//! This is a textual heuristic, not a parser: any line containing the `namespace` keyword
//! (case-insensitive) followed by a name counts as a declaration. Comments and string literals
//! that happen to contain the keyword are not recognized as such.

use crate::core::class_name::trim_separators;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// `namespace <name>` up to `;`, `{`, or end of line.
static NAMESPACE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnamespace\s+([^;{\s]+)").unwrap());

/// Namespaces declared in `text`.
pub fn scan_namespaces(text: &str) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for line in text.lines() {
        for cap in NAMESPACE_DECL.captures_iter(line) {
            let name = trim_separators(cap[1].trim());
            if !name.is_empty() {
                out.insert(name.to_string());
            }
        }
    }
    out
}

/// Namespaces declared in the file at `path`. An unreadable file declares nothing.
pub fn declared_namespaces(path: &Path) -> BTreeSet<String> {
    match fs::read(path) {
        Ok(bytes) => scan_namespaces(&String::from_utf8_lossy(&bytes)),
        Err(_) => BTreeSet::new(),
    }
}

/// True iff the file at `path` declares `expected_namespace`.
pub fn validate(expected_namespace: &str, path: &Path) -> bool {
    declared_namespaces(path).contains(trim_separators(expected_namespace))
}

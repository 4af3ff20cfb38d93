//! Namespace prefix to base-directory mapping.

use crate::core::class_name::trim_separators;
use rustc_hash::FxHashMap;
use std::path::MAIN_SEPARATOR;

/// Ordered mapping of namespace prefixes to their base directories.
///
/// Prefixes are kept in first-registration order. Each prefix owns an ordered list of base
/// directories searched front to back.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    order: Vec<String>,
    dirs: FxHashMap<String, Vec<String>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `base_directory` for `prefix`.
    ///
    /// With `prepend` the directory is searched before any already registered for the same
    /// prefix; otherwise after them.
    pub fn add_namespace(&mut self, prefix: &str, base_directory: &str, prepend: bool) {
        let prefix = trim_separators(prefix).to_string();
        let base = normalize_base_directory(base_directory);

        if !self.dirs.contains_key(&prefix) {
            self.order.push(prefix.clone());
        }
        let list = self.dirs.entry(prefix).or_default();

        if prepend {
            list.insert(0, base);
        } else {
            list.push(base);
        }
    }

    /// Base directories for an exact (already trimmed) prefix.
    pub fn base_directories(&self, prefix: &str) -> &[String] {
        self.dirs
            .get(trim_separators(prefix))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Prefixes with their directories, in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.order
            .iter()
            .map(move |p| (p.as_str(), self.base_directories(p)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Ensures exactly one trailing path separator.
pub fn normalize_base_directory(dir: &str) -> String {
    let trimmed = dir.trim_end_matches(['/', MAIN_SEPARATOR]);
    format!("{}{}", trimmed, MAIN_SEPARATOR)
}

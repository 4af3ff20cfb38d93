use crate::core::class_name::{ClassName, NAMESPACE_SEPARATOR};
use crate::core::loader::{Include, Loader};
use crate::core::registry::Registry;
use std::path::{MAIN_SEPARATOR, PathBuf};

/// Builds `<base><relative with separators translated>.<extension>`.
///
/// `base` already ends with a path separator (see `registry::normalize_base_directory`).
pub fn candidate_path(base: &str, relative_class: &str, extension: &str) -> PathBuf {
    let relative = relative_class.replace(NAMESPACE_SEPARATOR, &MAIN_SEPARATOR.to_string());
    PathBuf::from(format!(
        "{}{}.{}",
        base,
        relative,
        extension.trim_start_matches('.')
    ))
}

/// Every path `resolve` would probe for `class`, in probe order.
///
/// Longer prefixes come first; within one prefix, base directories keep registry order.
pub fn probe_order(registry: &Registry, class: &ClassName, extension: &str) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for (prefix, relative) in class.candidates() {
        for base in registry.base_directories(prefix) {
            out.push(candidate_path(base, relative, extension));
        }
    }
    out
}

/// First candidate path that exists, or `None` when nothing matches.
pub fn resolve<H: Include>(
    registry: &Registry,
    loader: &Loader<H>,
    class: &ClassName,
    extension: &str,
) -> Option<PathBuf> {
    for (prefix, relative) in class.candidates() {
        for base in registry.base_directories(prefix) {
            let path = candidate_path(base, relative, extension);
            if loader.exists(&path) {
                return Some(path);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::SourceCache;
    use crate::core::registry::normalize_base_directory;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn dir(p: &Path) -> String {
        p.to_string_lossy().to_string()
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<?php").unwrap();
    }

    #[test]
    fn candidate_path_translates_separators() {
        let base = normalize_base_directory("/pkg/src");
        let path = candidate_path(&base, "Http\\Controller", "php");
        assert_eq!(path, Path::new("/pkg/src/Http/Controller.php"));
    }

    #[test]
    fn resolves_registered_prefix() {
        let tmp = tempdir().unwrap();
        let models = tmp.path().join("models");
        touch(&models.join("User.php"));

        let mut reg = Registry::new();
        reg.add_namespace("App\\Models", &dir(&models), false);
        let loader = Loader::new(SourceCache::new());

        let found = resolve(&reg, &loader, &ClassName::new("App\\Models\\User"), "php");
        assert_eq!(found, Some(models.join("User.php")));

        let missing = resolve(&reg, &loader, &ClassName::new("App\\Models\\Post"), "php");
        assert_eq!(missing, None);
    }

    #[test]
    fn more_specific_prefix_wins_over_directory_order() {
        let tmp = tempdir().unwrap();
        let a = tmp.path().join("a");
        let ab = tmp.path().join("ab");
        touch(&a.join("B/X.php"));
        touch(&ab.join("X.php"));

        let mut reg = Registry::new();
        reg.add_namespace("A", &dir(&a), false);
        reg.add_namespace("A\\B", &dir(&ab), false);
        let loader = Loader::new(SourceCache::new());

        let found = resolve(&reg, &loader, &ClassName::new("A\\B\\X"), "php");
        assert_eq!(found, Some(ab.join("X.php")));
    }

    #[test]
    fn falls_back_to_shorter_prefix() {
        let tmp = tempdir().unwrap();
        let a = tmp.path().join("a");
        let ab = tmp.path().join("ab");
        fs::create_dir_all(&ab).unwrap();
        touch(&a.join("B/X.php"));

        let mut reg = Registry::new();
        reg.add_namespace("A", &dir(&a), false);
        reg.add_namespace("A\\B", &dir(&ab), false);
        let loader = Loader::new(SourceCache::new());

        let found = resolve(&reg, &loader, &ClassName::new("A\\B\\X"), "php");
        assert_eq!(found, Some(a.join("B").join("X.php")));
    }

    #[test]
    fn directory_order_breaks_ties_within_a_prefix() {
        let tmp = tempdir().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        touch(&first.join("X.php"));
        touch(&second.join("X.php"));

        let mut reg = Registry::new();
        reg.add_namespace("App", &dir(&first), false);
        reg.add_namespace("App", &dir(&second), true);
        let loader = Loader::new(SourceCache::new());

        let found = resolve(&reg, &loader, &ClassName::new("App\\X"), "php");
        assert_eq!(found, Some(second.join("X.php")));
    }

    #[test]
    fn global_prefix_is_the_last_resort() {
        let tmp = tempdir().unwrap();
        let global = tmp.path().join("global");
        touch(&global.join("Vendor/Thing.php"));

        let mut reg = Registry::new();
        reg.add_namespace("", &dir(&global), false);
        let loader = Loader::new(SourceCache::new());

        let found = resolve(&reg, &loader, &ClassName::new("Vendor\\Thing"), "php");
        assert_eq!(found, Some(global.join("Vendor").join("Thing.php")));
    }

    #[test]
    fn probe_order_lists_specific_prefixes_first() {
        let mut reg = Registry::new();
        reg.add_namespace("A", "/a", false);
        reg.add_namespace("A\\B", "/ab1", false);
        reg.add_namespace("A\\B", "/ab2", false);

        let probes = probe_order(&reg, &ClassName::new("A\\B\\X"), "php");
        assert_eq!(
            probes,
            vec![
                candidate_path(&normalize_base_directory("/ab1"), "X", "php"),
                candidate_path(&normalize_base_directory("/ab2"), "X", "php"),
                candidate_path(&normalize_base_directory("/a"), "B\\X", "php"),
            ]
        );
    }
}

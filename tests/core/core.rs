use nsload::core::scanner;
use nsload::core::validator;
use nsload::{AutoloadConfig, AutoloadError, Autoloader, Include, LoadMode, SourceUnit};
use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use tempfile::tempdir;

fn write(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, body).expect("write");
}

/// Host that only records which paths it was asked to include.
#[derive(Default)]
struct CountingHost {
    seen: Vec<PathBuf>,
}

impl Include for CountingHost {
    fn include(&mut self, unit: &SourceUnit) -> Result<(), AutoloadError> {
        self.seen.push(unit.path.clone());
        Ok(())
    }
}

#[test]
fn registered_prefix_resolves_to_base_plus_relative_name() {
    let tmp = tempdir().expect("tempdir");
    let base = tmp.path().join("lib");
    write(&base.join("X.php"), "<?php namespace Acme;");

    let mut al = Autoloader::new();
    al.add_namespace("Acme", &base, false);

    let expected = format!("{}{}X.php", base.display(), MAIN_SEPARATOR);
    assert_eq!(al.resolve("Acme\\X"), Some(PathBuf::from(expected)));
    assert_eq!(al.resolve("Acme\\Y"), None);
}

#[test]
fn longer_prefix_beats_shorter_prefix() {
    let tmp = tempdir().expect("tempdir");
    let a = tmp.path().join("a");
    let ab = tmp.path().join("ab");
    write(&a.join("B").join("X.php"), "");
    write(&ab.join("X.php"), "");

    let mut al = Autoloader::new();
    al.add_namespace("A", &a, true);
    al.add_namespace("A\\B", &ab, false);

    assert_eq!(al.resolve("A\\B\\X"), Some(ab.join("X.php")));
}

#[test]
fn load_is_idempotent_per_path() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("Once.php");
    write(&file, "<?php namespace Once;");

    let mut al = Autoloader::with_host(CountingHost::default());
    assert!(al.load(&file).expect("first load"));
    assert!(al.load(&file).expect("second load"));
    assert_eq!(al.host().seen.len(), 1);

    assert!(!al.load(&tmp.path().join("Missing.php")).expect("missing"));
    assert_eq!(al.host().seen.len(), 1);
}

#[test]
fn validator_accepts_only_the_declared_namespace() {
    let tmp = tempdir().expect("tempdir");
    let file = tmp.path().join("Bar.php");
    write(&file, "<?php\n\nnamespace Foo\\Bar;\n\nclass Bar {}\n");

    assert!(validator::validate("Foo\\Bar", &file));
    assert!(!validator::validate("Foo\\Baz", &file));
}

#[test]
fn scanner_contract() {
    let tmp = tempdir().expect("tempdir");

    let missing = tmp.path().join("missing");
    assert!(matches!(
        scanner::list_files(&missing),
        Err(AutoloadError::DirectoryNotFound(_))
    ));

    let empty = tmp.path().join("empty");
    fs::create_dir(&empty).expect("mkdir");
    assert!(scanner::list_files(&empty).expect("list").is_empty());

    let mixed = tmp.path().join("mixed");
    write(&mixed.join("One.php"), "");
    fs::create_dir(mixed.join("Sub")).expect("mkdir");
    assert_eq!(
        scanner::list_files(&mixed).expect("list"),
        vec![mixed.join("One.php")]
    );
}

#[test]
fn on_demand_models_scenario() {
    let tmp = tempdir().expect("tempdir");
    let models = tmp.path().join("pkg").join("models");
    let user = models.join("User.php");
    write(&user, "<?php\nnamespace App\\Models;\n\nclass User {}\n");

    let mut al = Autoloader::with_host(CountingHost::default());
    al.add_namespace("App\\Models", &models, false);

    let resolved = al.resolve("App\\Models\\User").expect("resolves");
    assert_eq!(resolved, user);

    assert!(al.load(&resolved).expect("load"));
    assert!(al.load(&resolved).expect("reload"));
    assert_eq!(al.host().seen.len(), 1);
}

#[test]
fn eager_models_scenario_skips_foreign_namespace() {
    let tmp = tempdir().expect("tempdir");
    let models = tmp.path().join("pkg").join("models");
    write(&models.join("User.php"), "<?php\nnamespace App\\Models;\n");
    write(&models.join("Stray.php"), "<?php\nnamespace Other\\Ns;\n");

    let mut al = Autoloader::with_host(CountingHost::default());
    let report = al.load_namespace("App\\Models", &models).expect("eager load");

    let user = models.join("User.php").canonicalize().expect("canonical");
    assert_eq!(report.included, vec![user.clone()]);
    assert_eq!(report.skipped, vec![models.join("Stray.php")]);
    assert_eq!(al.host().seen, vec![user]);
}

#[test]
fn eager_missing_directory_is_surfaced() {
    let tmp = tempdir().expect("tempdir");
    let mut al = Autoloader::new();

    let err = al
        .load_namespace("App", &tmp.path().join("nowhere"))
        .expect_err("missing directory must fail");
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn config_file_drives_eager_mode_and_journal() {
    let tmp = tempdir().expect("tempdir");
    write(&tmp.path().join("src/models/User.php"), "namespace App\\Models;");
    write(&tmp.path().join("src/models/Stray.php"), "namespace Other;");
    let config_path = tmp.path().join("autoload.toml");
    write(
        &config_path,
        r#"
mode = "eager"
journal = "var/autoload.events.jsonl"

[[namespace]]
prefix = 'App\Models'
paths = ["src/models"]
"#,
    );

    let config = AutoloadConfig::load(&config_path).expect("config");
    assert_eq!(config.mode, LoadMode::Eager);

    let al = Autoloader::from_config(&config).expect("autoloader");
    assert_eq!(al.host().units().len(), 1);

    let journal =
        fs::read_to_string(tmp.path().join("var/autoload.events.jsonl")).expect("journal");
    let events: Vec<serde_json::Value> = journal
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["op"], "load");
    assert_eq!(events[0]["status"], "included");
    assert_eq!(events[1]["op"], "load_namespace");
    assert_eq!(events[1]["target"], "App\\Models");
}

//! nsload: a namespace-to-directory class autoloader.
//!
//! Maps namespace prefixes such as `App\Models` to base directories and turns fully-qualified
//! class names into source files: `App\Models\User` → `<base>/User.php`.
//!
//! # Modes
//!
//! - **On-demand**: the host calls [`Autoloader::autoload`] the first time it meets an unknown
//!   class. The most specific registered prefix wins; the file is included at most once.
//! - **Eager**: [`Autoloader::load_namespace`] includes every file directly inside a mapped
//!   directory that declares the expected namespace. Files declaring another namespace are
//!   skipped, a missing directory is an error.
//!
//! Inclusion itself belongs to the host runtime and is plugged in through [`Include`]. The
//! default [`SourceCache`] keeps the text and SHA-256 of every included file.
//!
//! # Example
//!
//! ```no_run
//! use nsload::Autoloader;
//!
//! let mut autoloader = Autoloader::new();
//! autoloader.add_namespace("App\\Models", "/srv/app/models", false);
//! if let Some(path) = autoloader.autoload("App\\Models\\User").unwrap() {
//!     println!("loaded {}", path.display());
//! }
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: registry, resolver, loader, validator, scanner and the `Autoloader` tying them
//!   together, plus config and the JSONL journal.

pub mod core;
mod cli;

pub use crate::core::autoloader::{Autoloader, LoadReport};
pub use crate::core::class_name::ClassName;
pub use crate::core::config::{AutoloadConfig, LoadMode};
pub use crate::core::error::AutoloadError;
pub use crate::core::hook::{ClassHook, HookChain};
pub use crate::core::loader::{Include, LoadOutcome, Loader, SourceCache, SourceUnit};
pub use crate::core::registry::Registry;

use crate::cli::{Cli, Command};
use crate::core::{config, output, validator};
use clap::Parser;
use colored::Colorize;
use std::path::Path;

fn load_config(explicit: Option<&Path>) -> Result<AutoloadConfig, AutoloadError> {
    let current_dir = std::env::current_dir()?;
    match config::config_path(explicit, &current_dir) {
        Some(path) => AutoloadConfig::load(&path),
        None => Ok(AutoloadConfig::default()),
    }
}

fn emit_json(cmd: &str, status: &str, extra: serde_json::Value) -> Result<(), AutoloadError> {
    let envelope = output::command_envelope(cmd, status, extra);
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

pub fn run() -> Result<(), AutoloadError> {
    let cli = Cli::parse();
    let json = cli.format == "json";
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Namespaces { file } => {
            let declared = validator::declared_namespaces(&file);
            if json {
                emit_json(
                    "namespaces",
                    "ok",
                    serde_json::json!({ "file": file, "namespaces": declared }),
                )?;
            } else {
                for ns in &declared {
                    println!("{}", ns);
                }
            }
        }
        Command::Map => {
            let autoloader = Autoloader::registry_from(SourceCache::new(), &config);
            let entries: Vec<_> = autoloader
                .registry()
                .entries()
                .map(|(prefix, dirs)| serde_json::json!({ "prefix": prefix, "paths": dirs }))
                .collect();
            if json {
                emit_json("map", "ok", serde_json::json!({ "namespaces": entries }))?;
            } else {
                for (prefix, dirs) in autoloader.registry().entries() {
                    let shown = if prefix.is_empty() { "\\" } else { prefix };
                    for dir in dirs {
                        println!("{} {} {}", shown.bright_white().bold(), "=>".bright_black(), dir);
                    }
                }
            }
        }
        Command::Resolve { class, explain } => {
            let autoloader = Autoloader::registry_from(SourceCache::new(), &config);
            if explain && !json {
                for probe in autoloader.probe_order(&class) {
                    let mark = if autoloader.loader().exists(&probe) {
                        "hit ".green()
                    } else {
                        "miss".bright_black()
                    };
                    eprintln!("  {} {}", mark, probe.display());
                }
            }
            let path = autoloader
                .resolve(&class)
                .ok_or_else(|| AutoloadError::NotFound(class.clone()))?;
            if json {
                emit_json(
                    "resolve",
                    "ok",
                    serde_json::json!({
                        "class": class,
                        "path": path,
                        "probes": autoloader.probe_order(&class),
                    }),
                )?;
            } else {
                println!("{}", path.display());
            }
        }
        Command::Load { class } => {
            let mut autoloader = Autoloader::configure(SourceCache::new(), &config)?;
            let path = autoloader
                .autoload(&class)?
                .ok_or_else(|| AutoloadError::NotFound(class.clone()))?;
            let hash = path
                .canonicalize()
                .ok()
                .and_then(|p| autoloader.host().get(&p).map(|u| u.content_hash.clone()))
                .unwrap_or_default();
            if json {
                emit_json(
                    "load",
                    "ok",
                    serde_json::json!({ "class": class, "path": path, "content_hash": hash }),
                )?;
            } else {
                println!("{} {} sha256:{}", "loaded".green(), path.display(), hash);
            }
        }
        Command::Scan { prefix, dir } => {
            let mut autoloader = Autoloader::configure(SourceCache::new(), &config)?;
            let report = autoloader.load_namespace(&prefix, &dir)?;
            if json {
                emit_json("scan", "ok", serde_json::json!({ "prefix": prefix, "report": report }))?;
            } else {
                for path in &report.included {
                    println!("{} {}", "included".green(), path.display());
                }
                for path in &report.already_loaded {
                    println!("{} {}", "loaded".bright_black(), path.display());
                }
                println!(
                    "{}: {} included, {} already loaded, {} skipped ({})",
                    prefix.bright_white().bold(),
                    report.included.len(),
                    report.already_loaded.len(),
                    report.skipped.len(),
                    output::preview_paths(&report.skipped, 5)
                );
            }
        }
    }

    Ok(())
}

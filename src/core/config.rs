//! Autoloader configuration from `autoload.toml`.

use crate::core::error::AutoloadError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "autoload.toml";
pub const CONFIG_ENV_VAR: &str = "NSLOAD_CONFIG";
pub const DEFAULT_EXTENSION: &str = "php";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadMode {
    /// Resolve and include one file per requested class.
    #[default]
    OnDemand,
    /// Include every namespace-matching file under each mapped directory up front.
    Eager,
}

/// One `[[namespace]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceEntry {
    pub prefix: String,
    pub paths: Vec<PathBuf>,
    #[serde(default)]
    pub prepend: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoloadConfig {
    #[serde(default)]
    pub mode: LoadMode,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub journal: Option<PathBuf>,
    #[serde(default, rename = "namespace")]
    pub namespaces: Vec<NamespaceEntry>,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Default for AutoloadConfig {
    fn default() -> Self {
        Self {
            mode: LoadMode::default(),
            extension: default_extension(),
            journal: None,
            namespaces: Vec::new(),
        }
    }
}

impl AutoloadConfig {
    pub fn parse(content: &str) -> Result<Self, AutoloadError> {
        toml::from_str(content).map_err(|e| AutoloadError::ConfigError(e.to_string()))
    }

    /// Reads a config file. Relative `paths` and `journal` are taken relative to the file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self, AutoloadError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AutoloadError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config = Self::parse(&content)?;
        let base = path.parent().unwrap_or(Path::new(""));
        config.rebase(base);
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        for entry in &mut self.namespaces {
            for p in &mut entry.paths {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        }
        if let Some(journal) = &mut self.journal {
            if journal.is_relative() {
                *journal = base.join(&*journal);
            }
        }
    }
}

/// The config file to load, if any: `explicit`, then `$NSLOAD_CONFIG`, then
/// `<dir>/autoload.toml` when it exists.
///
/// A named file (flag or env var) is returned whether or not it exists, so a typo surfaces as a
/// `ConfigError` from [`AutoloadConfig::load`]. Only the implicit file is optional.
pub fn config_path(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    select_config_path(explicit, std::env::var(CONFIG_ENV_VAR).ok(), dir)
}

fn select_config_path(
    explicit: Option<&Path>,
    env_value: Option<String>,
    dir: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        return Some(PathBuf::from(value));
    }
    let implicit = dir.join(CONFIG_FILE_NAME);
    implicit.exists().then_some(implicit)
}

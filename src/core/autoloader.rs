//! The autoloader instance: registry, loader and the two loading modes wired together.
//!
//! There is no process-wide instance. The embedding application builds one `Autoloader`,
//! keeps it for the life of the process, and passes it by `&mut` wherever classes are loaded.

use crate::core::class_name::{ClassName, trim_separators};
use crate::core::config::{AutoloadConfig, DEFAULT_EXTENSION, LoadMode};
use crate::core::error::AutoloadError;
use crate::core::journal::{Journal, JournalEvent};
use crate::core::loader::{Include, LoadOutcome, Loader, SourceCache};
use crate::core::registry::Registry;
use crate::core::{resolver, scanner, validator};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of an eager load over one or more namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Handed to the host by this call.
    pub included: Vec<PathBuf>,
    /// Matched the namespace but had been included before.
    pub already_loaded: Vec<PathBuf>,
    /// Present in the directory but not included: not a source file, or not declaring the
    /// expected namespace.
    pub skipped: Vec<PathBuf>,
}

impl LoadReport {
    pub fn merge(&mut self, other: LoadReport) {
        self.included.extend(other.included);
        self.already_loaded.extend(other.already_loaded);
        self.skipped.extend(other.skipped);
    }
}

/// Files of one namespace directory, split by the validator.
struct NamespacePlan {
    prefix: String,
    matching: Vec<PathBuf>,
    skipped: Vec<PathBuf>,
}

pub struct Autoloader<H: Include = SourceCache> {
    registry: Registry,
    loader: Loader<H>,
    extension: String,
    mode: LoadMode,
    journal: Option<Journal>,
}

impl Autoloader<SourceCache> {
    pub fn new() -> Self {
        Self::with_host(SourceCache::new())
    }

    pub fn from_config(config: &AutoloadConfig) -> Result<Self, AutoloadError> {
        Self::configure(SourceCache::new(), config)
    }
}

impl Default for Autoloader<SourceCache> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Include> Autoloader<H> {
    pub fn with_host(host: H) -> Self {
        Self {
            registry: Registry::new(),
            loader: Loader::new(host),
            extension: DEFAULT_EXTENSION.to_string(),
            mode: LoadMode::OnDemand,
            journal: None,
        }
    }

    /// Builds an autoloader from configuration. In eager mode every registered namespace is
    /// loaded before this returns.
    pub fn configure(host: H, config: &AutoloadConfig) -> Result<Self, AutoloadError> {
        let mut autoloader = Self::registry_from(host, config);
        if autoloader.mode == LoadMode::Eager {
            autoloader.load_registered()?;
        }
        Ok(autoloader)
    }

    /// Applies the configured namespaces, extension and journal without loading anything,
    /// whatever the configured mode. Mapped directories are not checked.
    pub fn registry_from(host: H, config: &AutoloadConfig) -> Self {
        let mut autoloader = Self::with_host(host).with_extension(&config.extension);
        autoloader.mode = config.mode;
        if let Some(path) = &config.journal {
            autoloader.journal = Some(Journal::new(path));
        }

        for entry in &config.namespaces {
            for path in &entry.paths {
                autoloader.add_namespace(&entry.prefix, path, entry.prepend);
            }
        }
        autoloader
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn loader(&self) -> &Loader<H> {
        &self.loader
    }

    pub fn host(&self) -> &H {
        self.loader.host()
    }

    pub fn add_namespace(
        &mut self,
        prefix: &str,
        base_directory: impl AsRef<Path>,
        prepend: bool,
    ) {
        let base = base_directory.as_ref().to_string_lossy();
        self.registry.add_namespace(prefix, &base, prepend);
    }

    /// Path of the file that defines `class`, if any mapped directory has one.
    pub fn resolve(&self, class: &str) -> Option<PathBuf> {
        let class = ClassName::new(class);
        resolver::resolve(&self.registry, &self.loader, &class, &self.extension)
    }

    /// Every path `resolve` would probe for `class`, in order.
    pub fn probe_order(&self, class: &str) -> Vec<PathBuf> {
        resolver::probe_order(&self.registry, &ClassName::new(class), &self.extension)
    }

    pub fn load(&mut self, path: &Path) -> Result<bool, AutoloadError> {
        Ok(self.load_traced(path, "")?.loaded())
    }

    /// On-demand entry point for the host: resolve `class`, then include its file.
    ///
    /// `Ok(None)` means no mapped directory has the class; the host should try its other
    /// resolvers or report the class as unknown.
    pub fn autoload(&mut self, class: &str) -> Result<Option<PathBuf>, AutoloadError> {
        let Some(path) = self.resolve(class) else {
            self.record(JournalEvent::new("resolve", class, "not_found"))?;
            return Ok(None);
        };

        if self.load_traced(&path, class)?.loaded() {
            Ok(Some(path))
        } else {
            // Removed between the existence probe and the read.
            Ok(None)
        }
    }

    /// Eager mode for one namespace directory: include every source file in `base_directory`
    /// (non-recursive) that declares `prefix`. Every other file is reported as skipped.
    pub fn load_namespace(
        &mut self,
        prefix: &str,
        base_directory: &Path,
    ) -> Result<LoadReport, AutoloadError> {
        let plan = self.plan_namespace(prefix, base_directory)?;
        self.apply(vec![plan])
    }

    /// Eager mode over a prefix → directory map, in iteration order.
    ///
    /// Every directory is listed before anything is included, so one missing directory aborts
    /// the whole map without partial inclusion.
    pub fn load_class_map<I, S, P>(&mut self, class_map: I) -> Result<LoadReport, AutoloadError>
    where
        I: IntoIterator<Item = (S, P)>,
        S: AsRef<str>,
        P: AsRef<Path>,
    {
        let mut plans = Vec::new();
        for (prefix, dir) in class_map {
            plans.push(self.plan_namespace(prefix.as_ref(), dir.as_ref())?);
        }
        self.apply(plans)
    }

    /// Eager mode over every (prefix, base directory) pair in the registry.
    pub fn load_registered(&mut self) -> Result<LoadReport, AutoloadError> {
        let pairs: Vec<(String, PathBuf)> = self
            .registry
            .entries()
            .flat_map(|(prefix, dirs)| {
                dirs.iter()
                    .map(move |d| (prefix.to_string(), PathBuf::from(d)))
            })
            .collect();
        self.load_class_map(pairs)
    }

    fn plan_namespace(
        &self,
        prefix: &str,
        base_directory: &Path,
    ) -> Result<NamespacePlan, AutoloadError> {
        let prefix = trim_separators(prefix).to_string();
        let (matching, skipped): (Vec<PathBuf>, Vec<PathBuf>) =
            scanner::list_files(base_directory)?
                .into_iter()
                .partition(|file| {
                    scanner::has_extension(file, &self.extension)
                        && validator::validate(&prefix, file)
                });
        Ok(NamespacePlan {
            prefix,
            matching,
            skipped,
        })
    }

    fn apply(&mut self, plans: Vec<NamespacePlan>) -> Result<LoadReport, AutoloadError> {
        let mut report = LoadReport::default();
        for plan in plans {
            let mut part = LoadReport {
                skipped: plan.skipped,
                ..LoadReport::default()
            };
            for file in &plan.matching {
                match self.load_traced(file, &plan.prefix)? {
                    LoadOutcome::Included(unit) => part.included.push(unit.path),
                    LoadOutcome::AlreadyLoaded(path) => part.already_loaded.push(path),
                    LoadOutcome::Missing => {}
                }
            }
            self.record(JournalEvent::new(
                "load_namespace",
                &plan.prefix,
                &format!(
                    "included={} already_loaded={} skipped={}",
                    part.included.len(),
                    part.already_loaded.len(),
                    part.skipped.len()
                ),
            ))?;
            report.merge(part);
        }
        Ok(report)
    }

    fn load_traced(&mut self, path: &Path, target: &str) -> Result<LoadOutcome, AutoloadError> {
        let outcome = self.loader.load_file(path)?;
        let event = match &outcome {
            LoadOutcome::Included(unit) => JournalEvent::new("load", target, "included")
                .with_path(&unit.path)
                .with_hash(&unit.content_hash),
            LoadOutcome::AlreadyLoaded(p) => {
                JournalEvent::new("load", target, "already_loaded").with_path(p)
            }
            LoadOutcome::Missing => JournalEvent::new("load", target, "missing").with_path(path),
        };
        self.record(event)?;
        Ok(outcome)
    }

    fn record(&self, event: JournalEvent) -> Result<(), AutoloadError> {
        match &self.journal {
            Some(journal) => journal.append(&event),
            None => Ok(()),
        }
    }
}

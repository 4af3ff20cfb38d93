//! Idempotent file inclusion.
//!
//! The `Loader` decides *whether* a file gets included; what inclusion means is up to the
//! embedding runtime, which supplies an [`Include`] implementation.

use crate::core::error::AutoloadError;
use rustc_hash::FxHashSet;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// A source file handed to the host for inclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub text: String,
    pub content_hash: String,
}

impl SourceUnit {
    /// Reads `path` as bytes. Invalid UTF-8 is replaced in `text`; the hash covers the raw bytes.
    pub fn from_path(path: &Path) -> Result<Self, AutoloadError> {
        let bytes = fs::read(path)?;
        Ok(Self {
            path: path.canonicalize()?,
            content_hash: hash_bytes(&bytes),
            text: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// The host side of inclusion: compile, evaluate, index, whatever the runtime does with a file.
///
/// Called at most once per canonical path by a given `Loader`.
pub trait Include {
    fn include(&mut self, unit: &SourceUnit) -> Result<(), AutoloadError>;
}

/// Default host: keeps every included unit in memory, in inclusion order.
#[derive(Debug, Default)]
pub struct SourceCache {
    units: Vec<SourceUnit>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    pub fn get(&self, path: &Path) -> Option<&SourceUnit> {
        self.units.iter().find(|u| u.path == path)
    }
}

impl Include for SourceCache {
    fn include(&mut self, unit: &SourceUnit) -> Result<(), AutoloadError> {
        self.units.push(unit.clone());
        Ok(())
    }
}

/// What a successful `load` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file did not exist; nothing happened.
    Missing,
    /// The file was handed to the host just now.
    Included(SourceUnit),
    /// The file had been included earlier; nothing happened.
    AlreadyLoaded(PathBuf),
}

impl LoadOutcome {
    /// `true` when the file is (now or previously) included.
    pub fn loaded(&self) -> bool {
        !matches!(self, LoadOutcome::Missing)
    }
}

pub struct Loader<H: Include = SourceCache> {
    host: H,
    record: FxHashSet<PathBuf>,
    order: Vec<PathBuf>,
}

impl<H: Include> Loader<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            record: FxHashSet::default(),
            order: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Existence probe used while resolving.
    pub fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Includes `path` once. Returns `false` only when the file does not exist.
    pub fn load(&mut self, path: &Path) -> Result<bool, AutoloadError> {
        Ok(self.load_file(path)?.loaded())
    }

    /// Same as [`Loader::load`] but reports what happened.
    ///
    /// A read or host failure leaves the path unrecorded so a later call retries it.
    pub fn load_file(&mut self, path: &Path) -> Result<LoadOutcome, AutoloadError> {
        if !self.exists(path) {
            return Ok(LoadOutcome::Missing);
        }

        let canonical = path.canonicalize()?;
        if self.record.contains(&canonical) {
            return Ok(LoadOutcome::AlreadyLoaded(canonical));
        }

        let unit = SourceUnit::from_path(&canonical)?;
        self.host.include(&unit)?;
        self.record.insert(canonical.clone());
        self.order.push(canonical);
        Ok(LoadOutcome::Included(unit))
    }

    pub fn is_loaded(&self, path: &Path) -> bool {
        path.canonicalize()
            .map(|p| self.record.contains(&p))
            .unwrap_or(false)
    }

    /// Canonical paths included so far, in inclusion order.
    pub fn loaded(&self) -> &[PathBuf] {
        &self.order
    }
}

//! Host-facing class resolution callbacks.
//!
//! A runtime that asks "who defines this class?" holds a `HookChain` and calls it on the first
//! reference to an unknown class. Each hook either loads the class or defers to the next one.

use crate::core::autoloader::Autoloader;
use crate::core::error::AutoloadError;
use crate::core::loader::Include;
use std::path::PathBuf;

pub trait ClassHook {
    /// `Ok(Some(path))` when this hook loaded `class` from `path`, `Ok(None)` to defer.
    fn autoload(&mut self, class: &str) -> Result<Option<PathBuf>, AutoloadError>;
}

impl<H: Include> ClassHook for Autoloader<H> {
    fn autoload(&mut self, class: &str) -> Result<Option<PathBuf>, AutoloadError> {
        Autoloader::autoload(self, class)
    }
}

/// Hooks tried in registration order until one loads the class.
#[derive(Default)]
pub struct HookChain {
    hooks: Vec<Box<dyn ClassHook>>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Box<dyn ClassHook>, prepend: bool) {
        if prepend {
            self.hooks.insert(0, hook);
        } else {
            self.hooks.push(hook);
        }
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// First hook to load `class` wins. An error from any hook stops the chain.
    pub fn autoload(&mut self, class: &str) -> Result<Option<PathBuf>, AutoloadError> {
        for hook in &mut self.hooks {
            if let Some(path) = hook.autoload(class)? {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }
}

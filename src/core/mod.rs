//! Core autoloading components.
//!
//! `registry`, `resolver` and `loader` make up on-demand mode; `scanner` and `validator`
//! add eager mode; `autoloader` owns all of it as one explicit instance.

pub mod autoloader;
pub mod class_name;
pub mod config;
pub mod error;
pub mod hook;
pub mod journal;
pub mod loader;
pub mod output;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod validator;

//! Core library for modsel.
//!
//! Module selection runs in two stages:
//!
//! 1. [`resolver::resolve_modules`] reconciles the build configuration with
//!    user overrides into an include/exclude partition.
//! 2. [`analyzer::ClosureAnalyzer`] walks the script sources of the included
//!    modules, following `require()` calls and collecting native bindings.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod paths;
pub mod resolver;
pub mod scan;

pub use analyzer::{ClosureAnalyzer, FsModuleSource, ModuleSource};
pub use error::SelectError;
pub use resolver::{Overrides, Resolution, resolve_modules};

/// Module that every build contains and from which the walk starts.
pub const ROOT_MODULE: &str = "iotjs";

/// Placeholder that seeds the visited set and is removed from the result.
pub const SYNTHETIC_SEED: &str = "native";

/// Native binding every build links, whether or not a script asks for it.
pub const PROCESS_BINDING: &str = "process";

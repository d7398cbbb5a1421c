//! Domain-specific errors for module selection.
//!
//! Every error is fatal: the selection runs once per build configuration
//! step and no partial module list is produced on failure.

use modsel_schema::{ModuleName, join_names};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the resolver and the closure analyzer.
#[derive(Error, Debug)]
pub enum SelectError {
    /// The user excluded modules that the configuration marks as always built.
    #[error("Cannot exclude modules which are always enabled: {}", join_names(.modules, ", "))]
    ConfigConflict {
        /// The conflicting modules, sorted.
        modules: Vec<ModuleName>,
    },

    /// A module was included or required but its source file does not exist.
    #[error("Cannot read file \"{}\"", .path.display())]
    MissingModuleFile {
        /// The module whose source was looked up.
        module: ModuleName,
        /// The path that was tried.
        path: PathBuf,
    },

    /// A visited module requires modules that are excluded from the build.
    #[error(
        "Cannot exclude module(s) \"{}\" since \"{module}\" requires them",
        join_names(.required, ", ")
    )]
    ExcludedDependency {
        /// The module whose source contains the requirement.
        module: ModuleName,
        /// The excluded modules it requires, sorted.
        required: Vec<ModuleName>,
    },

    /// The source file exists but could not be read.
    #[error("Failed to read \"{}\": {source}", .path.display())]
    ReadSource {
        /// The path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

//! Shared types and configuration wire format for modsel.
//!
//! Everything here is plain data: module names, module sets, the target
//! platform, the build configuration document and the final module record.
//! The algorithms that operate on these types live in `modsel-core`.

pub mod config;
pub mod platform;
pub mod types;

// Re-exports
pub use config::{
    BuildConfig, BuildOptions, ExcludeConfig, ModuleConfig, ModuleListValue, OutputMode,
};
pub use platform::TargetOs;
pub use types::*;

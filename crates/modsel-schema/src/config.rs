//! Build configuration document.
//!
//! The configuration is usually a `build.config.json` file:
//!
//! ```json
//! {
//!   "build_option": { "target-os": "linux", "iotjs-minimal-profile": false },
//!   "module": {
//!     "always": ["buffer", "console", "events", "fs", "module", "timers"],
//!     "include": ["net", "http"],
//!     "exclude": { "all": [], "nuttx": ["http"], "linux": ["stm32f4dis"] }
//!   }
//! }
//! ```

use crate::platform::TargetOs;
use crate::types::{ModuleSet, parse_module_list};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level build configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    /// The `module` section: always/include/exclude sets.
    #[serde(default)]
    pub module: ModuleConfig,
    /// The `build_option` section. Only the options this tool understands are
    /// kept; everything else in the section is ignored.
    #[serde(default)]
    pub build_option: BuildOptions,
}

impl BuildConfig {
    /// Target platform named by `build_option.target-os`, if any.
    pub fn target_os(&self) -> Option<TargetOs> {
        self.build_option
            .target_os
            .as_deref()
            .and_then(TargetOs::new)
    }
}

/// The `module` section of the build configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Modules that are always built and can never be excluded.
    #[serde(default)]
    pub always: ModuleSet,
    /// Modules built by default unless the minimal profile is selected.
    #[serde(default)]
    pub include: ModuleSet,
    /// Modules excluded for every platform or for a specific one.
    #[serde(default)]
    pub exclude: ExcludeConfig,
}

/// Exclusion buckets: a platform-agnostic `all` bucket plus one per platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeConfig {
    /// Excluded on every platform.
    #[serde(default)]
    pub all: ModuleSet,
    /// Excluded only when building for the keyed platform.
    #[serde(flatten)]
    pub platforms: BTreeMap<String, ModuleSet>,
}

impl ExcludeConfig {
    /// Exclude bucket for the given platform, if the configuration has one.
    ///
    /// Bucket keys match regardless of case, so `"NuttX"` serves `nuttx`.
    pub fn for_platform(&self, os: &TargetOs) -> Option<&ModuleSet> {
        self.platforms
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(os.as_str()))
            .map(|(_, bucket)| bucket)
    }
}

/// Options from the `build_option` section that act as defaults for the
/// corresponding command-line flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildOptions {
    /// Target platform; an empty string means none.
    #[serde(default)]
    pub target_os: Option<String>,
    /// Build with the minimal profile (skip `module.include`).
    #[serde(default)]
    pub iotjs_minimal_profile: bool,
    /// Modules the user asked to include.
    #[serde(default)]
    pub iotjs_include_module: Option<ModuleListValue>,
    /// Modules the user asked to exclude.
    #[serde(default)]
    pub iotjs_exclude_module: Option<ModuleListValue>,
    /// How the selected modules are printed.
    #[serde(default)]
    pub mode: Option<OutputMode>,
}

/// A module list option as written in the configuration.
///
/// Either a single comma-separated string, or a list of them. A list behaves
/// like the flag given once per entry: the last entry wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleListValue {
    /// `"net,http"`
    One(String),
    /// `["net,http", "gpio"]`
    Many(Vec<String>),
}

impl ModuleListValue {
    /// The module set this value selects.
    pub fn to_set(&self) -> ModuleSet {
        match self {
            Self::One(s) => parse_module_list(s),
            Self::Many(list) => list
                .last()
                .map(|s| parse_module_list(s))
                .unwrap_or_default(),
        }
    }
}

/// Output format of the selected module lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Human-readable lines.
    #[default]
    Verbose,
    /// `NAME=a;b;c` assignments for the build system.
    CmakeDump,
}

impl OutputMode {
    /// Name as used on the command line and in the configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::CmakeDump => "cmake-dump",
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur when parsing an [`OutputMode`].
#[derive(thiserror::Error, Debug)]
#[error("Invalid mode '{0}': expected one of verbose, cmake-dump")]
pub struct InvalidModeError(String);

impl std::str::FromStr for OutputMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verbose" => Ok(Self::Verbose),
            "cmake-dump" => Ok(Self::CmakeDump),
            other => Err(InvalidModeError(other.to_string())),
        }
    }
}

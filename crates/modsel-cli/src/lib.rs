//! modsel - runtime module selection
//!
//! Reads a build configuration, applies the user's include/exclude choices
//! and prints the script and native modules the build must compile in.
//!
//! # Pipeline
//!
//! 1. Load `build.config.json` and merge its `build_option` defaults with the
//!    command line ([`Selection::merge`]).
//! 2. Resolve the include/exclude partition ([`modsel_core::resolve_modules`]).
//! 3. Walk the dependency closure of the included scripts
//!    ([`modsel_core::ClosureAnalyzer`]).
//! 4. Print the result in the requested [`OutputMode`].

pub mod output;

use anyhow::Result;
use clap::Parser;
use modsel_core::paths::{default_config_path, js_source_dir};
use modsel_core::{ClosureAnalyzer, FsModuleSource, Overrides, ROOT_MODULE, resolve_modules};
use modsel_schema::{
    BuildConfig, ModuleListValue, ModuleRecord, OutputMode, TargetOs, parse_module_list,
};
use std::path::PathBuf;

/// Command-line arguments.
///
/// Repeating an option keeps the last value. Values given here replace the
/// same option from the configuration's `build_option` section.
#[derive(Debug, Parser)]
#[command(name = "modsel")]
#[command(version = env!("MODSEL_VERSION"))]
#[command(about = "Select runtime modules and compute their dependency closure")]
#[command(args_override_self = true)]
pub struct Cli {
    /// Build configuration file [default: <project-root>/build.config.json]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Project root containing the build configuration and `src/js`
    #[arg(long, env = "MODSEL_PROJECT_ROOT", default_value = ".")]
    pub project_root: PathBuf,

    /// Directory of script module sources [default: <project-root>/src/js]
    #[arg(long)]
    pub module_dir: Option<PathBuf>,

    /// Build with the minimal profile (skip the config's default include set)
    #[arg(long = "iotjs-minimal-profile")]
    pub minimal_profile: bool,

    /// Modules which should be included (format: `module_1,module_2,...`)
    #[arg(long = "iotjs-include-module", value_name = "MODULES")]
    pub include_module: Option<String>,

    /// Modules which should be excluded (format: `module_1,module_2,...`)
    #[arg(long = "iotjs-exclude-module", value_name = "MODULES")]
    pub exclude_module: Option<String>,

    /// Target OS, overriding `build_option.target-os`
    #[arg(long)]
    pub target_os: Option<String>,

    /// Execution mode: verbose or cmake-dump [default: verbose]
    #[arg(long)]
    pub mode: Option<OutputMode>,

    /// Prefix of the variables printed in cmake-dump mode
    #[arg(long, default_value = "IOTJS")]
    pub var_prefix: String,

    /// Module the dependency walk always starts from
    #[arg(long, default_value = ROOT_MODULE)]
    pub root_module: String,

    /// Log resolution details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Configuration path, falling back to the project default.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| default_config_path(&self.project_root))
    }

    /// Script source directory, falling back to the project default.
    pub fn module_dir(&self) -> PathBuf {
        self.module_dir
            .clone()
            .unwrap_or_else(|| js_source_dir(&self.project_root))
    }
}

/// Effective user choices after merging the command line over `build_option`.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Include/exclude overrides and profile.
    pub overrides: Overrides,
    /// Target platform, if any.
    pub target_os: Option<TargetOs>,
    /// Output format.
    pub mode: OutputMode,
}

impl Selection {
    /// Merge command-line arguments over the configuration's `build_option`.
    ///
    /// A value given on the command line replaces the configured one. The
    /// minimal profile is a switch: it is on if either source turns it on.
    pub fn merge(cli: &Cli, config: &BuildConfig) -> Self {
        let opts = &config.build_option;

        let include = match &cli.include_module {
            Some(list) => parse_module_list(list),
            None => opts
                .iotjs_include_module
                .as_ref()
                .map(ModuleListValue::to_set)
                .unwrap_or_default(),
        };
        let exclude = match &cli.exclude_module {
            Some(list) => parse_module_list(list),
            None => opts
                .iotjs_exclude_module
                .as_ref()
                .map(ModuleListValue::to_set)
                .unwrap_or_default(),
        };

        let target_os = match &cli.target_os {
            Some(os) => TargetOs::new(os),
            None => config.target_os(),
        };

        Self {
            overrides: Overrides {
                include,
                exclude,
                minimal_profile: cli.minimal_profile || opts.iotjs_minimal_profile,
            },
            target_os,
            mode: cli.mode.or(opts.mode).unwrap_or_default(),
        }
    }
}

/// Run the whole selection and return the text to print.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the user excludes
/// an always-built module, a module source is missing, or an included module
/// requires an excluded one.
pub fn run(cli: &Cli) -> Result<String> {
    let config_path = cli.config_path();
    let config = modsel_core::config::load(&config_path)?;
    let selection = Selection::merge(cli, &config);
    tracing::debug!("Output mode: {}", selection.mode);

    let record = select(cli, &config, &selection)?;
    Ok(output::render(&record, selection.mode, &cli.var_prefix))
}

/// Resolve and analyze, returning the sorted module record.
///
/// # Errors
///
/// See [`run`].
pub fn select(cli: &Cli, config: &BuildConfig, selection: &Selection) -> Result<ModuleRecord> {
    if let Some(os) = &selection.target_os {
        tracing::debug!("Target OS: {os}");
    }

    let resolution = resolve_modules(
        &config.module,
        selection.target_os.as_ref(),
        &selection.overrides,
    )?;

    let analyzer =
        ClosureAnalyzer::new(FsModuleSource::new(cli.module_dir())).with_root(&cli.root_module);
    let record = analyzer.analyze(&resolution.included, &resolution.excluded)?;

    Ok(record)
}

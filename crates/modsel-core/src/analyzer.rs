//! Dependency closure over module sources.
//!
//! Starting from the included modules plus the root module, the analyzer
//! reads each script, follows its `require()` calls and records the native
//! bindings it looks up. It fails as soon as a visited script requires a
//! module from the excluded set.

use crate::error::SelectError;
use crate::paths::{JS_EXTENSION, module_source_path};
use crate::scan::scan_source;
use crate::{PROCESS_BINDING, ROOT_MODULE, SYNTHETIC_SEED};
use modsel_schema::{ModuleName, ModuleRecord, ModuleSet, sorted};
use std::path::PathBuf;

/// Access to module source text.
pub trait ModuleSource {
    /// Path where the source of `name` is expected, used in error reports.
    fn locate(&self, name: &ModuleName) -> PathBuf;

    /// Read the full source text of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::MissingModuleFile`] if the source does not
    /// exist, or [`SelectError::ReadSource`] if it exists but can't be read.
    fn read(&self, name: &ModuleName) -> Result<String, SelectError>;
}

impl<T: ModuleSource + ?Sized> ModuleSource for &T {
    fn locate(&self, name: &ModuleName) -> PathBuf {
        (**self).locate(name)
    }

    fn read(&self, name: &ModuleName) -> Result<String, SelectError> {
        (**self).read(name)
    }
}

/// Module sources stored as `<dir>/<name>.<ext>` files.
#[derive(Debug, Clone)]
pub struct FsModuleSource {
    dir: PathBuf,
    extension: String,
}

impl FsModuleSource {
    /// Script sources in `dir` with the `.js` extension.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: JS_EXTENSION.to_string(),
        }
    }

    /// Use a different file extension.
    pub fn with_extension(mut self, ext: &str) -> Self {
        self.extension = ext.trim_start_matches('.').to_string();
        self
    }
}

impl ModuleSource for FsModuleSource {
    fn locate(&self, name: &ModuleName) -> PathBuf {
        module_source_path(&self.dir, name, &self.extension)
    }

    fn read(&self, name: &ModuleName) -> Result<String, SelectError> {
        let path = self.locate(name);
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SelectError::MissingModuleFile {
                    module: name.clone(),
                    path,
                }
            } else {
                SelectError::ReadSource { path, source }
            }
        })
    }
}

/// Pending modules of a closure walk.
///
/// This is a set, not a queue: items come out in no particular order and a
/// module that is already pending is not added twice.
#[derive(Debug, Default)]
pub struct WorkSet {
    pending: ModuleSet,
}

impl WorkSet {
    /// Add a module; returns `false` if it was already pending.
    pub fn insert(&mut self, name: ModuleName) -> bool {
        self.pending.insert(name)
    }

    /// Remove and return an arbitrary pending module.
    pub fn take_any(&mut self) -> Option<ModuleName> {
        let name = self.pending.iter().next().cloned()?;
        self.pending.remove(&name);
        Some(name)
    }
}

impl Extend<ModuleName> for WorkSet {
    fn extend<I: IntoIterator<Item = ModuleName>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}

/// Computes the transitive closure of script modules and the native bindings
/// they use.
#[derive(Debug)]
pub struct ClosureAnalyzer<S> {
    source: S,
    root: ModuleName,
}

impl<S: ModuleSource> ClosureAnalyzer<S> {
    /// Analyzer over `source`, starting from the default root module.
    pub fn new(source: S) -> Self {
        Self {
            source,
            root: ModuleName::new(ROOT_MODULE),
        }
    }

    /// Start the walk from a different root module.
    pub fn with_root(mut self, root: &str) -> Self {
        self.root = ModuleName::new(root);
        self
    }

    /// Walk the sources reachable from `included` plus the root module.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::MissingModuleFile`] if a visited module has no
    /// source, or [`SelectError::ExcludedDependency`] if a visited module
    /// requires a module in `excluded`.
    pub fn analyze(
        &self,
        included: &ModuleSet,
        excluded: &ModuleSet,
    ) -> Result<ModuleRecord, SelectError> {
        let mut queue = WorkSet::default();
        queue.extend(included.iter().cloned());
        queue.insert(self.root.clone());

        let mut js_modules = ModuleSet::from([ModuleName::new(SYNTHETIC_SEED)]);
        let mut native_modules = ModuleSet::from([ModuleName::new(PROCESS_BINDING)]);

        while let Some(item) = queue.take_any() {
            tracing::debug!("Analyzing module {item}");
            js_modules.insert(item.clone());

            let content = self.source.read(&item)?;
            let refs = scan_source(&content);

            let problem = sorted(refs.required.intersection(excluded));
            if !problem.is_empty() {
                return Err(SelectError::ExcludedDependency {
                    module: item,
                    required: problem,
                });
            }

            for required in refs.required {
                if !js_modules.contains(&required) {
                    tracing::trace!("{item} requires {required}");
                    queue.insert(required);
                }
            }

            native_modules.extend(refs.native);
        }

        js_modules.remove(SYNTHETIC_SEED);

        let record = ModuleRecord {
            js_modules: sorted(&js_modules),
            native_modules: sorted(&native_modules),
        };
        tracing::debug!(
            "Selected {} js and {} native modules",
            record.js_modules.len(),
            record.native_modules.len()
        );

        Ok(record)
    }
}

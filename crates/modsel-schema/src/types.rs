//! Module names, module sets and the closure result.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;

/// A module name, e.g. `net` or `gpio`.
///
/// Names are opaque and case-sensitive: `Net` and `net` are different modules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleName(String);

impl ModuleName {
    /// Create a module name from the given string (stored as-is).
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Return the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for ModuleName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ModuleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ModuleName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModuleName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ModuleName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An unordered set of module names.
///
/// Iteration order is unspecified; anything user-facing must sort first
/// (see [`sorted`]).
pub type ModuleSet = HashSet<ModuleName>;

/// Parse a comma-separated module list (`"a, b,,c"`) into a set.
///
/// Entries are trimmed and empty entries are dropped, so `""` yields an
/// empty set.
///
/// # Example
///
/// ```
/// use modsel_schema::parse_module_list;
///
/// let set = parse_module_list(" net, ,gpio,net ");
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("net"));
/// assert!(set.contains("gpio"));
/// ```
pub fn parse_module_list(argument: &str) -> ModuleSet {
    argument
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(ModuleName::new)
        .collect()
}

/// Collect any iterator of module names into a sorted, de-duplicated list.
pub fn sorted<'a>(modules: impl IntoIterator<Item = &'a ModuleName>) -> Vec<ModuleName> {
    let mut list: Vec<ModuleName> = modules.into_iter().cloned().collect();
    list.sort();
    list.dedup();
    list
}

/// Join module names with a separator, in the order given.
pub fn join_names(modules: &[ModuleName], sep: &str) -> String {
    modules
        .iter()
        .map(ModuleName::as_str)
        .collect::<Vec<_>>()
        .join(sep)
}

/// The outcome of a dependency closure walk.
///
/// Both lists are sorted so that the same inputs always produce the same
/// output, regardless of the order in which modules were visited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Script modules whose source was read during the walk.
    pub js_modules: Vec<ModuleName>,
    /// Native binding modules referenced by any visited script.
    pub native_modules: Vec<ModuleName>,
}

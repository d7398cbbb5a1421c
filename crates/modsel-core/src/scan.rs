//! Textual scanning of module sources.
//!
//! This is a lightweight pattern scan, not a JavaScript parser. Comments are
//! stripped with a single non-nested pattern before looking for `require()`
//! and `process.binding()` calls, which has known blind spots:
//!
//! - A `//` or `/* */` inside a string literal is treated as a comment, so a
//!   `require()` later on the same line is dropped.
//! - Block comments are only recognised when they open and close on the same
//!   line. A call inside a multi-line block comment still counts.
//! - Several block comments on one line are stripped together with whatever
//!   code sits between them.
//!
//! Callers rely on these exact results (see the regression tests), so any
//! change here changes which modules end up in a build.

use modsel_schema::{ModuleName, ModuleSet};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// `.` does not match a newline, so neither alternative crosses lines.
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//.*|/\*.*\*/").expect("valid comment pattern"));

static REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"require\(['"](.*?)['"]\)"#).expect("valid require pattern")
});

// The unescaped dots are intentional: `process.binding.tcp` and
// `process.binding(process_binding_tcp)` style lookups both match.
static NATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"process.binding\(process.binding.(.*?)\)").expect("valid binding pattern")
});

/// What a single module source refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRefs {
    /// Script modules named in `require('...')` calls.
    pub required: ModuleSet,
    /// Native modules named in `process.binding(process.binding.<name>)` calls.
    pub native: ModuleSet,
}

/// Remove `//` line comments and single-line `/* */` block comments.
pub fn strip_comments(source: &str) -> Cow<'_, str> {
    COMMENT_RE.replace_all(source, "")
}

/// Module names required by `source`. Comments must already be stripped.
pub fn required_modules(source: &str) -> ModuleSet {
    capture_names(&REQUIRE_RE, source)
}

/// Native binding names looked up by `source`. Comments must already be stripped.
pub fn native_bindings(source: &str) -> ModuleSet {
    capture_names(&NATIVE_RE, source)
}

/// Strip comments, then collect both kinds of references.
pub fn scan_source(source: &str) -> SourceRefs {
    let code = strip_comments(source);
    SourceRefs {
        required: required_modules(&code),
        native: native_bindings(&code),
    }
}

fn capture_names(re: &Regex, source: &str) -> ModuleSet {
    re.captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| ModuleName::new(m.as_str()))
        .collect()
}

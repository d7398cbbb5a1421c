//! Rendering of the selected module lists.

use modsel_schema::{ModuleRecord, OutputMode, join_names};

/// Render `record` in the given mode. The result ends with a newline.
///
/// `prefix` names the build-system variables in [`OutputMode::CmakeDump`]:
/// `<prefix>_JS_MODULES` and `<prefix>_NATIVE_MODULES`.
pub fn render(record: &ModuleRecord, mode: OutputMode, prefix: &str) -> String {
    match mode {
        OutputMode::CmakeDump => format!(
            "{prefix}_JS_MODULES={}\n{prefix}_NATIVE_MODULES={}\n",
            join_names(&record.js_modules, ";"),
            join_names(&record.native_modules, ";"),
        ),
        OutputMode::Verbose => format!(
            "Selected js modules: {}\nSelected native modules: {}\n",
            join_names(&record.js_modules, ", "),
            join_names(&record.native_modules, ", "),
        ),
    }
}

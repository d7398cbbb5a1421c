//! Filesystem conventions for configuration and module sources.

use std::path::{Path, PathBuf};

/// File extension of script module sources.
pub const JS_EXTENSION: &str = "js";

/// Default build configuration: `<root>/build.config.json`
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join("build.config.json")
}

/// Script module sources: `<root>/src/js`
pub fn js_source_dir(root: &Path) -> PathBuf {
    root.join("src").join("js")
}

/// Source file of one module: `<dir>/<name>.<ext>`
pub fn module_source_path(dir: &Path, name: &str, ext: &str) -> PathBuf {
    dir.join(format!("{name}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let root = Path::new("/work/iotjs");
        assert_eq!(
            default_config_path(root),
            PathBuf::from("/work/iotjs/build.config.json")
        );
        assert_eq!(
            module_source_path(&js_source_dir(root), "net", JS_EXTENSION),
            PathBuf::from("/work/iotjs/src/js/net.js")
        );
    }
}

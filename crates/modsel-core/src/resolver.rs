//! Include/exclude set resolution.

use crate::error::SelectError;
use modsel_schema::{ModuleConfig, ModuleSet, TargetOs, sorted};

/// Module choices made by the user, on the command line or in `build_option`.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Modules to build even if the configuration excludes them.
    pub include: ModuleSet,
    /// Modules to leave out of the build.
    pub exclude: ModuleSet,
    /// Skip the configuration's default include set.
    pub minimal_profile: bool,
}

/// Final include/exclude partition. The two sets never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Modules selected for the build.
    pub included: ModuleSet,
    /// Modules that must not end up in the build.
    pub excluded: ModuleSet,
}

/// Resolves the include and exclude module sets for a build.
///
/// Precedence, from strongest to weakest:
///
/// - `always` modules can never be excluded by the user; trying is a conflict.
/// - A module in the final excluded set is never included.
/// - A user include removes the module from the configuration's excludes
///   (including the target platform bucket).
/// - The configuration's include set applies unless the minimal profile is on.
///
/// # Errors
///
/// Returns [`SelectError::ConfigConflict`] if the user excludes a module that
/// the configuration marks as always built.
pub fn resolve_modules(
    config: &ModuleConfig,
    target_os: Option<&TargetOs>,
    overrides: &Overrides,
) -> Result<Resolution, SelectError> {
    let mut config_excludes = config.exclude.all.clone();

    if let Some(os) = target_os {
        match config.exclude.for_platform(os) {
            Some(bucket) => config_excludes.extend(bucket.iter().cloned()),
            None => tracing::warn!(
                "No exclude bucket for target OS '{os}', only `exclude.all` applies"
            ),
        }
    }

    // Command line choices outrank build config defaults
    config_excludes.retain(|m| !overrides.include.contains(m));

    let mut included: ModuleSet = config.always.union(&overrides.include).cloned().collect();
    if !overrides.minimal_profile {
        included.extend(config.include.iter().cloned());
    }

    let impossible: Vec<_> = sorted(overrides.exclude.intersection(&config.always));
    if !impossible.is_empty() {
        return Err(SelectError::ConfigConflict {
            modules: impossible,
        });
    }

    let excluded: ModuleSet = overrides.exclude.union(&config_excludes).cloned().collect();
    included.retain(|m| !excluded.contains(m));

    tracing::debug!(
        "Resolved {} included and {} excluded modules",
        included.len(),
        excluded.len()
    );

    Ok(Resolution { included, excluded })
}

#[cfg(test)]
mod tests {
    use super::*;
    use modsel_schema::{ExcludeConfig, ModuleName};

    fn set(names: &[&str]) -> ModuleSet {
        names.iter().map(|n| ModuleName::new(n)).collect()
    }

    fn config(always: &[&str], include: &[&str], exclude_all: &[&str]) -> ModuleConfig {
        ModuleConfig {
            always: set(always),
            include: set(include),
            exclude: ExcludeConfig {
                all: set(exclude_all),
                platforms: Default::default(),
            },
        }
    }

    fn overrides(include: &[&str], exclude: &[&str]) -> Overrides {
        Overrides {
            include: set(include),
            exclude: set(exclude),
            minimal_profile: false,
        }
    }

    #[test]
    fn test_defaults_without_overrides() {
        let cfg = config(&["core"], &["net"], &[]);
        let res = resolve_modules(&cfg, None, &Overrides::default()).unwrap();
        assert_eq!(sorted(&res.included), vec!["core", "net"]);
        assert!(res.excluded.is_empty());
    }

    #[test]
    fn test_excluding_always_module_conflicts() {
        let cfg = config(&["core", "buffer"], &["net"], &[]);
        let err = resolve_modules(&cfg, None, &overrides(&[], &["core", "net", "buffer"]))
            .unwrap_err();
        match &err {
            SelectError::ConfigConflict { modules } => {
                assert_eq!(modules, &vec!["buffer", "core"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("buffer, core"));
    }

    #[test]
    fn test_conflict_wins_over_user_include() {
        // Including the module as well does not resolve the conflict
        let cfg = config(&["core"], &[], &[]);
        let result = resolve_modules(&cfg, None, &overrides(&["core"], &["core"]));
        assert!(matches!(result, Err(SelectError::ConfigConflict { .. })));
    }

    #[test]
    fn test_config_exclude_removes_config_include() {
        let cfg = config(&[], &["a"], &["b"]);
        let res = resolve_modules(&cfg, None, &Overrides::default()).unwrap();
        assert_eq!(sorted(&res.included), vec!["a"]);
        assert_eq!(sorted(&res.excluded), vec!["b"]);

        let cfg = config(&[], &["a", "b"], &["b"]);
        let res = resolve_modules(&cfg, None, &Overrides::default()).unwrap();
        assert_eq!(sorted(&res.included), vec!["a"]);
    }

    #[test]
    fn test_user_include_beats_platform_exclude() {
        let mut cfg = config(&[], &[], &["uart"]);
        cfg.exclude
            .platforms
            .insert("linux".into(), set(&["stm32", "gpio"]));
        let os = TargetOs::new("tizen").unwrap();

        let res = resolve_modules(&cfg, Some(&os), &overrides(&["gpio", "uart"], &[])).unwrap();
        assert_eq!(sorted(&res.included), vec!["gpio", "uart"]);
        assert_eq!(sorted(&res.excluded), vec!["stm32"]);
    }

    #[test]
    fn test_user_exclude_beats_user_include() {
        let mut cfg = config(&[], &[], &[]);
        cfg.exclude.platforms.insert("linux".into(), set(&["gpio"]));
        let os = TargetOs::new("linux").unwrap();

        let res = resolve_modules(&cfg, Some(&os), &overrides(&["gpio"], &["gpio"])).unwrap();
        assert!(res.included.is_empty());
        assert_eq!(sorted(&res.excluded), vec!["gpio"]);
    }

    #[test]
    fn test_platform_bucket_only_for_target() {
        let mut cfg = config(&[], &["http", "net"], &[]);
        cfg.exclude.platforms.insert("nuttx".into(), set(&["http"]));

        let res = resolve_modules(&cfg, None, &Overrides::default()).unwrap();
        assert_eq!(sorted(&res.included), vec!["http", "net"]);

        let linux = TargetOs::new("linux").unwrap();
        let res = resolve_modules(&cfg, Some(&linux), &Overrides::default()).unwrap();
        assert_eq!(sorted(&res.included), vec!["http", "net"]);

        let nuttx = TargetOs::new("nuttx").unwrap();
        let res = resolve_modules(&cfg, Some(&nuttx), &Overrides::default()).unwrap();
        assert_eq!(sorted(&res.included), vec!["net"]);
        assert_eq!(sorted(&res.excluded), vec!["http"]);
    }

    #[test]
    fn test_mixed_case_platform_bucket_is_applied() {
        let config: modsel_schema::BuildConfig = serde_json::from_str(
            r#"{
                "build_option": {"target-os": "NuttX"},
                "module": {"include": ["http", "net"], "exclude": {"all": [], "NuttX": ["http"]}}
            }"#,
        )
        .unwrap();
        let os = config.target_os();

        let res = resolve_modules(&config.module, os.as_ref(), &Overrides::default()).unwrap();
        assert_eq!(sorted(&res.included), vec!["net"]);
        assert_eq!(sorted(&res.excluded), vec!["http"]);
    }

    #[test]
    fn test_unknown_platform_keeps_exclude_all() {
        let mut cfg = config(&[], &["a", "b"], &["b"]);
        cfg.exclude.platforms.insert("nuttx".into(), set(&["a"]));
        let os = TargetOs::new("nuttz").unwrap();

        let res = resolve_modules(&cfg, Some(&os), &Overrides::default()).unwrap();
        assert_eq!(sorted(&res.included), vec!["a"]);
        assert_eq!(sorted(&res.excluded), vec!["b"]);
    }

    #[test]
    fn test_minimal_profile_skips_config_include() {
        let cfg = config(&["core"], &["net", "http"], &[]);
        let mut ov = overrides(&["gpio"], &[]);
        ov.minimal_profile = true;

        let res = resolve_modules(&cfg, None, &ov).unwrap();
        assert_eq!(sorted(&res.included), vec!["core", "gpio"]);
    }

    #[test]
    fn test_partition_is_disjoint() {
        let mut cfg = config(&["core"], &["a", "b", "c"], &["c", "d"]);
        cfg.exclude.platforms.insert("linux".into(), set(&["a", "e"]));
        let os = TargetOs::new("linux").unwrap();

        for (inc, exc) in [
            (vec![], vec![]),
            (vec!["a"], vec![]),
            (vec!["a", "d"], vec!["b"]),
            (vec!["e", "x"], vec!["e", "a"]),
        ] {
            let res = resolve_modules(&cfg, Some(&os), &overrides(&inc, &exc)).unwrap();
            assert!(
                res.included.is_disjoint(&res.excluded),
                "overlap for include={inc:?} exclude={exc:?}"
            );
            assert!(res.included.contains("core"));
        }
    }
}

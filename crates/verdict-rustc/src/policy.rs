//! Feature flags and output directories derived from a (mode, target) pair.

use std::path::{Path, PathBuf};

use verdict_targets::{BuildMode, Target};

/// Feature enabled when building for the local environment (no target).
pub const LOCAL_JUDGE: &str = "local-judge";

/// Feature enabled when building a judge-submittable artifact.
pub const ONLINE_JUDGE: &str = "online-judge";

/// Conditional-compilation features for a (mode, target) pair.
///
/// `local-judge` is present iff no cross-compile target is given;
/// `online-judge` is present iff the mode is release. Both, either, or
/// neither may be active.
pub fn features(mode: BuildMode, target: Option<&Target>) -> Vec<&'static str> {
    let mut active = Vec::new();
    if target.is_none() {
        active.push(LOCAL_JUDGE);
    }
    if mode == BuildMode::Release {
        active.push(ONLINE_JUDGE);
    }
    active
}

/// Ordered path segments of the build-state directory for a (mode, target)
/// pair. No two pairs share a directory.
///
/// Coverage builds keep their incremental state under the instrumentation
/// harness's own `cov/build/debug` subtree rather than a `coverage` segment.
pub fn target_dir(mode: BuildMode, target: Option<&Target>) -> Vec<String> {
    let mut segments = vec!["target".to_owned()];
    if let Some(t) = target {
        segments.push(t.triple.clone());
    }
    if mode == BuildMode::Coverage {
        segments.extend(["cov", "build", "debug"].map(str::to_owned));
    } else {
        segments.push(mode.as_str().to_owned());
    }
    segments
}

/// The build-state directory for a (mode, target) pair, rooted at `root`.
pub fn target_path(root: &Path, mode: BuildMode, target: Option<&Target>) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in target_dir(mode, target) {
        path.push(segment);
    }
    path
}

/// Symbolic name under which a library artifact is linked.
///
/// Derived from the artifact file name: the `lib` prefix is stripped, the
/// trailing metadata hash (everything from the first hyphen) is cut, and the
/// workspace-prefix convention `<project>_<name>` leaves only the final
/// component: `libporus_core-abcdef.rlib` → `core`.
pub fn library_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let unprefixed = stem.get(3..).unwrap_or_default();
    let head = unprefixed.split('-').next().unwrap_or_default();
    match head.rsplit_once('_') {
        Some((_, tail)) => tail.to_owned(),
        None => head.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn triple() -> Target {
        Target::new("i686-unknown-linux-gnu")
    }

    #[test]
    fn features_debug_local() {
        assert_eq!(features(BuildMode::Debug, None), vec![LOCAL_JUDGE]);
    }

    #[test]
    fn features_release_cross() {
        assert_eq!(
            features(BuildMode::Release, Some(&triple())),
            vec![ONLINE_JUDGE]
        );
    }

    #[test]
    fn features_release_local_has_both() {
        assert_eq!(
            features(BuildMode::Release, None),
            vec![LOCAL_JUDGE, ONLINE_JUDGE]
        );
    }

    #[test]
    fn features_debug_cross_is_empty() {
        assert!(features(BuildMode::Debug, Some(&triple())).is_empty());
    }

    #[test]
    fn features_coverage_matches_debug() {
        assert_eq!(features(BuildMode::Coverage, None), vec![LOCAL_JUDGE]);
        assert!(features(BuildMode::Coverage, Some(&triple())).is_empty());
    }

    #[test]
    fn target_dir_debug_local() {
        assert_eq!(target_dir(BuildMode::Debug, None), ["target", "debug"]);
    }

    #[test]
    fn target_dir_release_cross() {
        assert_eq!(
            target_dir(BuildMode::Release, Some(&triple())),
            ["target", "i686-unknown-linux-gnu", "release"]
        );
    }

    #[test]
    fn target_dir_coverage_never_ends_with_mode_name() {
        let segments = target_dir(BuildMode::Coverage, None);
        assert_eq!(segments, ["target", "cov", "build", "debug"]);
        assert_ne!(segments.last().unwrap(), "coverage");
    }

    #[test]
    fn target_dir_is_unique_per_pair() {
        let pairs: Vec<Vec<String>> = [
            (BuildMode::Debug, None),
            (BuildMode::Release, None),
            (BuildMode::Coverage, None),
            (BuildMode::Debug, Some(triple())),
            (BuildMode::Release, Some(triple())),
            (BuildMode::Coverage, Some(triple())),
        ]
        .iter()
        .map(|(mode, target)| target_dir(*mode, target.as_ref()))
        .collect();

        for (i, a) in pairs.iter().enumerate() {
            for b in pairs.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn target_path_joins_segments() {
        let path = target_path(Path::new("/work"), BuildMode::Release, Some(&triple()));
        assert_eq!(
            path,
            Path::new("/work/target/i686-unknown-linux-gnu/release")
        );
    }

    #[test]
    fn library_name_strips_prefix_and_hash() {
        assert_eq!(
            library_name(Path::new("libporus_core-abcdef.rlib")),
            "core"
        );
    }

    #[test]
    fn library_name_without_underscore() {
        assert_eq!(library_name(Path::new("libporus-abcdef.rlib")), "porus");
    }

    #[test]
    fn library_name_with_directory_components() {
        assert_eq!(
            library_name(Path::new("target/debug/deps/libporus_macros-0123.so")),
            "macros"
        );
    }
}

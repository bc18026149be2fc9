//! Build modes, cross-compile targets, and the judge registry for verdict.
//!
//! Each online judge is described by a TOML descriptor compiled into the
//! binary, mapping the judge id found in a solution path to the LLVM target
//! triple of the judge's execution environment and the language it accepts
//! for submissions.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Build mode governing optimization, instrumentation, and output form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildMode {
    Debug,
    Release,
    Coverage,
}

impl BuildMode {
    /// The mode name as it appears in directory paths and flags.
    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
            BuildMode::Coverage => "coverage",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildMode {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(BuildMode::Debug),
            "release" => Ok(BuildMode::Release),
            "coverage" => Ok(BuildMode::Coverage),
            other => Err(TargetError::UnknownMode {
                mode: other.to_owned(),
            }),
        }
    }
}

/// A cross-compilation target triple. Absence of a target means "build for
/// the local environment".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub triple: String,
}

impl Target {
    pub fn new(triple: &str) -> Self {
        Self {
            triple: triple.to_owned(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.triple)
    }
}

/// A judge descriptor loaded from a compiled-in TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JudgeDescriptor {
    /// Judge id as it appears as a path segment in solution paths.
    pub name: String,
    /// LLVM target triple of the judge's execution environment.
    pub target: String,
    /// Language accepted for submissions.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "C".to_owned()
}

// ---------------------------------------------------------------------------
// Descriptor loading
// ---------------------------------------------------------------------------

const AIZU: &str = include_str!("../../../judges/aizu.toml");
const CODEFORCES: &str = include_str!("../../../judges/codeforces.toml");
const LEETCODE: &str = include_str!("../../../judges/leetcode.toml");

/// Load all built-in judge descriptors.
///
/// # Errors
/// Returns an error if any embedded descriptor fails to parse.
pub fn load_descriptors() -> Result<Vec<JudgeDescriptor>, TargetError> {
    let sources = [
        ("aizu.toml", AIZU),
        ("codeforces.toml", CODEFORCES),
        ("leetcode.toml", LEETCODE),
    ];
    let mut descriptors = Vec::with_capacity(sources.len());

    for (filename, content) in sources {
        let descriptor: JudgeDescriptor =
            toml::from_str(content).map_err(|e| TargetError::InvalidDescriptor {
                name: filename.to_owned(),
                reason: e.to_string(),
            })?;
        descriptors.push(descriptor);
    }

    Ok(descriptors)
}

/// Look up a judge by id.
///
/// # Errors
/// Returns [`TargetError::UnknownJudge`] if no descriptor is registered for
/// the id, or a parse error if the embedded descriptors are malformed.
pub fn lookup(judge: &str) -> Result<JudgeDescriptor, TargetError> {
    let descriptors = load_descriptors()?;
    let available = descriptors
        .iter()
        .map(|d| d.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    descriptors
        .into_iter()
        .find(|d| d.name == judge)
        .ok_or_else(|| TargetError::UnknownJudge {
            judge: judge.to_owned(),
            available,
        })
}

/// Resolve the cross-compile target for a judge id.
///
/// # Errors
/// Returns [`TargetError::UnknownJudge`] if the judge has no registered
/// descriptor.
pub fn judge_target(judge: &str) -> Result<Target, TargetError> {
    let descriptor = lookup(judge)?;
    Ok(Target::new(&descriptor.target))
}

#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("unknown judge \"{judge}\" — no cross-compile target registered (available: {available})")]
    UnknownJudge { judge: String, available: String },

    #[error("invalid judge descriptor {name}: {reason}")]
    InvalidDescriptor { name: String, reason: String },

    #[error("unknown build mode \"{mode}\" — expected debug, release, or coverage")]
    UnknownMode { mode: String },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mode_roundtrips_through_str() {
        for mode in [BuildMode::Debug, BuildMode::Release, BuildMode::Coverage] {
            assert_eq!(BuildMode::from_str(mode.as_str()).unwrap(), mode);
        }
    }

    #[test]
    fn mode_rejects_unknown_name() {
        assert!(BuildMode::from_str("profile").is_err());
    }

    #[test]
    fn load_descriptors_succeeds() {
        let descriptors = load_descriptors().unwrap();
        assert!(
            descriptors.len() >= 3,
            "expected at least 3 descriptors, got {}",
            descriptors.len()
        );
        for d in &descriptors {
            assert!(!d.name.is_empty());
            assert!(!d.target.is_empty());
            assert!(!d.language.is_empty());
        }
    }

    #[test]
    fn lookup_known_judge() {
        let descriptor = lookup("codeforces").unwrap();
        assert_eq!(descriptor.name, "codeforces");
        assert_eq!(descriptor.target, "i686-unknown-linux-gnu");
        assert_eq!(descriptor.language, "C");
    }

    #[test]
    fn lookup_unknown_judge_names_alternatives() {
        let err = lookup("spoj").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("spoj"), "got: {message}");
        assert!(message.contains("codeforces"), "got: {message}");
    }

    #[test]
    fn judge_target_resolves_triple() {
        let target = judge_target("judge.u-aizu.ac.jp").unwrap();
        assert_eq!(target.triple, "x86_64-unknown-linux-gnu");
    }

    #[test]
    fn target_display_is_triple() {
        let target = Target::new("i686-unknown-linux-gnu");
        assert_eq!(target.to_string(), "i686-unknown-linux-gnu");
    }

    proptest::proptest! {
        #[test]
        fn mode_parse_accepts_exactly_three_names(s in "\\PC{0,16}") {
            let parsed = BuildMode::from_str(&s);
            let expected = matches!(s.as_str(), "debug" | "release" | "coverage");
            proptest::prop_assert_eq!(parsed.is_ok(), expected);
        }
    }

    #[test]
    fn descriptor_rejects_unknown_fields() {
        let toml_str = r#"
name = "test-judge"
target = "x86_64-unknown-linux-gnu"
compiler = "should fail"
"#;
        let result: Result<JudgeDescriptor, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }
}

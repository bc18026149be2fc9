//! Solution identity derived from the path naming convention.
//!
//! The convention is `<archive>/<judgeId>/<...>/<problemId>.rs[.c]`: the
//! judge id is the second path segment (word, dot, and hyphen characters),
//! the problem id is the file stem (word and hyphen characters), and any
//! number of intermediate segments may sit between them.

use std::path::PathBuf;

use crate::error::EngineError;

/// A solution's identity, derived once from its path and immutable after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionRef {
    /// Judge id, e.g. `codeforces`.
    pub judge: String,
    /// Problem id, e.g. `1500-A`.
    pub problem: String,
    /// The original path, relative to the workspace root.
    pub path: PathBuf,
}

impl SolutionRef {
    /// Parse a solution path against the naming convention.
    ///
    /// # Errors
    /// Returns [`EngineError::MalformedSolutionPath`] if the path does not
    /// match.
    pub fn parse(name: &str) -> Result<Self, EngineError> {
        let malformed = || EngineError::MalformedSolutionPath {
            path: name.to_owned(),
        };

        let segments: Vec<&str> = name.split('/').collect();
        if segments.len() < 3 {
            return Err(malformed());
        }
        let Some(archive) = segments.first() else {
            return Err(malformed());
        };
        if archive.is_empty() {
            return Err(malformed());
        }
        let Some(judge) = segments.get(1) else {
            return Err(malformed());
        };
        if judge.is_empty() || !judge.chars().all(is_judge_char) {
            return Err(malformed());
        }

        let Some(file) = segments.last() else {
            return Err(malformed());
        };
        // A `.c` suffix marks the secondary artifact form of the same
        // solution; the problem id is the same either way.
        let base = file.strip_suffix(".c").unwrap_or(file);
        let Some(problem) = base.strip_suffix(".rs") else {
            return Err(malformed());
        };
        if problem.is_empty() || !problem.chars().all(is_problem_char) {
            return Err(malformed());
        }

        Ok(Self {
            judge: (*judge).to_owned(),
            problem: problem.to_owned(),
            path: PathBuf::from(name),
        })
    }
}

fn is_judge_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'
}

fn is_problem_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_judge_and_problem() {
        let solution = SolutionRef::parse("archive/codeforces/1500/A.rs").unwrap();
        assert_eq!(solution.judge, "codeforces");
        assert_eq!(solution.problem, "A");
        assert_eq!(solution.path, PathBuf::from("archive/codeforces/1500/A.rs"));
    }

    #[test]
    fn judge_may_contain_dots() {
        let solution = SolutionRef::parse("solutions/judge.u-aizu.ac.jp/ITP1/ITP1_3_B.rs").unwrap();
        assert_eq!(solution.judge, "judge.u-aizu.ac.jp");
        assert_eq!(solution.problem, "ITP1_3_B");
    }

    #[test]
    fn secondary_artifact_form_is_accepted() {
        let solution = SolutionRef::parse("archive/codeforces/1500/A.rs.c").unwrap();
        assert_eq!(solution.problem, "A");
    }

    #[test]
    fn deep_intermediate_segments_are_allowed() {
        let solution = SolutionRef::parse("a/leetcode.com/x/y/z/two-sum.rs").unwrap();
        assert_eq!(solution.judge, "leetcode.com");
        assert_eq!(solution.problem, "two-sum");
    }

    #[test]
    fn missing_extension_is_malformed() {
        let err = SolutionRef::parse("archive/codeforces/1500/A").unwrap_err();
        assert!(matches!(err, EngineError::MalformedSolutionPath { .. }));
    }

    #[test]
    fn wrong_extension_is_malformed() {
        assert!(SolutionRef::parse("archive/codeforces/1500/A.c").is_err());
        assert!(SolutionRef::parse("archive/codeforces/1500/A.rs.s").is_err());
    }

    #[test]
    fn too_few_segments_is_malformed() {
        assert!(SolutionRef::parse("codeforces/A.rs").is_err());
        assert!(SolutionRef::parse("A.rs").is_err());
    }

    #[test]
    fn invalid_judge_characters_are_malformed() {
        assert!(SolutionRef::parse("archive/code forces/1500/A.rs").is_err());
    }

    #[test]
    fn invalid_problem_characters_are_malformed() {
        assert!(SolutionRef::parse("archive/codeforces/1500/A B.rs").is_err());
    }

    #[test]
    fn empty_problem_is_malformed() {
        assert!(SolutionRef::parse("archive/codeforces/1500/.rs").is_err());
    }

    proptest::proptest! {
        #[test]
        fn parse_never_panics(name in "\\PC{0,64}") {
            let _ = SolutionRef::parse(&name);
        }

        #[test]
        fn well_formed_paths_roundtrip(
            judge in "[A-Za-z0-9_.-]{1,12}",
            problem in "[A-Za-z0-9_-]{1,12}",
        ) {
            let name = format!("archive/{judge}/set/{problem}.rs");
            let solution = SolutionRef::parse(&name).unwrap();
            proptest::prop_assert_eq!(solution.judge, judge);
            proptest::prop_assert_eq!(solution.problem, problem);
        }
    }
}

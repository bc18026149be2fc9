//! Error types for verdict-engine.
//!
//! Every failure is fatal for the whole request: nothing here retries, and
//! no partial artifact is ever presented as ready.

/// Errors produced by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A path does not match the solution naming convention.
    #[error("\"{path}\" does not match <archive>/<judge>/<...>/<problem>.rs[.c]")]
    MalformedSolutionPath { path: String },

    /// A build tool exited non-zero; its captured output is attached.
    #[error("`{program}` failed:\n{output}")]
    BuildToolFailure { program: String, output: String },

    /// A line of the build tool's structured output is not valid JSON.
    #[error("cannot parse build-tool output line: {reason}\n{line}")]
    StructuredOutputParse { line: String, reason: String },

    /// The judge accepts a submission language nothing here can encode.
    #[error("judge \"{judge}\" accepts {language} submissions, which have no registered encoder")]
    UnsupportedLanguage { judge: String, language: String },

    /// A judge or mode resolution failed (includes unknown judge targets).
    #[error("{0}")]
    Target(#[from] verdict_targets::TargetError),

    /// A process or filesystem operation failed.
    #[error("{0}")]
    Util(#[from] verdict_util::UtilError),
}

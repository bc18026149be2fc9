//! Judge-specific submission post-processing.
//!
//! Judges constrain the submission language, so re-encoding the compiled
//! assembly is a capability selected per judge (via its descriptor's
//! language) rather than a fixed function.

use verdict_targets::JudgeDescriptor;

use crate::error::EngineError;
use crate::source::escape_asm;

/// Submission environment descriptor handed back alongside the final source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionEnv {
    pub judge: String,
    pub problem: String,
    /// Language the submission is presented as, e.g. `C`.
    pub language: String,
}

/// Re-encode a compiled assembly artifact as submittable source text.
pub trait AsmEncoder: std::fmt::Debug {
    fn encode(&self, asm: &[u8]) -> String;
}

/// Encoder for judges that accept C: the assembly becomes an `__asm__`
/// statement in a C translation unit.
#[derive(Debug, Default)]
pub struct CEncoder;

impl AsmEncoder for CEncoder {
    fn encode(&self, asm: &[u8]) -> String {
        String::from_utf8_lossy(&escape_asm(asm)).into_owned()
    }
}

/// Select the encoder for a judge's submission language.
///
/// # Errors
/// Returns [`EngineError::UnsupportedLanguage`] if no encoder is registered
/// for the language.
pub fn encoder_for(descriptor: &JudgeDescriptor) -> Result<Box<dyn AsmEncoder>, EngineError> {
    match descriptor.language.as_str() {
        "C" | "c" => Ok(Box::new(CEncoder)),
        other => Err(EngineError::UnsupportedLanguage {
            judge: descriptor.name.clone(),
            language: other.to_owned(),
        }),
    }
}

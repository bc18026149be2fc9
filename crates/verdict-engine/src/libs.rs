//! Single-slot memoized workspace-library builds.

use std::path::PathBuf;

use serde::Deserialize;

use verdict_config::Config;
use verdict_rustc::CargoCommand;
use verdict_targets::{BuildMode, Target};
use verdict_util::StdinSource;

use crate::error::EngineError;
use crate::substrate::Executor;

/// One line of the build tool's line-delimited JSON output. Only the fields
/// the artifact filter needs are deserialized; everything else is ignored.
#[derive(Debug, Deserialize)]
struct BuildMessage {
    reason: String,
    #[serde(default)]
    target: MessageTarget,
    #[serde(default)]
    filenames: Vec<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct MessageTarget {
    #[serde(default)]
    name: String,
}

/// Extract library artifact paths from the build tool's structured output.
///
/// Keeps `compiler-artifact` records whose target name contains `marker`,
/// flattening their filenames in emission order. Duplicate paths are kept.
///
/// # Errors
/// Returns [`EngineError::StructuredOutputParse`] on the first line that is
/// not valid JSON — a malformed stream fails the whole call.
pub fn parse_artifacts(output: &str, marker: &str) -> Result<Vec<PathBuf>, EngineError> {
    let mut artifacts = Vec::new();
    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let message: BuildMessage =
            serde_json::from_str(line).map_err(|e| EngineError::StructuredOutputParse {
                line: line.to_owned(),
                reason: e.to_string(),
            })?;
        if message.reason == "compiler-artifact" && message.target.name.contains(marker) {
            artifacts.extend(message.filenames);
        }
    }
    Ok(artifacts)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LibsKey {
    mode: BuildMode,
    target: Option<String>,
}

/// Capacity-1 memo around "build all workspace libraries for (mode, target)".
///
/// A hit requires the key to equal the immediately preceding call's key; any
/// other key evicts the stored entry unconditionally. Interleaving two
/// distinct keys therefore rebuilds on every call — a deliberate
/// simplification, not an LRU.
#[derive(Debug, Default)]
pub struct LibraryCache {
    last: Option<(LibsKey, Vec<PathBuf>)>,
}

impl LibraryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the workspace library artifacts for (mode, target), building
    /// them if the cache slot does not already hold this key.
    ///
    /// The build tool runs with standard input suppressed. On a non-zero
    /// exit the stored entry is left untouched and the failure propagates
    /// with the captured output.
    ///
    /// # Errors
    /// Returns an error if the build tool cannot be run, exits non-zero, or
    /// emits malformed structured output.
    pub fn libraries(
        &mut self,
        config: &Config,
        mode: BuildMode,
        target: Option<&Target>,
        executor: &mut dyn Executor,
    ) -> Result<Vec<PathBuf>, EngineError> {
        let key = LibsKey {
            mode,
            target: target.map(|t| t.triple.clone()),
        };
        if let Some((stored, artifacts)) = &self.last {
            if *stored == key {
                return Ok(artifacts.clone());
            }
        }

        let invocation = CargoCommand::new(config, mode, target).plan();
        let output = executor.run(&invocation, &StdinSource::Null)?;
        if !output.success {
            return Err(EngineError::BuildToolFailure {
                program: invocation.argv.first().cloned().unwrap_or_default(),
                output: format!("{}{}", output.stdout, output.stderr),
            });
        }

        let artifacts = parse_artifacts(&output.stdout, &config.marker)?;
        self.last = Some((key, artifacts.clone()));
        Ok(artifacts)
    }
}

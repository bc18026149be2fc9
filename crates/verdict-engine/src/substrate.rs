//! The execution substrate: every subprocess run and file read the pipeline
//! performs goes through this capability interface.

use std::path::{Path, PathBuf};
use std::process::Command;

use verdict_rustc::CompileInvocation;
use verdict_util::{run_command, CommandOutput, StdinSource};

use crate::error::EngineError;

/// Capability set consumed by the pipeline: run a subprocess capturing its
/// output, read a file, check for an existing artifact.
///
/// Production code uses [`ProcessExecutor`]; tests substitute recording
/// fakes. Execution is synchronous — the library build is always complete
/// before the compile step that embeds its artifact paths begins.
pub trait Executor {
    /// Run an invocation, capturing stdout, stderr, and exit status.
    ///
    /// # Errors
    /// Returns an error if the process cannot be spawned or fed its input.
    /// A non-zero exit is reported through `CommandOutput`, not as an error.
    fn run(
        &mut self,
        invocation: &CompileInvocation,
        stdin: &StdinSource,
    ) -> Result<CommandOutput, EngineError>;

    /// Read a file's raw bytes.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_file(&mut self, path: &Path) -> Result<Vec<u8>, EngineError>;

    /// Whether a previously built artifact exists at `path`.
    fn path_exists(&mut self, path: &Path) -> bool;
}

/// Substrate implementation over real subprocesses and the filesystem.
///
/// Commands run with the workspace root as their working directory.
#[derive(Debug)]
pub struct ProcessExecutor {
    root: PathBuf,
}

impl ProcessExecutor {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl Executor for ProcessExecutor {
    fn run(
        &mut self,
        invocation: &CompileInvocation,
        stdin: &StdinSource,
    ) -> Result<CommandOutput, EngineError> {
        let Some((program, args)) = invocation.argv.split_first() else {
            return Err(EngineError::BuildToolFailure {
                program: String::new(),
                output: "empty argument vector".to_owned(),
            });
        };
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(&self.root);
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }
        Ok(run_command(&mut cmd, stdin)?)
    }

    fn read_file(&mut self, path: &Path) -> Result<Vec<u8>, EngineError> {
        Ok(verdict_util::fs::read_bytes(path)?)
    }

    fn path_exists(&mut self, path: &Path) -> bool {
        path.exists()
    }
}

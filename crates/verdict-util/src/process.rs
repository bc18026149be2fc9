//! Process execution helpers for verdict.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::UtilError;

/// What the child process reads on standard input.
#[derive(Debug, Clone)]
pub enum StdinSource {
    /// Standard input is connected to the null device.
    Null,
    /// The given bytes are written to the child's standard input, then the
    /// stream is closed.
    Bytes(Vec<u8>),
}

/// Structured output from a command execution.
#[derive(Debug)]
pub struct CommandOutput {
    /// Standard output as a string.
    pub stdout: String,
    /// Standard error as a string.
    pub stderr: String,
    /// Whether the command exited successfully.
    pub success: bool,
    /// The exit code, if the process was not killed by a signal.
    pub exit_code: Option<i32>,
}

/// Execute a command and capture its output.
///
/// # Errors
/// Returns an error if the command cannot be spawned (e.g. binary not found)
/// or its standard input cannot be written. A non-zero exit code is **not**
/// an error; check `CommandOutput::success` instead.
pub fn run_command(cmd: &mut Command, stdin: &StdinSource) -> Result<CommandOutput, UtilError> {
    let output = match stdin {
        StdinSource::Null => {
            cmd.stdin(Stdio::null());
            cmd.output()
                .map_err(|source| UtilError::CommandExec { source })?
        }
        StdinSource::Bytes(bytes) => {
            cmd.stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
            let mut child = cmd
                .spawn()
                .map_err(|source| UtilError::CommandExec { source })?;
            if let Some(mut handle) = child.stdin.take() {
                handle
                    .write_all(bytes)
                    .map_err(|source| UtilError::StdinWrite { source })?;
                // Dropping the handle closes the stream so the child sees EOF.
            }
            child
                .wait_with_output()
                .map_err(|source| UtilError::CommandExec { source })?
        }
    };

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
        exit_code: output.status.code(),
    })
}

//! Error types for verdict-util.

/// Errors produced by utility functions.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// An I/O operation failed.
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A command failed to execute.
    #[error("cannot execute command: {source}")]
    CommandExec { source: std::io::Error },

    /// Writing to a child process's standard input failed.
    #[error("cannot feed standard input to child process: {source}")]
    StdinWrite { source: std::io::Error },
}

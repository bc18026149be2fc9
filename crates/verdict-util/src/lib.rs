#![forbid(unsafe_code)]
//! Process and filesystem helpers for verdict.

pub mod error;
pub mod fs;
pub mod process;

pub use error::UtilError;
pub use process::{run_command, CommandOutput, StdinSource};

//! Library caching, source transformation, and the artifact pipeline for
//! verdict.

pub mod error;
pub mod judge;
pub mod libs;
pub mod pipeline;
pub mod solution;
pub mod source;
pub mod substrate;

pub use error::EngineError;
pub use judge::SubmissionEnv;
pub use libs::LibraryCache;
pub use pipeline::Pipeline;
pub use solution::SolutionRef;
pub use substrate::{Executor, ProcessExecutor};

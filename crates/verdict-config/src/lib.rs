//! Parse `verdict.toml` and resolve the explicit build configuration.

pub mod manifest;

pub use manifest::{Config, Manifest, ManifestError, DEFAULT_EXTRA_FLAGS};

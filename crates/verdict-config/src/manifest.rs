use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Extra compiler flags used when the `RUSTFLAGS` environment variable is
/// absent.
pub const DEFAULT_EXTRA_FLAGS: &str = "-Z borrowck=mir -Z polonius";

/// Name of the environment variable supplying extra compiler flags.
pub const EXTRA_FLAGS_VAR: &str = "RUSTFLAGS";

/// The optional `verdict.toml` project manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub project: Project,
    #[serde(default)]
    pub build: Build,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// Substring identifying workspace library targets in the build tool's
    /// structured output.
    #[serde(default = "default_marker")]
    pub marker: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Build {
    /// Whether compiler invocations run with verbose output.
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

fn default_marker() -> String {
    "porus".to_owned()
}

fn default_verbose() -> bool {
    true
}

impl Default for Project {
    fn default() -> Self {
        Self {
            marker: default_marker(),
        }
    }
}

impl Default for Build {
    fn default() -> Self {
        Self {
            verbose: default_verbose(),
        }
    }
}

impl Manifest {
    /// Read and parse a `verdict.toml` from the given path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let manifest: Manifest = toml::from_str(&content).map_err(|e| ManifestError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(manifest)
    }

    /// Read `verdict.toml` from a project root, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    /// Returns an error if an existing manifest cannot be read or parsed.
    pub fn from_root(root: &Path) -> Result<Self, ManifestError> {
        let path = root.join("verdict.toml");
        if path.exists() {
            Self::from_path(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Resolved build configuration, threaded explicitly through every call —
/// there is no process-wide mutable state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Workspace root directory; all build output lives under it.
    pub root: PathBuf,
    /// Whether compiler invocations run with verbose output.
    pub verbose: bool,
    /// Substring identifying workspace library targets.
    pub marker: String,
    /// Space-delimited extra compiler flags.
    pub extra_flags: String,
}

impl Config {
    /// Resolve the configuration for a project root: parse an optional
    /// `verdict.toml` and read `RUSTFLAGS` once, here, so the rest of the
    /// system never touches the environment.
    ///
    /// # Errors
    /// Returns an error if an existing manifest cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self, ManifestError> {
        let manifest = Manifest::from_root(root)?;
        let extra_flags = std::env::var(EXTRA_FLAGS_VAR)
            .unwrap_or_else(|_| DEFAULT_EXTRA_FLAGS.to_owned())
            .trim()
            .to_owned();
        Ok(Self::from_manifest(root, &manifest, &extra_flags))
    }

    /// Build a configuration from already-parsed pieces, without reading the
    /// environment.
    pub fn from_manifest(root: &Path, manifest: &Manifest, extra_flags: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            verbose: manifest.build.verbose,
            marker: manifest.project.marker.clone(),
            extra_flags: extra_flags.to_owned(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid verdict.toml at {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

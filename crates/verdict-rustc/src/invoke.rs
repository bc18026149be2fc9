//! Builders for the library pre-build and per-solution compile invocations.

use std::path::{Path, PathBuf};

use verdict_config::Config;
use verdict_targets::{BuildMode, Target};

use crate::policy;

/// Relative path of the coverage-instrumented compiler shim.
const COVERAGE_SHIM: &str = "target/cov/build/rustc-shim.bat";

/// One fully resolved compiler invocation, ready for the execution substrate.
///
/// `argv[0]` is the program; `env` is applied on top of the child's inherited
/// environment. An invocation is never partially applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileInvocation {
    /// Where the invocation writes its primary output.
    pub dest: PathBuf,
    /// Ordered argument vector, program first.
    pub argv: Vec<String>,
    /// Environment overrides set on the child process.
    pub env: Vec<(String, String)>,
}

// ---------------------------------------------------------------------------
// Library pre-build
// ---------------------------------------------------------------------------

/// Builder for the workspace-library build invocation.
///
/// The resulting command asks the build tool for line-delimited JSON output;
/// the engine's library cache depends on the exact `reason`, `target.name`,
/// and `filenames` fields of that stream.
#[derive(Debug)]
pub struct CargoCommand<'a> {
    config: &'a Config,
    mode: BuildMode,
    target: Option<&'a Target>,
}

impl<'a> CargoCommand<'a> {
    pub fn new(config: &'a Config, mode: BuildMode, target: Option<&'a Target>) -> Self {
        Self {
            config,
            mode,
            target,
        }
    }

    /// Build the argument list without executing.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec!["cargo".to_owned()];
        if self.mode == BuildMode::Coverage {
            args.push("cov".to_owned());
        }
        args.push("build".to_owned());
        args.push("--lib".to_owned());
        let verbosity = if self.config.verbose { "-v" } else { "-q" };
        args.push(verbosity.to_owned());
        if self.mode == BuildMode::Release {
            args.push("--release".to_owned());
        }
        if let Some(target) = self.target {
            args.push("--target".to_owned());
            args.push(target.triple.clone());
        }
        args.push("--features".to_owned());
        args.push(policy::features(self.mode, self.target).join(","));
        args.push("--message-format".to_owned());
        args.push("json".to_owned());
        args
    }

    /// Resolve the full invocation. The destination is the build-state
    /// directory for this (mode, target) pair.
    pub fn plan(&self) -> CompileInvocation {
        CompileInvocation {
            dest: policy::target_path(&self.config.root, self.mode, self.target),
            argv: self.build_args(),
            env: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-solution compile
// ---------------------------------------------------------------------------

/// Builder for the per-solution compile invocation.
///
/// Source is always fed on standard input (the trailing `-`), so the solution
/// file itself never appears in the argument vector.
#[derive(Debug)]
pub struct RustcCommand<'a> {
    config: &'a Config,
    mode: BuildMode,
    target: Option<&'a Target>,
    filename: &'a Path,
    libraries: &'a [PathBuf],
}

impl<'a> RustcCommand<'a> {
    pub fn new(
        config: &'a Config,
        mode: BuildMode,
        target: Option<&'a Target>,
        filename: &'a Path,
        libraries: &'a [PathBuf],
    ) -> Self {
        Self {
            config,
            mode,
            target,
            filename,
            libraries,
        }
    }

    /// Resolve the full invocation.
    ///
    /// An assembly-source input (`.s`) is the second stage of the release
    /// pipeline: the escaped artifact compiles as a C translation unit into a
    /// runnable `.elf` next to the input, and none of the Rust flags apply.
    pub fn plan(&self) -> CompileInvocation {
        if is_assembly(self.filename) {
            let dest = self.config.root.join(self.filename).with_extension("elf");
            let argv = vec![
                "gcc".to_owned(),
                "-o".to_owned(),
                dest.display().to_string(),
                "-x".to_owned(),
                "c".to_owned(),
                "-".to_owned(),
            ];
            return CompileInvocation {
                dest,
                argv,
                env: Vec::new(),
            };
        }

        let dest = dest_path(self.config, self.mode, self.target, self.filename);
        CompileInvocation {
            argv: self.build_args(&dest),
            env: self.build_env(&dest),
            dest,
        }
    }

    fn build_args(&self, dest: &Path) -> Vec<String> {
        let root = &self.config.root;
        let mut args = Vec::new();

        args.push(match self.mode {
            BuildMode::Coverage => root.join(COVERAGE_SHIM).display().to_string(),
            _ => "rustc".to_owned(),
        });
        if self.config.verbose {
            args.push("-v".to_owned());
        }
        if self.mode == BuildMode::Debug {
            args.push("-C".to_owned());
            args.push("debuginfo=2".to_owned());
        }
        if self.mode == BuildMode::Release {
            // Judge artifacts: assembly from a whole-program-optimized cdylib
            // with no unwinding path (the judge runtime cannot unwind).
            args.push("--crate-type".to_owned());
            args.push("cdylib".to_owned());
            args.push("--emit".to_owned());
            args.push("asm".to_owned());
            args.push("-C".to_owned());
            args.push("llvm-args=-disable-debug-info-print".to_owned());
            args.push("-C".to_owned());
            args.push("lto=fat".to_owned());
            args.push("-C".to_owned());
            args.push("opt-level=2".to_owned());
            args.push("-C".to_owned());
            args.push("panic=abort".to_owned());
        }

        args.push("-Z".to_owned());
        args.push("external-macro-backtrace".to_owned());
        for flag in self.config.extra_flags.split(' ') {
            if !flag.is_empty() {
                args.push(flag.to_owned());
            }
        }
        if let Some(target) = self.target {
            args.push("--target".to_owned());
            args.push(target.triple.clone());
        }
        for feature in policy::features(self.mode, self.target) {
            args.push("--cfg".to_owned());
            args.push(format!("feature=\"{feature}\""));
        }

        if self.mode != BuildMode::Release {
            let incremental = policy::target_path(root, self.mode, self.target).join("incremental");
            args.push("-C".to_owned());
            args.push(format!("incremental={}", incremental.display()));
        }
        // Dependency search path is mode-specific but target-independent: the
        // workspace libraries are host artifacts.
        let deps = policy::target_path(root, self.mode, None).join("deps");
        args.push("-L".to_owned());
        args.push(format!("dependency={}", deps.display()));

        for library in self.libraries {
            args.push("--extern".to_owned());
            args.push(format!(
                "{}={}",
                policy::library_name(library),
                library.display()
            ));
        }

        args.push("-o".to_owned());
        args.push(dest.display().to_string());
        args.push("-".to_owned());
        args
    }

    fn build_env(&self, dest: &Path) -> Vec<(String, String)> {
        if self.mode != BuildMode::Coverage {
            return Vec::new();
        }
        let build_path = dest.parent().unwrap_or(Path::new("")).display().to_string();
        vec![
            ("CARGO_INCREMENTAL".to_owned(), "0".to_owned()),
            ("COV_PROFILER_LIB_NAME".to_owned(), "@native".to_owned()),
            ("COV_PROFILER_LIB_PATH".to_owned(), "@native".to_owned()),
            ("COV_RUSTC".to_owned(), "rustc".to_owned()),
            ("COV_BUILD_PATH".to_owned(), build_path),
        ]
    }
}

/// Whether a filename denotes a second-stage assembly source.
pub fn is_assembly(filename: &Path) -> bool {
    filename.extension().is_some_and(|ext| ext == "s")
}

/// Output path for a compile: the (mode, target) build directory plus the
/// solution's stem, with an `.s` suffix in release mode (release emits
/// assembly) and the bare stem otherwise.
pub fn dest_path(
    config: &Config,
    mode: BuildMode,
    target: Option<&Target>,
    filename: &Path,
) -> PathBuf {
    let stem = filename
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("solution");
    let name = match mode {
        BuildMode::Release => format!("{stem}.s"),
        _ => stem.to_owned(),
    };
    policy::target_path(&config.root, mode, target).join(name)
}

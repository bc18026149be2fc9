//! Top-level orchestration: from a solution path to a runnable binary or a
//! judge-submittable source text.

use std::path::{Path, PathBuf};

use verdict_config::Config;
use verdict_rustc::invoke::{dest_path, is_assembly};
use verdict_rustc::RustcCommand;
use verdict_targets::{BuildMode, Target};
use verdict_util::StdinSource;

use crate::error::EngineError;
use crate::judge::{encoder_for, SubmissionEnv};
use crate::libs::LibraryCache;
use crate::solution::SolutionRef;
use crate::source::prepare_source;
use crate::substrate::Executor;

/// The artifact pipeline. Holds the library cache for the lifetime of the
/// invocation; every external effect goes through the executor.
#[derive(Debug)]
pub struct Pipeline<'a, E> {
    config: &'a Config,
    executor: E,
    libraries: LibraryCache,
}

impl<'a, E: Executor> Pipeline<'a, E> {
    pub fn new(config: &'a Config, executor: E) -> Self {
        Self {
            config,
            executor,
            libraries: LibraryCache::new(),
        }
    }

    /// Compile one solution for (mode, target) and return the artifact path.
    ///
    /// A request either fully completes or surfaces one error; there is no
    /// partial-success state.
    ///
    /// # Errors
    /// Returns an error if the library build, source read, or compile step
    /// fails.
    pub fn compile(
        &mut self,
        name: &str,
        recompile: bool,
        mode: BuildMode,
        target: Option<&Target>,
    ) -> Result<PathBuf, EngineError> {
        let path = Path::new(name);
        let dest = self.destination(mode, target, path);

        // An existing artifact satisfies the request unless a rebuild is
        // forced.
        if !recompile && self.executor.path_exists(&dest) {
            return Ok(dest);
        }

        // 1. Workspace libraries must exist before the compile argv can
        //    reference them. Second-stage assembly links nothing.
        let libraries = if is_assembly(path) {
            Vec::new()
        } else {
            self.libraries
                .libraries(self.config, mode, target, &mut self.executor)?
        };

        // 2. Resolve the compiler invocation.
        let invocation = RustcCommand::new(self.config, mode, target, path, &libraries).plan();

        // 3. Prepare the source and feed it on standard input.
        let raw = self.executor.read_file(&self.config.root.join(path))?;
        let prepared = prepare_source(&raw, path);
        let output = self
            .executor
            .run(&invocation, &StdinSource::Bytes(prepared))?;
        if !output.success {
            return Err(EngineError::BuildToolFailure {
                program: invocation.argv.first().cloned().unwrap_or_default(),
                output: format!("{}{}", output.stdout, output.stderr),
            });
        }

        Ok(invocation.dest)
    }

    /// Produce the submission for a solution: resolve its judge, compile in
    /// release mode for the judge's target, and re-encode the assembly as
    /// the judge's submission language.
    ///
    /// # Errors
    /// Returns an error if the path is malformed, the judge is unknown, or
    /// any compile step fails.
    pub fn read_submission(
        &mut self,
        name: &str,
        recompile: bool,
    ) -> Result<(SubmissionEnv, String), EngineError> {
        let solution = SolutionRef::parse(name)?;
        let descriptor = verdict_targets::lookup(&solution.judge)?;
        let target = Target::new(&descriptor.target);

        let asm = self.compile(name, recompile, BuildMode::Release, Some(&target))?;
        let bytes = self.executor.read_file(&asm)?;

        let encoder = encoder_for(&descriptor)?;
        let source = encoder.encode(&bytes);
        let env = SubmissionEnv {
            judge: solution.judge,
            problem: solution.problem,
            language: descriptor.language,
        };
        Ok((env, source))
    }

    fn destination(&self, mode: BuildMode, target: Option<&Target>, path: &Path) -> PathBuf {
        if is_assembly(path) {
            self.config.root.join(path).with_extension("elf")
        } else {
            dest_path(self.config, mode, target, path)
        }
    }
}

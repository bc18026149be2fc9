#![forbid(unsafe_code)]

use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use verdict_config::Config;
use verdict_engine::{Pipeline, ProcessExecutor};
use verdict_targets::{BuildMode, Target};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "verdict", about = "Build and package competitive-programming solutions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a solution
    Compile {
        /// Solution path, e.g. solutions/codeforces/1500/A.rs
        name: String,
        /// Build mode: debug, release, or coverage
        #[arg(long, default_value = "debug")]
        mode: String,
        /// Cross-compile target triple (defaults to the local environment)
        #[arg(long)]
        target: Option<String>,
        /// Rebuild even if an artifact already exists
        #[arg(long)]
        recompile: bool,
    },
    /// Compile a solution in debug mode and run it
    Run {
        /// Solution path
        name: String,
        /// Rebuild even if an artifact already exists
        #[arg(long)]
        recompile: bool,
        /// Arguments to pass to the solution binary
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Print the judge-submittable source for a solution
    Preview {
        /// Solution path
        name: String,
        /// Rebuild even if an artifact already exists
        #[arg(long)]
        recompile: bool,
    },
    /// Remove build artifacts
    Clean,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Compile {
            name,
            mode,
            target,
            recompile,
        } => cmd_compile(&name, &mode, target.as_deref(), recompile),
        Command::Run {
            name,
            recompile,
            args,
        } => cmd_run(&name, recompile, &args),
        Command::Preview { name, recompile } => cmd_preview(&name, recompile),
        Command::Clean => cmd_clean(),
    };

    if let Err(msg) = result {
        eprintln!("error: {msg}");
        process::exit(1);
    }
}

fn load_config() -> Result<Config, Box<dyn Error>> {
    let root = std::env::current_dir()?;
    Ok(Config::load(&root)?)
}

fn cmd_compile(name: &str, mode: &str, target: Option<&str>, recompile: bool) -> CliResult {
    let config = load_config()?;
    let mode = BuildMode::from_str(mode)?;
    let target = target.map(Target::new);

    let mut pipeline = Pipeline::new(&config, ProcessExecutor::new(&config.root));
    eprintln!("    Compiling {name} ({mode})");
    let dest = pipeline.compile(name, recompile, mode, target.as_ref())?;
    eprintln!("    Finished {}", dest.display());
    Ok(())
}

fn cmd_run(name: &str, recompile: bool, args: &[String]) -> CliResult {
    let config = load_config()?;

    let mut pipeline = Pipeline::new(&config, ProcessExecutor::new(&config.root));
    let binary = pipeline.compile(name, recompile, BuildMode::Debug, None)?;

    let status = process::Command::new(&binary).args(args).status()?;
    if !status.success() {
        return Err(format!(
            "{} exited with {}",
            binary.display(),
            status.code().map_or("signal".to_owned(), |c| c.to_string())
        )
        .into());
    }
    Ok(())
}

fn cmd_preview(name: &str, recompile: bool) -> CliResult {
    let config = load_config()?;

    let mut pipeline = Pipeline::new(&config, ProcessExecutor::new(&config.root));
    let (env, source) = pipeline.read_submission(name, recompile)?;

    eprintln!("    Submission for {}/{} ({})", env.judge, env.problem, env.language);
    println!("{source}");
    Ok(())
}

fn cmd_clean() -> CliResult {
    let config = load_config()?;
    let target: PathBuf = config.root.join("target");
    verdict_util::fs::remove_tree(&target)?;
    eprintln!("    Removed {}", target.display());
    Ok(())
}

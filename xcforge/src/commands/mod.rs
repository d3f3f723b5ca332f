mod check;
mod completions;
mod generate;
mod info;

use std::path::Path;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::{Context, Result};
use generate::GenerateCommand;
use info::InfoCommand;
use tracing::debug;
use xcforge_generator::generators::GeneratorConfig;
use xcforge_manifest::{Manifest, XcforgeToml};
use xcforge_model::Project;

/// Extension trait for exiting on diagnostics with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for xcforge_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for xcforge_generator::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

/// A parsed manifest together with the project model it describes.
pub(crate) struct Loaded {
    pub file: XcforgeToml,
    pub project: Project,
}

impl Loaded {
    /// Open a manifest and lower it, exiting with a diagnostic when it is invalid.
    pub fn open(path: &Path) -> Result<Self> {
        let file = XcforgeToml::open(path).unwrap_or_exit();
        let project = file
            .manifest()
            .to_project()
            .wrap_err("Failed to build the project model")?;
        debug!(path = %path.display(), targets = project.targets().len(), "loaded manifest");
        Ok(Self { file, project })
    }

    pub fn manifest(&self) -> &Manifest {
        self.file.manifest()
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            test_target_policy: self.manifest().generator.test_target_policy,
        }
    }
}

#[derive(Parser)]
#[command(name = "xcforge")]
#[command(version)]
#[command(about = "Compile declarative project descriptions into native project objects")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Info(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the generators and write the scheme list
    Generate(GenerateCommand),

    /// Validate xcforge.toml and run the generators without writing output
    Check(CheckCommand),

    /// Show targets and the generator order
    Info(InfoCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

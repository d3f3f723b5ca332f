use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use xcforge_generator::{Pipeline, backend::MemoryBackend};
use xcforge_manifest::DEFAULT_FILENAME;

use super::{Loaded, UnwrapOrExit};
use crate::reports::{CheckReport, Report, TerminalOutput};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to xcforge.toml (defaults to ./xcforge.toml)
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let loaded = Loaded::open(&self.config)?;
        let project = &loaded.project;

        // Run every generator against a backend that writes nothing
        let mut backend = MemoryBackend::new();
        Pipeline::standard(&loaded.generator_config())
            .run(project, &mut backend)
            .unwrap_or_exit();

        let report = CheckReport {
            config_path: self.config.clone(),
            project: project.name.clone(),
            configurations: project.build_configurations().len(),
            targets: project.targets().len(),
            schemes: project.targets().iter().map(|t| t.schemes().len()).sum(),
        };
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}

use std::path::PathBuf;

use clap::Args;
use eyre::{Result, eyre};
use xcforge_generator::{Pipeline, backend::MemoryBackend};
use xcforge_manifest::DEFAULT_FILENAME;

use super::{Loaded, UnwrapOrExit};
use crate::reports::{GenerateReport, Report, TerminalOutput};

/// File the scheme list is written to, inside the output directory.
pub const SCHEME_LIST_FILENAME: &str = "xcschemes.json";

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to xcforge.toml (defaults to ./xcforge.toml)
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let loaded = Loaded::open(&self.config)?;
        let path = self.output.join(SCHEME_LIST_FILENAME);

        let mut backend = MemoryBackend::with_output(&path);
        let summary = Pipeline::standard(&loaded.generator_config())
            .run(&loaded.project, &mut backend)
            .unwrap_or_exit();
        let saved = backend
            .saved_scheme_list()
            .ok_or_else(|| eyre!("The pipeline finished without saving the scheme list"))?;

        GenerateReport::new(path, summary, saved).render(&mut TerminalOutput::new());
        Ok(())
    }
}

use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use xcforge_generator::Pipeline;
use xcforge_manifest::DEFAULT_FILENAME;

use super::{Loaded, UnwrapOrExit};
use crate::reports::{InfoReport, Report, TerminalOutput};

#[derive(Args)]
pub struct InfoCommand {
    /// Path to xcforge.toml (defaults to ./xcforge.toml)
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub config: PathBuf,
}

impl InfoCommand {
    pub fn run(&self) -> Result<()> {
        let loaded = Loaded::open(&self.config)?;

        let pipeline = Pipeline::standard(&loaded.generator_config());
        let order = pipeline.order().unwrap_or_exit();
        let mut infos = pipeline.infos();
        infos.sort_by_key(|info| order.iter().position(|name| *name == info.name));

        let report = InfoReport::new(&loaded.project, self.config.clone(), infos);
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}

//! Check command report.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a successful check.
#[derive(Debug)]
pub struct CheckReport {
    pub config_path: PathBuf,
    pub project: String,
    pub configurations: usize,
    pub targets: usize,
    pub schemes: usize,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.key_value("Project", &self.project);
        out.key_value("Configs", &self.configurations.to_string());
        out.key_value("Targets", &self.targets.to_string());
        out.key_value("Schemes", &self.schemes.to_string());
    }
}

//! Manifest types and parsing for xcforge.toml files.

mod file;
mod lower;
mod parse;
mod project;
mod target;
mod validate;

use indexmap::IndexMap;
pub use file::XcforgeToml;
pub use parse::{DEFAULT_FILENAME, parse_manifest};
pub use project::{ConfigurationConfig, GeneratorSection, ProjectConfig};
use serde::Deserialize;
pub use target::{SchemeConfig, TargetConfig};

/// Root manifest for xcforge.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Project metadata and project-wide settings
    pub project: ProjectConfig,

    /// Build configurations, in declaration order.
    /// Empty means the default `Debug` and `Release` pair.
    #[serde(default)]
    pub configurations: IndexMap<String, ConfigurationConfig>,

    /// Targets, in declaration order
    #[serde(default)]
    pub targets: Vec<TargetConfig>,

    /// Generator options
    #[serde(default)]
    pub generator: GeneratorSection,
}

impl Manifest {
    pub fn target(&self, name: &str) -> Option<&TargetConfig> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Names of the project's build configurations, defaults included.
    pub fn configuration_names(&self) -> Vec<&str> {
        if self.configurations.is_empty() {
            vec!["Debug", "Release"]
        } else {
            self.configurations.keys().map(String::as_str).collect()
        }
    }

    pub fn has_configuration(&self, name: &str) -> bool {
        self.configuration_names().contains(&name)
    }
}

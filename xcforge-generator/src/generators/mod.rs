//! Built-in generators.
//!
//! - [`ProjectStructureGenerator`] - native project and its default groups
//! - [`TargetGenerator`] - native targets and host dependencies
//! - [`ConfigurationGenerator`] - native configurations with merged settings
//! - [`SchemeGenerator`] - user schemes and the scheme list

mod configuration;
mod project_structure;
mod scheme;
mod target;

pub use configuration::ConfigurationGenerator;
pub use project_structure::ProjectStructureGenerator;
pub use scheme::SchemeGenerator;
use serde::Deserialize;
pub use target::TargetGenerator;
use xcforge_model::TestTargetPolicy;

/// Options for the built-in generators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneratorConfig {
    /// How the scheme generator picks a target's unit-test bundle.
    pub test_target_policy: TestTargetPolicy,
}

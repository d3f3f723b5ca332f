use serde::Deserialize;
use xcforge_model::{Settings, TestTargetPolicy};

/// `[project]` table
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    pub name: String,

    /// Configuration used when none is specified.
    /// Defaults to `Release` when present, otherwise the last declared one.
    pub default_configuration: Option<String>,

    /// Settings shared by every project configuration
    #[serde(default)]
    pub settings: Settings,
}

/// `[configurations.<name>]` table, also used for target overrides
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigurationConfig {
    #[serde(default)]
    pub settings: Settings,
}

/// `[generator]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratorSection {
    /// How a target's unit-test bundle is picked when several exist
    #[serde(default)]
    pub test_target_policy: TestTargetPolicy,
}

use indexmap::IndexMap;
use serde::Deserialize;
use xcforge_model::{Language, Platform, Scheme, SchemeAction, Settings, TargetType};

use super::ConfigurationConfig;

/// `[[targets]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Target name, unique within the manifest
    pub name: String,

    /// Product type (application, unit-test-bundle, framework, static-library)
    #[serde(rename = "type")]
    pub target_type: TargetType,

    /// Required unless inherited from the host
    pub platform: Option<Platform>,

    /// Required unless inherited from the host
    pub deployment_target: Option<String>,

    pub language: Option<Language>,

    #[serde(default)]
    pub include_files: Vec<String>,

    #[serde(default)]
    pub exclude_files: Vec<String>,

    /// Host application, unit-test bundles only
    pub host: Option<String>,

    /// Settings shared by every configuration of this target
    #[serde(default)]
    pub settings: Settings,

    /// Per-configuration overrides
    #[serde(default)]
    pub configurations: IndexMap<String, ConfigurationConfig>,

    #[serde(default)]
    pub schemes: Vec<SchemeConfig>,
}

impl TargetConfig {
    pub fn is_unit_test_bundle(&self) -> bool {
        self.target_type == TargetType::UnitTestBundle
    }
}

/// `[[targets.schemes]]` entry
///
/// `configuration` sets every action at once; the per-action keys override it.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeConfig {
    pub name: String,
    pub configuration: Option<String>,
    pub test_configuration: Option<String>,
    pub launch_configuration: Option<String>,
    pub profile_configuration: Option<String>,
    pub analyze_configuration: Option<String>,
    pub archive_configuration: Option<String>,
}

impl SchemeConfig {
    /// Explicit per-action configurations.
    fn overrides(&self) -> [(SchemeAction, Option<&String>); 5] {
        [
            (SchemeAction::Test, self.test_configuration.as_ref()),
            (SchemeAction::Launch, self.launch_configuration.as_ref()),
            (SchemeAction::Profile, self.profile_configuration.as_ref()),
            (SchemeAction::Analyze, self.analyze_configuration.as_ref()),
            (SchemeAction::Archive, self.archive_configuration.as_ref()),
        ]
    }

    /// Apply the declared configurations to a model scheme.
    pub fn apply_to(&self, scheme: &mut Scheme) {
        if let Some(configuration) = &self.configuration {
            scheme.use_configuration(configuration);
        }
        for (action, configuration) in self.overrides() {
            if let Some(configuration) = configuration {
                scheme.set_configuration(action, configuration.as_str());
            }
        }
    }
}

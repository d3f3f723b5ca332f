//! Info command report.

use std::path::PathBuf;

use xcforge_generator::GeneratorInfo;
use xcforge_model::{Project, Target};

use super::output::{Output, Report};

/// Report data from project info.
#[derive(Debug)]
pub struct InfoReport {
    pub name: String,
    pub config_path: PathBuf,
    pub default_configuration: String,
    pub configurations: Vec<String>,
    pub targets: Vec<TargetInfo>,
    /// Generators in execution order.
    pub generators: Vec<GeneratorInfo>,
}

/// One target line in the report.
#[derive(Debug)]
pub struct TargetInfo {
    pub name: String,
    pub target_type: String,
    pub platform: String,
    pub deployment_target: String,
    pub host: Option<String>,
    pub schemes: Vec<String>,
}

impl From<&Target> for TargetInfo {
    fn from(target: &Target) -> Self {
        Self {
            name: target.name.clone(),
            target_type: target.target_type.to_string(),
            platform: target.platform.to_string(),
            deployment_target: target.deployment_target.clone(),
            host: target.host.clone(),
            schemes: target.schemes().iter().map(|s| s.name.clone()).collect(),
        }
    }
}

impl InfoReport {
    pub fn new(project: &Project, config_path: PathBuf, generators: Vec<GeneratorInfo>) -> Self {
        Self {
            name: project.name.clone(),
            config_path,
            default_configuration: project.default_build_configuration.clone(),
            configurations: project
                .build_configurations()
                .iter()
                .map(|c| c.name.clone())
                .collect(),
            targets: project.targets().iter().map(TargetInfo::from).collect(),
            generators,
        }
    }
}

impl Report for InfoReport {
    fn render(&self, out: &mut dyn Output) {
        out.newline();
        out.preformatted(&format!("  {}", self.name));
        out.preformatted(&format!("  {}", "─".repeat(self.name.chars().count())));
        out.key_value("Config", &self.config_path.display().to_string());
        out.key_value("Configs", &self.configurations.join(", "));
        out.key_value("Default", &self.default_configuration);
        out.newline();

        out.section("Targets");
        for target in &self.targets {
            let host = target
                .host
                .as_ref()
                .map(|h| format!(", hosted by {}", h))
                .unwrap_or_default();
            out.list_item(&format!(
                "{} ({}, {} {}{})",
                target.name, target.target_type, target.platform, target.deployment_target, host
            ));
            for scheme in &target.schemes {
                out.preformatted(&format!("      └─ scheme {}", scheme));
            }
        }
        out.newline();

        out.section("Generators");
        for (i, generator) in self.generators.iter().enumerate() {
            out.numbered_item(
                i + 1,
                &format!("{:<18} {}", generator.name, generator.description),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use xcforge_model::{Language, Platform};

    use super::*;
    use crate::reports::StringOutput;

    #[test]
    fn test_render_lists_targets_and_generators() {
        let mut project = Project::new("Demo");
        project
            .application_for("App", Platform::Ios, "15.0", Language::Swift)
            .unwrap()
            .scheme("AppScheme");
        project.unit_tests_for("App").unwrap();
        let generators = vec![GeneratorInfo {
            name: "scheme",
            description: "Create user schemes",
            dependencies: Vec::new(),
        }];

        let report = InfoReport::new(&project, PathBuf::from("xcforge.toml"), generators);
        let mut out = StringOutput::default();
        report.render(&mut out);

        assert!(out.0.contains("- App (application, ios 15.0)\n      └─ scheme AppScheme\n"));
        assert!(out.0.contains("- AppTests (unit-test-bundle, ios 15.0, hosted by App)\n"));
        assert!(out.0.contains("Configs: Debug, Release\n"));
        assert!(out.0.contains("1. scheme             Create user schemes\n"));
    }
}

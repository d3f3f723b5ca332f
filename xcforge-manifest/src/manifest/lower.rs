//! Lowering a manifest into the declarative project model.

use xcforge_model::{ModelError, Project, Result, Settings, Target};

use super::{Manifest, TargetConfig};

impl Manifest {
    /// Build the project model described by this manifest.
    ///
    /// Unit-test bundles start from their host (platform, deployment target,
    /// language, file rules and `TEST_HOST`) and then apply their own keys.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] for manifests that skipped validation, such
    /// as duplicate targets or a missing platform.
    pub fn to_project(&self) -> Result<Project> {
        let mut project =
            Project::with_build_configurations(&self.project.name, self.configuration_names());
        if let Some(default) = &self.project.default_configuration {
            project.default_build_configuration = default.clone();
        }
        project.all_build_configurations = self.project.settings.clone();
        for (name, config) in &self.configurations {
            if let Some(configuration) = project.build_configuration_mut(name) {
                configuration.settings = config.settings.clone();
            }
        }

        for config in &self.targets {
            let target = project.add_target(self.lower_target(config)?)?;
            for (name, override_config) in &config.configurations {
                target.build_configuration_mut(name).settings = override_config.settings.clone();
            }
            for scheme in &config.schemes {
                scheme.apply_to(target.scheme(&scheme.name));
            }
        }

        Ok(project)
    }

    fn lower_target(&self, config: &TargetConfig) -> Result<Target> {
        let Some(host_name) = &config.host else {
            return standalone_target(config);
        };

        let host_config = self
            .target(host_name)
            .ok_or_else(|| ModelError::UnknownTarget(host_name.clone()))?;
        let host = standalone_target(host_config)?;

        let mut target = Target::unit_test_bundle(&config.name, &host);
        target.target_type = config.target_type.clone();
        if let Some(platform) = config.platform {
            target.platform = platform;
        }
        if let Some(deployment_target) = &config.deployment_target {
            target.deployment_target = deployment_target.clone();
        }
        if let Some(language) = config.language {
            target.language = language;
        }
        if !config.include_files.is_empty() {
            target.include_files = config.include_files.clone();
        }
        if !config.exclude_files.is_empty() {
            target.exclude_files = config.exclude_files.clone();
        }
        target.all_build_configurations =
            Settings::merged(&target.all_build_configurations, &config.settings);
        Ok(target)
    }
}

fn standalone_target(config: &TargetConfig) -> Result<Target> {
    let missing = |field| ModelError::MissingField {
        target: config.name.clone(),
        field,
    };
    let platform = config.platform.ok_or_else(|| missing("platform"))?;
    let deployment_target = config
        .deployment_target
        .clone()
        .ok_or_else(|| missing("deployment_target"))?;

    let mut target = Target::new(
        &config.name,
        config.target_type.clone(),
        platform,
        deployment_target,
    );
    target.language = config.language.unwrap_or_default();
    target.include_files = config.include_files.clone();
    target.exclude_files = config.exclude_files.clone();
    target.host = config.host.clone();
    target.all_build_configurations = config.settings.clone();
    Ok(target)
}

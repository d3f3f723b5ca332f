//! The project root of the declarative model.

use crate::{
    BuildConfiguration, Language, ModelError, ObjectId, Platform, Result, Settings, Target,
    TargetType,
};

/// The whole compilation unit: configurations and targets.
///
/// The project keeps one invariant on behalf of its targets: every target
/// declares a configuration override for each project configuration name, so
/// flattened target configurations keep a stable identity.
#[derive(Debug, PartialEq)]
pub struct Project {
    id: ObjectId,
    /// Project name.
    pub name: String,
    /// Configuration used when none is specified.
    pub default_build_configuration: String,
    /// Settings applied to every project configuration.
    pub all_build_configurations: Settings,
    build_configurations: Vec<BuildConfiguration>,
    targets: Vec<Target>,
}

impl Clone for Project {
    fn clone(&self) -> Self {
        Self {
            id: ObjectId::next(),
            name: self.name.clone(),
            default_build_configuration: self.default_build_configuration.clone(),
            all_build_configurations: self.all_build_configurations.clone(),
            build_configurations: self.build_configurations.clone(),
            targets: self.targets.clone(),
        }
    }
}

impl Project {
    /// Create a project with `Debug` and `Release` configurations.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_build_configurations(name, ["Debug", "Release"])
    }

    /// Create a project with the given configurations, in order.
    ///
    /// The default configuration is `Release` when declared, otherwise the
    /// last configuration.
    pub fn with_build_configurations<I, S>(name: impl Into<String>, configurations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut project = Self {
            id: ObjectId::next(),
            name: name.into(),
            default_build_configuration: String::new(),
            all_build_configurations: Settings::new(),
            build_configurations: Vec::new(),
            targets: Vec::new(),
        };
        for name in configurations {
            project.add_build_configuration(name);
        }
        project.default_build_configuration = if project.has_build_configuration("Release") {
            "Release".to_string()
        } else {
            project
                .build_configurations
                .last()
                .map(|c| c.name.clone())
                .unwrap_or_default()
        };
        project
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Declared configurations, in declaration order.
    pub fn build_configurations(&self) -> &[BuildConfiguration] {
        &self.build_configurations
    }

    pub fn has_build_configuration(&self, name: &str) -> bool {
        self.build_configurations.iter().any(|c| c.name == name)
    }

    pub fn build_configuration_mut(&mut self, name: &str) -> Option<&mut BuildConfiguration> {
        self.build_configurations.iter_mut().find(|c| c.name == name)
    }

    /// Declare a configuration, or return the existing one with that name.
    ///
    /// Every target receives a matching (empty) override.
    pub fn add_build_configuration(&mut self, name: impl Into<String>) -> &mut BuildConfiguration {
        let name = name.into();
        for target in &mut self.targets {
            target.build_configuration_mut(&name);
        }
        let index = match self.build_configurations.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.build_configurations.push(BuildConfiguration::new(name));
                self.build_configurations.len() - 1
            }
        };
        &mut self.build_configurations[index]
    }

    /// Targets, in declaration order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn target_named(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn target_named_mut(&mut self, name: &str) -> Option<&mut Target> {
        self.targets.iter_mut().find(|t| t.name == name)
    }

    /// Add a target to the project.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateTarget`] if the name is taken.
    pub fn add_target(&mut self, mut target: Target) -> Result<&mut Target> {
        if self.target_named(&target.name).is_some() {
            return Err(ModelError::DuplicateTarget(target.name));
        }
        for configuration in &self.build_configurations {
            target.build_configuration_mut(&configuration.name);
        }
        self.targets.push(target);
        let last = self.targets.len() - 1;
        Ok(&mut self.targets[last])
    }

    /// Add an application target.
    pub fn application_for(
        &mut self,
        name: impl Into<String>,
        platform: Platform,
        deployment_target: impl Into<String>,
        language: Language,
    ) -> Result<&mut Target> {
        let mut target = Target::new(name, TargetType::Application, platform, deployment_target);
        target.language = language;
        self.add_target(target)
    }

    /// Add a unit-test bundle named `{host}Tests` hosted by `host`.
    ///
    /// See [`Target::unit_test_bundle`] for what the bundle inherits.
    pub fn unit_tests_for(&mut self, host: &str) -> Result<&mut Target> {
        let host = self
            .target_named(host)
            .ok_or_else(|| ModelError::UnknownTarget(host.to_string()))?;
        let target = Target::unit_test_bundle(format!("{}Tests", host.name), host);
        self.add_target(target)
    }

    /// Unit-test bundles hosted by `target`, in declaration order.
    pub fn unit_test_targets_for<'a>(&'a self, target: &Target) -> impl Iterator<Item = &'a Target> {
        let host = target.name.as_str();
        self.targets
            .iter()
            .filter(move |t| t.is_unit_test_bundle() && t.host.as_deref() == Some(host))
    }

    /// Project configurations with project-wide settings merged in.
    pub fn flatten_build_configurations(&self) -> Vec<BuildConfiguration> {
        self.build_configurations
            .iter()
            .map(|c| c.flattened_over(&self.all_build_configurations))
            .collect()
    }

    /// Configurations of `target`, one per project configuration, with the
    /// target-wide settings merged under each override.
    pub fn flatten_target_configurations(&self, target: &Target) -> Vec<BuildConfiguration> {
        self.build_configurations
            .iter()
            .filter_map(|c| target.build_configuration(&c.name))
            .map(|c| c.flattened_over(&target.all_build_configurations))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with_app() -> Project {
        let mut project = Project::new("Demo");
        project
            .application_for("App", Platform::Ios, "15.0", Language::Swift)
            .expect("add app");
        project
    }

    #[test]
    fn test_new_project_has_debug_and_release() {
        let project = Project::new("Demo");
        let names: Vec<_> = project
            .build_configurations()
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        assert_eq!(names, ["Debug", "Release"]);
        assert_eq!(project.default_build_configuration, "Release");
    }

    #[test]
    fn test_default_configuration_without_release() {
        let project = Project::with_build_configurations("Demo", ["Dev", "Prod"]);
        assert_eq!(project.default_build_configuration, "Prod");
    }

    #[test]
    fn test_duplicate_target_rejected() {
        let mut project = project_with_app();
        let err = project
            .application_for("App", Platform::Ios, "15.0", Language::Swift)
            .unwrap_err();

        assert_eq!(err, ModelError::DuplicateTarget("App".into()));
    }

    #[test]
    fn test_unit_tests_for_inherits_from_host() {
        let mut project = project_with_app();
        let tests = project.unit_tests_for("App").expect("add tests");

        assert_eq!(tests.name, "AppTests");
        assert_eq!(tests.language, Language::Swift);
        assert_eq!(tests.host.as_deref(), Some("App"));
        assert_eq!(
            tests
                .all_build_configurations
                .get("TEST_HOST")
                .and_then(|v| v.as_str()),
            Some("$(BUILT_PRODUCTS_DIR)/App.app/App")
        );
    }

    #[test]
    fn test_unit_tests_for_unknown_host() {
        let mut project = Project::new("Demo");
        let err = project.unit_tests_for("Missing").unwrap_err();
        assert_eq!(err, ModelError::UnknownTarget("Missing".into()));
    }

    #[test]
    fn test_unit_test_targets_for_matches_host() {
        let mut project = project_with_app();
        project.unit_tests_for("App").expect("add tests");
        project
            .application_for("Other", Platform::Ios, "15.0", Language::Swift)
            .expect("add other");

        let app = project.target_named("App").expect("app");
        let found: Vec<_> = project
            .unit_test_targets_for(app)
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(found, ["AppTests"]);

        let other = project.target_named("Other").expect("other");
        assert_eq!(project.unit_test_targets_for(other).count(), 0);
    }

    #[test]
    fn test_flatten_project_configurations_merges_defaults() {
        let mut project = Project::new("Demo");
        project.all_build_configurations.insert("SWIFT_VERSION", "5.0");
        project.all_build_configurations.insert("ONLY_ACTIVE_ARCH", "NO");
        project
            .build_configuration_mut("Debug")
            .expect("debug")
            .settings
            .insert("ONLY_ACTIVE_ARCH", "YES");

        let flattened = project.flatten_build_configurations();

        assert_eq!(flattened.len(), 2);
        assert_eq!(flattened[0].id(), project.build_configurations()[0].id());
        let debug = &flattened[0].settings;
        assert_eq!(debug.get("ONLY_ACTIVE_ARCH").and_then(|v| v.as_str()), Some("YES"));
        assert_eq!(debug.get("SWIFT_VERSION").and_then(|v| v.as_str()), Some("5.0"));
        let release = &flattened[1].settings;
        assert_eq!(release.get("ONLY_ACTIVE_ARCH").and_then(|v| v.as_str()), Some("NO"));
    }

    #[test]
    fn test_targets_follow_project_configurations() {
        let mut project = project_with_app();
        project.add_build_configuration("Staging");

        let app = project.target_named("App").expect("app");
        let names: Vec<_> = app
            .build_configurations()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["Debug", "Release", "Staging"]);
    }

    #[test]
    fn test_flatten_target_configurations_target_overrides_win() {
        let mut project = project_with_app();
        let app = project.target_named_mut("App").expect("app");
        app.all_build_configurations.insert("PRODUCT_NAME", "App");
        app.all_build_configurations.insert("CODE_SIGN_STYLE", "Automatic");
        app.build_configuration_mut("Release")
            .settings
            .insert("CODE_SIGN_STYLE", "Manual");

        let app = project.target_named("App").expect("app");
        let flattened = project.flatten_target_configurations(app);

        assert_eq!(flattened.len(), 2);
        assert_eq!(flattened[1].name, "Release");
        assert_eq!(
            flattened[1].id(),
            app.build_configuration("Release").expect("release").id()
        );
        let release = &flattened[1].settings;
        assert_eq!(release.get("CODE_SIGN_STYLE").and_then(|v| v.as_str()), Some("Manual"));
        assert_eq!(release.get("PRODUCT_NAME").and_then(|v| v.as_str()), Some("App"));
        let debug = &flattened[0].settings;
        assert_eq!(debug.get("CODE_SIGN_STYLE").and_then(|v| v.as_str()), Some("Automatic"));
    }
}

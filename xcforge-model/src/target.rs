use crate::{BuildConfiguration, Language, ObjectId, Platform, Scheme, Settings, TargetType};

/// One buildable unit of a project.
///
/// Cloning a target clones its configurations and schemes too, each with a
/// fresh identity.
#[derive(Debug, PartialEq)]
pub struct Target {
    pub(crate) id: ObjectId,
    /// Target name, unique within the project.
    pub name: String,
    /// Product type.
    pub target_type: TargetType,
    pub platform: Platform,
    /// Minimum OS version, e.g. `"15.0"`.
    pub deployment_target: String,
    pub language: Language,
    /// Glob patterns of files to include.
    pub include_files: Vec<String>,
    /// Glob patterns of files to exclude.
    pub exclude_files: Vec<String>,
    /// Name of the host target, for test bundles.
    pub host: Option<String>,
    /// Settings applied to every configuration of this target.
    pub all_build_configurations: Settings,
    pub(crate) build_configurations: Vec<BuildConfiguration>,
    pub(crate) schemes: Vec<Scheme>,
}

impl Clone for Target {
    fn clone(&self) -> Self {
        Self {
            id: ObjectId::next(),
            name: self.name.clone(),
            target_type: self.target_type.clone(),
            platform: self.platform,
            deployment_target: self.deployment_target.clone(),
            language: self.language,
            include_files: self.include_files.clone(),
            exclude_files: self.exclude_files.clone(),
            host: self.host.clone(),
            all_build_configurations: self.all_build_configurations.clone(),
            build_configurations: self.build_configurations.clone(),
            schemes: self.schemes.clone(),
        }
    }
}

impl Target {
    pub fn new(
        name: impl Into<String>,
        target_type: TargetType,
        platform: Platform,
        deployment_target: impl Into<String>,
    ) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            target_type,
            platform,
            deployment_target: deployment_target.into(),
            language: Language::default(),
            include_files: Vec::new(),
            exclude_files: Vec::new(),
            host: None,
            all_build_configurations: Settings::new(),
            build_configurations: Vec::new(),
            schemes: Vec::new(),
        }
    }

    /// A unit-test bundle hosted by `host`.
    ///
    /// The bundle inherits the host's platform, deployment target, language
    /// and file rules, and points `TEST_HOST` at the host application.
    pub fn unit_test_bundle(name: impl Into<String>, host: &Target) -> Self {
        let mut target = Target::new(
            name,
            TargetType::UnitTestBundle,
            host.platform,
            host.deployment_target.clone(),
        );
        target.language = host.language;
        target.include_files = host.include_files.clone();
        target.exclude_files = host.exclude_files.clone();
        target.host = Some(host.name.clone());
        target.all_build_configurations.insert(
            "TEST_HOST",
            format!("$(BUILT_PRODUCTS_DIR)/{name}.app/{name}", name = host.name),
        );
        target
            .all_build_configurations
            .insert("BUNDLE_LOADER", "$(TEST_HOST)");
        target
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn is_unit_test_bundle(&self) -> bool {
        self.target_type == TargetType::UnitTestBundle
    }

    /// Per-configuration overrides declared on this target.
    pub fn build_configurations(&self) -> &[BuildConfiguration] {
        &self.build_configurations
    }

    pub fn build_configuration(&self, name: &str) -> Option<&BuildConfiguration> {
        self.build_configurations.iter().find(|c| c.name == name)
    }

    /// The override for configuration `name`, created empty if missing.
    pub fn build_configuration_mut(&mut self, name: &str) -> &mut BuildConfiguration {
        let index = match self.build_configurations.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.build_configurations.push(BuildConfiguration::new(name));
                self.build_configurations.len() - 1
            }
        };
        &mut self.build_configurations[index]
    }

    /// Schemes declared on this target, in declaration order.
    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    /// Declare a new scheme on this target.
    pub fn scheme(&mut self, name: impl Into<String>) -> &mut Scheme {
        self.schemes.push(Scheme::new(name));
        let last = self.schemes.len() - 1;
        &mut self.schemes[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> Target {
        Target::new("App", TargetType::Application, Platform::Ios, "15.0")
    }

    #[test]
    fn test_build_configuration_mut_creates_once() {
        let mut target = app();
        let first = target.build_configuration_mut("Debug").id();
        let second = target.build_configuration_mut("Debug").id();

        assert_eq!(first, second);
        assert_eq!(target.build_configurations().len(), 1);
    }

    #[test]
    fn test_clone_gets_fresh_identities() {
        let mut target = app();
        target.build_configuration_mut("Debug");
        target.scheme("App");

        let copy = target.clone();

        assert_ne!(copy.id(), target.id());
        assert_ne!(copy.build_configurations()[0].id(), target.build_configurations()[0].id());
        assert_ne!(copy.schemes()[0].id(), target.schemes()[0].id());
        assert_eq!(copy.schemes()[0].name, "App");
    }

    #[test]
    fn test_schemes_keep_declaration_order() {
        let mut target = app();
        target.scheme("First");
        target.scheme("Second").use_configuration("Release");

        let names: Vec<_> = target.schemes().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
        assert_eq!(target.schemes()[1].test_configuration, "Release");
    }
}

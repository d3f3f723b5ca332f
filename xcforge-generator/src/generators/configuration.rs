use xcforge_model::{BuildConfiguration, Target};

use super::TargetGenerator;
use crate::{Generator, Result, TranslationContext};

/// Creates native build configurations for the project and every target.
///
/// Settings written to the backend are the flattened ones: project-wide
/// settings under project configurations, target-wide settings under target
/// overrides.
pub struct ConfigurationGenerator;

impl ConfigurationGenerator {
    pub const NAME: &'static str = "configuration";
}

impl Generator for ConfigurationGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Create native build configurations with merged settings"
    }

    fn dependencies(&self) -> &[&'static str] {
        &[TargetGenerator::NAME]
    }

    fn visit_configuration(
        &self,
        configuration: &BuildConfiguration,
        ctx: &mut TranslationContext<'_>,
    ) -> Result<()> {
        let project = ctx.project();
        let native_project = ctx.native_object_for(project)?;
        let native = ctx.native_object_for(configuration)?;
        let backend = ctx.backend();
        backend.set_build_settings(native, &configuration.settings)?;
        backend.attach(native_project, native)?;
        Ok(())
    }

    fn visit_target(&self, target: &Target, ctx: &mut TranslationContext<'_>) -> Result<()> {
        let project = ctx.project();
        let native_target = ctx.native_object_for(target)?;
        for configuration in project.flatten_target_configurations(target) {
            let native = ctx.native_object_for(&configuration)?;
            let backend = ctx.backend();
            backend.set_build_settings(native, &configuration.settings)?;
            backend.attach(native_target, native)?;
        }
        Ok(())
    }
}

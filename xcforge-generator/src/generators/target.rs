use tracing::debug;
use xcforge_model::Target;

use super::ProjectStructureGenerator;
use crate::{Error, Generator, Result, TranslationContext};

/// Creates a native target for every model target.
///
/// Targets with a host (test bundles) also get a target dependency on the
/// host's native target.
pub struct TargetGenerator;

impl TargetGenerator {
    pub const NAME: &'static str = "target";
}

impl Generator for TargetGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Create native targets and link test bundles to their hosts"
    }

    fn dependencies(&self) -> &[&'static str] {
        &[ProjectStructureGenerator::NAME]
    }

    fn visit_target(&self, target: &Target, ctx: &mut TranslationContext<'_>) -> Result<()> {
        let project = ctx.project();
        let native_project = ctx.native_object_for(project)?;
        let native_target = ctx.native_object_for(target)?;
        ctx.backend().attach(native_project, native_target)?;

        if let Some(host) = &target.host {
            let host_target = project
                .target_named(host)
                .ok_or_else(|| Error::UnresolvedHost {
                    target: target.name.clone(),
                    host: host.clone(),
                })?;
            let native_host = ctx.native_object_for(host_target)?;
            ctx.backend().attach(native_target, native_host)?;
        }

        debug!(target = %target.name, %native_target, "created target");
        Ok(())
    }
}

use std::iter;

use tracing::debug;
use xcforge_model::{Project, Scheme, Target, TestTargetPolicy};

use super::{ConfigurationGenerator, ProjectStructureGenerator, TargetGenerator};
use crate::{Error, Generator, Hook, Result, TranslationContext};

/// Materializes user schemes and takes over scheme creation from the backend.
///
/// For every target the backend's automatic scheme is suppressed, even when
/// the target declares no schemes. Each declared scheme is bound to the
/// target and, when one exists, the target's unit-test bundle. Leaving the
/// project stages the scheme list; the pipeline saves it once the whole run
/// has succeeded.
pub struct SchemeGenerator {
    test_target_policy: TestTargetPolicy,
}

impl SchemeGenerator {
    pub const NAME: &'static str = "scheme";

    pub fn new() -> Self {
        Self {
            test_target_policy: TestTargetPolicy::default(),
        }
    }

    pub fn with_test_target_policy(mut self, policy: TestTargetPolicy) -> Self {
        self.test_target_policy = policy;
        self
    }

    /// The unit-test bundle hosted by `target`, chosen per the policy.
    fn unit_test_target_for<'p>(
        &self,
        project: &'p Project,
        target: &Target,
    ) -> Result<Option<&'p Target>> {
        let mut candidates = project.unit_test_targets_for(target);
        let Some(first) = candidates.next() else {
            return Ok(None);
        };

        match self.test_target_policy {
            TestTargetPolicy::FirstMatch => Ok(Some(first)),
            TestTargetPolicy::Unique => {
                let rest: Vec<String> = candidates.map(|t| t.name.clone()).collect();
                if rest.is_empty() {
                    Ok(Some(first))
                } else {
                    Err(Error::AmbiguousTestTarget {
                        target: target.name.clone(),
                        candidates: iter::once(first.name.clone()).chain(rest).collect(),
                    })
                }
            }
        }
    }
}

impl Default for SchemeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Every action of `scheme` must name a project configuration.
fn check_configurations(project: &Project, scheme: &Scheme) -> Result<()> {
    for (action, configuration) in scheme.configurations() {
        if !project.has_build_configuration(configuration) {
            return Err(Error::UnknownConfiguration {
                scheme: scheme.name.clone(),
                configuration: configuration.to_string(),
                action,
            });
        }
    }
    Ok(())
}

impl Generator for SchemeGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Create user schemes and save the scheme list"
    }

    fn dependencies(&self) -> &[&'static str] {
        &[
            TargetGenerator::NAME,
            ProjectStructureGenerator::NAME,
            ConfigurationGenerator::NAME,
        ]
    }

    fn visit_project(&self, project: &Project, ctx: &mut TranslationContext<'_>) -> Result<()> {
        ctx.fire(Hook::BeforeAddingUserSchemes)?;
        ctx.native_object_for(project)?;
        Ok(())
    }

    fn visit_target(&self, target: &Target, ctx: &mut TranslationContext<'_>) -> Result<()> {
        let project = ctx.project();
        let native_target = ctx.native_object_for(target)?;
        ctx.scheme_list()
            .suppress_autocreation_of_target(native_target);

        if target.schemes().is_empty() {
            return Ok(());
        }

        let native_unit_test_target = match self.unit_test_target_for(project, target)? {
            Some(unit_test_target) => {
                let native = ctx.native_object_for(unit_test_target)?;
                ctx.scheme_list().suppress_autocreation_of_target(native);
                Some(native)
            }
            None => None,
        };

        for scheme in target.schemes() {
            check_configurations(project, scheme)?;

            let native_scheme = ctx.native_object_for(scheme)?;
            let backend = ctx.backend();
            backend.set_scheme_name(native_scheme, &scheme.name)?;
            backend.configure_scheme_with_targets(
                native_scheme,
                native_target,
                native_unit_test_target,
            )?;
            for (action, configuration) in scheme.configurations() {
                backend.set_action_configuration(native_scheme, action, configuration)?;
            }

            ctx.scheme_list().push(native_scheme);
            debug!(scheme = %scheme.name, target = %target.name, "added scheme");
        }

        Ok(())
    }

    fn leave_project(&self, project: &Project, ctx: &mut TranslationContext<'_>) -> Result<()> {
        ctx.stage_scheme_list();
        debug!(project = %project.name, "staged scheme list");
        Ok(())
    }
}

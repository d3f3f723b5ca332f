use xcforge_model::Project;

use crate::{Generator, Result, TranslationContext};

/// Groups every native project starts with.
pub const DEFAULT_GROUPS: [&str; 2] = ["Products", "Frameworks"];

/// Creates the native project and its default groups.
pub struct ProjectStructureGenerator;

impl ProjectStructureGenerator {
    pub const NAME: &'static str = "project-structure";
}

impl Generator for ProjectStructureGenerator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Create the native project and its default groups"
    }

    fn visit_project(&self, project: &Project, ctx: &mut TranslationContext<'_>) -> Result<()> {
        let native_project = ctx.native_object_for(project)?;
        for group in DEFAULT_GROUPS {
            ctx.backend().create_group(native_project, group)?;
        }
        Ok(())
    }
}

//! Generator trait.

use xcforge_model::{BuildConfiguration, Project, Target};

use crate::{Result, TranslationContext};

/// Information about a generator.
#[derive(Debug, Clone)]
pub struct GeneratorInfo {
    /// The generator name.
    pub name: &'static str,
    /// A human-readable description.
    pub description: &'static str,
    /// Names of generators that must run first.
    pub dependencies: Vec<&'static str>,
}

/// A pass of the pipeline.
///
/// Generators are ordered by their declared dependencies. During its turn a
/// generator sees the whole model tree: the project, every flattened project
/// configuration, then every target, then the project again on leave. All
/// callbacks default to doing nothing.
///
/// Generators share state only through the [`TranslationContext`]. A
/// generator that reads native objects created by another generator must list
/// it in [`dependencies`](Self::dependencies).
#[allow(unused_variables)]
pub trait Generator: Send + Sync {
    /// The name of this generator (used for dependencies and hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this generator does.
    fn description(&self) -> &'static str;

    /// Names of generators whose traversal must complete before this one.
    fn dependencies(&self) -> &[&'static str] {
        &[]
    }

    fn visit_project(&self, project: &Project, ctx: &mut TranslationContext<'_>) -> Result<()> {
        Ok(())
    }

    fn visit_configuration(
        &self,
        configuration: &BuildConfiguration,
        ctx: &mut TranslationContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    fn leave_configuration(
        &self,
        configuration: &BuildConfiguration,
        ctx: &mut TranslationContext<'_>,
    ) -> Result<()> {
        Ok(())
    }

    fn visit_target(&self, target: &Target, ctx: &mut TranslationContext<'_>) -> Result<()> {
        Ok(())
    }

    fn leave_target(&self, target: &Target, ctx: &mut TranslationContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called last in this generator's traversal; the place to finalize or
    /// persist output.
    fn leave_project(&self, project: &Project, ctx: &mut TranslationContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Get information about this generator.
    fn info(&self) -> GeneratorInfo {
        GeneratorInfo {
            name: self.name(),
            description: self.description(),
            dependencies: self.dependencies().to_vec(),
        }
    }
}

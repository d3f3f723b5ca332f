//! Pipeline orchestrator.

use tracing::{debug, info};
use xcforge_model::Project;

use crate::{
    Generator, GeneratorInfo, Plugin, Result, TranslationContext,
    backend::Backend,
    generators::{
        ConfigurationGenerator, GeneratorConfig, ProjectStructureGenerator, SchemeGenerator,
        TargetGenerator,
    },
    scheduler, visitor,
};

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Generator names in the order they ran.
    pub order: Vec<&'static str>,
    /// Number of model objects that received a native counterpart.
    pub translated: usize,
}

/// The generator pipeline.
///
/// Generators run one after another in dependency order. Each generator
/// walks the whole model tree before the next one starts. Plugins are called
/// before and after each generator and receive every hook fired during the
/// run.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .generator(ProjectStructureGenerator)
///     .generator(TargetGenerator)
///     .plugin(MyPlugin::new());
///
/// let summary = pipeline.run(&project, &mut backend)?;
/// ```
pub struct Pipeline {
    generators: Vec<Box<dyn Generator>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Create a pipeline with the built-in generators registered.
    pub fn standard(config: &GeneratorConfig) -> Self {
        Self::new()
            .generator(ProjectStructureGenerator)
            .generator(TargetGenerator)
            .generator(ConfigurationGenerator)
            .generator(
                SchemeGenerator::new().with_test_target_policy(config.test_target_policy),
            )
    }

    /// Register a generator.
    pub fn generator(mut self, generator: impl Generator + 'static) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    /// Add a plugin to receive generator lifecycle callbacks and hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Information about the registered generators, in registration order.
    pub fn infos(&self) -> Vec<GeneratorInfo> {
        self.generators.iter().map(|g| g.info()).collect()
    }

    /// The order generators would run in.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for duplicate names, missing
    /// dependencies or dependency cycles.
    pub fn order(&self) -> Result<Vec<&'static str>> {
        Ok(scheduler::resolve_order(&self.generators)?
            .into_iter()
            .map(|g| g.name())
            .collect())
    }

    /// Compile `project` into `backend`.
    ///
    /// The generator order is resolved before anything touches the backend,
    /// so configuration errors leave it untouched. The first error from a
    /// generator or plugin stops the run. A staged scheme list is saved only
    /// after every generator and plugin callback has succeeded.
    ///
    /// # Errors
    ///
    /// Returns the first error raised during the run.
    pub fn run(&self, project: &Project, backend: &mut dyn Backend) -> Result<RunSummary> {
        let order = scheduler::resolve_order(&self.generators)?;
        info!(project = %project.name, generators = order.len(), "running pipeline");

        let mut ctx = TranslationContext::new(project, backend).with_plugins(&self.plugins);
        for generator in &order {
            self.run_generator(*generator, project, &mut ctx)?;
        }
        ctx.commit()?;

        Ok(RunSummary {
            order: order.iter().map(|g| g.name()).collect(),
            translated: ctx.len(),
        })
    }

    /// Run a single generator with plugin callbacks.
    fn run_generator(
        &self,
        generator: &dyn Generator,
        project: &Project,
        ctx: &mut TranslationContext<'_>,
    ) -> Result<()> {
        let name = generator.name();

        for plugin in &self.plugins {
            plugin.on_before_generator(name, ctx)?;
        }

        debug!(generator = name, "running generator");
        visitor::traverse(generator, project, ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_generator(name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

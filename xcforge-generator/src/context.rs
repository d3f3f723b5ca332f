//! Translation context shared by all generators of one run.

use std::collections::HashMap;

use tracing::{debug, info, trace};
use xcforge_model::{ObjectId, Project};

use crate::{
    Error, Hook, ModelNode, Plugin, Result,
    backend::{Backend, NativeId, SchemeList},
};

/// Run-scoped identity cache from model objects to native objects.
///
/// The first [`native_object_for`](Self::native_object_for) call for a model
/// object creates its native counterpart in the backend; later calls return
/// the same [`NativeId`]. Identity is the model object's
/// [`ObjectId`], never its value.
///
/// The context is created when a pipeline run starts and dropped when it
/// ends. Generators run one at a time and each receives it by `&mut`.
///
/// Persistence is two-phase: generators [`stage_scheme_list`] during the
/// run, and the pipeline saves it with [`commit`] once every generator and
/// plugin callback has succeeded.
///
/// [`stage_scheme_list`]: Self::stage_scheme_list
/// [`commit`]: Self::commit
pub struct TranslationContext<'a> {
    project: &'a Project,
    backend: &'a mut dyn Backend,
    plugins: &'a [Box<dyn Plugin>],
    natives: HashMap<ObjectId, NativeId>,
    scheme_list_staged: bool,
}

impl<'a> TranslationContext<'a> {
    /// Create a context for translating `project` into `backend`.
    pub fn new(project: &'a Project, backend: &'a mut dyn Backend) -> Self {
        Self {
            project,
            backend,
            plugins: &[],
            natives: HashMap::new(),
            scheme_list_staged: false,
        }
    }

    /// Attach plugins that receive [`Hook`] events fired through this context.
    pub fn with_plugins(mut self, plugins: &'a [Box<dyn Plugin>]) -> Self {
        self.plugins = plugins;
        self
    }

    /// The project being compiled.
    pub fn project(&self) -> &'a Project {
        self.project
    }

    /// Resolve the native object for a model node, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Translation`] naming the node if the backend cannot
    /// represent it.
    pub fn native_object_for<'n>(&mut self, node: impl Into<ModelNode<'n>>) -> Result<NativeId> {
        let node = node.into();
        if let Some(native) = self.natives.get(&node.id()) {
            return Ok(*native);
        }

        let native = self
            .backend
            .create(node)
            .map_err(|source| Error::Translation {
                object: node.to_string(),
                reason: source.to_string(),
            })?;
        trace!(object = %node, %native, "translated");
        self.natives.insert(node.id(), native);
        Ok(native)
    }

    /// The native object already created for a node, without creating one.
    pub fn lookup<'n>(&self, node: impl Into<ModelNode<'n>>) -> Option<NativeId> {
        self.natives.get(&node.into().id()).copied()
    }

    /// Number of translated model objects.
    pub fn len(&self) -> usize {
        self.natives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.natives.is_empty()
    }

    /// The backend, for configuring and linking native objects.
    pub fn backend(&mut self) -> &mut (dyn Backend + 'a) {
        &mut *self.backend
    }

    /// The backend's project-wide scheme list.
    pub fn scheme_list(&mut self) -> &mut dyn SchemeList {
        self.backend.scheme_list()
    }

    /// Request that the scheme list be saved when the run commits.
    pub fn stage_scheme_list(&mut self) {
        self.scheme_list_staged = true;
    }

    pub fn is_scheme_list_staged(&self) -> bool {
        self.scheme_list_staged
    }

    /// Save the staged scheme list, if any. Returns whether a save happened.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the backend fails to save.
    pub fn commit(&mut self) -> Result<bool> {
        if !self.scheme_list_staged {
            return Ok(false);
        }
        self.backend
            .scheme_list()
            .save()
            .map_err(|source| Error::Persist { source })?;
        self.scheme_list_staged = false;
        info!(project = %self.project.name, "saved scheme list");
        Ok(true)
    }

    /// Fire a hook to every plugin, in registration order.
    pub fn fire(&mut self, hook: Hook) -> Result<()> {
        debug!(hook = hook.name(), "firing hook");
        let plugins = self.plugins;
        for plugin in plugins {
            plugin.on_hook(hook, self)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use xcforge_model::{Platform, Scheme, Target, TargetType};

    use super::*;
    use crate::backend::MemoryBackend;

    #[test]
    fn test_translation_is_idempotent() {
        let project = Project::new("Demo");
        let mut backend = MemoryBackend::new();
        let mut ctx = TranslationContext::new(&project, &mut backend);

        let first = ctx.native_object_for(&project).expect("translate");
        let second = ctx.native_object_for(&project).expect("translate again");

        assert_eq!(first, second);
        assert_eq!(ctx.len(), 1);
        drop(ctx);
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn test_identity_not_value() {
        let project = Project::new("Demo");
        let a = Scheme::new("Same");
        let b = Scheme::new("Same");
        let mut backend = MemoryBackend::new();
        let mut ctx = TranslationContext::new(&project, &mut backend);

        let native_a = ctx.native_object_for(&a).expect("a");
        let native_b = ctx.native_object_for(&b).expect("b");

        assert_ne!(native_a, native_b);
    }

    #[test]
    fn test_lookup_does_not_create() {
        let project = Project::new("Demo");
        let mut backend = MemoryBackend::new();
        let mut ctx = TranslationContext::new(&project, &mut backend);

        assert_eq!(ctx.lookup(&project), None);
        let native = ctx.native_object_for(&project).expect("translate");
        assert_eq!(ctx.lookup(&project), Some(native));
    }

    #[test]
    fn test_translation_error_names_object() {
        let project = Project::new("Demo");
        let target = Target::new(
            "Driver",
            TargetType::Other("kext".into()),
            Platform::Macos,
            "12.0",
        );
        let mut backend = MemoryBackend::new();
        let mut ctx = TranslationContext::new(&project, &mut backend);

        let err = ctx.native_object_for(&target).unwrap_err();

        assert!(matches!(err, Error::Translation { ref object, .. } if object == "target 'Driver'"));
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_staged_scheme_list_saves_only_on_commit() {
        let project = Project::new("Demo");
        let mut backend = MemoryBackend::new();
        let mut ctx = TranslationContext::new(&project, &mut backend);

        assert!(!ctx.commit().expect("nothing staged"));
        ctx.stage_scheme_list();
        assert!(ctx.is_scheme_list_staged());
        assert!(ctx.commit().expect("commit"));
        assert!(!ctx.commit().expect("already committed"));
        drop(ctx);

        assert_eq!(backend.save_count(), 1);
    }

    #[test]
    fn test_dropping_context_discards_staged_scheme_list() {
        let project = Project::new("Demo");
        let mut backend = MemoryBackend::new();
        let mut ctx = TranslationContext::new(&project, &mut backend);

        ctx.stage_scheme_list();
        drop(ctx);

        assert_eq!(backend.save_count(), 0);
        assert!(backend.saved_scheme_list().is_none());
    }
}

//! Contract between the pipeline and a native project-file backend.
//!
//! The pipeline never inspects native objects. It only requires that they
//! can be created from model nodes, identified by [`NativeId`], configured,
//! linked to each other and, for the scheme list, persisted.

mod memory;

use std::{fmt, io, path::PathBuf};

pub use memory::{
    MemoryBackend, NativeConfiguration, NativeGroup, NativeObject, NativeProject, NativeScheme,
    NativeTarget, SavedScheme, SavedSchemeList,
};
use serde::Serialize;
use thiserror::Error;
use xcforge_model::{SchemeAction, Settings};

use crate::ModelNode;

/// Handle to an object in a backend's object graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NativeId(u32);

impl NativeId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "native#{}", self.0)
    }
}

/// Result type for backend operations.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Errors reported by a backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{reason}")]
    Unrepresentable { reason: String },

    #[error("unknown native object {0}")]
    UnknownObject(NativeId),

    #[error("{id} is a {found}, expected a {expected}")]
    WrongKind {
        id: NativeId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("cannot attach a {child} to a {parent}")]
    InvalidAttachment {
        parent: &'static str,
        child: &'static str,
    },

    #[error("failed to write '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize the scheme list")]
    Serialize(#[from] serde_json::Error),
}

/// A native project-file backend.
///
/// Implementations own the native object graph; native objects outlive the
/// pipeline run that created them.
pub trait Backend {
    /// Create the native counterpart of a model node.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Unrepresentable`] if the backend has no
    /// representation for the node (for example an unknown product type).
    fn create(&mut self, node: ModelNode<'_>) -> BackendResult<NativeId>;

    /// Create a group inside a native project.
    fn create_group(&mut self, project: NativeId, name: &str) -> BackendResult<NativeId>;

    /// Link `child` under `parent`.
    ///
    /// The meaning depends on the kinds involved: a target attached to a
    /// project is a member of it, a configuration attached to a project or
    /// target joins its configuration list, and a target attached to a target
    /// becomes a dependency of it.
    fn attach(&mut self, parent: NativeId, child: NativeId) -> BackendResult<()>;

    fn set_build_settings(&mut self, configuration: NativeId, settings: &Settings)
    -> BackendResult<()>;

    fn set_scheme_name(&mut self, scheme: NativeId, name: &str) -> BackendResult<()>;

    /// Wire the default build, launch and test entries of a scheme.
    fn configure_scheme_with_targets(
        &mut self,
        scheme: NativeId,
        target: NativeId,
        test_target: Option<NativeId>,
    ) -> BackendResult<()>;

    fn set_action_configuration(
        &mut self,
        scheme: NativeId,
        action: SchemeAction,
        configuration: &str,
    ) -> BackendResult<()>;

    /// The project-wide scheme list handle.
    fn scheme_list(&mut self) -> &mut dyn SchemeList;
}

/// The collection of schemes shared by a native project.
pub trait SchemeList {
    /// Stop the backend from generating a default scheme for `target`.
    /// Repeated calls for the same target have no further effect.
    fn suppress_autocreation_of_target(&mut self, target: NativeId);

    /// Append a scheme.
    fn push(&mut self, scheme: NativeId);

    /// Persist the scheme list.
    fn save(&mut self) -> BackendResult<()>;
}

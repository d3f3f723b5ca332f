//! Closed set of model node kinds seen by the pipeline.

use std::fmt;

use xcforge_model::{BuildConfiguration, ObjectId, Project, Scheme, Target};

/// A borrowed declarative model object.
///
/// Traversal dispatches on this enum, and the translation context keys
/// native objects by [`ModelNode::id`].
#[derive(Debug, Clone, Copy)]
pub enum ModelNode<'a> {
    Project(&'a Project),
    Configuration(&'a BuildConfiguration),
    Target(&'a Target),
    Scheme(&'a Scheme),
}

impl<'a> ModelNode<'a> {
    /// Identity of the underlying model object.
    pub fn id(&self) -> ObjectId {
        match self {
            ModelNode::Project(p) => p.id(),
            ModelNode::Configuration(c) => c.id(),
            ModelNode::Target(t) => t.id(),
            ModelNode::Scheme(s) => s.id(),
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            ModelNode::Project(p) => &p.name,
            ModelNode::Configuration(c) => &c.name,
            ModelNode::Target(t) => &t.name,
            ModelNode::Scheme(s) => &s.name,
        }
    }

    /// Lowercase kind name, e.g. `"target"`.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelNode::Project(_) => "project",
            ModelNode::Configuration(_) => "configuration",
            ModelNode::Target(_) => "target",
            ModelNode::Scheme(_) => "scheme",
        }
    }
}

impl fmt::Display for ModelNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind(), self.name())
    }
}

impl<'a> From<&'a Project> for ModelNode<'a> {
    fn from(value: &'a Project) -> Self {
        ModelNode::Project(value)
    }
}

impl<'a> From<&'a BuildConfiguration> for ModelNode<'a> {
    fn from(value: &'a BuildConfiguration) -> Self {
        ModelNode::Configuration(value)
    }
}

impl<'a> From<&'a Target> for ModelNode<'a> {
    fn from(value: &'a Target) -> Self {
        ModelNode::Target(value)
    }
}

impl<'a> From<&'a Scheme> for ModelNode<'a> {
    fn from(value: &'a Scheme) -> Self {
        ModelNode::Scheme(value)
    }
}

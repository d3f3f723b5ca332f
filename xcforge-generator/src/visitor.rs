//! Model tree traversal.

use tracing::trace;
use xcforge_model::Project;

use crate::{Generator, ModelNode, Result, TranslationContext};

/// Walk the model tree for one generator.
///
/// Order: project, each flattened project configuration (visit then leave),
/// each target in declaration order (visit then leave), then leave project.
pub(crate) fn traverse(
    generator: &dyn Generator,
    project: &Project,
    ctx: &mut TranslationContext<'_>,
) -> Result<()> {
    visit(generator, ModelNode::Project(project), ctx)?;

    for configuration in project.flatten_build_configurations() {
        let node = ModelNode::Configuration(&configuration);
        visit(generator, node, ctx)?;
        leave(generator, node, ctx)?;
    }

    for target in project.targets() {
        let node = ModelNode::Target(target);
        visit(generator, node, ctx)?;
        leave(generator, node, ctx)?;
    }

    leave(generator, ModelNode::Project(project), ctx)
}

fn visit(
    generator: &dyn Generator,
    node: ModelNode<'_>,
    ctx: &mut TranslationContext<'_>,
) -> Result<()> {
    trace!(generator = generator.name(), %node, "visit");
    match node {
        ModelNode::Project(project) => generator.visit_project(project, ctx),
        ModelNode::Configuration(configuration) => generator.visit_configuration(configuration, ctx),
        ModelNode::Target(target) => generator.visit_target(target, ctx),
        // Schemes are reached through their target.
        ModelNode::Scheme(_) => Ok(()),
    }
}

fn leave(
    generator: &dyn Generator,
    node: ModelNode<'_>,
    ctx: &mut TranslationContext<'_>,
) -> Result<()> {
    trace!(generator = generator.name(), %node, "leave");
    match node {
        ModelNode::Project(project) => generator.leave_project(project, ctx),
        ModelNode::Configuration(configuration) => generator.leave_configuration(configuration, ctx),
        ModelNode::Target(target) => generator.leave_target(target, ctx),
        ModelNode::Scheme(_) => Ok(()),
    }
}

//! Dependency ordering of generators.

use indexmap::IndexMap;
use tracing::debug;

use crate::{Error, Generator, Result};

/// Resolve the execution order of `generators`.
///
/// Every generator is placed after all of its dependencies. Among generators
/// that are ready at the same time, the one registered first runs first, so
/// the order is reproducible.
///
/// # Errors
///
/// Returns a configuration error for duplicate names, dependencies on
/// unregistered generators, and dependency cycles.
pub(crate) fn resolve_order(generators: &[Box<dyn Generator>]) -> Result<Vec<&dyn Generator>> {
    let mut index: IndexMap<&str, usize> = IndexMap::new();
    for (i, generator) in generators.iter().enumerate() {
        if index.insert(generator.name(), i).is_some() {
            return Err(Error::DuplicateGenerator {
                name: generator.name().to_string(),
            });
        }
    }

    let mut dependencies: Vec<Vec<usize>> = Vec::with_capacity(generators.len());
    for generator in generators {
        let mut deps = Vec::new();
        for dependency in generator.dependencies() {
            let Some(&dep) = index.get(dependency) else {
                return Err(Error::MissingDependency {
                    generator: generator.name().to_string(),
                    dependency: dependency.to_string(),
                });
            };
            deps.push(dep);
        }
        dependencies.push(deps);
    }

    let mut placed = vec![false; generators.len()];
    let mut order = Vec::with_capacity(generators.len());
    while order.len() < generators.len() {
        let ready = (0..generators.len())
            .find(|&i| !placed[i] && dependencies[i].iter().all(|&dep| placed[dep]));

        match ready {
            Some(i) => {
                placed[i] = true;
                order.push(generators[i].as_ref());
            }
            None => {
                return Err(Error::DependencyCycle {
                    cycle: find_cycle(generators, &dependencies, &placed),
                });
            }
        }
    }

    debug!(
        order = ?order.iter().map(|g| g.name()).collect::<Vec<_>>(),
        "resolved generator order"
    );
    Ok(order)
}

/// Walk unplaced dependencies from the first unplaced generator until a
/// generator repeats.
///
/// Every unplaced generator has at least one unplaced dependency, otherwise it
/// would have been ready, so the walk always closes a cycle.
fn find_cycle(
    generators: &[Box<dyn Generator>],
    dependencies: &[Vec<usize>],
    placed: &[bool],
) -> Vec<String> {
    let mut path: Vec<usize> = Vec::new();
    let mut current = placed.iter().position(|p| !p);

    while let Some(node) = current {
        if let Some(start) = path.iter().position(|&n| n == node) {
            let mut cycle: Vec<String> = path[start..]
                .iter()
                .map(|&n| generators[n].name().to_string())
                .collect();
            cycle.push(generators[node].name().to_string());
            return cycle;
        }
        path.push(node);
        current = dependencies[node].iter().copied().find(|&dep| !placed[dep]);
    }

    path.iter()
        .map(|&n| generators[n].name().to_string())
        .collect()
}

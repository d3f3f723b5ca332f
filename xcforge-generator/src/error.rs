use miette::Diagnostic;
use thiserror::Error;
use xcforge_model::SchemeAction;

use crate::backend::BackendError;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of pipeline failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The generator set itself is invalid. Raised before any traversal.
    Configuration,
    /// The backend could not represent or link a model object.
    Translation,
    /// A model object references something that does not exist.
    Reference,
    /// Writing the final output failed.
    Persistence,
    /// A plugin aborted the run.
    Plugin,
}

/// A fatal pipeline error. Every variant aborts the whole run.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("generator '{name}' is registered more than once")]
    #[diagnostic(code(xcforge::duplicate_generator))]
    DuplicateGenerator { name: String },

    #[error("generator '{generator}' depends on '{dependency}', which is not registered")]
    #[diagnostic(
        code(xcforge::missing_dependency),
        help("register '{dependency}' in the pipeline or drop it from the dependencies of '{generator}'")
    )]
    MissingDependency {
        generator: String,
        dependency: String,
    },

    #[error("dependency cycle between generators: {}", .cycle.join(" -> "))]
    #[diagnostic(code(xcforge::dependency_cycle))]
    DependencyCycle { cycle: Vec<String> },

    #[error("cannot translate {object}: {reason}")]
    #[diagnostic(code(xcforge::translation))]
    Translation { object: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(xcforge::backend))]
    Backend(#[from] BackendError),

    #[error(
        "scheme '{scheme}' uses configuration '{configuration}' for its {action} action, but the project does not define it"
    )]
    #[diagnostic(
        code(xcforge::unknown_configuration),
        help("declare '{configuration}' under [configurations] or pick an existing configuration")
    )]
    UnknownConfiguration {
        scheme: String,
        configuration: String,
        action: SchemeAction,
    },

    #[error("target '{target}' is hosted by '{host}', which is not a target in the project")]
    #[diagnostic(code(xcforge::unresolved_host))]
    UnresolvedHost { target: String, host: String },

    #[error("target '{target}' has more than one unit-test target: {}", .candidates.join(", "))]
    #[diagnostic(
        code(xcforge::ambiguous_test_target),
        help("declare a single test bundle per host or use the first-match test target policy")
    )]
    AmbiguousTestTarget {
        target: String,
        candidates: Vec<String>,
    },

    #[error("failed to persist the scheme list")]
    #[diagnostic(code(xcforge::persist))]
    Persist {
        #[source]
        source: BackendError,
    },

    #[error("plugin '{plugin}' failed: {message}")]
    #[diagnostic(code(xcforge::plugin))]
    Plugin { plugin: String, message: String },
}

impl Error {
    /// Create a plugin error.
    pub fn plugin(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Plugin {
            plugin: plugin.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DuplicateGenerator { .. }
            | Error::MissingDependency { .. }
            | Error::DependencyCycle { .. } => ErrorKind::Configuration,
            Error::Translation { .. } | Error::Backend(_) => ErrorKind::Translation,
            Error::UnknownConfiguration { .. }
            | Error::UnresolvedHost { .. }
            | Error::AmbiguousTestTarget { .. } => ErrorKind::Reference,
            Error::Persist { .. } => ErrorKind::Persistence,
            Error::Plugin { .. } => ErrorKind::Plugin,
        }
    }
}

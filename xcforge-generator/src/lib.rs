//! Generator pipeline for the xcforge project compiler.
//!
//! This crate turns a declarative [`Project`](xcforge_model::Project) into
//! native project objects through an ordered sequence of generators.
//!
//! # Module Organization
//!
//! - [`backend`] - The native backend contract and the in-memory backend
//! - [`generators`] - Built-in generators (project structure, targets,
//!   configurations, schemes)
//! - [`Pipeline`] - Dependency-ordered generator execution with plugin hooks
//! - [`TranslationContext`] - Run-scoped identity cache from model objects to
//!   native objects
//!
//! # Example
//!
//! ```ignore
//! use xcforge_generator::{Pipeline, backend::MemoryBackend, generators::GeneratorConfig};
//!
//! let mut backend = MemoryBackend::new();
//! let summary = Pipeline::standard(&GeneratorConfig::default()).run(&project, &mut backend)?;
//! println!("ran {:?}", summary.order);
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod backend;
mod context;
mod error;
mod generator;
pub mod generators;
mod node;
mod plugin;
mod runner;
mod scheduler;
mod visitor;

pub use context::TranslationContext;
pub use error::{Error, ErrorKind, Result};
pub use generator::{Generator, GeneratorInfo};
pub use node::ModelNode;
pub use plugin::{Hook, Plugin};
pub use runner::{Pipeline, RunSummary};

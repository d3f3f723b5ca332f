//! Declarative project model for the xcforge project compiler.
//!
//! This crate provides the user-authored description of a project that the
//! generator pipeline translates into native project objects.
//!
//! # Architecture
//!
//! ```text
//! xcforge.toml → xcforge-manifest (parsing) → xcforge-model (Project) → generators
//! ```
//!
//! The model is built once by the caller and is read-only while a pipeline
//! runs. Every object carries an [`ObjectId`] so that the translation context
//! can key native objects by identity rather than by value.

mod configuration;
mod error;
mod id;
mod project;
mod scheme;
mod settings;
mod target;
mod types;

pub use configuration::BuildConfiguration;
pub use error::{ModelError, Result};
pub use id::ObjectId;
pub use project::Project;
pub use scheme::{Scheme, SchemeAction};
pub use settings::{SettingValue, Settings};
pub use target::Target;
pub use types::{Language, Platform, TargetType, TestTargetPolicy};

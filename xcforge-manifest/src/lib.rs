//! `xcforge.toml` parsing, validation and lowering.
//!
//! ```ignore
//! let manifest = Manifest::from_file("xcforge.toml")?;
//! let project = manifest.to_project()?;
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::*;

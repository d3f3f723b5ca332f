//! Pipeline plugin trait for extensibility.

use std::fmt;

use crate::{Result, TranslationContext};

/// Named points in a run that plugins can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Fired once by the scheme generator before any native scheme exists.
    BeforeAddingUserSchemes,
}

impl Hook {
    pub fn name(&self) -> &'static str {
        match self {
            Hook::BeforeAddingUserSchemes => "before_adding_user_schemes",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A plugin that can hook into the pipeline.
///
/// Plugins receive callbacks around each generator's traversal and for every
/// [`Hook`] fired during the run.
///
/// # Example
///
/// ```ignore
/// struct TimingPlugin {
///     start_times: Mutex<HashMap<String, Instant>>,
/// }
///
/// impl Plugin for TimingPlugin {
///     fn name(&self) -> &'static str { "timing" }
///
///     fn on_before_generator(&self, generator: &str, _ctx: &mut TranslationContext<'_>) -> Result<()> {
///         self.start_times.lock().unwrap().insert(generator.to_string(), Instant::now());
///         Ok(())
///     }
///
///     fn on_after_generator(&self, generator: &str, _ctx: &mut TranslationContext<'_>) -> Result<()> {
///         if let Some(start) = self.start_times.lock().unwrap().get(generator) {
///             println!("{} took {:?}", generator, start.elapsed());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a generator's traversal starts.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_generator(&self, generator: &str, ctx: &mut TranslationContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called after a generator's traversal, including its `leave_project`,
    /// completes successfully. Output staged by the generator is not yet
    /// persisted, so an error here discards it.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_generator(&self, generator: &str, ctx: &mut TranslationContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called when a hook fires.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_hook(&self, hook: Hook, ctx: &mut TranslationContext<'_>) -> Result<()> {
        Ok(())
    }
}

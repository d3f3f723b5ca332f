use crate::{ObjectId, Settings};

/// A named settings bundle such as `Debug` or `Release`.
#[derive(Debug, PartialEq)]
pub struct BuildConfiguration {
    pub(crate) id: ObjectId,
    /// Configuration name.
    pub name: String,
    /// Settings declared for this configuration.
    pub settings: Settings,
}

impl Clone for BuildConfiguration {
    fn clone(&self) -> Self {
        Self {
            id: ObjectId::next(),
            name: self.name.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl BuildConfiguration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            settings: Settings::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// A copy of this configuration, with the same identity, carrying
    /// `base` deep-merged under its own settings.
    pub(crate) fn flattened_over(&self, base: &Settings) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            settings: Settings::merged(base, &self.settings),
        }
    }
}

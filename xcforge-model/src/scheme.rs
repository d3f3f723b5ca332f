use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ObjectId;

/// One of the five scheme actions that reference a build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeAction {
    Test,
    Launch,
    Profile,
    Analyze,
    Archive,
}

impl SchemeAction {
    /// All actions, in the order they are configured.
    pub const ALL: [SchemeAction; 5] = [
        SchemeAction::Test,
        SchemeAction::Launch,
        SchemeAction::Profile,
        SchemeAction::Analyze,
        SchemeAction::Archive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemeAction::Test => "test",
            SchemeAction::Launch => "launch",
            SchemeAction::Profile => "profile",
            SchemeAction::Analyze => "analyze",
            SchemeAction::Archive => "archive",
        }
    }
}

impl fmt::Display for SchemeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named bundle of build, test, launch, profile, analyze and archive
/// actions scoped to a target.
#[derive(Debug, PartialEq)]
pub struct Scheme {
    pub(crate) id: ObjectId,
    /// Scheme name.
    pub name: String,
    pub test_configuration: String,
    pub launch_configuration: String,
    pub profile_configuration: String,
    pub analyze_configuration: String,
    pub archive_configuration: String,
}

impl Clone for Scheme {
    fn clone(&self) -> Self {
        Self {
            id: ObjectId::next(),
            name: self.name.clone(),
            test_configuration: self.test_configuration.clone(),
            launch_configuration: self.launch_configuration.clone(),
            profile_configuration: self.profile_configuration.clone(),
            analyze_configuration: self.analyze_configuration.clone(),
            archive_configuration: self.archive_configuration.clone(),
        }
    }
}

impl Scheme {
    /// Create a scheme with the conventional defaults: `Debug` for test,
    /// launch and analyze, `Release` for profile and archive.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            test_configuration: "Debug".to_string(),
            launch_configuration: "Debug".to_string(),
            profile_configuration: "Release".to_string(),
            analyze_configuration: "Debug".to_string(),
            archive_configuration: "Release".to_string(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The configuration name used by `action`.
    pub fn configuration_for(&self, action: SchemeAction) -> &str {
        match action {
            SchemeAction::Test => &self.test_configuration,
            SchemeAction::Launch => &self.launch_configuration,
            SchemeAction::Profile => &self.profile_configuration,
            SchemeAction::Analyze => &self.analyze_configuration,
            SchemeAction::Archive => &self.archive_configuration,
        }
    }

    /// Set the configuration name used by `action`.
    pub fn set_configuration(&mut self, action: SchemeAction, name: impl Into<String>) {
        let slot = match action {
            SchemeAction::Test => &mut self.test_configuration,
            SchemeAction::Launch => &mut self.launch_configuration,
            SchemeAction::Profile => &mut self.profile_configuration,
            SchemeAction::Analyze => &mut self.analyze_configuration,
            SchemeAction::Archive => &mut self.archive_configuration,
        };
        *slot = name.into();
    }

    /// Set every action to the same configuration.
    pub fn use_configuration(&mut self, name: &str) {
        for action in SchemeAction::ALL {
            self.set_configuration(action, name);
        }
    }

    /// Iterate `(action, configuration)` pairs in action order.
    pub fn configurations(&self) -> impl Iterator<Item = (SchemeAction, &str)> {
        SchemeAction::ALL
            .into_iter()
            .map(move |action| (action, self.configuration_for(action)))
    }
}

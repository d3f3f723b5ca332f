//! Target classification types.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The kind of product a target builds.
///
/// Unknown tags are kept as [`TargetType::Other`]; whether a backend can
/// represent them is decided at translation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetType {
    Application,
    UnitTestBundle,
    Framework,
    StaticLibrary,
    Other(String),
}

impl TargetType {
    pub fn as_str(&self) -> &str {
        match self {
            TargetType::Application => "application",
            TargetType::UnitTestBundle => "unit-test-bundle",
            TargetType::Framework => "framework",
            TargetType::StaticLibrary => "static-library",
            TargetType::Other(tag) => tag,
        }
    }
}

impl FromStr for TargetType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "application" => TargetType::Application,
            "unit-test-bundle" => TargetType::UnitTestBundle,
            "framework" => TargetType::Framework,
            "static-library" => TargetType::StaticLibrary,
            other => TargetType::Other(other.to_string()),
        })
    }
}

impl From<String> for TargetType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(ty) => ty,
            Err(never) => match never {},
        }
    }
}

impl From<TargetType> for String {
    fn from(value: TargetType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The platform a target is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Macos,
    Tvos,
    Watchos,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Macos => "macos",
            Platform::Tvos => "tvos",
            Platform::Watchos => "watchos",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The primary source language of a target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Objc,
    Swift,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Objc => write!(f, "objc"),
            Language::Swift => write!(f, "swift"),
        }
    }
}

/// How a host target's unit-test bundle is chosen when several bundles name
/// the same host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestTargetPolicy {
    /// More than one candidate is an error.
    #[default]
    Unique,
    /// Take the first candidate in declaration order.
    FirstMatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_type_parses_known_tags() {
        assert_eq!(
            "unit-test-bundle".parse::<TargetType>(),
            Ok(TargetType::UnitTestBundle)
        );
        assert_eq!(
            "watch-extension".parse::<TargetType>(),
            Ok(TargetType::Other("watch-extension".to_string()))
        );
    }

    #[test]
    fn test_target_type_display_roundtrips_tag() {
        assert_eq!(TargetType::Other("kext".into()).to_string(), "kext");
        assert_eq!(TargetType::StaticLibrary.to_string(), "static-library");
    }
}

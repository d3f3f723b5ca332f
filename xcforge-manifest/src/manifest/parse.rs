//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, Result};

/// Filename used in diagnostics when none is given.
pub const DEFAULT_FILENAME: &str = "xcforge.toml";

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, DEFAULT_FILENAME)
    }
}

impl Manifest {
    /// Parse an xcforge.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse an xcforge.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse and validate a manifest.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = ParseContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| ctx.source().parse_error(e))?;
    ctx.validate(&manifest)?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(content: &str) -> Box<Error> {
        content.parse::<Manifest>().unwrap_err()
    }

    #[test]
    fn test_parse_minimal() {
        let manifest: Manifest = r#"
            [project]
            name = "Demo"
        "#
        .parse()
        .unwrap();

        assert_eq!(manifest.project.name, "Demo");
        assert!(manifest.targets.is_empty());
        assert_eq!(manifest.configuration_names(), ["Debug", "Release"]);
    }

    #[test]
    fn test_parse_generator_policy() {
        let manifest: Manifest = r#"
            [project]
            name = "Demo"

            [generator]
            test_target_policy = "first-match"
        "#
        .parse()
        .unwrap();

        assert_eq!(
            manifest.generator.test_target_policy,
            xcforge_model::TestTargetPolicy::FirstMatch
        );
    }

    #[test]
    fn test_parse_float_setting() {
        let manifest: Manifest = r#"
            [project]
            name = "Demo"

            [project.settings]
            SWIFT_VERSION = 5.0
        "#
        .parse()
        .unwrap();

        assert_eq!(
            manifest.project.settings.get("SWIFT_VERSION"),
            Some(&xcforge_model::SettingValue::Float(5.0))
        );
    }

    #[test]
    fn test_syntax_error_has_span() {
        let err = parse_err("[project\nname = \"Demo\"");

        assert!(matches!(*err, Error::Parse { span: Some(_), .. }));
    }

    #[test]
    fn test_missing_project_table() {
        let err = parse_err("[[targets]]\nname = \"App\"\ntype = \"application\"\n");

        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_duplicate_target_points_at_both() {
        let content = r#"
            [project]
            name = "Demo"

            [[targets]]
            name = "App"
            type = "application"
            platform = "ios"
            deployment_target = "15.0"

            [[targets]]
            name = "App"
            type = "framework"
            platform = "ios"
            deployment_target = "15.0"
        "#;
        let err = parse_err(content);

        match *err {
            Error::DuplicateTarget {
                name,
                first_span: Some(first),
                second_span: Some(second),
                ..
            } => {
                assert_eq!(name, "App");
                assert!(first.offset() < second.offset());
                assert_eq!(&content[second.offset()..second.offset() + second.len()], "App");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_host() {
        let err = parse_err(
            r#"
            [project]
            name = "Demo"

            [[targets]]
            name = "AppTests"
            type = "unit-test-bundle"
            host = "Missing"
        "#,
        );

        assert!(matches!(
            *err,
            Error::UnknownHost { ref target, ref host, span: Some(_), .. }
                if target == "AppTests" && host == "Missing"
        ));
    }

    #[test]
    fn test_unit_test_bundle_without_host() {
        let err = parse_err(
            r#"
            [project]
            name = "Demo"

            [[targets]]
            name = "AppTests"
            type = "unit-test-bundle"
            platform = "ios"
            deployment_target = "15.0"
        "#,
        );

        assert_eq!(err.to_string(), "unit-test bundle 'AppTests' needs a host");
    }

    #[test]
    fn test_host_on_application_rejected() {
        let err = parse_err(
            r#"
            [project]
            name = "Demo"

            [[targets]]
            name = "App"
            type = "application"
            platform = "ios"
            deployment_target = "15.0"
            host = "Other"
        "#,
        );

        assert_eq!(
            err.to_string(),
            "only unit-test bundles can have a host, but 'App' has type application"
        );
    }

    #[test]
    fn test_missing_platform() {
        let err = parse_err(
            r#"
            [project]
            name = "Demo"

            [[targets]]
            name = "App"
            type = "application"
            deployment_target = "15.0"
        "#,
        );

        assert_eq!(err.to_string(), "target 'App' needs a platform");
    }

    #[test]
    fn test_unknown_default_configuration() {
        let err = parse_err(
            r#"
            [project]
            name = "Demo"
            default_configuration = "Staging"
        "#,
        );

        assert!(matches!(*err, Error::Validation { span: Some(_), .. }));
        assert_eq!(err.to_string(), "default configuration 'Staging' is not declared");
    }

    #[test]
    fn test_unknown_target_configuration() {
        let err = parse_err(
            r#"
            [project]
            name = "Demo"

            [[targets]]
            name = "App"
            type = "application"
            platform = "ios"
            deployment_target = "15.0"

            [targets.configurations.Staging]
        "#,
        );

        assert!(matches!(*err, Error::Validation { span: Some(_), .. }));
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();

        let err = Manifest::from_file(dir.path().join("xcforge.toml")).unwrap_err();

        assert!(matches!(*err, Error::Io { .. }));
    }
}

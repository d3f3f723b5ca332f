//! Cross-reference checks that serde cannot express.

use std::collections::HashMap;

use miette::SourceSpan;

use super::Manifest;
use crate::{Result, error::SourceContext};

/// Validation context carrying the manifest source for span lookups.
#[derive(Debug, Clone)]
pub struct ParseContext {
    source: SourceContext,
}

impl ParseContext {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: SourceContext::new(src, filename),
        }
    }

    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    /// Span of the `occurrence`-th `key = "value"` pair in the source.
    pub fn find_span(&self, key: &str, value: &str, occurrence: usize) -> Option<SourceSpan> {
        find_value_span(self.source.src(), key, value, occurrence)
    }

    /// Validate a parsed manifest.
    pub fn validate(&self, manifest: &Manifest) -> Result<()> {
        self.validate_project(manifest)?;
        self.validate_target_names(manifest)?;
        for target in &manifest.targets {
            self.validate_host(manifest, target)?;
            self.validate_target(manifest, target)?;
        }
        Ok(())
    }

    fn validate_project(&self, manifest: &Manifest) -> Result<()> {
        if manifest.project.name.trim().is_empty() {
            return Err(self
                .source
                .validation_error("project name must not be empty", None));
        }

        match &manifest.project.default_configuration {
            Some(default) if !manifest.has_configuration(default) => {
                Err(self.source.validation_error(
                    format!("default configuration '{}' is not declared", default),
                    self.find_span("default_configuration", default, 0),
                ))
            }
            _ => Ok(()),
        }
    }

    fn validate_target_names(&self, manifest: &Manifest) -> Result<()> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for target in &manifest.targets {
            let count = seen.entry(target.name.as_str()).or_default();
            if *count > 0 {
                return Err(self.source.duplicate_target_error(
                    &target.name,
                    self.find_span("name", &target.name, 0),
                    self.find_span("name", &target.name, *count),
                ));
            }
            *count += 1;
        }
        Ok(())
    }

    fn validate_host(&self, manifest: &Manifest, target: &super::TargetConfig) -> Result<()> {
        match (&target.host, target.is_unit_test_bundle()) {
            (None, true) => Err(self.source.validation_error(
                format!("unit-test bundle '{}' needs a host", target.name),
                self.find_span("name", &target.name, 0),
            )),
            (Some(host), false) => Err(self.source.validation_error(
                format!(
                    "only unit-test bundles can have a host, but '{}' has type {}",
                    target.name, target.target_type
                ),
                self.find_span("host", host, 0),
            )),
            (Some(host), true) => match manifest.target(host) {
                None => Err(self.source.unknown_host_error(
                    &target.name,
                    host,
                    self.find_span("host", host, 0),
                )),
                Some(host_target) if host_target.is_unit_test_bundle() => {
                    Err(self.source.validation_error(
                        format!(
                            "'{}' cannot host '{}' because it is itself a unit-test bundle",
                            host, target.name
                        ),
                        self.find_span("host", host, 0),
                    ))
                }
                Some(_) => Ok(()),
            },
            (None, false) => Ok(()),
        }
    }

    fn validate_target(&self, manifest: &Manifest, target: &super::TargetConfig) -> Result<()> {
        if target.host.is_none() {
            if target.platform.is_none() {
                return Err(self.source.validation_error(
                    format!("target '{}' needs a platform", target.name),
                    self.find_span("name", &target.name, 0),
                ));
            }
            if target.deployment_target.is_none() {
                return Err(self.source.validation_error(
                    format!("target '{}' needs a deployment_target", target.name),
                    self.find_span("name", &target.name, 0),
                ));
            }
        }

        for configuration in target.configurations.keys() {
            if !manifest.has_configuration(configuration) {
                return Err(self.source.validation_error(
                    format!(
                        "target '{}' overrides configuration '{}', which the project does not declare",
                        target.name, configuration
                    ),
                    find_table_span(self.source.src(), configuration),
                ));
            }
        }

        Ok(())
    }
}

/// Find the span of `value` in the `occurrence`-th `key = "value"` pair.
pub(crate) fn find_value_span(
    src: &str,
    key: &str,
    value: &str,
    occurrence: usize,
) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{key} = {quote}{value}{quote}");
        if let Some((pos, _)) = src.match_indices(&pattern).nth(occurrence) {
            let start = pos + key.len() + 4;
            return Some(SourceSpan::from((start, value.len())));
        }
    }
    None
}

/// Find the span of a configuration name in a `[targets.configurations.<name>]` header.
pub(crate) fn find_table_span(src: &str, name: &str) -> Option<SourceSpan> {
    let pattern = format!("configurations.{name}]");
    src.find(&pattern)
        .map(|pos| SourceSpan::from((pos + "configurations.".len(), name.len())))
}

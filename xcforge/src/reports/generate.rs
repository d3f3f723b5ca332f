//! Generate command report.

use std::path::PathBuf;

use xcforge_generator::{RunSummary, backend::SavedSchemeList};

use super::output::{Output, Report};

/// Report data from a generate run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Where the scheme list was written.
    pub output: PathBuf,
    /// Generators in execution order.
    pub order: Vec<&'static str>,
    /// Number of translated model objects.
    pub translated: usize,
    /// Saved scheme names.
    pub schemes: Vec<String>,
    /// Targets without an automatic scheme.
    pub suppressed: Vec<String>,
}

impl GenerateReport {
    pub fn new(output: PathBuf, summary: RunSummary, saved: &SavedSchemeList) -> Self {
        Self {
            output,
            order: summary.order,
            translated: summary.translated,
            schemes: saved.schemes.iter().map(|s| s.name.clone()).collect(),
            suppressed: saved.suppressed.clone(),
        }
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        out.newline();
        out.preformatted(&format!("  Wrote {}", self.output.display()));
        out.newline();

        out.section("Generators");
        for (i, name) in self.order.iter().enumerate() {
            out.numbered_item(i + 1, name);
        }
        out.newline();

        out.section("Schemes");
        if self.schemes.is_empty() {
            out.preformatted("  (none)");
        }
        for scheme in &self.schemes {
            out.list_item(scheme);
        }
        out.newline();

        out.key_value("Translated", &format!("{} objects", self.translated));
        let suppressed = if self.suppressed.is_empty() {
            "(none)".to_string()
        } else {
            self.suppressed.join(", ")
        };
        out.key_value("Suppressed", &suppressed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::StringOutput;

    #[test]
    fn test_render_without_schemes() {
        let report = GenerateReport {
            output: PathBuf::from("out/xcschemes.json"),
            order: vec!["project-structure", "scheme"],
            translated: 4,
            schemes: Vec::new(),
            suppressed: vec!["App".into()],
        };
        let mut out = StringOutput::default();

        report.render(&mut out);

        assert_eq!(
            out.0,
            "\n  Wrote out/xcschemes.json\n\n[Generators]\n1. project-structure\n2. scheme\n\n\
             [Schemes]\n  (none)\n\nTranslated: 4 objects\nSuppressed: App\n"
        );
    }
}

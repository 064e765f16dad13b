//! Reports describing what a walk wrote.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::validation::ValidationIssue;

/// Summary of a [`super::build_contexts`] run.
#[derive(Clone, Debug, Serialize)]
pub struct BuildReport {
    /// Source root that was walked.
    pub source: PathBuf,
    /// Destination directory.
    pub destination: PathBuf,
    /// Whether strict validation was enabled.
    pub strict: bool,
    /// Concepts in the order they were processed.
    pub concepts: Vec<ConceptSummary>,
}

/// What was produced for one concept directory.
#[derive(Clone, Debug, Serialize)]
pub struct ConceptSummary {
    /// Concept directory name.
    pub name: String,
    /// Object count read from the relation.
    pub object_count: usize,
    /// Attribute count read from the relation.
    pub attribute_count: usize,
    /// One entry per written context.
    pub outputs: Vec<ContextOutput>,
}

/// A single written `.cxt` file.
#[derive(Clone, Debug, Serialize)]
pub struct ContextOutput {
    /// Language code.
    pub language: String,
    /// Output path.
    pub path: PathBuf,
    /// Validation issues found (and tolerated) for this context.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,
}

impl BuildReport {
    /// Creates an empty report.
    pub fn new(source: &Path, destination: &Path, strict: bool) -> Self {
        Self {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            strict,
            concepts: Vec::new(),
        }
    }

    /// Records a processed concept.
    pub fn add(&mut self, concept: ConceptSummary) {
        self.concepts.push(concept);
    }

    /// Total number of contexts written.
    pub fn context_count(&self) -> usize {
        self.concepts.iter().map(|c| c.outputs.len()).sum()
    }

    /// Total number of tolerated validation issues.
    pub fn issue_count(&self) -> usize {
        self.concepts
            .iter()
            .flat_map(|c| &c.outputs)
            .map(|o| o.issues.len())
            .sum()
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for concept in &self.concepts {
            let codes: Vec<&str> = concept.outputs.iter().map(|o| o.language.as_str()).collect();
            writeln!(
                f,
                "  {}: {} objects, {} attributes, languages [{}]",
                concept.name,
                concept.object_count,
                concept.attribute_count,
                codes.join(", ")
            )?;
        }

        writeln!(
            f,
            "  {} context(s) from {} concept(s)",
            self.context_count(),
            self.concepts.len()
        )?;

        let issues = self.issue_count();
        if issues > 0 {
            writeln!(f, "  {} validation issue(s) tolerated", issues)?;
        }

        Ok(())
    }
}

/// Summary of a [`super::copy_contexts`] run.
#[derive(Clone, Debug, Serialize)]
pub struct CopyReport {
    /// Source root that was walked.
    pub source: PathBuf,
    /// Destination directory.
    pub destination: PathBuf,
    /// Files copied, in walk order.
    pub copied: Vec<CopiedFile>,
}

/// A single copied file.
#[derive(Clone, Debug, Serialize)]
pub struct CopiedFile {
    pub from: PathBuf,
    pub to: PathBuf,
    pub bytes: u64,
}

impl CopyReport {
    /// Creates an empty report.
    pub fn new(source: &Path, destination: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            copied: Vec::new(),
        }
    }

    /// Records a copied file.
    pub fn add(&mut self, file: CopiedFile) {
        self.copied.push(file);
    }
}

impl fmt::Display for CopyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.copied {
            writeln!(f, "  {} ({} bytes)", file.from.display(), file.bytes)?;
        }
        writeln!(f, "  {} file(s) copied", self.copied.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> BuildReport {
        let mut report = BuildReport::new(Path::new("data"), Path::new("contexts"), false);
        report.add(ConceptSummary {
            name: "fruit".into(),
            object_count: 2,
            attribute_count: 3,
            outputs: vec![
                ContextOutput {
                    language: "de".into(),
                    path: PathBuf::from("contexts/fruit_de.cxt"),
                    issues: vec![],
                },
                ContextOutput {
                    language: "en".into(),
                    path: PathBuf::from("contexts/fruit_en.cxt"),
                    issues: vec![],
                },
            ],
        });
        report
    }

    #[test]
    fn build_report_counts_contexts() {
        let report = sample_report();
        assert_eq!(report.context_count(), 2);
        assert_eq!(report.issue_count(), 0);
    }

    #[test]
    fn build_report_display_lists_languages() {
        let text = sample_report().to_string();
        assert!(text.contains("fruit: 2 objects, 3 attributes, languages [de, en]"));
        assert!(text.contains("2 context(s) from 1 concept(s)"));
    }

    #[test]
    fn build_report_serializes_without_empty_issues() {
        let json = serde_json::to_string(&sample_report()).expect("serialize report");
        assert!(json.contains("\"name\":\"fruit\""));
        assert!(!json.contains("\"issues\""));
    }
}

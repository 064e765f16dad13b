//! Structural validation of formal contexts.
//!
//! Composition never checks its inputs. This module reports the ways a
//! relation and a label block can disagree:
//! - Relation shape (ragged rows, missing final terminator, empty relation)
//! - Labels (count vs. attribute count, blank labels)
//!
//! The context walker logs these issues by default and refuses to write the
//! document in strict mode.

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use crate::context::{Language, Relation};

/// Validates a relation together with one language and returns all issues.
pub fn validate_context(relation: &Relation, language: &Language) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_relation(relation, &mut report);
    validate_labels(relation, language, &mut report);

    report
}

/// Validates the shape of the relation on its own.
pub fn validate_relation(relation: &Relation, report: &mut ValidationReport) {
    if relation.is_empty() {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyRelation,
            format!(
                "relation has {} object(s) and {} attribute(s)",
                relation.object_count, relation.attribute_count
            ),
            IssueContext::Relation,
        ));
    }

    if !relation.text.is_empty() && !relation.text.ends_with('\n') {
        report.add(ValidationIssue::error(
            IssueCode::UnterminatedRelation,
            "last row has no line terminator and is not counted as an object",
            IssueContext::Relation,
        ));
    }

    for (index, row) in relation.rows().enumerate() {
        let width = row.chars().count();
        if width != relation.attribute_count {
            report.add(ValidationIssue::error(
                IssueCode::RaggedRow,
                format!(
                    "row has {} cell(s), expected {}",
                    width, relation.attribute_count
                ),
                IssueContext::Row { index },
            ));
        }
    }
}

/// Validates a label block against the relation it will be paired with.
pub fn validate_labels(relation: &Relation, language: &Language, report: &mut ValidationReport) {
    let code = language.code.as_str();
    let label_count = language.label_count();

    if label_count != relation.attribute_count {
        report.add(ValidationIssue::error(
            IssueCode::LabelCountMismatch,
            format!(
                "{} label(s) for {} attribute(s)",
                label_count, relation.attribute_count
            ),
            IssueContext::Language {
                code: code.to_string(),
            },
        ));
    }

    for (index, label) in language.labels().enumerate() {
        if label.trim().is_empty() {
            report.add(ValidationIssue::warning(
                IssueCode::EmptyLabel,
                "blank label",
                IssueContext::Label {
                    code: code.to_string(),
                    index,
                },
            ));
        }
    }
}

//! Burmeister (`.cxt`) context composition.
//!
//! The layout is fixed:
//!
//! ```text
//! B
//!
//! <object count>
//! <attribute count>
//!
//! <labels, one per line>
//! <relation rows, one per line>
//! ```
//!
//! Composition is lenient: label and row counts are not checked against the
//! header. See [`crate::validation`] for the optional checks.

use super::{Language, Relation};

/// Format marker on the first line of every Burmeister file.
pub const BURMEISTER_MARKER: &str = "B";

/// Composes a Burmeister document from its parts.
///
/// `language_text` is followed by exactly one `\n`; `relation_text` is
/// appended verbatim, so its own trailing terminator ends the document.
pub fn compose(
    relation_text: &str,
    object_count: usize,
    attribute_count: usize,
    language_text: &str,
) -> String {
    format!(
        "{BURMEISTER_MARKER}\n\n{object_count}\n{attribute_count}\n\n{language_text}\n{relation_text}"
    )
}

/// Composes the Burmeister document for one relation in one language.
pub fn compose_context(relation: &Relation, language: &Language) -> String {
    compose(
        &relation.text,
        relation.object_count,
        relation.attribute_count,
        &language.text,
    )
}

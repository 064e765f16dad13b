//! Context model for cxtprep.
//!
//! A formal context is assembled from two kinds of source files living in a
//! concept directory:
//!
//! - `data.context`: the object x attribute relation, one row per object and
//!   one character per attribute.
//! - `languages/<code>.txt`: one attribute label per line, in a given
//!   language.
//!
//! The [`relation`] and [`language`] modules read those files, and
//! [`burmeister`] renders one relation plus one language into the Burmeister
//! `.cxt` text layout.
//!
//! # Example
//!
//! ```
//! use cxtprep::context::{compose_context, Language, Relation};
//!
//! let relation = Relation::from_text("101\n011\n");
//! let language = Language::from_raw("en", "red\nsweet\ncrunchy\n");
//!
//! assert_eq!(
//!     compose_context(&relation, &language),
//!     "B\n\n2\n3\n\nred\nsweet\ncrunchy\n101\n011\n"
//! );
//! ```

pub mod burmeister;
pub mod language;
pub mod relation;

use std::borrow::Cow;
use std::path::Path;

pub use burmeister::{compose, compose_context};
pub use language::{load_languages, normalize_labels, Language, LanguageFilter};
pub use relation::{read_relation, Relation};

/// File name of the relation inside a concept directory.
pub const RELATION_FILE: &str = "data.context";

/// Directory holding the label files inside a concept directory.
pub const LANGUAGES_DIR: &str = "languages";

/// Extension of label files.
pub const LANGUAGE_EXTENSION: &str = "txt";

/// Extension of Burmeister context files.
pub const CONTEXT_EXTENSION: &str = "cxt";

/// Exact, case-sensitive extension check (`en.TXT` is not a label file).
pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(extension)
}

/// Converts `\r\n` and lone `\r` terminators to `\n`.
pub(crate) fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Fuzz-only entrypoint: counts, normalizes, validates and composes.
#[cfg(feature = "fuzzing")]
pub fn fuzz_assemble(relation: &str, labels: &str) -> String {
    let relation = Relation::from_text(relation);
    let language = Language::from_raw("fuzz", labels);
    let _ = crate::validation::validate_context(&relation, &language);
    compose_context(&relation, &language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_newlines_handles_crlf_and_cr() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn normalize_newlines_borrows_clean_input() {
        assert!(matches!(normalize_newlines("a\nb\n"), Cow::Borrowed(_)));
    }
}

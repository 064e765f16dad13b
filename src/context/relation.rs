//! Reader for raw relation files (`data.context`).
//!
//! The relation is kept as text: it is copied verbatim into every composed
//! context, so only the two counts are derived from it.

use std::fs;
use std::path::Path;

use super::normalize_newlines;
use crate::error::CxtError;

/// An object x attribute relation read from a `data.context` file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    /// The relation body, terminators normalized to `\n`, trailing
    /// terminator included.
    pub text: String,

    /// Number of rows, not counting the empty segment after the final
    /// terminator.
    pub object_count: usize,

    /// Character length of the first row.
    pub attribute_count: usize,
}

impl Relation {
    /// Builds a relation from its text and derives both counts.
    ///
    /// Text that does not end with a terminator counts one object fewer than
    /// it has rows, matching the on-disk convention that every row is
    /// terminated.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text: String = text.into();
        let text = normalize_newlines(&text).into_owned();

        let mut segments = text.split('\n');
        let attribute_count = segments.next().map(|row| row.chars().count()).unwrap_or(0);
        // `split` always yields at least one segment; the last one is the
        // trailing artifact and is not an object.
        let object_count = segments.count();

        Self {
            text,
            object_count,
            attribute_count,
        }
    }

    /// Iterates over the object rows (the counted segments).
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n').take(self.object_count)
    }

    /// Returns true if the relation has no objects or no attributes.
    pub fn is_empty(&self) -> bool {
        self.object_count == 0 || self.attribute_count == 0
    }
}

/// Reads a relation file.
///
/// # Errors
/// Returns [`CxtError::RelationRead`] if the file is missing or is not valid
/// UTF-8 text. An empty file is not an error; it yields zero objects and zero
/// attributes.
pub fn read_relation(path: &Path) -> Result<Relation, CxtError> {
    let text = fs::read_to_string(path).map_err(|source| CxtError::RelationRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Relation::from_text(text))
}

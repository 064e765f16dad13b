//! Loader for attribute label files (`languages/<code>.txt`).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use super::{has_extension, normalize_newlines, LANGUAGE_EXTENSION};
use crate::error::CxtError;

/// Attribute labels for one relation, in one language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Language {
    /// Language code, taken from the label file stem (`en` for `en.txt`).
    pub code: String,

    /// Normalized label block: one label per line, no trailing terminator.
    pub text: String,
}

impl Language {
    /// Creates a language from already-normalized label text.
    pub fn new(code: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
        }
    }

    /// Creates a language from the raw contents of a label file.
    pub fn from_raw(code: impl Into<String>, raw: &str) -> Self {
        Self::new(code, normalize_labels(raw))
    }

    /// Iterates over the individual labels.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        // An empty block has no labels rather than one empty label.
        let text = (!self.text.is_empty()).then_some(self.text.as_str());
        text.into_iter().flat_map(|text| text.split('\n'))
    }

    /// Number of labels in the block.
    pub fn label_count(&self) -> usize {
        self.labels().count()
    }
}

/// Which language codes to load from a concept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LanguageFilter {
    /// Every label file in the directory.
    #[default]
    All,
    /// Only the listed codes.
    Only(BTreeSet<String>),
}

impl LanguageFilter {
    /// Builds a filter from a list of codes. No codes means [`LanguageFilter::All`].
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: BTreeSet<String> = codes
            .into_iter()
            .map(Into::into)
            .filter(|code: &String| !code.is_empty())
            .collect();

        if codes.is_empty() {
            Self::All
        } else {
            Self::Only(codes)
        }
    }

    /// Returns true if `code` passes the filter.
    pub fn matches(&self, code: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(codes) => codes.contains(code),
        }
    }
}

/// Normalizes the raw contents of a label file into a label block.
///
/// Each `\n\n` pair is collapsed to `\n` in one non-overlapping pass (so a
/// run of three terminators still leaves one blank label), then the final
/// `\n`-separated segment is dropped. For a file ending in a terminator that
/// segment is empty. For a file without one, the last label is lost.
pub fn normalize_labels(raw: &str) -> String {
    let text = normalize_newlines(raw);
    let collapsed = text.replace("\n\n", "\n");

    let mut lines: Vec<&str> = collapsed.split('\n').collect();
    if let Some(dropped) = lines.pop() {
        if !dropped.is_empty() {
            tracing::debug!(
                label = dropped,
                "label file has no trailing terminator; last label dropped"
            );
        }
    }

    lines.join("\n")
}

/// Loads every label file in `dir` that passes `filter`.
///
/// Only regular files with the `.txt` extension are considered. The result
/// is sorted by language code.
///
/// # Errors
/// Returns [`CxtError::LanguageDirRead`] if `dir` cannot be listed and
/// [`CxtError::LanguageRead`] if a label file cannot be read as text.
pub fn load_languages(dir: &Path, filter: &LanguageFilter) -> Result<Vec<Language>, CxtError> {
    let mut languages = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| CxtError::LanguageDirRead {
            path: dir.to_path_buf(),
            source: source.into(),
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || !has_extension(path, LANGUAGE_EXTENSION) {
            continue;
        }

        let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) else {
            tracing::debug!(path = %path.display(), "skipping label file with non UTF-8 name");
            continue;
        };

        if !filter.matches(code) {
            continue;
        }

        let raw = fs::read_to_string(path).map_err(|source| CxtError::LanguageRead {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(code, path = %path.display(), "loaded language");
        languages.push(Language::from_raw(code, &raw));
    }

    languages.sort_by(|a, b| a.code.cmp(&b.code));
    Ok(languages)
}

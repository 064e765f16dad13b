//! Concept directory walker.
//!
//! A source root holds one directory per concept:
//!
//! ```text
//! data/
//!   fruit/
//!     data.context
//!     languages/
//!       en.txt
//!       de.txt
//! ```
//!
//! [`build_contexts`] composes `<dest>/<concept>_<code>.cxt` for every
//! concept and language. [`copy_contexts`] is the pass-through variant that
//! copies pre-built `.cxt` files found directly inside each concept
//! directory.
//!
//! Concepts are visited in lexicographic order of their directory names.
//! Any failure aborts the walk; files written before the failure are kept.

pub mod report;

pub use report::{BuildReport, ConceptSummary, ContextOutput, CopiedFile, CopyReport};

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::context::{
    compose_context, has_extension, load_languages, read_relation, Language, LanguageFilter,
    Relation, CONTEXT_EXTENSION, LANGUAGES_DIR, RELATION_FILE,
};
use crate::error::CxtError;
use crate::validation::validate_context;

/// Default source root.
pub const DEFAULT_SOURCE_ROOT: &str = "data";

/// Default destination directory.
pub const DEFAULT_DESTINATION_DIR: &str = "contexts";

/// Options for [`build_contexts`].
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Directory containing one subdirectory per concept.
    pub source_root: PathBuf,

    /// Existing directory receiving the `.cxt` files.
    pub destination_dir: PathBuf,

    /// Which languages to compose.
    pub languages: LanguageFilter,

    /// Refuse to write contexts with validation issues.
    pub strict: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            destination_dir: PathBuf::from(DEFAULT_DESTINATION_DIR),
            languages: LanguageFilter::All,
            strict: false,
        }
    }
}

/// Composes and writes one Burmeister file per concept and language.
///
/// # Errors
/// Fails on the first missing or unreadable input, on any write failure,
/// and, in strict mode, on the first context with validation issues.
pub fn build_contexts(opts: &BuildOptions) -> Result<BuildReport, CxtError> {
    ensure_directories(&opts.source_root, &opts.destination_dir)?;

    let mut report = BuildReport::new(&opts.source_root, &opts.destination_dir, opts.strict);

    for concept_dir in concept_dirs(&opts.source_root)? {
        let summary = build_concept(&concept_dir, opts)?;
        report.add(summary);
    }

    tracing::info!(
        concepts = report.concepts.len(),
        contexts = report.context_count(),
        destination = %opts.destination_dir.display(),
        "built contexts"
    );

    Ok(report)
}

fn build_concept(concept_dir: &Path, opts: &BuildOptions) -> Result<ConceptSummary, CxtError> {
    let name = concept_name(concept_dir);
    let _span = tracing::info_span!("concept", name = %name).entered();

    let languages = load_languages(&concept_dir.join(LANGUAGES_DIR), &opts.languages)?;
    let relation = read_relation(&concept_dir.join(RELATION_FILE))?;

    tracing::debug!(
        objects = relation.object_count,
        attributes = relation.attribute_count,
        languages = languages.len(),
        "read concept"
    );

    let mut summary = ConceptSummary {
        name,
        object_count: relation.object_count,
        attribute_count: relation.attribute_count,
        outputs: Vec::with_capacity(languages.len()),
    };

    for language in &languages {
        let output = write_context(&summary.name, &relation, language, opts)?;
        summary.outputs.push(output);
    }

    Ok(summary)
}

fn write_context(
    concept: &str,
    relation: &Relation,
    language: &Language,
    opts: &BuildOptions,
) -> Result<ContextOutput, CxtError> {
    let validation = validate_context(relation, language);

    // Warnings are logged and reported but never block a write.
    if opts.strict && !validation.is_ok() {
        return Err(CxtError::ValidationFailed {
            concept: concept.to_string(),
            language: language.code.clone(),
            error_count: validation.error_count(),
            warning_count: validation.warning_count(),
            report: validation,
        });
    }

    for issue in &validation.issues {
        tracing::warn!(language = %language.code, "{}", issue);
    }

    let path = context_output_path(&opts.destination_dir, concept, &language.code);
    fs::write(&path, compose_context(relation, language)).map_err(|source| {
        CxtError::ContextWrite {
            path: path.clone(),
            source,
        }
    })?;

    tracing::debug!(path = %path.display(), "wrote context");

    Ok(ContextOutput {
        language: language.code.clone(),
        path,
        issues: validation.issues,
    })
}

/// Path of the composed context for `concept` in language `code`.
pub fn context_output_path(destination_dir: &Path, concept: &str, code: &str) -> PathBuf {
    destination_dir.join(format!("{concept}_{code}.{CONTEXT_EXTENSION}"))
}

/// Copies pre-built `.cxt` files from each concept directory into
/// `destination_dir`, byte for byte.
///
/// Only files directly inside a concept directory are considered. Existing
/// files in the destination are overwritten.
pub fn copy_contexts(source_root: &Path, destination_dir: &Path) -> Result<CopyReport, CxtError> {
    ensure_directories(source_root, destination_dir)?;

    let mut report = CopyReport::new(source_root, destination_dir);

    for concept_dir in concept_dirs(source_root)? {
        for entry in WalkDir::new(&concept_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| traverse_error(&concept_dir, source))?;
            let from = entry.path();
            if !entry.file_type().is_file() || !has_extension(from, CONTEXT_EXTENSION) {
                continue;
            }

            let to = destination_dir.join(entry.file_name());
            let bytes = fs::copy(from, &to).map_err(|source| CxtError::ContextCopy {
                from: from.to_path_buf(),
                to: to.clone(),
                source,
            })?;

            tracing::debug!(from = %from.display(), to = %to.display(), bytes, "copied context");
            report.add(CopiedFile {
                from: from.to_path_buf(),
                to,
                bytes,
            });
        }
    }

    tracing::info!(
        copied = report.copied.len(),
        destination = %destination_dir.display(),
        "copied contexts"
    );

    Ok(report)
}

/// Lists the immediate subdirectories of `root`, sorted by name.
pub fn concept_dirs(root: &Path) -> Result<Vec<PathBuf>, CxtError> {
    let mut dirs = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| traverse_error(root, source))?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    Ok(dirs)
}

fn ensure_directories(source_root: &Path, destination_dir: &Path) -> Result<(), CxtError> {
    if !source_root.is_dir() {
        return Err(CxtError::SourceNotFound {
            path: source_root.to_path_buf(),
        });
    }

    if !destination_dir.is_dir() {
        return Err(CxtError::DestinationNotFound {
            path: destination_dir.to_path_buf(),
        });
    }

    Ok(())
}

fn concept_name(concept_dir: &Path) -> String {
    concept_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn traverse_error(root: &Path, source: walkdir::Error) -> CxtError {
    CxtError::Traverse {
        path: root.to_path_buf(),
        message: source.to_string(),
    }
}

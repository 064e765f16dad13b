use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for cxtprep operations.
#[derive(Debug, Error)]
pub enum CxtError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Destination directory not found: {path} (it is not created automatically)")]
    DestinationNotFound { path: PathBuf },

    #[error("Failed to read relation file {path}: {source}")]
    RelationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read language directory {path}: {source}")]
    LanguageDirRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read language file {path}: {source}")]
    LanguageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write context file {path}: {source}")]
    ContextWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy context file {from} to {to}: {source}")]
    ContextCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed while traversing {path}: {message}")]
    Traverse { path: PathBuf, message: String },

    #[error(
        "Validation of {concept}_{language} failed with {error_count} error(s) and {warning_count} warning(s)"
    )]
    ValidationFailed {
        concept: String,
        language: String,
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Metadata directory not found: {path}")]
    MetadataDirNotFound { path: PathBuf },

    #[error("Failed to read metadata fragment {path}: {source}")]
    MetadataRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write merged metadata to {path}: {source}")]
    MetadataWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize merged metadata: {source}")]
    MetadataSerialize {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[source] serde_json::Error),

    #[error("Unsupported output format: {0}")]
    UnsupportedOutput(String),
}

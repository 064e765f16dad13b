//! Metadata merging.
//!
//! Concept directories may carry YAML fragments describing them. This module
//! merges every fragment under a root into one document. Top-level keys are
//! merged shallowly and a later fragment (in sorted walk order) replaces an
//! earlier key.
//!
//! Unlike the context walker, a malformed fragment does not abort the merge:
//! it is logged and skipped.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::{Mapping, Number, Value};
use walkdir::WalkDir;

use crate::error::CxtError;

/// Default directory searched for fragments.
pub const DEFAULT_METADATA_INPUT: &str = "data";

/// Default merged output file.
pub const DEFAULT_METADATA_OUTPUT: &str = "merged-contexts-metadata.yaml";

/// Default header comment of the merged file.
pub const DEFAULT_METADATA_COMMENT: &str =
    "This is the automatically merged metadata. Please do not modify it directly.";

/// Options for [`merge_metadata`].
#[derive(Clone, Debug)]
pub struct MergeOptions {
    /// Directory searched recursively for `.yaml` / `.yml` files.
    pub input_dir: PathBuf,

    /// File receiving the merged document. Overwritten if present.
    pub output_file: PathBuf,

    /// Written as a `# ...` line above the document when set.
    pub comment: Option<String>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_METADATA_INPUT),
            output_file: PathBuf::from(DEFAULT_METADATA_OUTPUT),
            comment: Some(DEFAULT_METADATA_COMMENT.to_string()),
        }
    }
}

/// Summary of a merge.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MergeReport {
    /// Fragments that contributed keys, in merge order.
    pub merged: Vec<PathBuf>,
    /// Fragments that were skipped.
    pub skipped: Vec<SkippedFragment>,
    /// Number of top-level keys in the result.
    pub key_count: usize,
}

/// A fragment that could not be merged.
#[derive(Clone, Debug, Serialize)]
pub struct SkippedFragment {
    pub path: PathBuf,
    pub reason: String,
}

/// Merges every YAML fragment under `opts.input_dir` into `opts.output_file`.
///
/// # Errors
/// Fails if the input directory does not exist, a file cannot be read, or the
/// output cannot be written. YAML problems in individual fragments are not
/// errors.
pub fn merge_metadata(opts: &MergeOptions) -> Result<MergeReport, CxtError> {
    if !opts.input_dir.is_dir() {
        return Err(CxtError::MetadataDirNotFound {
            path: opts.input_dir.clone(),
        });
    }

    let mut report = MergeReport::default();
    let mut merged = Mapping::new();

    for entry in WalkDir::new(&opts.input_dir)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| CxtError::Traverse {
            path: opts.input_dir.clone(),
            message: source.to_string(),
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || !has_yaml_suffix(path) {
            continue;
        }

        let text = fs::read_to_string(path).map_err(|source| CxtError::MetadataRead {
            path: path.to_path_buf(),
            source,
        })?;
        match parse_fragment(&text) {
            Ok(fragment) => {
                tracing::debug!(path = %path.display(), keys = fragment.len(), "merging fragment");
                for (key, value) in fragment {
                    merged.insert(key, value);
                }
                report.merged.push(path.to_path_buf());
            }
            Err(reason) => {
                tracing::warn!(path = %path.display(), "skipping metadata fragment: {}", reason);
                report.skipped.push(SkippedFragment {
                    path: path.to_path_buf(),
                    reason,
                });
            }
        }
    }

    report.key_count = merged.len();
    let document = render_metadata(merged, opts.comment.as_deref())?;

    fs::write(&opts.output_file, document).map_err(|source| CxtError::MetadataWrite {
        path: opts.output_file.clone(),
        source,
    })?;

    tracing::info!(
        merged = report.merged.len(),
        skipped = report.skipped.len(),
        keys = report.key_count,
        output = %opts.output_file.display(),
        "merged metadata"
    );

    Ok(report)
}

/// Parses one fragment; the error is a human-readable reason for skipping it.
fn parse_fragment(text: &str) -> Result<Mapping, String> {
    match serde_yaml::from_str::<Value>(text) {
        Ok(Value::Mapping(mapping)) => Ok(mapping),
        Ok(Value::Null) => Err("document is empty".to_string()),
        Ok(_) => Err("top level is not a mapping".to_string()),
        Err(err) => Err(err.to_string()),
    }
}

/// Fuzz-only entrypoint for fragment parsing and rendering.
#[cfg(feature = "fuzzing")]
pub fn fuzz_merge_fragment(text: &str) -> Result<String, CxtError> {
    match parse_fragment(text) {
        Ok(fragment) => render_metadata(fragment, None),
        Err(_) => Ok(String::new()),
    }
}

/// Renders the merged mapping with keys sorted at every level.
pub fn render_metadata(merged: Mapping, comment: Option<&str>) -> Result<String, CxtError> {
    let mut document = String::new();
    if let Some(comment) = comment {
        document.push_str(&format!("# {comment}\n"));
    }

    let body = serde_yaml::to_string(&sort_keys(Value::Mapping(merged)))
        .map_err(|source| CxtError::MetadataSerialize { source })?;
    document.push_str(&body);

    Ok(document)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => {
            let mut entries: Vec<(Value, Value)> = mapping.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
            Value::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Numbers sort by value and before every other key; the rest by text.
fn compare_keys(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::Number(_), _) => Ordering::Less,
        (_, Value::Number(_)) => Ordering::Greater,
        _ => key_text(a).cmp(&key_text(b)),
    }
}

fn compare_numbers(x: &Number, y: &Number) -> Ordering {
    match (x.as_i64(), y.as_i64()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
    }
}

fn key_text(key: &Value) -> Cow<'_, str> {
    match key {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(serde_yaml::to_string(other).unwrap_or_default()),
    }
}

/// True if any suffix of the file name is `.yaml` or `.yml` (`a.yaml.bak` counts).
fn has_yaml_suffix(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    if name.ends_with('.') {
        return false;
    }

    name.trim_start_matches('.')
        .split('.')
        .skip(1)
        .any(|suffix| suffix == "yaml" || suffix == "yml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(input: &Path, output: &Path, comment: Option<&str>) -> MergeOptions {
        MergeOptions {
            input_dir: input.to_path_buf(),
            output_file: output.to_path_buf(),
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn yaml_suffix_detection() {
        assert!(has_yaml_suffix(Path::new("a/meta.yaml")));
        assert!(has_yaml_suffix(Path::new("meta.yml")));
        assert!(has_yaml_suffix(Path::new("meta.yaml.bak")));
        assert!(!has_yaml_suffix(Path::new(".yaml")));
        assert!(!has_yaml_suffix(Path::new("meta.yaml.")));
        assert!(!has_yaml_suffix(Path::new("yaml.txt")));
        assert!(!has_yaml_suffix(Path::new("meta.YAML")));
    }

    #[test]
    fn parse_fragment_rejects_non_mappings() {
        assert!(parse_fragment("a: 1\n").is_ok());
        assert!(parse_fragment("").is_err());
        assert!(parse_fragment("- a\n- b\n").is_err());
        assert!(parse_fragment("a: [1, 2\n").is_err());
    }

    #[test]
    fn render_sorts_keys_and_writes_comment() {
        let merged: Mapping = serde_yaml::from_str("zeta: 1\nalpha:\n  d: x\n  b: y\n")
            .expect("parse mapping");
        let rendered = render_metadata(merged, Some("generated")).expect("render");
        assert_eq!(rendered, "# generated\nalpha:\n  b: y\n  d: x\nzeta: 1\n");
    }

    #[test]
    fn render_sorts_integer_keys_numerically() {
        let merged: Mapping = serde_yaml::from_str("10: ten\n9: nine\n100: hundred\nname: x\n")
            .expect("parse mapping");
        let rendered = render_metadata(merged, None).expect("render");
        assert_eq!(rendered, "9: nine\n10: ten\n100: hundred\nname: x\n");
    }

    #[test]
    fn merge_non_utf8_fragment_names_the_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let input = temp.path().join("data");
        fs::create_dir_all(&input).expect("create input");
        fs::write(input.join("bad.yaml"), b"key: \xff\xfe\n").expect("write bad bytes");

        let opts = options(&input, &temp.path().join("out.yaml"), None);
        match merge_metadata(&opts) {
            Err(CxtError::MetadataRead { path, .. }) => {
                assert_eq!(path, input.join("bad.yaml"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!temp.path().join("out.yaml").exists());
    }

    #[test]
    fn render_empty_mapping() {
        let rendered = render_metadata(Mapping::new(), None).expect("render");
        assert_eq!(rendered, "{}\n");
    }

    #[test]
    fn merge_later_fragment_wins() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let input = temp.path().join("data");
        fs::create_dir_all(input.join("a")).expect("create a");
        fs::create_dir_all(input.join("b")).expect("create b");
        fs::write(input.join("a/meta.yaml"), "fruit:\n  title: Fruit\nshared: a\n")
            .expect("write a");
        fs::write(input.join("b/meta.yml"), "animals:\n  title: Animals\nshared: b\n")
            .expect("write b");
        let output = temp.path().join("merged.yaml");

        let report = merge_metadata(&options(&input, &output, None)).expect("merge");

        assert_eq!(report.merged.len(), 2);
        assert_eq!(report.key_count, 3);
        let merged: Mapping =
            serde_yaml::from_str(&fs::read_to_string(&output).expect("read output"))
                .expect("parse output");
        assert_eq!(merged.get("shared"), Some(&Value::String("b".into())));
    }

    #[test]
    fn merge_skips_malformed_fragments() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let input = temp.path().join("data");
        fs::create_dir_all(&input).expect("create input");
        fs::write(input.join("bad.yaml"), "key: [unclosed\n").expect("write bad");
        fs::write(input.join("empty.yaml"), "").expect("write empty");
        fs::write(input.join("good.yaml"), "key: value\n").expect("write good");
        let output = temp.path().join("merged.yaml");

        let report =
            merge_metadata(&options(&input, &output, Some("merged"))).expect("merge");

        assert_eq!(report.merged.len(), 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(
            fs::read_to_string(&output).expect("read output"),
            "# merged\nkey: value\n"
        );
    }

    #[test]
    fn merge_missing_input_fails() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let opts = options(&temp.path().join("nope"), &temp.path().join("out.yaml"), None);
        assert!(matches!(
            merge_metadata(&opts),
            Err(CxtError::MetadataDirNotFound { .. })
        ));
    }
}

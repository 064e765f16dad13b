use cxtprep::context::{compose, normalize_labels, Language, Relation};
use cxtprep::validation::validate_context;
use proptest::prelude::*;

mod proptest_helpers;
use proptest_helpers::{arb_labels, arb_rows, relation_text};

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn relation_counts_match_rows_and_columns(rows in arb_rows(12, 16)) {
        let relation = Relation::from_text(relation_text(&rows));

        prop_assert_eq!(relation.object_count, rows.len());
        let expected_cols = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        prop_assert_eq!(relation.attribute_count, expected_cols);
    }

    #[test]
    fn normalized_labels_round_trip_terminated_files(labels in arb_labels(12)) {
        let raw: String = labels.iter().map(|label| format!("{label}\n")).collect();
        let text = normalize_labels(&raw);

        prop_assert_eq!(&text, &labels.join("\n"));
        prop_assert!(!text.ends_with('\n'));
    }

    #[test]
    fn blank_lines_between_labels_collapse_once(labels in arb_labels(8)) {
        let raw: String = labels.iter().map(|label| format!("{label}\n\n")).collect();
        prop_assert_eq!(normalize_labels(&raw), labels.join("\n"));
    }

    #[test]
    fn composed_document_has_burmeister_layout(
        rows in arb_rows(8, 8),
        labels in arb_labels(8),
    ) {
        let relation = Relation::from_text(relation_text(&rows));
        let language = Language::new("en", labels.join("\n"));
        let doc = compose(
            &relation.text,
            relation.object_count,
            relation.attribute_count,
            &language.text,
        );

        let header = format!(
            "B\n\n{}\n{}\n\n",
            relation.object_count, relation.attribute_count
        );
        prop_assert!(doc.starts_with(&header));
        let body = &doc[header.len()..];
        prop_assert_eq!(body, format!("{}\n{}", language.text, relation.text));
    }

    #[test]
    fn matching_labels_validate_cleanly(rows in arb_rows(8, 8)) {
        prop_assume!(!rows.is_empty());
        let relation = Relation::from_text(relation_text(&rows));
        let labels: Vec<String> = (0..relation.attribute_count)
            .map(|i| format!("attr{i}"))
            .collect();
        let language = Language::new("en", labels.join("\n"));

        let report = validate_context(&relation, &language);
        prop_assert!(report.is_clean(), "{}", report);
    }
}

#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A rectangular relation: `rows` rows of `cols` cells drawn from the usual
/// Burmeister cell characters.
pub fn arb_rows(max_rows: usize, max_cols: usize) -> BoxedStrategy<Vec<String>> {
    (1..=max_cols)
        .prop_flat_map(move |cols| {
            prop::collection::vec(
                prop::collection::vec(prop::sample::select(vec!['0', '1', 'X', 'x', '.']), cols)
                    .prop_map(|cells| cells.into_iter().collect::<String>()),
                0..=max_rows,
            )
        })
        .boxed()
}

/// Non-empty single-line labels.
pub fn arb_labels(max: usize) -> BoxedStrategy<Vec<String>> {
    prop::collection::vec("[a-zA-Z][a-zA-Z0-9 _-]{0,11}", 0..=max).boxed()
}

/// Joins rows the way `data.context` stores them: every row terminated.
pub fn relation_text(rows: &[String]) -> String {
    rows.iter().map(|row| format!("{row}\n")).collect()
}

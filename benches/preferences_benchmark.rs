//! Benchmarks for the preference merge and column-reinsertion hot paths.
//!
//! Both run on every header click or sidebar toggle, so they should stay
//! well under a millisecond even for records padded with unknown sections.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;

use cohort_prefs::domain::columns::{REFLECTION_COLUMNS, reinsert_position};
use cohort_prefs::domain::preferences::merge_over_defaults;

fn stored_record() -> serde_json::Value {
    json!({
        "sidebar": { "collapsed": true },
        "adminTables": {
            "reflections": {
                "sortConfig": { "key": "Cohort", "direction": "ascending" },
                "visibleColumns": ["Date", "Cohort", "Reflection"]
            },
            "users": {
                "sortConfig": { "key": "Email", "direction": "descending" },
                "visibleColumns": ["Zoom Name", "Email", "Attendance"]
            }
        },
        "wordCloud": { "maxWords": 40, "stopWords": ["the", "and", "a"] },
        "charts": { "palette": "warm", "stacked": false }
    })
}

fn merge_benchmark(c: &mut Criterion) {
    let record = stored_record();
    c.bench_function("merge_over_defaults", |b| {
        b.iter(|| merge_over_defaults(black_box(record.clone())).expect("record merges"));
    });
}

fn reinsert_benchmark(c: &mut Criterion) {
    let visible: Vec<String> = ["Date", "Cohort", "Rating"]
        .iter()
        .map(|c| (*c).to_string())
        .collect();
    c.bench_function("reinsert_position", |b| {
        b.iter(|| {
            reinsert_position(
                black_box(REFLECTION_COLUMNS),
                black_box(&visible),
                black_box("Reflection"),
            )
        });
    });
}

criterion_group!(benches, merge_benchmark, reinsert_benchmark);
criterion_main!(benches);

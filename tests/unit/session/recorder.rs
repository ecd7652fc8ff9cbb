use super::*;
use std::path::PathBuf;

fn rec(name: &str, clarity: f64) -> JudgmentRecord {
    JudgmentRecord::new(
        SourceRef {
            name: name.to_string(),
            path: PathBuf::from(format!("{name}.ttf")),
        },
        clarity,
        "sample".to_string(),
    )
}

#[test]
fn records_keep_insertion_order_and_sequence() {
    let mut r = SessionRecorder::new();
    assert_eq!(r.record(rec("A", 1.0)), 1);
    assert_eq!(r.record(rec("B", 3.0)), 2);
    let names: Vec<&str> = r.all_records().iter().map(|x| x.source().name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(r.all_records()[1].seq(), 2);
}

#[test]
fn ranked_view_is_descending_and_stable() {
    let mut r = SessionRecorder::new();
    for (name, c) in [("A", 2.0), ("B", 4.5), ("C", 2.0), ("D", 0.3), ("E", 4.5)] {
        r.record(rec(name, c));
    }
    let names: Vec<&str> = r
        .ranked_view()
        .iter()
        .map(|x| x.source().name.as_str())
        .collect();
    assert_eq!(names, vec!["B", "E", "A", "C", "D"]);

    // The underlying order is untouched.
    assert_eq!(r.all_records()[0].source().name, "A");
}

#[test]
fn export_uses_rank_and_one_decimal() {
    let mut r = SessionRecorder::new();
    r.record(rec("Arial", 3.4));
    r.record(rec("Georgia", 5.04));
    assert_eq!(
        export_lines(r.ranked_view()),
        vec![
            "1. Source: Georgia, Clarity: 5.0",
            "2. Source: Arial, Clarity: 3.4"
        ]
    );
    assert_eq!(
        export_lines(r.all_records()),
        vec![
            "1. Source: Arial, Clarity: 3.4",
            "2. Source: Georgia, Clarity: 5.0"
        ]
    );
}

#[test]
fn reset_clears_but_sequence_keeps_growing() {
    let mut r = SessionRecorder::new();
    r.record(rec("A", 1.0));
    r.reset();
    assert!(r.is_empty());
    assert_eq!(r.record(rec("B", 1.0)), 2);
}

#[test]
fn retract_removes_only_the_named_record() {
    let mut r = SessionRecorder::new();
    let a = r.record(rec("A", 1.0));
    r.record(rec("B", 2.0));
    assert!(r.retract(a));
    assert!(!r.retract(a));
    assert_eq!(r.len(), 1);
    assert_eq!(r.all_records()[0].source().name, "B");
}

#[test]
fn json_report_carries_both_views() {
    let mut r = SessionRecorder::new();
    r.record(rec("A", 1.0));
    r.record(rec("B", 2.0));
    let v: serde_json::Value = serde_json::from_str(&r.to_json().unwrap()).unwrap();
    assert_eq!(v["records"][0]["source"]["name"], "A");
    assert_eq!(v["ranked"][0]["source"]["name"], "B");
    assert_eq!(v["ranked"][0]["clarity_at_freeze"], 2.0);
}

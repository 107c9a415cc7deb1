//! Report layout for both views, driven through a whole series.

mod common;

use common::{with_eth0, with_kernel_modules};
use hspdelta_core::render::{render_pairs, render_title, ReportView};
use hspdelta_core::snapshot::{CanonicalSnapshot, SnapshotSeries};

#[test]
fn test_structured_report_layout() {
    let series = SnapshotSeries::from_unsorted(vec![
        with_kernel_modules("2020-03-31T00:00:00Z", &["nf_tables", "xfs"]),
        with_kernel_modules("2020-03-30T00:00:00Z", &["nf_tables", "ext4"]),
    ]);

    let lines = render_pairs(&series, ReportView::Structured).unwrap();
    assert_eq!(
        lines,
        vec![
            "changes from 2020-03-30T00:00:00Z to 2020-03-31T00:00:00Z",
            "\tADDED:",
            "\t\tkernel_modules:",
            "\t\t\txfs",
            "\tREMOVED:",
            "\t\tkernel_modules:",
            "\t\t\text4",
        ]
    );
}

#[test]
fn test_changed_block_layout() {
    let series = SnapshotSeries::from_unsorted(vec![
        with_eth0("2020-03-30T00:00:00Z", 1500, "aa"),
        with_eth0("2020-03-31T00:00:00Z", 9000, "aa"),
    ]);
    let lines = render_pairs(&series, ReportView::Structured).unwrap();
    assert_eq!(
        lines,
        vec![
            "changes from 2020-03-30T00:00:00Z to 2020-03-31T00:00:00Z",
            "\tCHANGED:",
            "\t\tnetwork_interfaces.eth0.mtu:",
            "\t\t\tFROM:\t1500",
            "\t\t\tTO:\t9000",
        ]
    );
}

#[test]
fn test_one_block_per_consecutive_pair() {
    let series = SnapshotSeries::from_unsorted(vec![
        with_kernel_modules("2020-03-30T00:00:00Z", &["a"]),
        with_kernel_modules("2020-03-31T00:00:00Z", &["a"]),
        with_kernel_modules("2020-04-01T00:00:00Z", &["a", "b"]),
    ]);
    let lines = render_pairs(&series, ReportView::Structured).unwrap();
    assert_eq!(
        lines[0],
        "no detected changes from 2020-03-30T00:00:00Z to 2020-03-31T00:00:00Z"
    );
    assert_eq!(
        lines[1],
        "changes from 2020-03-31T00:00:00Z to 2020-04-01T00:00:00Z"
    );
}

#[test]
fn test_identical_pair_is_skipped() {
    let series = SnapshotSeries::from_unsorted(vec![
        with_kernel_modules("2020-03-30T00:00:00Z", &["a"]),
        with_kernel_modules("2020-03-30T00:00:00Z", &["a"]),
    ]);
    assert!(render_pairs(&series, ReportView::Structured)
        .unwrap()
        .is_empty());
    assert!(render_pairs(&series, ReportView::UnifiedDiff)
        .unwrap()
        .is_empty());
}

#[test]
fn test_single_snapshot_renders_no_pairs() {
    let series = SnapshotSeries::from_unsorted(vec![CanonicalSnapshot::new("t1")]);
    assert!(render_pairs(&series, ReportView::Structured)
        .unwrap()
        .is_empty());
}

#[test]
fn test_unified_view_one_diff_per_pair() {
    let series = SnapshotSeries::from_unsorted(vec![
        with_kernel_modules("2020-03-30T00:00:00Z", &["a"]),
        with_kernel_modules("2020-03-31T00:00:00Z", &["a", "b"]),
        with_kernel_modules("2020-04-01T00:00:00Z", &["b"]),
    ]);
    let lines = render_pairs(&series, ReportView::UnifiedDiff).unwrap();
    let headers: Vec<&String> = lines.iter().filter(|l| l.starts_with("--- ")).collect();
    assert_eq!(
        headers,
        vec!["--- 2020-03-30T00:00:00Z", "--- 2020-03-31T00:00:00Z"]
    );
    assert!(lines.iter().any(|l| l.starts_with("@@ ")));
}

#[test]
fn test_title_spans_first_to_last() {
    let series = SnapshotSeries::from_unsorted(vec![
        CanonicalSnapshot::new("2020-03-31T00:00:00Z"),
        CanonicalSnapshot::new("2020-03-30T00:00:00Z"),
    ]);
    assert_eq!(
        render_title("web-01.example.com", &series),
        vec![
            "Change report for web-01.example.com from 2020-03-30T00:00:00Z to 2020-03-31T00:00:00Z",
            "",
        ]
    );
    assert!(render_title("x", &SnapshotSeries::default()).is_empty());
}

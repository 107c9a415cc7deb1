//! Structured change report.
//!
//! Layout for a pair with changes:
//!
//! ```text
//! changes from <T1> to <T2>
//! 	CHANGED:
//! 		network_interfaces.eth0.mtu:
//! 			FROM:	1500
//! 			TO:	9000
//! 	ADDED:
//! 		kernel_modules:
//! 			xfs
//! ```

use crate::diff::model::{DeltaReport, SetDelta};
use serde_json::Value;

/// Render one pair's delta.
///
/// Identical pairs render nothing; a pair differing only in its capture
/// timestamp renders a single `no detected changes` line.
pub fn render_delta(report: &DeltaReport) -> Vec<String> {
    if report.is_identical() {
        return Vec::new();
    }
    if !report.has_changes() {
        return vec![format!(
            "no detected changes from {} to {}",
            report.older_captured, report.newer_captured
        )];
    }

    let mut lines = vec![format!(
        "changes from {} to {}",
        report.older_captured, report.newer_captured
    )];

    for change in report.field_changes() {
        lines.push("\tCHANGED:".to_string());
        lines.push(format!("\t\t{}:", change.path));
        lines.push(format!("\t\t\tFROM:\t{}", display_value(&change.old)));
        lines.push(format!("\t\t\tTO:\t{}", display_value(&change.new)));
    }
    for delta in &report.added {
        push_entries(&mut lines, "ADDED", delta);
    }
    for delta in &report.removed {
        push_entries(&mut lines, "REMOVED", delta);
    }

    lines
}

fn push_entries(lines: &mut Vec<String>, label: &str, delta: &SetDelta) {
    lines.push(format!("\t{label}:"));
    lines.push(format!("\t\t{}:", delta.path));
    // BTreeSet iteration is already sorted
    lines.extend(delta.entries.iter().map(|entry| format!("\t\t\t{entry}")));
}

/// Strings print bare, string lists comma-joined, absent values as `(none)`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "(none)".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

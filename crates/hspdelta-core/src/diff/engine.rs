//! Structural diff between two canonical snapshots.

use crate::diff::model::{Change, DeltaReport, FieldPath, SetDelta};
use crate::snapshot::canonical::{CanonicalSnapshot, ComparableValue, Record};
use crate::snapshot::fields::{ADDRESS_LISTS, CAPTURED_DATE};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Compute the delta from `older` to `newer`.
///
/// Fields are visited in sorted name order across both snapshots:
///
/// - set fields report `added` / `removed` entries, one [`SetDelta`] each
/// - record maps report added / removed records as set deltas and
///   per-attribute `changed` entries for keys present on both sides; address
///   lists compare without regard to order
/// - everything else reports a single `changed` entry, recursing into JSON
///   objects key by key
///
/// A field missing on one side is treated as an empty collection or `null`.
/// The `captured_date` change is prepended to `changed` only when some other
/// difference exists.
pub fn compute_diff(older: &CanonicalSnapshot, newer: &CanonicalSnapshot) -> DeltaReport {
    let mut report = DeltaReport::new(older.captured_date(), newer.captured_date());

    let names: BTreeSet<&str> = older
        .field_names()
        .chain(newer.field_names())
        .filter(|name| *name != CAPTURED_DATE)
        .collect();

    for name in names {
        diff_field(
            &FieldPath::field(name),
            older.get(name),
            newer.get(name),
            &mut report,
        );
    }

    if report.has_changes() && report.older_captured != report.newer_captured {
        let timestamp = Change {
            path: FieldPath::field(CAPTURED_DATE),
            old: Value::String(report.older_captured.clone()),
            new: Value::String(report.newer_captured.clone()),
        };
        report.changed.insert(0, timestamp);
    }

    report
}

fn diff_field(
    path: &FieldPath,
    old: Option<&ComparableValue>,
    new: Option<&ComparableValue>,
    report: &mut DeltaReport,
) {
    use ComparableValue::{LabelSet, RecordMap, StringSet};

    let no_entries = BTreeSet::new();
    let no_records = BTreeMap::new();

    match (old, new) {
        (Some(StringSet(a) | LabelSet(a)), Some(StringSet(b) | LabelSet(b))) => {
            diff_sets(path, a, b, report)
        }
        (Some(StringSet(a) | LabelSet(a)), None) => diff_sets(path, a, &no_entries, report),
        (None, Some(StringSet(b) | LabelSet(b))) => diff_sets(path, &no_entries, b, report),
        (Some(RecordMap(a)), Some(RecordMap(b))) => diff_records(path, a, b, report),
        (Some(RecordMap(a)), None) => diff_records(path, a, &no_records, report),
        (None, Some(RecordMap(b))) => diff_records(path, &no_records, b, report),
        (old, new) => {
            let old = old.map(ComparableValue::to_json).unwrap_or(Value::Null);
            let new = new.map(ComparableValue::to_json).unwrap_or(Value::Null);
            diff_values(path, &old, &new, report);
        }
    }
}

fn diff_sets(
    path: &FieldPath,
    old: &BTreeSet<String>,
    new: &BTreeSet<String>,
    report: &mut DeltaReport,
) {
    let added: BTreeSet<String> = new.difference(old).cloned().collect();
    let removed: BTreeSet<String> = old.difference(new).cloned().collect();
    push_set_delta(&mut report.added, path, added);
    push_set_delta(&mut report.removed, path, removed);
}

fn diff_records(
    path: &FieldPath,
    old: &BTreeMap<String, Record>,
    new: &BTreeMap<String, Record>,
    report: &mut DeltaReport,
) {
    let added = new
        .iter()
        .filter(|(k, _)| !old.contains_key(*k))
        .map(|(k, r)| record_entry(k, r))
        .collect();
    let removed = old
        .iter()
        .filter(|(k, _)| !new.contains_key(*k))
        .map(|(k, r)| record_entry(k, r))
        .collect();
    push_set_delta(&mut report.added, path, added);
    push_set_delta(&mut report.removed, path, removed);

    for (key, old_record) in old {
        let Some(new_record) = new.get(key) else {
            continue;
        };
        if old_record == new_record {
            continue;
        }
        let record_path = path.child(key.clone());
        match (old_record, new_record) {
            (Record::Attributes(a), Record::Attributes(b)) => {
                let attributes: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
                for attribute in attributes {
                    let old_value = a.get(attribute).unwrap_or(&Value::Null);
                    let new_value = b.get(attribute).unwrap_or(&Value::Null);
                    if !attribute_eq(attribute, old_value, new_value) {
                        report.changed.push(Change {
                            path: record_path.child(attribute.clone()),
                            old: old_value.clone(),
                            new: new_value.clone(),
                        });
                    }
                }
            }
            (a, b) => report.changed.push(Change {
                path: record_path,
                old: a.to_json(),
                new: b.to_json(),
            }),
        }
    }
}

/// Text records carry their value so an added package shows its version.
fn record_entry(key: &str, record: &Record) -> String {
    match record {
        Record::Text(value) => format!("{key} {value}"),
        Record::Attributes(_) => key.to_string(),
    }
}

fn attribute_eq(attribute: &str, old: &Value, new: &Value) -> bool {
    match (old, new) {
        (Value::Array(a), Value::Array(b)) if ADDRESS_LISTS.contains(&attribute) => {
            sorted_entries(a) == sorted_entries(b)
        }
        _ => old == new,
    }
}

fn sorted_entries(items: &[Value]) -> Vec<String> {
    let mut entries: Vec<String> = items.iter().map(Value::to_string).collect();
    entries.sort_unstable();
    entries
}

/// Whole-value comparison, descending into objects present on both sides.
fn diff_values(path: &FieldPath, old: &Value, new: &Value, report: &mut DeltaReport) {
    match (old, new) {
        (Value::Object(a), Value::Object(b)) => {
            let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
            for key in keys {
                diff_values(
                    &path.child(key.clone()),
                    a.get(key).unwrap_or(&Value::Null),
                    b.get(key).unwrap_or(&Value::Null),
                    report,
                );
            }
        }
        (a, b) if a != b => report.changed.push(Change {
            path: path.clone(),
            old: a.clone(),
            new: b.clone(),
        }),
        _ => {}
    }
}

fn push_set_delta(target: &mut Vec<SetDelta>, path: &FieldPath, entries: BTreeSet<String>) {
    if !entries.is_empty() {
        target.push(SetDelta {
            path: path.clone(),
            entries,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn interfaces(mtu: u32, mac: &str) -> ComparableValue {
        let mut attrs = BTreeMap::new();
        attrs.insert("mac_address".to_string(), json!(mac));
        attrs.insert("mtu".to_string(), json!(mtu));
        let mut records = BTreeMap::new();
        records.insert("eth0".to_string(), Record::Attributes(attrs));
        ComparableValue::RecordMap(records)
    }

    #[test]
    fn test_identical_snapshots_produce_empty_report() {
        let a = CanonicalSnapshot::new("t1")
            .with_field("kernel_modules", ComparableValue::string_set(["xfs"]));
        let report = compute_diff(&a, &a);
        assert!(report.changed.is_empty());
        assert!(report.added.is_empty());
        assert!(report.removed.is_empty());
        assert!(report.is_identical());
    }

    #[test]
    fn test_record_attribute_change_is_scoped() {
        let a = CanonicalSnapshot::new("t1")
            .with_field("network_interfaces", interfaces(1500, "aa:bb"));
        let b = CanonicalSnapshot::new("t2")
            .with_field("network_interfaces", interfaces(9000, "aa:bb"));
        let report = compute_diff(&a, &b);

        let changes: Vec<_> = report.field_changes().collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes[0].path,
            FieldPath::Nested(vec![
                "network_interfaces".into(),
                "eth0".into(),
                "mtu".into()
            ])
        );
        assert_eq!(changes[0].old, json!(1500));
        assert_eq!(changes[0].new, json!(9000));
    }

    #[test]
    fn test_address_lists_ignore_order() {
        assert!(attribute_eq(
            "ipv4_addresses",
            &json!(["10.0.0.1", "10.0.0.2"]),
            &json!(["10.0.0.2", "10.0.0.1"])
        ));
        assert!(!attribute_eq(
            "ipv4_addresses",
            &json!(["10.0.0.1", "10.0.0.1"]),
            &json!(["10.0.0.1"])
        ));
        assert!(!attribute_eq("state", &json!(["UP", "DOWN"]), &json!(["DOWN", "UP"])));
    }

    #[test]
    fn test_added_text_record_carries_value() {
        let mut records = BTreeMap::new();
        records.insert("vim-minimal".to_string(), Record::Text("8.0.1763-13.el8.x86_64".into()));
        let a = CanonicalSnapshot::new("t1");
        let b = CanonicalSnapshot::new("t2")
            .with_field("installed_packages", ComparableValue::RecordMap(records));
        let report = compute_diff(&a, &b);
        assert_eq!(
            report.added[0].entries.iter().collect::<Vec<_>>(),
            vec!["vim-minimal 8.0.1763-13.el8.x86_64"]
        );
    }

    #[test]
    fn test_missing_set_field_is_treated_as_empty() {
        let a = CanonicalSnapshot::new("t1");
        let b = CanonicalSnapshot::new("t2")
            .with_field("enabled_services", ComparableValue::string_set(["sshd"]));
        let report = compute_diff(&a, &b);
        assert_eq!(report.added.len(), 1);
        assert_eq!(report.added[0].path, FieldPath::field("enabled_services"));
        assert!(report.removed.is_empty());
    }

    #[test]
    fn test_passthrough_object_recurses() {
        let a = CanonicalSnapshot::new("t1").with_field(
            "os_release",
            ComparableValue::Scalar(json!({"major": 8, "minor": 1})),
        );
        let b = CanonicalSnapshot::new("t2").with_field(
            "os_release",
            ComparableValue::Scalar(json!({"major": 8, "minor": 2})),
        );
        let report = compute_diff(&a, &b);
        let changes: Vec<_> = report.field_changes().collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path.to_string(), "os_release.minor");
    }

    #[test]
    fn test_timestamp_is_first_changed_entry() {
        let a = CanonicalSnapshot::new("t1").with_field("arch", ComparableValue::Scalar(json!("x86_64")));
        let b = CanonicalSnapshot::new("t2").with_field("arch", ComparableValue::Scalar(json!("aarch64")));
        let report = compute_diff(&a, &b);
        assert_eq!(report.changed.len(), 2);
        assert!(report.changed[0].path.is_timestamp());
        assert_eq!(report.changed[1].path, FieldPath::field("arch"));
    }
}

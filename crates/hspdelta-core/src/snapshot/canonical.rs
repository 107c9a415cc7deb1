//! Canonical, comparison-ready snapshot form.
//!
//! Every collection is a `BTreeSet` or `BTreeMap`, so serialization is
//! key-sorted and set contents are deduplicated and ordered.

use crate::snapshot::fields::CAPTURED_DATE;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// A per-entry record inside a [`ComparableValue::RecordMap`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    /// Single opaque string, e.g. a package's version-release-architecture.
    Text(String),
    /// Named sub-attributes, e.g. a network interface's MTU and addresses.
    Attributes(BTreeMap<String, Value>),
}

impl Record {
    pub fn to_json(&self) -> Value {
        match self {
            Record::Text(text) => Value::String(text.clone()),
            Record::Attributes(attrs) => Value::Object(
                attrs
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

/// The value of one canonical field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComparableValue {
    /// Capture timestamp, kept verbatim.
    Timestamp(String),
    /// Plain multi-valued field (kernel modules, services, processes, products).
    StringSet(BTreeSet<String>),
    /// Keyed records (interfaces by name, packages by name).
    RecordMap(BTreeMap<String, Record>),
    /// One synthesized label per entry (DNF modules, YUM repos).
    LabelSet(BTreeSet<String>),
    /// Any other field, compared as opaque JSON.
    Scalar(Value),
}

impl ComparableValue {
    /// Collect strings into a [`ComparableValue::StringSet`].
    pub fn string_set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ComparableValue::StringSet(items.into_iter().map(Into::into).collect())
    }

    /// Collect strings into a [`ComparableValue::LabelSet`].
    pub fn label_set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ComparableValue::LabelSet(items.into_iter().map(Into::into).collect())
    }

    pub fn as_timestamp(&self) -> Option<&str> {
        match self {
            ComparableValue::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// JSON rendering used for whole-value comparisons and display.
    pub fn to_json(&self) -> Value {
        match self {
            ComparableValue::Timestamp(ts) => Value::String(ts.clone()),
            ComparableValue::StringSet(set) | ComparableValue::LabelSet(set) => {
                Value::Array(set.iter().cloned().map(Value::String).collect())
            }
            ComparableValue::RecordMap(records) => Value::Object(
                records
                    .iter()
                    .map(|(k, r)| (k.clone(), r.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            ComparableValue::Scalar(value) => value.clone(),
        }
    }
}

/// Normalized form of exactly one [`crate::snapshot::RawSnapshot`].
///
/// Always carries `captured_date` as a [`ComparableValue::Timestamp`]; the
/// volatile `id` and `last_boot_time` fields never appear.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CanonicalSnapshot {
    fields: BTreeMap<String, ComparableValue>,
}

impl CanonicalSnapshot {
    /// Start a canonical snapshot with its capture timestamp.
    pub fn new(captured_date: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(
            CAPTURED_DATE.to_string(),
            ComparableValue::Timestamp(captured_date.into()),
        );
        Self { fields }
    }

    /// Add or replace a field.
    ///
    /// `captured_date` is reserved for the timestamp given to [`Self::new`];
    /// attempts to set it here are ignored.
    pub fn with_field(mut self, name: impl Into<String>, value: ComparableValue) -> Self {
        self.insert(name, value);
        self
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: ComparableValue) {
        let name = name.into();
        if name != CAPTURED_DATE {
            self.fields.insert(name, value);
        }
    }

    pub fn captured_date(&self) -> &str {
        self.fields
            .get(CAPTURED_DATE)
            .and_then(ComparableValue::as_timestamp)
            .unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<&ComparableValue> {
        self.fields.get(name)
    }

    /// Field names in sorted order, `captured_date` included.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &ComparableValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

//! Delta report types.
//!
//! Entry order inside each list follows the order fields are visited, which
//! is sorted field-name order.

use crate::snapshot::fields::CAPTURED_DATE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Separator between path segments when displayed.
pub const PATH_SEPARATOR: &str = ".";

/// Location of a difference inside a canonical snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldPath {
    /// A top-level field.
    Field(String),
    /// A value nested under a top-level field: field, record key, then
    /// optionally a sub-attribute (or deeper keys for passthrough objects).
    Nested(Vec<String>),
}

impl FieldPath {
    pub fn field(name: impl Into<String>) -> Self {
        FieldPath::Field(name.into())
    }

    /// Extend the path by one segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments().to_vec();
        segments.push(segment.into());
        FieldPath::Nested(segments)
    }

    pub fn segments(&self) -> &[String] {
        match self {
            FieldPath::Field(name) => std::slice::from_ref(name),
            FieldPath::Nested(segments) => segments,
        }
    }

    /// The top-level field this path lives under.
    pub fn root(&self) -> &str {
        self.segments().first().map(String::as_str).unwrap_or_default()
    }

    /// The final segment.
    pub fn leaf(&self) -> &str {
        self.segments().last().map(String::as_str).unwrap_or_default()
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, FieldPath::Field(name) if name == CAPTURED_DATE)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Field(name) => write!(f, "{name}"),
            FieldPath::Nested(segments) => match segments.split_last() {
                Some((leaf, parents)) if !parents.is_empty() => {
                    write!(f, "{}{PATH_SEPARATOR}{leaf}", parents.join(PATH_SEPARATOR))
                }
                Some((leaf, _)) => write!(f, "{leaf}"),
                None => Ok(()),
            },
        }
    }
}

/// A value that differs between the two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub path: FieldPath,
    /// Value in the older snapshot (`null` when absent)
    pub old: Value,
    /// Value in the newer snapshot (`null` when absent)
    pub new: Value,
}

/// Entries present on only one side of a set or record-map field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDelta {
    pub path: FieldPath,
    pub entries: BTreeSet<String>,
}

/// The differences between one (older, newer) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaReport {
    /// `captured_date` of the older snapshot
    pub older_captured: String,
    /// `captured_date` of the newer snapshot
    pub newer_captured: String,
    pub changed: Vec<Change>,
    pub added: Vec<SetDelta>,
    pub removed: Vec<SetDelta>,
}

impl DeltaReport {
    pub fn new(older_captured: impl Into<String>, newer_captured: impl Into<String>) -> Self {
        Self {
            older_captured: older_captured.into(),
            newer_captured: newer_captured.into(),
            changed: Vec::new(),
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// True when anything other than the capture timestamp differs.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty() || self.field_changes().next().is_some()
    }

    /// `changed` entries excluding the capture timestamp.
    pub fn field_changes(&self) -> impl Iterator<Item = &Change> {
        self.changed.iter().filter(|c| !c.path.is_timestamp())
    }

    pub fn timestamp_change(&self) -> Option<&Change> {
        self.changed.iter().find(|c| c.path.is_timestamp())
    }

    /// True when the pair differs in nothing at all, timestamp included.
    pub fn is_identical(&self) -> bool {
        !self.has_changes() && self.older_captured == self.newer_captured
    }
}

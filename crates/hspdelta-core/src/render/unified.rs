//! Unified-diff view of canonical snapshots.

use crate::errors::Result;
use crate::snapshot::CanonicalSnapshot;
use similar::TextDiff;

/// Lines of context around each hunk.
const CONTEXT_RADIUS: usize = 3;

/// Deterministic text form: pretty JSON, keys sorted, sets as sorted arrays.
///
/// # Errors
///
/// `Serialization` if `serde_json` rejects the value.
pub fn serialize_canonical(snapshot: &CanonicalSnapshot) -> Result<String> {
    let mut text = serde_json::to_string_pretty(snapshot)?;
    text.push('\n');
    Ok(text)
}

/// Unified diff between two serialized snapshots, each side headed by its
/// capture timestamp. Returns no lines when the serializations are equal.
///
/// # Errors
///
/// `Serialization` if either snapshot cannot be serialized.
pub fn render_unified(older: &CanonicalSnapshot, newer: &CanonicalSnapshot) -> Result<Vec<String>> {
    let before = serialize_canonical(older)?;
    let after = serialize_canonical(newer)?;
    if before == after {
        return Ok(Vec::new());
    }

    let diff = TextDiff::from_lines(&before, &after);
    let rendered = diff
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header(older.captured_date(), newer.captured_date())
        .to_string();

    Ok(rendered.lines().map(str::to_string).collect())
}

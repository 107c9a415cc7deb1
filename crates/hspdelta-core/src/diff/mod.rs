//! Snapshot differ.
//!
//! Compares two canonical snapshots and produces a [`DeltaReport`] of
//! changed values, added entries and removed entries keyed by field path.
//!
//! ## Entry point
//!
//! ```ignore
//! use hspdelta_core::diff::compute_diff;
//!
//! let report = compute_diff(&older, &newer);
//! let lines = hspdelta_core::render::report::render_delta(&report);
//! ```
//!
//! ## Guarantees
//!
//! - **Set semantics**: set-valued fields never report per-position changes,
//!   only added and removed entries.
//! - **Timestamp noise suppression**: `captured_date` never counts as a
//!   change on its own; it is listed first in `changed` only when something
//!   else changed.
//! - **Symmetry**: `compute_diff(a, b).added` equals
//!   `compute_diff(b, a).removed`.

pub mod engine;
pub mod model;

pub use engine::compute_diff;
pub use model::{Change, DeltaReport, FieldPath, SetDelta};

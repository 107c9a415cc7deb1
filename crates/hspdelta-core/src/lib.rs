//! hspdelta Core - snapshot normalization and differencing
//!
//! This crate holds the pure part of the change-report pipeline:
//! - Raw historical system profile bodies and their canonical, comparable form
//! - The normalizer that defines what counts as a change
//! - The structural differ producing per-pair delta reports
//! - Renderers for the structured report and the unified-diff text view
//!
//! Nothing in here performs I/O; fetching lives in `hspdelta-client`.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod render;
pub mod snapshot;

pub use hspdelta_core_types as core_types;

// Re-export commonly used types
pub use diff::{compute_diff, DeltaReport, FieldPath};
pub use errors::{ExError, ExErrorKind, HspError, Result};
pub use render::ReportView;
pub use snapshot::{normalize, CanonicalSnapshot, ComparableValue, RawSnapshot, SnapshotSeries};

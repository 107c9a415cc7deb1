//! Command orchestration layer.
//!
//! Coordinates the profile service, the pure core and the date-range
//! filter for one report run.

pub mod report;

//! hspdelta Engine - report orchestration
//!
//! Wires the fetcher, normalizer, date-range filter and renderers into one
//! run. Everything here is synchronous; the only I/O happens inside the
//! `ProfileService` passed in by the caller.

pub mod commands;
pub mod date_range;
pub mod errors;

pub use commands::report::{run_report, ReportOptions, ReportOutcome};
pub use date_range::DateRange;

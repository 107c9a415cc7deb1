//! Core types shared across hspdelta crates
//!
//! This crate provides foundational types used by the error, logging and
//! client layers:
//!
//! - **Correlation**: RequestId, one per CLI run
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::RequestId;
pub use sensitive::Sensitive;

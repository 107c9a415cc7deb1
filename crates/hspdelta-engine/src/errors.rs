//! Error handling for hspdelta-engine
//!
//! Engine entry points return the structured `ExError` so the caller gets
//! the failing operation and run id alongside the code.

use hspdelta_core::errors::{ExError, HspError};
use hspdelta_core_types::RequestId;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Attach operation and run context to a domain error
pub fn in_op<'a>(op: &'static str, request_id: &'a RequestId) -> impl Fn(HspError) -> ExError + 'a {
    move |err| ExError::from(err).with_op(op).with_request_id(request_id.clone())
}

/// Error for an unusable date expression
pub fn bad_date(flag: &str, expression: &str, detail: &str) -> HspError {
    HspError::InvalidInput {
        reason: format!("cannot parse --{flag} value {expression:?}: {detail}"),
    }
}

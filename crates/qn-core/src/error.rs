//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `QnError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised by `qn-core` primitives.
///
/// Both variants signal a programming defect when they surface from a run
/// whose configuration passed validation; they abort the run instead of
/// being clamped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QnError {
    #[error("invalid parameter {what}: {value}")]
    InvalidParameter { what: &'static str, value: f64 },

    #[error("contract violation: {0}")]
    ContractViolation(String),
}

/// Shorthand result type for `qn-core`.
pub type QnResult<T> = Result<T, QnError>;

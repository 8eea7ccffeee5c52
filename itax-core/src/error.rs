//! Errors raised at the boundary of a tax calculation.

use thiserror::Error;

/// Errors that can occur while validating or interpreting a tax request.
///
/// Once a [`TaxRequest`](crate::TaxRequest) has passed validation the
/// calculators never fail: out-of-range intermediate values are clamped
/// rather than reported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    /// A caller-supplied value is unusable, e.g. a negative amount or an
    /// unknown age bracket name.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A regime name other than `new` or `old`.
    #[error("unsupported tax regime '{0}' (expected 'new' or 'old')")]
    UnsupportedRegime(String),
}

impl TaxError {
    pub(crate) fn negative(
        field: impl Into<String>,
        value: rust_decimal::Decimal,
    ) -> Self {
        TaxError::InvalidInput {
            field: field.into(),
            reason: format!("{value} must not be negative"),
        }
    }
}

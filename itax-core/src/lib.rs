//! Indian personal income tax engine.
//!
//! Computes liability for one financial year under the New and Old regimes:
//! slab tax, section 87A rebate, surcharge and health and education cess.
//! Every calculation is a pure function of a [`TaxRequest`] and a
//! [`TaxRules`] table set.

pub mod calculations;
mod error;
pub mod models;

pub use calculations::TaxCalculator;
pub use error::TaxError;
pub use models::*;

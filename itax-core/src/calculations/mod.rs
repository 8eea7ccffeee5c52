//! Calculation stages for Indian personal income tax.
//!
//! The pipeline is strictly linear: regime tax (including the section 87A
//! rebate) → surcharge → cess. [`TaxCalculator`] runs all three.

pub mod calculator;
pub mod cess;
pub mod common;
pub mod regime_tax;
pub mod surcharge;

pub use calculator::TaxCalculator;
pub use regime_tax::{RegimeTax, RegimeTaxCalculator};

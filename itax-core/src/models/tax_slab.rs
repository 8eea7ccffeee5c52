use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bracket of a progressive slab table.
///
/// Income in `(floor, ceiling]` is taxed at `rate`; the last slab of a table
/// has no ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub floor: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxSlab {
    pub fn new(
        floor: Decimal,
        ceiling: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self {
            floor,
            ceiling,
            rate,
        }
    }

    /// The part of `income` that falls inside this slab.
    pub fn portion_of(
        &self,
        income: Decimal,
    ) -> Decimal {
        if income <= self.floor {
            return Decimal::ZERO;
        }
        let top = match self.ceiling {
            Some(ceiling) => income.min(ceiling),
            None => income,
        };
        top - self.floor
    }
}

/// A surcharge step: tax is surcharged at `rate` once gross total income is
/// strictly above `above`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeBand {
    pub above: Decimal,
    pub rate: Decimal,
}

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::AgeBracket;

/// Income heads other than salary that count toward gross total income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeHead {
    HouseProperty,
    LongTermCapitalGains,
    ShortTermCapitalGains,
    BusinessProfession,
    Interest,
    Dividend,
    Casual,
}

impl IncomeHead {
    pub const ALL: [IncomeHead; 7] = [
        IncomeHead::HouseProperty,
        IncomeHead::LongTermCapitalGains,
        IncomeHead::ShortTermCapitalGains,
        IncomeHead::BusinessProfession,
        IncomeHead::Interest,
        IncomeHead::Dividend,
        IncomeHead::Casual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HouseProperty => "house_property",
            Self::LongTermCapitalGains => "ltcg",
            Self::ShortTermCapitalGains => "stcg",
            Self::BusinessProfession => "business",
            Self::Interest => "interest",
            Self::Dividend => "dividend",
            Self::Casual => "casual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "house_property" | "house" | "rent" => Some(Self::HouseProperty),
            "ltcg" | "long_term_capital_gains" => Some(Self::LongTermCapitalGains),
            "stcg" | "short_term_capital_gains" => Some(Self::ShortTermCapitalGains),
            "business" | "profession" | "business_profession" | "business_income" => {
                Some(Self::BusinessProfession)
            }
            "interest" => Some(Self::Interest),
            "dividend" | "dividends" => Some(Self::Dividend),
            "casual" | "casual_income" | "lottery" => Some(Self::Casual),
            _ => None,
        }
    }
}

impl fmt::Display for IncomeHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amounts under each non-salary head; every head defaults to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherIncome {
    pub house_property: Decimal,
    pub long_term_capital_gains: Decimal,
    pub short_term_capital_gains: Decimal,
    pub business_profession: Decimal,
    pub interest: Decimal,
    pub dividend: Decimal,
    pub casual: Decimal,
}

impl OtherIncome {
    pub fn get(
        &self,
        head: IncomeHead,
    ) -> Decimal {
        match head {
            IncomeHead::HouseProperty => self.house_property,
            IncomeHead::LongTermCapitalGains => self.long_term_capital_gains,
            IncomeHead::ShortTermCapitalGains => self.short_term_capital_gains,
            IncomeHead::BusinessProfession => self.business_profession,
            IncomeHead::Interest => self.interest,
            IncomeHead::Dividend => self.dividend,
            IncomeHead::Casual => self.casual,
        }
    }

    pub fn set(
        &mut self,
        head: IncomeHead,
        amount: Decimal,
    ) {
        let slot = match head {
            IncomeHead::HouseProperty => &mut self.house_property,
            IncomeHead::LongTermCapitalGains => &mut self.long_term_capital_gains,
            IncomeHead::ShortTermCapitalGains => &mut self.short_term_capital_gains,
            IncomeHead::BusinessProfession => &mut self.business_profession,
            IncomeHead::Interest => &mut self.interest,
            IncomeHead::Dividend => &mut self.dividend,
            IncomeHead::Casual => &mut self.casual,
        };
        *slot = amount;
    }

    pub fn with(
        mut self,
        head: IncomeHead,
        amount: Decimal,
    ) -> Self {
        self.set(head, amount);
        self
    }

    pub fn total(&self) -> Decimal {
        IncomeHead::ALL.iter().map(|head| self.get(*head)).sum()
    }
}

/// Who is being taxed and what they earned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeProfile {
    /// Gross salary, or total income when the caller does not split heads.
    pub gross_income: Decimal,
    #[serde(default)]
    pub age_bracket: AgeBracket,
    #[serde(default)]
    pub other_income: OtherIncome,
}

impl IncomeProfile {
    pub fn new(gross_income: Decimal) -> Self {
        Self {
            gross_income,
            ..Self::default()
        }
    }

    pub fn with_age(
        mut self,
        age_bracket: AgeBracket,
    ) -> Self {
        self.age_bracket = age_bracket;
        self
    }

    pub fn with_other_income(
        mut self,
        other_income: OtherIncome,
    ) -> Self {
        self.other_income = other_income;
        self
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TaxError;

/// Age of the taxpayer during the financial year. Only the Old regime
/// distinguishes between brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgeBracket {
    #[default]
    Below60,
    Senior60To80,
    SuperSenior80Plus,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 3] = [
        AgeBracket::Below60,
        AgeBracket::Senior60To80,
        AgeBracket::SuperSenior80Plus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Below60 => "below60",
            Self::Senior60To80 => "senior",
            Self::SuperSenior80Plus => "super-senior",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Below60 => "Below 60 years",
            Self::Senior60To80 => "60 to 80 years",
            Self::SuperSenior80Plus => "Above 80 years",
        }
    }

    /// Senior and super-senior citizens share the higher 80D cap and the
    /// 80TTB interest deduction.
    pub fn is_senior(&self) -> bool {
        !matches!(self, Self::Below60)
    }

    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "below60" | "below60years" | "general" | "under60" => Some(Self::Below60),
            "senior" | "60to80" | "60to80years" | "senior60to80" => Some(Self::Senior60To80),
            "supersenior" | "80plus" | "above80" | "above80years" | "supersenior80plus" => {
                Some(Self::SuperSenior80Plus)
            }
            _ => None,
        }
    }
}

impl FromStr for AgeBracket {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TaxError::InvalidInput {
            field: "age_bracket".to_string(),
            reason: format!("unrecognised age bracket '{}'", s.trim()),
        })
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_canonical_names() {
        for bracket in AgeBracket::ALL {
            assert_eq!(AgeBracket::parse(bracket.as_str()), Some(bracket));
        }
    }

    #[test]
    fn parses_display_names() {
        for bracket in AgeBracket::ALL {
            assert_eq!(AgeBracket::parse(bracket.display_name()), Some(bracket));
        }
    }

    #[test]
    fn unknown_bracket_is_invalid_input() {
        let err = "toddler".parse::<AgeBracket>().unwrap_err();

        assert_eq!(
            err,
            TaxError::InvalidInput {
                field: "age_bracket".to_string(),
                reason: "unrecognised age bracket 'toddler'".to_string(),
            }
        );
    }

    #[test]
    fn only_below_60_is_not_senior() {
        assert!(!AgeBracket::Below60.is_senior());
        assert!(AgeBracket::Senior60To80.is_senior());
        assert!(AgeBracket::SuperSenior80Plus.is_senior());
    }
}

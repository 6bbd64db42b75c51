use crate::error::LoanError;
use crate::loan::round;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Display currency. Only changes labels; amounts are never converted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Currency {
    #[default]
    Usd,
    Lkr,
    Eur,
    Gbp,
    Inr,
    Aud,
    Cad,
    Jpy,
}

impl Currency {
    pub fn all() -> [Currency; 8] {
        [
            Currency::Usd,
            Currency::Lkr,
            Currency::Eur,
            Currency::Gbp,
            Currency::Inr,
            Currency::Aud,
            Currency::Cad,
            Currency::Jpy,
        ]
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Lkr => "Rs.",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Inr => "₹",
            Currency::Aud => "A$",
            Currency::Cad => "C$",
            Currency::Jpy => "¥",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Lkr => "LKR",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Jpy => "JPY",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Lkr => "Sri Lankan Rupee",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Inr => "Indian Rupee",
            Currency::Aud => "Australian Dollar",
            Currency::Cad => "Canadian Dollar",
            Currency::Jpy => "Japanese Yen",
        }
    }

    /// `"<symbol><amount>"` at two decimal places.
    pub fn format_amount(&self, amt: f64) -> String {
        format!("{}{:.2}", self.symbol(), round(amt, 2))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.symbol(), self.code(), self.name())
    }
}

impl FromStr for Currency {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::all()
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| LoanError::UnknownCurrency(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Currency;
    use crate::error::LoanError;
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[test]
    fn test_parse_code() {
        assert_eq!("USD".parse::<Currency>(), Ok(Currency::Usd));
        assert_eq!("lkr".parse::<Currency>(), Ok(Currency::Lkr));
        assert_eq!(" Jpy ".parse::<Currency>(), Ok(Currency::Jpy));
        assert_eq!(
            "XYZ".parse::<Currency>(),
            Err(LoanError::UnknownCurrency("XYZ".to_string()))
        );
        for currency in Currency::all() {
            assert_eq!(currency.code().parse::<Currency>(), Ok(currency));
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(Currency::Usd.format_amount(8884.87886783416), "$8884.88");
        assert_eq!(Currency::Lkr.format_amount(1000.), "Rs.1000.00");
        assert_eq!(Currency::Eur.format_amount(-0.), "€0.00");
        assert_eq!(Currency::Usd.format_amount(-0.001), "$0.00");
        assert_eq!(Currency::default(), Currency::Usd);
    }

    #[test]
    fn test_display() {
        assert_eq!(Currency::Gbp.to_string(), "£ GBP - British Pound");
        assert_eq!(Currency::Cad.to_string(), "C$ CAD - Canadian Dollar");
    }
}

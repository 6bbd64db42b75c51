//! Raw form text and its conversion into validated [`LoanTerms`].

use crate::error::{LoanError, LoanResult};
use crate::loan::LoanTerms;
use log::info;

/// The three numeric inputs of the calculator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Principal,
    Years,
    Rate,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Principal => "principal",
            Field::Years => "years",
            Field::Rate => "rate",
        }
    }
}

/// Field values exactly as the user typed them.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LoanForm {
    pub principal: String,
    pub years: String,
    pub rate: String,
}

impl LoanForm {
    pub fn new(principal: &str, years: &str, rate: &str) -> Self {
        Self {
            principal: principal.to_string(),
            years: years.to_string(),
            rate: rate.to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Principal => &self.principal,
            Field::Years => &self.years,
            Field::Rate => &self.rate,
        }
    }

    /// Copy of the form with one field replaced.
    pub fn with(&self, field: Field, value: String) -> Self {
        let mut form = self.clone();
        match field {
            Field::Principal => form.principal = value,
            Field::Years => form.years = value,
            Field::Rate => form.rate = value,
        }
        form
    }

    /// Validates in order: every field filled, every field numeric, ranges,
    /// then the zero rate.
    pub fn parse(&self) -> LoanResult<LoanTerms> {
        for field in [Field::Principal, Field::Years, Field::Rate] {
            if self.get(field).trim().is_empty() {
                info!("rejected form: {} is empty", field.name());
                return Err(LoanError::MissingInput {
                    field: field.name(),
                });
            }
        }

        let principal = self.parse_field(Field::Principal)?;
        let years = self.parse_field(Field::Years)?;
        let rate = self.parse_field(Field::Rate)?;

        LoanTerms::new(principal, years, rate).inspect_err(|err| {
            info!("rejected form {:?}: {}", self, err);
        })
    }

    fn parse_field(&self, field: Field) -> LoanResult<f64> {
        let raw = self.get(field).trim();
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => {
                info!("rejected form: {} = {:?}", field.name(), raw);
                Err(LoanError::InvalidNumber {
                    field: field.name(),
                    value: raw.to_string(),
                })
            }
        }
    }
}

//! Calculator session state. Each user action produces a new
//! [`CalculatorState`]; nothing is mutated in place.

use crate::currency::Currency;
use crate::error::LoanError;
use crate::input::{Field, LoanForm};
use crate::loan::{Loan, PaymentResult};
use crate::report::Report;
use chrono::NaiveDateTime;
use log::debug;

#[derive(Clone, PartialEq, Debug)]
pub enum Action {
    SetField(Field, String),
    SetCurrency(Currency),
    Calculate,
    Reset,
}

/// What the last calculation produced. A result and an error are never
/// shown together.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum Outcome {
    #[default]
    Empty,
    Calculated(Loan),
    Failed(LoanError),
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct CalculatorState {
    pub form: LoanForm,
    pub currency: Currency,
    pub outcome: Outcome,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, action: Action) -> Self {
        debug!("apply {:?}", action);
        match action {
            Action::SetField(field, value) => Self {
                form: self.form.with(field, value),
                ..self.clone()
            },
            Action::SetCurrency(currency) => Self {
                currency,
                ..self.clone()
            },
            Action::Calculate => Self {
                outcome: calculate(&self.form),
                ..self.clone()
            },
            // currency selection survives a reset
            Action::Reset => Self {
                currency: self.currency,
                ..Self::default()
            },
        }
    }

    pub fn loan(&self) -> Option<&Loan> {
        match &self.outcome {
            Outcome::Calculated(loan) => Some(loan),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&PaymentResult> {
        self.loan().map(Loan::get_payment)
    }

    pub fn error(&self) -> Option<&LoanError> {
        match &self.outcome {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Report for the shown result, if any. Uses the terms that produced the
    /// result rather than whatever is in the form now.
    pub fn export_report(&self, generated_at: NaiveDateTime) -> Option<Report> {
        self.loan()
            .map(|loan| Report::new(loan.clone(), self.currency, generated_at))
    }
}

fn calculate(form: &LoanForm) -> Outcome {
    match form.parse().and_then(Loan::new) {
        Ok(loan) => {
            debug!("calculated {}", loan.get_payment());
            Outcome::Calculated(loan)
        }
        Err(err) => Outcome::Failed(err),
    }
}

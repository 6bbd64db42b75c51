//! Fixed-rate installment calculator: monthly payment, totals and a
//! month-by-month amortization schedule, with a printable report.

pub mod calculator;
pub mod currency;
pub mod error;
pub mod input;
pub mod loan;
pub mod report;

pub use error::{LoanError, LoanResult};

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<loan::Loan>();
    is_normal::<loan::ScheduleEntry>();
    is_normal::<calculator::CalculatorState>();
    is_normal::<report::Report>();
}

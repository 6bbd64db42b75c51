use crate::error::{LoanError, LoanResult};
use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Installments are always paid monthly.
pub const PMTS_PER_YEAR: f64 = 12.;

/// Longest term accepted, in monthly payments (100 years).
pub const MAX_PMT_COUNT: u32 = 1200;

// tolerance for terms like 0.5833.. years that sit a hair under a whole month
const PERIOD_EPSILON: f64 = 1e-9;

/// Validated inputs of a fixed-rate loan.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoanTerms {
    pub principal: f64,
    pub years: f64,
    /// annual rate as a percentage (i.e., 7.0, 12.5)
    pub annual_rate: f64,
}

impl LoanTerms {
    pub fn new(principal: f64, years: f64, annual_rate: f64) -> LoanResult<Self> {
        let terms = Self {
            principal,
            years,
            annual_rate,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Checks the preconditions of the payment formula. Comparisons are
    /// written so that NaN fails them.
    pub fn validate(&self) -> LoanResult<()> {
        if !(self.principal > 0. && self.principal.is_finite()) {
            return Err(LoanError::InvalidRange { field: "principal" });
        }
        if !(self.years > 0. && self.years.is_finite()) {
            return Err(LoanError::InvalidRange { field: "years" });
        }
        if !(self.annual_rate >= 0. && self.annual_rate.is_finite()) {
            return Err(LoanError::InvalidRange { field: "rate" });
        }
        // the annuity formula divides by the monthly rate
        if self.annual_rate == 0. {
            return Err(LoanError::ZeroRate);
        }
        let pmt_count = get_pmt_count(&self.years);
        if pmt_count == 0 || pmt_count > MAX_PMT_COUNT {
            return Err(LoanError::InvalidRange { field: "years" });
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> f64 {
        get_monthly_rate(&self.annual_rate)
    }

    /// Number of monthly payments. Fractional months are dropped.
    pub fn pmt_count(&self) -> u32 {
        get_pmt_count(&self.years)
    }
}

/// Summary of a loan: the fixed installment and what it adds up to.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PaymentResult {
    pub monthly: f64,
    pub total: f64,
    pub interest: f64,
    pub pmt_count: u32,
}

impl fmt::Display for PaymentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "monthly payment {:.2}, total payment {:.2}, total interest {:.2}",
            self.monthly, self.total, self.interest
        )
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleEntry {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

impl ScheduleEntry {
    pub fn new(month: u32, payment: f64, principal: f64, interest: f64, balance: f64) -> Self {
        Self {
            month,
            payment,
            principal,
            interest,
            balance,
        }
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pmt number {}, payment {:.2}, principal paid {:.2}, interest paid {:.2}, ending balance {:.2}",
            self.month, self.payment, self.principal, self.interest, self.balance
        )
    }
}

/// A calculated loan. The payment is computed once and the schedule is
/// built from it, so the two always agree.
#[derive(Clone, PartialEq, Debug)]
pub struct Loan {
    pub terms: LoanTerms,
    payment: PaymentResult,
    scheduled_pmts: Vec<ScheduleEntry>,
}

impl Loan {
    pub fn new(terms: LoanTerms) -> LoanResult<Self> {
        let payment = compute_payment(&terms)?;
        Ok(Self {
            terms,
            payment,
            scheduled_pmts: schedule_from_payment(&terms, &payment),
        })
    }

    pub fn get_payment(&self) -> &PaymentResult {
        &self.payment
    }

    pub fn get_pmt_count(&self) -> usize {
        self.scheduled_pmts.len()
    }

    pub fn get_pmt_info(&self, pmt_number: usize) -> String {
        match self.get_pmt_detail(pmt_number) {
            Some(pmt) => pmt.to_string(),
            None => "No payment information.".to_string(),
        }
    }

    /// Payment numbers start at 1.
    pub fn get_pmt_detail(&self, pmt_number: usize) -> Option<&ScheduleEntry> {
        pmt_number
            .checked_sub(1)
            .and_then(|idx| self.scheduled_pmts.get(idx))
    }

    pub fn schedule(&self) -> &[ScheduleEntry] {
        &self.scheduled_pmts
    }

    pub fn total_principal_paid(&self) -> f64 {
        self.scheduled_pmts.iter().map(|pmt| pmt.principal).sum()
    }
}

/// Rounds to `dec_places`, normalizing negative zero so it never renders
/// as "-0.00".
pub fn round(amt: f64, dec_places: i32) -> f64 {
    let rounded = (amt * 10_f64.powi(dec_places)).round() / 10_f64.powi(dec_places);
    if rounded == 0. {
        0.
    } else {
        rounded
    }
}

/// Fixed monthly installment with its totals.
///
/// M = P·r / (1 − (1 + r)^(−n)) where r is the monthly rate and n the number
/// of monthly payments. No rounding is applied.
pub fn compute_payment(terms: &LoanTerms) -> LoanResult<PaymentResult> {
    terms.validate()?;

    let pmt_count = terms.pmt_count();
    let monthly = get_pmt_amount(&terms.principal, &terms.monthly_rate(), pmt_count);
    let total = monthly * f64::from(pmt_count);
    let interest = total - terms.principal;

    if !(monthly.is_finite() && total.is_finite() && interest.is_finite()) {
        debug!("non-finite payment for {:?}: {}", terms, monthly);
        return Err(LoanError::ComputationFailure);
    }

    debug!(
        "payment for {:?}: {} over {} pmts",
        terms, monthly, pmt_count
    );
    Ok(PaymentResult {
        monthly,
        total,
        interest,
        pmt_count,
    })
}

/// Month-by-month amortization of `terms`, using the same payment as
/// [`compute_payment`].
pub fn generate_schedule(terms: &LoanTerms) -> LoanResult<Vec<ScheduleEntry>> {
    let payment = compute_payment(terms)?;
    Ok(schedule_from_payment(terms, &payment))
}

fn get_monthly_rate(&annual_rate: &f64) -> f64 {
    (annual_rate / 100.) / PMTS_PER_YEAR
}

fn get_pmt_count(&years: &f64) -> u32 {
    let periods = (years * PMTS_PER_YEAR + PERIOD_EPSILON).floor();
    if periods.is_finite() && periods > 0. {
        // saturates for absurd terms, which validate() rejects
        periods as u32
    } else {
        0
    }
}

fn get_pmt_amount(&principal: &f64, &monthly_rate: &f64, pmt_count: u32) -> f64 {
    let factor = (1. + monthly_rate).powf(-f64::from(pmt_count));
    (principal * monthly_rate) / (1. - factor)
}

// Principal and balance are floored at zero for display; the running
// balance itself is left unclamped.
fn schedule_from_payment(terms: &LoanTerms, payment: &PaymentResult) -> Vec<ScheduleEntry> {
    let monthly_rate = terms.monthly_rate();
    let mut sched_pmt = Vec::with_capacity(payment.pmt_count as usize);
    let mut balance = terms.principal;

    for month in 1..=payment.pmt_count {
        let interest = balance * monthly_rate;
        let principal = payment.monthly - interest;
        balance -= principal;
        trace!(
            "pmt # {}, interest {}, principal {}, end bal {}",
            month,
            interest,
            principal,
            balance
        );

        sched_pmt.push(ScheduleEntry::new(
            month,
            payment.monthly,
            principal.max(0.),
            interest,
            balance.max(0.),
        ));
    }
    sched_pmt
}

#[cfg(test)]
mod tests {
    use super::{
        compute_payment, generate_schedule, get_pmt_count, round, Loan, LoanTerms, MAX_PMT_COUNT,
    };
    use crate::error::LoanError;
    use pretty_assertions::assert_eq;
    use test_log::test;

    const TOLERANCE: f64 = 1e-6;

    fn terms(principal: f64, years: f64, annual_rate: f64) -> LoanTerms {
        LoanTerms::new(principal, years, annual_rate).unwrap()
    }

    #[test]
    fn test_get_pmt_count() {
        assert_eq!(get_pmt_count(&1.), 12);
        assert_eq!(get_pmt_count(&15.), 180);
        assert_eq!(get_pmt_count(&1.5), 18);
        assert_eq!(get_pmt_count(&1.1), 13);
        assert_eq!(get_pmt_count(&(7. / 12.)), 7);
        assert_eq!(get_pmt_count(&0.05), 0);
        assert_eq!(get_pmt_count(&f64::NAN), 0);
    }

    #[test]
    fn test_one_year_at_twelve_percent() {
        let pmt = compute_payment(&terms(100000., 1., 12.)).unwrap();

        assert_eq!(round(pmt.monthly, 2), 8884.88);
        assert_eq!(round(pmt.total, 2), 106618.55);
        assert_eq!(round(pmt.interest, 2), 6618.55);
        assert_eq!(pmt.pmt_count, 12);
    }

    #[test]
    fn test_five_years_at_six_percent() {
        let short = compute_payment(&terms(100000., 1., 12.)).unwrap();
        let pmt = compute_payment(&terms(50000., 5., 6.)).unwrap();

        assert_eq!(round(pmt.monthly, 2), 966.64);
        assert!(pmt.monthly < short.monthly);

        let sched = generate_schedule(&terms(50000., 5., 6.)).unwrap();
        assert_eq!(sched.len(), 60);
        let principal_paid: f64 = sched.iter().map(|pmt| pmt.principal).sum();
        assert!((principal_paid - 50000.).abs() < 0.01);
    }

    #[test]
    fn test_fifteen_year_payment() {
        let pmt = compute_payment(&terms(200000., 15., 7.)).unwrap();
        assert_eq!(round(pmt.monthly, 4), 1797.6565);
        assert_eq!(pmt.pmt_count, 180);
    }

    #[test]
    fn test_totals_identity() {
        for (principal, years, annual_rate) in [
            (100000., 1., 12.),
            (50000., 5., 6.),
            (350000., 30., 6.875),
            (1200., 0.5, 19.99),
            (10000., 2.5, 0.25),
        ] {
            let loan_terms = terms(principal, years, annual_rate);
            let pmt = compute_payment(&loan_terms).unwrap();
            let periods = f64::from(loan_terms.pmt_count());

            assert!((pmt.total - pmt.monthly * periods).abs() < TOLERANCE);
            assert!((pmt.interest - (pmt.total - principal)).abs() < TOLERANCE);
            assert!(pmt.interest > 0.);
        }
    }

    #[test]
    fn test_schedule_pays_off_balance() {
        let sched = generate_schedule(&terms(100000., 1., 12.)).unwrap();

        assert_eq!(sched.len(), 12);
        let last = sched.last().unwrap();
        assert_eq!(last.month, 12);
        assert!(last.balance < TOLERANCE);
        assert_eq!(round(last.balance, 2), 0.);

        for pair in sched.windows(2) {
            assert!(pair[1].balance <= pair[0].balance);
        }
        for pmt in &sched {
            assert!((pmt.principal + pmt.interest - pmt.payment).abs() < TOLERANCE);
            assert!(pmt.balance >= 0.);
        }
    }

    #[test]
    fn test_fractional_years() {
        let loan = Loan::new(terms(10000., 1.5, 5.)).unwrap();

        assert_eq!(loan.get_pmt_count(), 18);
        assert_eq!(loan.get_payment().pmt_count, 18);
        assert_eq!(round(loan.get_payment().monthly, 2), 577.81);
        assert!(loan.schedule()[17].balance < TOLERANCE);
    }

    #[test]
    fn test_loan_schedule_matches_summary() {
        let loan = Loan::new(terms(100000., 1., 12.)).unwrap();
        let standalone = generate_schedule(&loan.terms).unwrap();

        assert_eq!(loan.schedule(), standalone.as_slice());
        for pmt in loan.schedule() {
            assert_eq!(pmt.payment, loan.get_payment().monthly);
        }
        assert!((loan.total_principal_paid() - 100000.).abs() < TOLERANCE);
    }

    #[test]
    fn test_get_pmt_info() {
        let loan = Loan::new(terms(100000., 1., 12.)).unwrap();

        assert_eq!(loan.get_pmt_info(1), "pmt number 1, payment 8884.88, principal paid 7884.88, interest paid 1000.00, ending balance 92115.12");
        assert_eq!(loan.get_pmt_info(2), "pmt number 2, payment 8884.88, principal paid 7963.73, interest paid 921.15, ending balance 84151.39");
        assert_eq!(loan.get_pmt_info(12), "pmt number 12, payment 8884.88, principal paid 8796.91, interest paid 87.97, ending balance 0.00");
        assert_eq!(loan.get_pmt_info(0), "No payment information.");
        assert_eq!(loan.get_pmt_info(13), "No payment information.");
        assert!(loan.get_pmt_detail(12).is_some());
    }

    #[test]
    fn test_rejects_invalid_terms() {
        assert_eq!(
            LoanTerms::new(10000., 2., 0.),
            Err(LoanError::ZeroRate)
        );
        assert_eq!(
            LoanTerms::new(0., 2., 5.),
            Err(LoanError::InvalidRange { field: "principal" })
        );
        assert_eq!(
            LoanTerms::new(10000., -1., 5.),
            Err(LoanError::InvalidRange { field: "years" })
        );
        assert_eq!(
            LoanTerms::new(10000., 2., -5.),
            Err(LoanError::InvalidRange { field: "rate" })
        );
        assert_eq!(
            LoanTerms::new(f64::NAN, 2., 5.),
            Err(LoanError::InvalidRange { field: "principal" })
        );
        // shorter than a month
        assert_eq!(
            LoanTerms::new(10000., 0.05, 5.),
            Err(LoanError::InvalidRange { field: "years" })
        );
        assert_eq!(
            LoanTerms::new(10000., f64::from(MAX_PMT_COUNT) / 12. + 1., 5.),
            Err(LoanError::InvalidRange { field: "years" })
        );
    }

    #[test]
    fn test_engine_rechecks_zero_rate() {
        // fields are public, so the engine must not trust the constructor
        let loan_terms = LoanTerms {
            principal: 10000.,
            years: 2.,
            annual_rate: 0.,
        };
        assert_eq!(compute_payment(&loan_terms), Err(LoanError::ZeroRate));
        assert_eq!(generate_schedule(&loan_terms), Err(LoanError::ZeroRate));
        assert_eq!(Loan::new(loan_terms), Err(LoanError::ZeroRate));
    }

    #[test]
    fn test_vanishing_rate_is_computation_failure() {
        // 1 + r rounds to 1, so the denominator collapses to zero
        let loan_terms = terms(10000., 2., 1e-300);
        assert_eq!(
            compute_payment(&loan_terms),
            Err(LoanError::ComputationFailure)
        );
    }

    #[test]
    fn test_round() {
        assert_eq!(round(8884.87886783416, 2), 8884.88);
        assert_eq!(round(1797.65654170485, 4), 1797.6565);
        assert_eq!(round(-0., 2).to_string(), "0");
        assert_eq!(round(-0.001, 2).to_string(), "0");
        assert!(!round(-0.004999, 2).is_sign_negative());
    }
}

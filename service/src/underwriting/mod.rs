//! Underwriting of loan requests: installment math, credit scoring and the
//! approval decision.
//!
//! Everything here is a pure function of its inputs. The evaluation [`Date`]
//! is always passed explicitly, so identical inputs always produce identical
//! outputs.
//!
//! [`Date`]: common::Date

pub mod amortization;
pub mod eligibility;
pub mod score;

use common::{Money, Percent};
use derive_more::{Display, Error};
use rust_decimal::Decimal;

use crate::domain::loan::Tenure;

pub use self::{
    amortization::installment,
    eligibility::{decide, Decision, Rejection, Tier},
    score::{score, Breakdown, CreditScore},
};

/// Number of decimal places a requested interest rate may have.
pub const RATE_SCALE: u32 = 2;

/// Validated request for a new loan.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Request {
    /// Requested principal.
    amount: Money,

    /// Requested annual interest rate.
    annual_rate: Percent,

    /// Requested [`Tenure`].
    tenure: Tenure,
}

impl Request {
    /// Creates a new [`Request`] out of raw values.
    ///
    /// # Errors
    ///
    /// With [`InvalidRequest`] if:
    /// - the `amount` is not positive or doesn't fit [`Money`] precision
    ///   (see [`Money::fits_precision()`]);
    /// - the `annual_rate` is outside `0..=100` or has more than
    ///   [`RATE_SCALE`] decimal places;
    /// - the `tenure_months` are outside `1..=`[`Tenure::MAX_MONTHS`].
    pub fn new(
        amount: Decimal,
        annual_rate: Decimal,
        tenure_months: i64,
    ) -> Result<Self, InvalidRequest> {
        use InvalidRequest as E;

        let amount = Money::new(amount);
        if !amount.is_positive() {
            return Err(E::NonPositiveAmount(amount));
        }
        if !amount.fits_precision() {
            return Err(E::AmountOutOfRange(amount));
        }
        let annual_rate = Percent::new(annual_rate)
            .filter(|_| annual_rate.normalize().scale() <= RATE_SCALE)
            .ok_or(E::RateOutOfRange(annual_rate))?;
        let tenure = u32::try_from(tenure_months)
            .ok()
            .and_then(Tenure::new)
            .ok_or(E::TenureOutOfRange(tenure_months))?;

        Ok(Self {
            amount,
            annual_rate,
            tenure,
        })
    }

    /// Returns the requested principal.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the requested annual interest rate.
    #[must_use]
    pub fn annual_rate(&self) -> Percent {
        self.annual_rate
    }

    /// Returns the requested [`Tenure`].
    #[must_use]
    pub fn tenure(&self) -> Tenure {
        self.tenure
    }
}

/// Error of building a [`Request`] out of malformed values.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
pub enum InvalidRequest {
    /// Loan amount is zero or negative.
    #[display("loan amount must be positive, got {_0}")]
    NonPositiveAmount(#[error(not(source))] Money),

    /// Loan amount has too many integer digits or decimal places.
    #[display(
        "loan amount must have at most 13 integer digits and 2 decimal \
         places, got {_0}"
    )]
    AmountOutOfRange(#[error(not(source))] Money),

    /// Interest rate is negative, exceeds `100%` or is too precise.
    #[display(
        "interest rate must be in `0..=100` range with at most 2 decimal \
         places, got {_0}"
    )]
    RateOutOfRange(#[error(not(source))] Decimal),

    /// Tenure is not a positive number of months or is too long.
    #[display("tenure must be in `1..=600` months range, got {_0}")]
    TenureOutOfRange(#[error(not(source))] i64),
}

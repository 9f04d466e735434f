//! Approval decision on a loan [`Request`].

use common::{Date, Money, Percent};
use derive_more::Display;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Customer, Loan};

use super::{amortization::installment, score::score, CreditScore, Request};

/// Share of the monthly salary all the installments of a [`Customer`] must
/// fit into.
const AFFORDABLE_SALARY_SHARE: Decimal =
    Decimal::from_parts(5, 0, 0, false, 1);

/// Risk tier of a [`Customer`] derived from its [`CreditScore`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    /// [`CreditScore`] above `50`: approved at the requested rate.
    Prime,

    /// [`CreditScore`] in `31..=50`: approved at `12%` or more.
    NearPrime,

    /// [`CreditScore`] in `11..=30`: approved at `16%` or more.
    Subprime,

    /// [`CreditScore`] of `10` or less: never approved.
    Ineligible,
}

impl Tier {
    /// Determines the [`Tier`] of the provided [`CreditScore`].
    #[must_use]
    pub fn of(score: CreditScore) -> Self {
        match score.value() {
            51.. => Self::Prime,
            31..=50 => Self::NearPrime,
            11..=30 => Self::Subprime,
            0..=10 => Self::Ineligible,
        }
    }

    /// Returns the lowest interest rate a loan of this [`Tier`] may be
    /// approved at, if any.
    #[must_use]
    pub fn rate_floor(self) -> Option<Percent> {
        match self {
            Self::NearPrime => Some(Percent::whole(12)),
            Self::Subprime => Some(Percent::whole(16)),
            Self::Prime | Self::Ineligible => None,
        }
    }

    /// Indicates whether loans of this [`Tier`] may be approved at all.
    #[must_use]
    pub fn is_eligible(self) -> bool {
        !matches!(self, Self::Ineligible)
    }
}

/// Reason of a loan [`Request`] being rejected.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rejection {
    /// Installments would exceed half of the monthly salary.
    #[display("EMI exceeds 50% of monthly salary")]
    Unaffordable,

    /// [`CreditScore`] is too low for any approval.
    #[display("credit score too low")]
    CreditScoreTooLow,
}

/// Outcome of a loan [`Request`] evaluation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Decision {
    /// Interest rate the loan is (or would be) issued at.
    ///
    /// Equals the requested rate unless the [`Tier`] raised it to its floor.
    pub final_rate: Percent,

    /// Monthly installment at the [`Decision::final_rate`].
    pub installment: Money,

    /// [`CreditScore`] the [`Decision`] is based on.
    pub score: CreditScore,

    /// [`Tier`] of the [`Decision::score`].
    pub tier: Tier,

    /// Reason of the rejection, [`None`] if approved.
    pub rejection: Option<Rejection>,
}

impl Decision {
    /// Indicates whether the loan is approved.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Decides on the loan [`Request`] of the [`Customer`] with the provided
/// [`Loan`] history, evaluated on the given [`Date`].
///
/// Affordability is checked first, against the installment at the
/// requested rate, and overrides any [`Tier`]. Approved requests are then
/// corrected up to the [`Tier::rate_floor()`], never down, and the
/// installment is recalculated only if the rate was raised.
#[must_use]
pub fn decide(
    customer: &Customer,
    loans: &[Loan],
    request: &Request,
    on: Date,
) -> Decision {
    let score = score(customer, loans, on);
    let tier = Tier::of(score);
    let requested_rate = request.annual_rate();
    let requested_emi =
        installment(request.amount(), requested_rate, request.tenure());

    let reject = |rejection| Decision {
        final_rate: requested_rate,
        installment: requested_emi,
        score,
        tier,
        rejection: Some(rejection),
    };

    let current_emis = loans
        .iter()
        .filter(|l| l.is_active(on))
        .map(|l| l.monthly_installment)
        .sum::<Money>();
    if current_emis + requested_emi
        > customer.monthly_salary * AFFORDABLE_SALARY_SHARE
    {
        return reject(Rejection::Unaffordable);
    }
    if !tier.is_eligible() {
        return reject(Rejection::CreditScoreTooLow);
    }

    let final_rate = tier
        .rate_floor()
        .map_or(requested_rate, |floor| floor.max(requested_rate));
    let installment = if final_rate > requested_rate {
        installment(request.amount(), final_rate, request.tenure())
    } else {
        requested_emi
    };

    Decision {
        final_rate,
        installment,
        score,
        tier,
        rejection: None,
    }
}

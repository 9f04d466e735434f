//! Eligibility-related definitions.

use common::{Money, Percent};
use serde::Serialize;
use service::{
    domain::{customer, loan},
    underwriting::{CreditScore, Decision, Request, Tier},
};

/// Outcome of a loan eligibility check.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Eligibility {
    /// ID of the checked customer.
    pub customer_id: customer::Id,

    /// Whether the loan would be approved.
    pub approval: bool,

    /// Requested annual interest rate.
    pub interest_rate: Percent,

    /// Annual interest rate the loan would be issued at.
    pub corrected_interest_rate: Percent,

    /// Requested tenure.
    pub tenure: loan::Tenure,

    /// Monthly installment at the corrected interest rate.
    pub monthly_installment: Money,

    /// Credit score the decision is based on.
    pub credit_score: CreditScore,

    /// Risk tier of the credit score.
    pub tier: Tier,
}

impl Eligibility {
    /// Builds a new [`Eligibility`] view of the [`Decision`] made on the
    /// [`Request`].
    #[must_use]
    pub fn new(
        customer_id: customer::Id,
        request: &Request,
        decision: &Decision,
    ) -> Self {
        Self {
            customer_id,
            approval: decision.is_approved(),
            interest_rate: request.annual_rate(),
            corrected_interest_rate: decision.final_rate,
            tenure: request.tenure(),
            monthly_installment: decision.installment,
            credit_score: decision.score,
            tier: decision.tier,
        }
    }
}

//! Reporting definitions.

use common::Date;
use serde::Serialize;
use service::{
    domain::customer,
    query::report::credit,
    underwriting::{Breakdown, CreditScore},
};

/// Explained credit score of a customer.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CreditReport {
    /// ID of the customer.
    pub customer_id: customer::Id,

    /// Credit score of the customer.
    pub credit_score: CreditScore,

    /// [`Date`] the score is evaluated on.
    pub evaluated_on: Date,

    /// Points per score component, absent without loan history.
    pub breakdown: Option<Breakdown>,
}

impl CreditReport {
    /// Builds a new [`CreditReport`] view of the [`credit::Output`].
    #[must_use]
    pub fn new(customer_id: customer::Id, output: credit::Output) -> Self {
        let credit::Output {
            evaluated_on,
            score,
            breakdown,
        } = output;

        Self {
            customer_id,
            credit_score: score,
            evaluated_on,
            breakdown,
        }
    }
}

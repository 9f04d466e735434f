//! JSON API definitions.

pub mod customer;
pub mod eligibility;
pub mod loan;
mod mutation;
mod query;
pub mod report;

use serde::Serialize;

pub use self::{
    eligibility::Eligibility, mutation::Mutation, query::Query,
    report::CreditReport,
};

/// Response of the API.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Registered customer.
    Registered(customer::Registered),

    /// Outcome of an eligibility check.
    Eligibility(Eligibility),

    /// Outcome of a loan creation.
    Created(loan::Created),

    /// Single loan.
    Loan(loan::Detail),

    /// Loans of a customer.
    Loans(Vec<loan::Item>),

    /// Explained credit score.
    CreditReport(CreditReport),
}

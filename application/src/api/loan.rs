//! [`Loan`]-related definitions.

use common::{Money, Percent};
use serde::Serialize;
use service::{
    command::create_loan,
    domain::{self, customer, loan},
};

use crate::api;

/// Outcome of a loan creation attempt.
#[derive(Clone, Debug, Serialize)]
pub struct Created {
    /// ID of the created [`Loan`], if approved.
    ///
    /// [`Loan`]: domain::Loan
    pub loan_id: Option<loan::Id>,

    /// ID of the customer requested the loan.
    pub customer_id: customer::Id,

    /// Whether the loan is approved.
    pub loan_approved: bool,

    /// Explanation of the rejection, empty if approved.
    pub message: String,

    /// Monthly installment of the loan.
    pub monthly_installment: Money,
}

impl Created {
    /// Builds a new [`Created`] view of the [`create_loan::Output`].
    #[must_use]
    pub fn new(customer_id: customer::Id, output: create_loan::Output) -> Self {
        let create_loan::Output { decision, loan } = output;

        Self {
            loan_id: loan.map(|l| l.id),
            customer_id,
            loan_approved: decision.is_approved(),
            message: decision
                .rejection
                .map(|r| format!("Loan not approved: {r}"))
                .unwrap_or_default(),
            monthly_installment: decision.installment,
        }
    }
}

/// Single [`Loan`] with its customer.
///
/// [`Loan`]: domain::Loan
#[derive(Clone, Debug, Serialize)]
pub struct Detail {
    /// ID of the [`Loan`].
    ///
    /// [`Loan`]: domain::Loan
    pub loan_id: loan::Id,

    /// Borrower of the [`Loan`].
    ///
    /// [`Loan`]: domain::Loan
    pub customer: api::customer::Customer,

    /// Principal.
    pub loan_amount: Money,

    /// Annual interest rate.
    pub interest_rate: Percent,

    /// Monthly installment.
    pub monthly_repayment: Money,

    /// Duration in months.
    pub tenure: loan::Tenure,
}

impl Detail {
    /// Builds a new [`Detail`] view of the `loan` issued to the `customer`.
    #[must_use]
    pub fn new(loan: &domain::Loan, customer: domain::Customer) -> Self {
        Self {
            loan_id: loan.id,
            customer: customer.into(),
            loan_amount: loan.amount,
            interest_rate: loan.interest_rate,
            monthly_repayment: loan.monthly_installment,
            tenure: loan.tenure,
        }
    }
}

/// [`Loan`] as listed among the loans of a customer.
///
/// [`Loan`]: domain::Loan
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Item {
    /// ID of the [`Loan`].
    ///
    /// [`Loan`]: domain::Loan
    pub loan_id: loan::Id,

    /// Principal.
    pub loan_amount: Money,

    /// Annual interest rate.
    pub interest_rate: Percent,

    /// Monthly installment.
    pub monthly_repayment: Money,

    /// Number of installments left to pay.
    pub repayments_left: u32,
}

impl From<domain::Loan> for Item {
    fn from(loan: domain::Loan) -> Self {
        Self {
            loan_id: loan.id,
            loan_amount: loan.amount,
            interest_rate: loan.interest_rate,
            monthly_repayment: loan.monthly_installment,
            repayments_left: loan.repayments_left(),
        }
    }
}

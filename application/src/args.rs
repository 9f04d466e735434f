//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use service::domain::{customer, loan};

/// Credit approval engine deciding on loan requests of customers.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to run against the ledger.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Registers a new customer.
    Register {
        /// First name of the customer.
        #[arg(long)]
        first_name: customer::Name,

        /// Last name of the customer.
        #[arg(long)]
        last_name: customer::Name,

        /// Age of the customer, at least 18.
        #[arg(long)]
        age: customer::Age,

        /// Monthly income of the customer.
        #[arg(long)]
        monthly_income: common::Money,

        /// Phone number of the customer.
        #[arg(long)]
        phone_number: customer::Phone,
    },

    /// Checks whether a customer is eligible for a loan without creating it.
    CheckEligibility(LoanRequest),

    /// Creates a new loan if the customer is eligible for it.
    CreateLoan(LoanRequest),

    /// Shows a single loan with its customer.
    ViewLoan {
        /// ID of the loan.
        loan_id: loan::Id,
    },

    /// Lists all the loans of a customer.
    ViewLoans {
        /// ID of the customer.
        customer_id: customer::Id,
    },

    /// Explains the credit score of a customer.
    CreditReport {
        /// ID of the customer.
        customer_id: customer::Id,
    },
}

impl Command {
    /// Indicates whether this [`Command`] changes the ledger.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Register { .. } | Self::CreateLoan(_))
    }
}

/// Requested terms of a loan.
#[derive(Clone, Copy, Debug, clap::Args)]
pub struct LoanRequest {
    /// ID of the customer requesting the loan.
    #[arg(long)]
    pub customer_id: customer::Id,

    /// Principal of the loan.
    #[arg(long, allow_hyphen_values = true)]
    pub loan_amount: Decimal,

    /// Annual interest rate in percents.
    #[arg(long, allow_hyphen_values = true)]
    pub interest_rate: Decimal,

    /// Duration of the loan in months.
    #[arg(long, allow_hyphen_values = true)]
    pub tenure: i64,
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::{Args, Command};

    #[test]
    fn parses_loan_request() {
        let args = Args::try_parse_from([
            "application",
            "create-loan",
            "--customer-id",
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "--loan-amount",
            "100000",
            "--interest-rate",
            "10.5",
            "--tenure",
            "12",
        ])
        .unwrap();

        assert_eq!(args.config, "config.toml");
        assert!(args.command.is_mutation());
        let Command::CreateLoan(req) = args.command else {
            panic!("expected `create-loan`, got {:?}", args.command);
        };
        assert_eq!(req.loan_amount.to_string(), "100000");
        assert_eq!(req.interest_rate.to_string(), "10.5");
        assert_eq!(req.tenure, 12);
    }

    #[test]
    fn passes_negative_numbers_through() {
        let args = Args::try_parse_from([
            "application",
            "check-eligibility",
            "--customer-id",
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "--loan-amount",
            "-5",
            "--interest-rate",
            "10",
            "--tenure",
            "-1",
        ])
        .unwrap();

        assert!(!args.command.is_mutation());
        let Command::CheckEligibility(req) = args.command else {
            panic!("expected `check-eligibility`, got {:?}", args.command);
        };
        assert!(req.loan_amount.is_sign_negative());
        assert_eq!(req.tenure, -1);
    }

    #[test]
    fn rejects_underage_customer() {
        let res = Args::try_parse_from([
            "application",
            "register",
            "--first-name",
            "John",
            "--last-name",
            "Doe",
            "--age",
            "17",
            "--monthly-income",
            "50000",
            "--phone-number",
            "9876543210",
        ]);

        assert!(res.is_err());
    }
}

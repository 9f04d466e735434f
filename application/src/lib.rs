//! Application provides command-line API for interacting with the
//! [`Service`].

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod api;
pub mod args;
pub mod config;
pub mod error;

// Used in binary.
use serde_json as _;
use tokio as _;
use tracing_subscriber as _;

pub use self::{
    api::Response,
    args::Args,
    config::Config,
    error::{AsError, Error},
};

/// [`Service`] with filled infrastructure dependencies.
///
/// [`Service`]: service::Service
pub type Service = service::Service<service::infra::Memory>;

/// Runs the provided [`args::Command`] against the [`Service`].
///
/// # Errors
///
/// If the [`args::Command`] fails. A rejected loan request is not an error.
pub async fn run(svc: &Service, cmd: args::Command) -> Result<Response, Error> {
    use args::Command as C;

    Ok(match cmd {
        C::Register {
            first_name,
            last_name,
            age,
            monthly_income,
            phone_number,
        } => Response::Registered(
            api::Mutation::register(
                first_name,
                last_name,
                age,
                monthly_income,
                phone_number,
                svc,
            )
            .await?,
        ),
        C::CheckEligibility(req) => Response::Eligibility(
            api::Query::check_eligibility(req, svc).await?,
        ),
        C::CreateLoan(req) => {
            Response::Created(api::Mutation::create_loan(req, svc).await?)
        }
        C::ViewLoan { loan_id } => {
            Response::Loan(api::Query::loan(loan_id, svc).await?)
        }
        C::ViewLoans { customer_id } => {
            Response::Loans(api::Query::loans(customer_id, svc).await?)
        }
        C::CreditReport { customer_id } => Response::CreditReport(
            api::Query::credit_report(customer_id, svc).await?,
        ),
    })
}

//! API [`Mutation`]s definitions.

use common::Money;
use service::{
    command,
    domain::customer,
    underwriting::Request,
    Command as _,
};

use crate::{api, args::LoanRequest, AsError, Error, Service};

/// Root of all API mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "API mutation";

    /// Registers a new customer with the provided profile.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NEGATIVE_SALARY` - the provided monthly income is negative;
    /// - `INVALID_REQUEST` - the provided monthly income is too large or too
    ///   precise.
    #[tracing::instrument(
        skip_all,
        fields(
            age = %age,
            api.name = "register",
            monthly_income = %monthly_income,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn register(
        first_name: customer::Name,
        last_name: customer::Name,
        age: customer::Age,
        monthly_income: Money,
        phone_number: customer::Phone,
        svc: &Service,
    ) -> Result<api::customer::Registered, Error> {
        svc.execute(command::RegisterCustomer {
            first_name,
            last_name,
            age,
            monthly_salary: monthly_income,
            phone: phone_number,
        })
        .await
        .map_err(AsError::into_error)
        .map(Into::into)
    }

    /// Creates a new loan if the customer is eligible for it.
    ///
    /// A rejected request is not an error: it is reported in the returned
    /// view.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_REQUEST` - the loan terms are malformed;
    /// - `CUSTOMER_NOT_FOUND` - the customer with the provided ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            api.name = "createLoan",
            customer_id = %req.customer_id,
            interest_rate = %req.interest_rate,
            loan_amount = %req.loan_amount,
            otel.name = Self::SPAN_NAME,
            tenure = req.tenure,
        ),
    )]
    pub async fn create_loan(
        req: LoanRequest,
        svc: &Service,
    ) -> Result<api::loan::Created, Error> {
        let request =
            Request::new(req.loan_amount, req.interest_rate, req.tenure)
                .map_err(AsError::into_error)?;

        svc.execute(command::CreateLoan {
            customer_id: req.customer_id,
            request,
        })
        .await
        .map_err(AsError::into_error)
        .map(|out| api::loan::Created::new(req.customer_id, out))
    }
}

//! API [`Query`]s definitions.

use service::{
    domain::{customer, loan},
    query,
    underwriting::Request,
    Query as _,
};

use crate::{
    api,
    args::LoanRequest,
    error::{CustomerError, LoanError},
    AsError, Error, Service,
};

/// Root of all API queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    const SPAN_NAME: &'static str = "API query";

    /// Checks whether the customer is eligible for the requested loan.
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
            api.name = "checkEligibility",
            customer_id = %req.customer_id,
            interest_rate = %req.interest_rate,
            loan_amount = %req.loan_amount,
            otel.name = Self::SPAN_NAME,
            tenure = req.tenure,
        ),
    )]
    pub async fn check_eligibility(
        req: LoanRequest,
        svc: &Service,
    ) -> Result<api::Eligibility, Error> {
        let request =
            Request::new(req.loan_amount, req.interest_rate, req.tenure)
                .map_err(AsError::into_error)?;

        svc.execute(query::CheckEligibility {
            customer_id: req.customer_id,
            request,
        })
        .await
        .map_err(AsError::into_error)
        .map(|d| api::Eligibility::new(req.customer_id, &request, &d))
    }

    /// Returns the loan with the specified ID along with its customer.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LOAN_NOT_FOUND` - the loan with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            api.name = "loan",
            loan_id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn loan(
        id: loan::Id,
        svc: &Service,
    ) -> Result<api::loan::Detail, Error> {
        let loan = svc
            .execute(query::loan::ById::by(id))
            .await
            .map_err(AsError::into_error)?
            .ok_or_else(|| Error::from(LoanError::NotFound))?;
        let customer = svc
            .execute(query::customer::ById::by(loan.customer_id))
            .await
            .map_err(AsError::into_error)?
            .ok_or_else(|| Error::from(CustomerError::NotFound))?;

        Ok(api::loan::Detail::new(&loan, customer))
    }

    /// Lists all the loans of the customer with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CUSTOMER_NOT_FOUND` - the customer with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            api.name = "loans",
            customer_id = %customer_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn loans(
        customer_id: customer::Id,
        svc: &Service,
    ) -> Result<Vec<api::loan::Item>, Error> {
        _ = svc
            .execute(query::customer::ById::by(customer_id))
            .await
            .map_err(AsError::into_error)?
            .ok_or_else(|| Error::from(CustomerError::NotFound))?;

        Ok(svc
            .execute(query::loans::ByCustomer::by(customer_id))
            .await
            .map_err(AsError::into_error)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Explains the credit score of the customer with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CUSTOMER_NOT_FOUND` - the customer with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            api.name = "creditReport",
            customer_id = %customer_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn credit_report(
        customer_id: customer::Id,
        svc: &Service,
    ) -> Result<api::CreditReport, Error> {
        svc.execute(query::CreditReport { customer_id })
            .await
            .map_err(AsError::into_error)
            .map(|out| api::CreditReport::new(customer_id, out))
    }
}

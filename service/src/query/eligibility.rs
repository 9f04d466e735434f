//! [`CheckEligibility`] definition.

use common::operations::{By, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{customer, Customer, Loan},
    infra::{database, Database},
    underwriting::{self, Decision, Request},
    Query, Service,
};

/// [`Query`] deciding on a loan [`Request`] of a [`Customer`] without
/// creating anything.
#[derive(Clone, Copy, Debug)]
pub struct CheckEligibility {
    /// ID of the [`Customer`] to check.
    pub customer_id: customer::Id,

    /// Requested terms of a loan.
    pub request: Request,
}

impl<Db> Query<CheckEligibility> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Customer>, customer::Id>>,
            Ok = Option<Customer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Loan>, customer::Id>>,
            Ok = Vec<Loan>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Decision;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        CheckEligibility {
            customer_id,
            request,
        }: CheckEligibility,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        // Read-only: observes a single state and is never committed.
        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let customer = tx
            .execute(Select(By::<Option<Customer>, _>::new(customer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CustomerNotFound(customer_id))
            .map_err(tracerr::wrap!())?;
        let loans = tx
            .execute(Select(By::<Vec<Loan>, _>::new(customer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let decision = underwriting::decide(
            &customer,
            &loans,
            &request,
            self.evaluation_date(),
        );
        log::debug!(
            "eligibility of `Customer` `{customer_id}`: score {}, tier {}, \
             rate {}%, installment {}",
            decision.score,
            decision.tier,
            decision.final_rate,
            decision.installment,
        );

        Ok(decision)
    }
}

/// Error of [`CheckEligibility`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Customer`] with the provided ID doesn't exist.
    #[display("`Customer(id: {_0})` doesn't exist")]
    CustomerNotFound(#[error(not(source))] customer::Id),
}

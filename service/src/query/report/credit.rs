//! [`CreditReport`] definition.

use common::{
    operations::{By, Select, Transact, Transacted},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{customer, Customer, Loan},
    infra::{database, Database},
    underwriting::{Breakdown, CreditScore},
    Query, Service,
};

/// [`Query`] to explain the [`CreditScore`] of a [`Customer`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CreditReport {
    /// ID of the [`Customer`] to report on.
    pub customer_id: customer::Id,
}

/// Output of the [`CreditReport`] [`Query`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Output {
    /// [`Date`] the report is evaluated on.
    pub evaluated_on: Date,

    /// Resulting [`CreditScore`].
    pub score: CreditScore,

    /// Components of the [`CreditScore`].
    ///
    /// [`None`] if the [`Customer`] has no [`Loan`] history, so the
    /// [`CreditScore::NEUTRAL`] is used.
    pub breakdown: Option<Breakdown>,
}

impl<Db> Query<CreditReport> for Service<Db>
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
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        CreditReport { customer_id }: CreditReport,
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

        let evaluated_on = self.evaluation_date();
        let breakdown = Breakdown::of(&customer, &loans, evaluated_on);

        Ok(Output {
            evaluated_on,
            score: breakdown.map_or(CreditScore::NEUTRAL, Breakdown::total),
            breakdown,
        })
    }
}

/// Error of [`CreditReport`] [`Query`] execution.
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

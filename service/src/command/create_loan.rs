//! [`Command`] for creating a new [`Loan`].

use common::operations::{
    By, Commit, Insert, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{customer, loan, Customer, Loan},
    infra::{database, Database},
    underwriting::{self, Decision, Request},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Loan`] if the [`Customer`] is eligible
/// for it.
#[derive(Clone, Copy, Debug)]
pub struct CreateLoan {
    /// ID of the [`Customer`] requesting a new [`Loan`].
    pub customer_id: customer::Id,

    /// Requested terms of a new [`Loan`].
    pub request: Request,
}

/// Result of the [`CreateLoan`] [`Command`] execution.
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Decision`] made on the [`Request`].
    pub decision: Decision,

    /// Created [`Loan`], if the [`Request`] is approved.
    pub loan: Option<Loan>,
}

impl<Db> Command<CreateLoan> for Service<Db>
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
        > + Database<Insert<Loan>, Err = Traced<database::Error>>
        + Database<Update<Customer>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateLoan) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateLoan {
            customer_id,
            request,
        } = cmd;
        let today = self.evaluation_date();

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut customer = tx
            .execute(Select(By::<Option<Customer>, _>::new(customer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CustomerNotFound(customer_id))
            .map_err(tracerr::wrap!())?;
        let loans = tx
            .execute(Select(By::<Vec<Loan>, _>::new(customer_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let decision =
            underwriting::decide(&customer, &loans, &request, today);
        if let Some(rejection) = decision.rejection {
            log::info!(
                "rejected `Loan` request of `Customer` `{customer_id}`: \
                 {rejection}",
            );
            return Ok(Output {
                decision,
                loan: None,
            });
        }

        let start_date = today.coerce();
        let end_date = today
            .checked_add_months(request.tenure().months())
            .ok_or(E::DateOutOfRange)
            .map_err(tracerr::wrap!())?
            .coerce();
        let loan = Loan {
            id: loan::Id::new(),
            customer_id,
            amount: request.amount(),
            tenure: request.tenure(),
            interest_rate: decision.final_rate,
            monthly_installment: decision.installment,
            emis_paid_on_time: 0,
            start_date,
            end_date,
        };
        tx.execute(Insert(loan.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        customer.current_debt += loan.amount;
        tx.execute(Update(customer))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "approved `Loan` `{}` of `Customer` `{customer_id}` at {}% \
             with monthly installment {}",
            loan.id,
            loan.interest_rate,
            loan.monthly_installment,
        );

        Ok(Output {
            decision,
            loan: Some(loan),
        })
    }
}

/// Error of [`CreateLoan`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Customer`] with the provided ID doesn't exist.
    #[display("`Customer(id: {_0})` doesn't exist")]
    CustomerNotFound(#[error(not(source))] customer::Id),

    /// [`Loan`] would end beyond the supported calendar.
    #[display("`Loan` end date is out of range")]
    DateOutOfRange,
}

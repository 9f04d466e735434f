//! [`Database`] implementations.

use common::operations::{By, Commit, Insert, Select, Transact, Update};
use tracerr::Traced;

use crate::{
    domain::{customer, loan, Customer, Loan},
    infra::{database, Database},
};

use super::{Change, Connection, Memory, NonTx, Tx};

impl Database<Transact> for Memory<NonTx> {
    type Ok = Memory<Tx>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(Memory(Tx::from_non_tx(&self.0).await))
    }
}

impl Database<Transact> for Memory<Tx> {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        self.commit()
            .await
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl<C> Database<Select<By<Option<Customer>, customer::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Customer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Customer>, customer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.read(|s| s.customer(id).cloned()).await)
    }
}

impl<C> Database<Select<By<Option<Loan>, loan::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Option<Loan>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Loan>, loan::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.read(|s| s.loan(id).cloned()).await)
    }
}

impl<C> Database<Select<By<Vec<Loan>, customer::Id>>> for Memory<C>
where
    C: Connection,
{
    type Ok = Vec<Loan>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Loan>, customer::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.read(|s| s.loans_of(id)).await)
    }
}

impl<C> Database<Insert<Customer>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(customer): Insert<Customer>,
    ) -> Result<Self::Ok, Self::Err> {
        self.apply(Change::InsertCustomer(customer))
            .await
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl<C> Database<Update<Customer>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(customer): Update<Customer>,
    ) -> Result<Self::Ok, Self::Err> {
        self.apply(Change::UpdateCustomer(customer))
            .await
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl<C> Database<Insert<Loan>> for Memory<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(loan): Insert<Loan>,
    ) -> Result<Self::Ok, Self::Err> {
        self.apply(Change::InsertLoan(loan))
            .await
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

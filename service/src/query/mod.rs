//! [`Query`] definition.

pub mod customer;
pub mod eligibility;
pub mod loan;
pub mod loans;
pub mod report;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{database, Database},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

pub use self::{eligibility::CheckEligibility, report::CreditReport};

/// [`Query`] [`Select`]ing a `T`ype from a [`Database`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatabaseQuery<T>(T);

impl<W, B> DatabaseQuery<By<W, B>> {
    /// Creates a new [`DatabaseQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, W, B> Query<DatabaseQuery<By<W, B>>> for Service<Db>
where
    Db: Database<Select<By<W, B>>, Ok = W, Err = Traced<database::Error>>,
{
    type Ok = W;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        DatabaseQuery(by): DatabaseQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(all(test, feature = "memory"))]
mod spec {
    use common::operations::Insert;

    use crate::{
        domain::{loan, Customer},
        infra::{Database as _, Memory},
        query,
        underwriting::fixture,
        Config, Service,
    };

    #[tokio::test]
    async fn selects_from_database() {
        let svc = Service::new(Config::default(), Memory::default());
        let c = fixture::customer("50000");
        let l =
            fixture::loan(&c, "1000", (1, 12), ("2025-01-10", "2026-01-10"));
        svc.database().execute(Insert(c.clone())).await.unwrap();
        svc.database().execute(Insert(l.clone())).await.unwrap();

        let customer: Option<Customer> = svc
            .execute(query::customer::ById::by(c.id))
            .await
            .unwrap();
        assert_eq!(customer, Some(c.clone()));

        let loan = svc.execute(query::loan::ById::by(l.id)).await.unwrap();
        assert_eq!(loan, Some(l.clone()));
        let missing = svc
            .execute(query::loan::ById::by(loan::Id::new()))
            .await
            .unwrap();
        assert_eq!(missing, None);

        let loans = svc
            .execute(query::loans::ByCustomer::by(c.id))
            .await
            .unwrap();
        assert_eq!(loans, vec![l]);
    }
}

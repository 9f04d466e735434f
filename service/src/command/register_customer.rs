//! [`Command`] for registering a new [`Customer`].

use common::{
    operations::{Commit, Insert, Transact, Transacted},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::customer::{Age, Name, Phone};
use crate::{
    domain::{customer, Customer},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`Customer`].
#[derive(Clone, Debug)]
pub struct RegisterCustomer {
    /// First [`Name`] of a new [`Customer`].
    pub first_name: customer::Name,

    /// Last [`Name`] of a new [`Customer`].
    pub last_name: customer::Name,

    /// [`Age`] of a new [`Customer`].
    pub age: customer::Age,

    /// Monthly income of a new [`Customer`].
    pub monthly_salary: Money,

    /// [`Phone`] number of a new [`Customer`].
    pub phone: customer::Phone,
}

impl<Db> Command<RegisterCustomer> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Customer>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Customer;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RegisterCustomer,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterCustomer {
            first_name,
            last_name,
            age,
            monthly_salary,
            phone,
        } = cmd;

        if monthly_salary < Money::ZERO {
            return Err(tracerr::new!(E::NegativeSalary(monthly_salary)));
        }
        if !monthly_salary.fits_precision() {
            return Err(tracerr::new!(E::SalaryOutOfRange(monthly_salary)));
        }

        let customer = Customer {
            id: customer::Id::new(),
            first_name,
            last_name,
            age,
            monthly_salary,
            approved_limit: customer::approved_limit(monthly_salary),
            phone,
            current_debt: Money::ZERO,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(customer.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "registered `Customer` `{}` with approved limit {}",
            customer.id,
            customer.approved_limit,
        );

        Ok(customer)
    }
}

/// Error of [`RegisterCustomer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Monthly salary is negative.
    #[display("monthly salary must not be negative, got {_0}")]
    NegativeSalary(#[error(not(source))] Money),

    /// Monthly salary has too many integer digits or decimal places.
    #[display(
        "monthly salary must have at most 13 integer digits and 2 decimal \
         places, got {_0}"
    )]
    SalaryOutOfRange(#[error(not(source))] Money),
}

#[cfg(all(test, feature = "memory"))]
mod spec {
    use common::operations::{By, Select};

    use crate::{
        domain::{
            customer::{Age, Name, Phone},
            Customer,
        },
        infra::{Database as _, Memory},
        Config, Service,
    };

    use super::{ExecutionError, RegisterCustomer};

    fn register(monthly_salary: &str) -> RegisterCustomer {
        RegisterCustomer {
            first_name: Name::new("Jane").unwrap(),
            last_name: Name::new("Roe").unwrap(),
            age: Age::new(42).unwrap(),
            monthly_salary: monthly_salary.parse().unwrap(),
            phone: Phone::new("+1 555 123 4567").unwrap(),
        }
    }

    #[tokio::test]
    async fn stores_customer_with_derived_limit() {
        let svc = Service::new(Config::default(), Memory::default());

        let customer = svc.execute(register("50000")).await.unwrap();

        assert_eq!(customer.approved_limit.to_string(), "1800000");
        assert_eq!(customer.current_debt.to_string(), "0");
        let stored: Option<Customer> = svc
            .database()
            .execute(Select(By::<Option<Customer>, _>::new(customer.id)))
            .await
            .unwrap();
        assert_eq!(stored, Some(customer));
    }

    #[tokio::test]
    async fn rounds_limit_up_to_lakh() {
        let svc = Service::new(Config::default(), Memory::default());

        let customer = svc.execute(register("25001")).await.unwrap();

        assert_eq!(customer.approved_limit.to_string(), "1000000");
    }

    #[tokio::test]
    async fn rejects_negative_salary() {
        let svc = Service::new(Config::default(), Memory::default());

        let err = svc.execute(register("-1")).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::NegativeSalary(_),
        ));
    }

    #[tokio::test]
    async fn rejects_oversized_salary() {
        let svc = Service::new(Config::default(), Memory::default());

        for salary in ["10000000000000", "1000.001"] {
            let err = svc.execute(register(salary)).await.unwrap_err();

            assert!(matches!(
                err.as_ref(),
                ExecutionError::SalaryOutOfRange(_),
            ));
        }
    }
}

//! [`Customer`]-related definitions.

use common::Money;
use serde::Serialize;
use service::domain::{self, customer};

/// [`Customer`] as returned on registration.
///
/// [`Customer`]: domain::Customer
#[derive(Clone, Debug, Serialize)]
pub struct Registered {
    /// ID of the registered [`Customer`].
    ///
    /// [`Customer`]: domain::Customer
    pub customer_id: customer::Id,

    /// Full name.
    pub name: String,

    /// Age in years.
    pub age: customer::Age,

    /// Monthly income.
    pub monthly_salary: Money,

    /// Derived borrowing limit.
    pub approved_limit: Money,

    /// Phone number.
    pub phone_number: customer::Phone,
}

impl From<domain::Customer> for Registered {
    fn from(customer: domain::Customer) -> Self {
        Self {
            customer_id: customer.id,
            name: customer.full_name(),
            age: customer.age,
            monthly_salary: customer.monthly_salary,
            approved_limit: customer.approved_limit,
            phone_number: customer.phone,
        }
    }
}

/// [`Customer`] details embedded into other views.
///
/// [`Customer`]: domain::Customer
#[derive(Clone, Debug, Serialize)]
pub struct Customer {
    /// ID of the [`Customer`].
    ///
    /// [`Customer`]: domain::Customer
    pub customer_id: customer::Id,

    /// First name.
    pub first_name: customer::Name,

    /// Last name.
    pub last_name: customer::Name,

    /// Age in years.
    pub age: customer::Age,

    /// Monthly income.
    pub monthly_salary: Money,

    /// Derived borrowing limit.
    pub approved_limit: Money,

    /// Phone number.
    pub phone_number: customer::Phone,
}

impl From<domain::Customer> for Customer {
    fn from(customer: domain::Customer) -> Self {
        let domain::Customer {
            id,
            first_name,
            last_name,
            age,
            monthly_salary,
            approved_limit,
            phone,
            current_debt: _,
        } = customer;

        Self {
            customer_id: id,
            first_name,
            last_name,
            age,
            monthly_salary,
            approved_limit,
            phone_number: phone,
        }
    }
}

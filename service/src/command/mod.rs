//! [`Command`] definition.

pub mod create_loan;
pub mod register_customer;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_loan::CreateLoan, register_customer::RegisterCustomer,
};

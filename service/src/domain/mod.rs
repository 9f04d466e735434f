//! Domain definitions.

pub mod customer;
pub mod loan;

pub use self::{customer::Customer, loan::Loan};

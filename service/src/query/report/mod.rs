//! Reporting [`Query`] collection.
//!
//! [`Query`]: crate::Query

pub mod credit;

pub use self::credit::CreditReport;

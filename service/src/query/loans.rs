//! [`Query`] collection related to the multiple [`Loan`]s.

use common::operations::By;

use crate::domain::{customer, Loan};
#[cfg(doc)]
use crate::{domain::Customer, Query};

use super::DatabaseQuery;

/// Queries all the [`Loan`]s of a [`Customer`], ordered by their start.
pub type ByCustomer = DatabaseQuery<By<Vec<Loan>, customer::Id>>;

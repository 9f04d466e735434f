//! [`Query`] collection related to a single [`Loan`].

use common::operations::By;

use crate::domain::{loan, Loan};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Loan`] by its [`loan::Id`].
pub type ById = DatabaseQuery<By<Option<Loan>, loan::Id>>;

//! [`State`] of the [`Memory`] database.
//!
//! [`Memory`]: super::Memory

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{customer, loan, Customer, Loan};

use super::Error;

/// Stored [`Customer`]s and [`Loan`]s.
#[derive(Clone, Debug, Default)]
pub struct State {
    /// Stored [`Customer`]s.
    customers: HashMap<customer::Id, Customer>,

    /// Stored [`Loan`]s.
    loans: HashMap<loan::Id, Loan>,
}

/// Change applicable to a [`State`].
#[derive(Clone, Debug)]
pub enum Change {
    /// Inserts a new [`Customer`].
    InsertCustomer(Customer),

    /// Replaces an existing [`Customer`].
    UpdateCustomer(Customer),

    /// Inserts a new [`Loan`] of an existing [`Customer`].
    InsertLoan(Loan),
}

impl State {
    /// Returns the [`Customer`] with the provided [`customer::Id`], if any.
    #[must_use]
    pub fn customer(&self, id: customer::Id) -> Option<&Customer> {
        self.customers.get(&id)
    }

    /// Returns the [`Loan`] with the provided [`loan::Id`], if any.
    #[must_use]
    pub fn loan(&self, id: loan::Id) -> Option<&Loan> {
        self.loans.get(&id)
    }

    /// Returns all the [`Loan`]s of the [`Customer`] ordered by their start.
    #[must_use]
    pub fn loans_of(&self, id: customer::Id) -> Vec<Loan> {
        let mut loans = self
            .loans
            .values()
            .filter(|l| l.customer_id == id)
            .cloned()
            .collect::<Vec<_>>();
        loans.sort_by_key(|l| (l.start_date, l.id));
        loans
    }

    /// Applies the provided [`Change`] to this [`State`].
    ///
    /// # Errors
    ///
    /// If the [`Change`] violates integrity of this [`State`]. The [`State`]
    /// is left untouched in such case.
    pub fn apply(&mut self, change: Change) -> Result<(), Error> {
        match change {
            Change::InsertCustomer(c) => {
                if self.customers.contains_key(&c.id) {
                    return Err(Error::CustomerExists(c.id));
                }
                _ = self.customers.insert(c.id, c);
            }
            Change::UpdateCustomer(c) => {
                let stored = self
                    .customers
                    .get_mut(&c.id)
                    .ok_or(Error::UnknownCustomer(c.id))?;
                *stored = c;
            }
            Change::InsertLoan(l) => {
                if self.loans.contains_key(&l.id) {
                    return Err(Error::LoanExists(l.id));
                }
                if !self.customers.contains_key(&l.customer_id) {
                    return Err(Error::UnknownCustomer(l.customer_id));
                }
                if !l.is_consistent() {
                    return Err(Error::InconsistentLoan(l.id));
                }
                _ = self.loans.insert(l.id, l);
            }
        }
        Ok(())
    }
}

/// Serializable snapshot of a [`State`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Snapshot {
    /// [`Customer`]s of the snapshot.
    pub customers: Vec<Customer>,

    /// [`Loan`]s of the snapshot.
    pub loans: Vec<Loan>,
}

impl TryFrom<Snapshot> for State {
    type Error = Error;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        let Snapshot { customers, loans } = snapshot;

        let mut state = Self::default();
        for change in customers
            .into_iter()
            .map(Change::InsertCustomer)
            .chain(loans.into_iter().map(Change::InsertLoan))
        {
            state.apply(change)?;
        }
        Ok(state)
    }
}

impl From<&State> for Snapshot {
    fn from(state: &State) -> Self {
        let mut customers =
            state.customers.values().cloned().collect::<Vec<_>>();
        customers.sort_by_key(|c| c.id);
        let mut loans = state.loans.values().cloned().collect::<Vec<_>>();
        loans.sort_by_key(|l| (l.customer_id, l.start_date, l.id));

        Self { customers, loans }
    }
}

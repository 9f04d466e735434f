//! [`NonTx`] and [`Tx`] clients of the [`Memory`] database.
//!
//! [`Memory`]: super::Memory

use std::{future::Future, mem, sync::Arc};

use tokio::sync::{Mutex, RwLock};

use super::{state::Change, Error, State};

/// Generic connection to a [`State`].
pub trait Connection {
    /// Runs the provided function over the visible [`State`].
    fn read<R, F>(&self, f: F) -> impl Future<Output = R>
    where
        F: FnOnce(&State) -> R;

    /// Applies the provided [`Change`].
    fn apply(&self, change: Change) -> impl Future<Output = Result<(), Error>>;
}

/// Non-transactional client applying [`Change`]s immediately.
#[derive(Clone, Debug, Default)]
pub struct NonTx {
    /// Shared [`State`].
    state: Arc<RwLock<State>>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client over the provided [`State`].
    #[must_use]
    pub fn new(state: State) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }
}

impl Connection for NonTx {
    async fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&State) -> R,
    {
        f(&*self.state.read().await)
    }

    async fn apply(&self, change: Change) -> Result<(), Error> {
        self.state.write().await.apply(change)
    }
}

/// Transactional client staging [`Change`]s until committed.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Shared [`State`] the [`Change`]s are committed to.
    base: Arc<RwLock<State>>,

    /// Inner representation of this client.
    inner: Arc<Mutex<Inner>>,
}

/// Inner representation of the [`Tx`] client.
#[derive(Debug)]
struct Inner {
    /// [`State`] visible inside the transaction.
    staged: State,

    /// [`Change`]s applied inside the transaction.
    journal: Vec<Change>,
}

impl Tx {
    /// Starts a new [`Tx`] from the provided [`NonTx`] client.
    pub async fn from_non_tx(client: &NonTx) -> Self {
        let staged = client.state.read().await.clone();
        Self {
            base: Arc::clone(&client.state),
            inner: Arc::new(Mutex::new(Inner {
                staged,
                journal: Vec::new(),
            })),
        }
    }

    /// Commits this [`Tx`] by replaying its [`Change`]s over the shared
    /// [`State`].
    ///
    /// Either all the [`Change`]s are applied or none of them.
    ///
    /// # Errors
    ///
    /// If any of the [`Change`]s conflicts with the current shared [`State`].
    pub async fn commit(&self) -> Result<(), Error> {
        let journal = mem::take(&mut self.inner.lock().await.journal);
        if journal.is_empty() {
            return Ok(());
        }

        let mut base = self.base.write().await;
        let mut next = base.clone();
        for change in journal {
            next.apply(change)?;
        }
        *base = next;
        Ok(())
    }
}

impl Connection for Tx {
    async fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&State) -> R,
    {
        f(&self.inner.lock().await.staged)
    }

    async fn apply(&self, change: Change) -> Result<(), Error> {
        let mut inner = self.inner.lock().await;
        inner.staged.apply(change.clone())?;
        inner.journal.push(change);
        Ok(())
    }
}

//! In-memory [`Database`] implementation backed by an optional JSON
//! snapshot file.

pub mod client;
mod impls;
pub mod state;

use std::{io, path::Path};

use derive_more::{Deref, Display, Error as StdError, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{customer, loan},
    infra::database,
};
#[cfg(doc)]
use crate::{
    domain::{Customer, Loan},
    infra::Database,
};

pub use self::{
    client::{Connection, NonTx, Tx},
    state::{Change, Snapshot, State},
};

/// In-memory [`Database`] client.
#[derive(Clone, Debug, Deref)]
pub struct Memory<T = NonTx>(T);

impl Default for Memory {
    fn default() -> Self {
        Self::new(State::default())
    }
}

impl Memory {
    /// Creates a new [`Memory`] client over the provided [`State`].
    #[must_use]
    pub fn new(state: State) -> Self {
        Self(NonTx::new(state))
    }

    /// Opens a [`Memory`] client loading the [`Snapshot`] stored at the
    /// provided `path`.
    ///
    /// A missing file is treated as an empty [`Snapshot`].
    ///
    /// # Errors
    ///
    /// If the file cannot be read or contains an invalid [`Snapshot`].
    pub async fn open(
        path: impl AsRef<Path>,
    ) -> Result<Self, Traced<database::Error>> {
        let path = path.as_ref();
        let snapshot = match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice::<Snapshot>(&bytes)
                .map_err(tracerr::from_and_wrap!(=> Error))
                .map_err(tracerr::map_from)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!(
                    "no snapshot at `{}`, starting empty",
                    path.display(),
                );
                Snapshot::default()
            }
            Err(e) => {
                return Err(tracerr::new!(database::Error::from(
                    Error::from(e)
                )))
            }
        };

        let customers = snapshot.customers.len();
        let loans = snapshot.loans.len();
        let state = State::try_from(snapshot)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        log::debug!(
            "loaded {customers} customers and {loans} loans from `{}`",
            path.display(),
        );

        Ok(Self::new(state))
    }

    /// Writes the current [`State`] as a [`Snapshot`] to the provided `path`,
    /// creating its parent directories if required.
    ///
    /// # Errors
    ///
    /// If the file cannot be written.
    pub async fn persist(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(), Traced<database::Error>> {
        let bytes = self
            .0
            .read(|s| serde_json::to_vec_pretty(&Snapshot::from(s)))
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(tracerr::from_and_wrap!(=> Error))
                .map_err(tracerr::map_from)?;
        }
        tokio::fs::write(path, bytes)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

/// [`Memory`] database [`Error`].
#[derive(Debug, Display, StdError, From)]
pub enum Error {
    /// [`Customer`] with the same ID is stored already.
    #[display("`Customer` `{_0}` already exists")]
    #[from(ignore)]
    CustomerExists(#[error(not(source))] customer::Id),

    /// [`Customer`] with such ID is not stored.
    #[display("`Customer` `{_0}` doesn't exist")]
    #[from(ignore)]
    UnknownCustomer(#[error(not(source))] customer::Id),

    /// [`Loan`] with the same ID is stored already.
    #[display("`Loan` `{_0}` already exists")]
    #[from(ignore)]
    LoanExists(#[error(not(source))] loan::Id),

    /// [`Loan`] has more installments paid than its tenure.
    #[display("`Loan` `{_0}` has more installments paid than its tenure")]
    #[from(ignore)]
    InconsistentLoan(#[error(not(source))] loan::Id),

    /// Snapshot file I/O failed.
    #[display("snapshot I/O failed: {_0}")]
    Io(io::Error),

    /// Snapshot file is malformed.
    #[display("malformed snapshot: {_0}")]
    Json(serde_json::Error),
}

#[cfg(test)]
pub(crate) mod fixture {
    //! Test wrappers over [`Memory`].

    use std::sync::atomic::{AtomicUsize, Ordering};

    use common::operations::Transact;
    use tracerr::Traced;

    use crate::infra::{database, Database};

    use super::{Memory, Tx};

    /// [`Memory`] counting the transactions started over it.
    #[derive(Debug, Default)]
    pub(crate) struct Counted {
        /// Wrapped [`Memory`].
        pub(crate) db: Memory,

        /// Number of transactions started so far.
        transactions: AtomicUsize,
    }

    impl Counted {
        /// Returns the number of transactions started so far.
        pub(crate) fn transactions(&self) -> usize {
            self.transactions.load(Ordering::SeqCst)
        }
    }

    impl Database<Transact> for Counted {
        type Ok = Memory<Tx>;
        type Err = Traced<database::Error>;

        async fn execute(&self, op: Transact) -> Result<Self::Ok, Self::Err> {
            _ = self.transactions.fetch_add(1, Ordering::SeqCst);
            self.db.execute(op).await
        }
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Insert, Select};

    use crate::{
        domain::{Customer, Loan},
        infra::Database as _,
        underwriting::fixture,
    };

    use super::{Connection as _, Error, Memory, Snapshot, State};

    #[tokio::test]
    async fn opens_missing_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();

        let db = Memory::open(dir.path().join("absent.json")).await.unwrap();

        let snapshot = db.read(|s| Snapshot::from(s)).await;
        assert!(snapshot.customers.is_empty());
        assert!(snapshot.loans.is_empty());
    }

    #[tokio::test]
    async fn persists_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("ledger.json");
        let c = fixture::customer("50000");
        let l = fixture::loan(
            &c,
            "100000",
            (3, 12),
            ("2025-01-10", "2026-01-10"),
        );

        let db = Memory::default();
        db.execute(Insert(c.clone())).await.unwrap();
        db.execute(Insert(l.clone())).await.unwrap();
        db.persist(&path).await.unwrap();
        assert!(path.exists());

        let db = Memory::open(&path).await.unwrap();
        let customer = db
            .execute(Select(By::<Option<Customer>, _>::new(c.id)))
            .await
            .unwrap();
        assert_eq!(customer, Some(c.clone()));
        let loans = db
            .execute(Select(By::<Vec<Loan>, _>::new(c.id)))
            .await
            .unwrap();
        assert_eq!(loans, vec![l]);
    }

    #[tokio::test]
    async fn rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        tokio::fs::write(&path, b"{\"customers\": 42}").await.unwrap();

        assert!(Memory::open(&path).await.is_err());
    }

    #[test]
    fn rejects_inconsistent_snapshot() {
        let c = fixture::customer("50000");
        let overpaid =
            fixture::loan(&c, "1000", (13, 12), ("2025-01-10", "2026-01-10"));
        let orphan = fixture::loan(
            &fixture::customer("50000"),
            "1000",
            (0, 12),
            ("2025-01-10", "2026-01-10"),
        );

        let res = State::try_from(Snapshot {
            customers: vec![c.clone()],
            loans: vec![overpaid],
        });
        assert!(matches!(res, Err(Error::InconsistentLoan(_))));

        let res = State::try_from(Snapshot {
            customers: vec![c],
            loans: vec![orphan],
        });
        assert!(matches!(res, Err(Error::UnknownCustomer(_))));
    }
}

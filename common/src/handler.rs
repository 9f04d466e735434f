//! [`Handler`] abstractions.

use std::future::Future;

/// Handler of an operation described by its `Args`.
///
/// Commands, queries and storage operations are all expressed as
/// implementations of this trait for different argument types.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}

//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use serde::Serialize;
use service::{command, infra::database, query, underwriting};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Application [`Error`] reported to the caller.
#[derive(Clone, Debug, Serialize, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`Error`] message.
    pub message: String,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    #[serde(skip)]
    pub backtrace: Option<Trace>,
}

impl Error {
    /// Create a new [`Error`] representing an internal failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            message,
            backtrace,
        } = self;

        write!(f, "[{code}]: {message}")?;
        if let Some(trace) = backtrace {
            write!(f, "\n{trace}")?;
        }
        Ok(())
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError + fmt::Display> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }

    fn as_error(&self) -> Error {
        let mut error = self.as_ref().as_error();
        error.backtrace = Some(self.trace().clone());
        error
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for underwriting::InvalidRequest {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "INVALID_REQUEST",
            message: self.to_string(),
            backtrace: None,
        })
    }
}

define_error! {
    enum CustomerError {
        #[code = "CUSTOMER_NOT_FOUND"]
        #[message = "Customer not found"]
        NotFound,

        #[code = "NEGATIVE_SALARY"]
        #[message = "Monthly income must not be negative"]
        NegativeSalary,
    }
}

define_error! {
    enum LoanError {
        #[code = "LOAN_NOT_FOUND"]
        #[message = "Loan not found"]
        NotFound,
    }
}

impl AsError for command::register_customer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NegativeSalary(_) => {
                Some(CustomerError::NegativeSalary.into())
            }
            Self::SalaryOutOfRange(_) => Some(Error {
                code: "INVALID_REQUEST",
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::create_loan::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CustomerNotFound(_) => Some(CustomerError::NotFound.into()),
            Self::DateOutOfRange => None,
        }
    }
}

impl AsError for query::eligibility::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CustomerNotFound(_) => Some(CustomerError::NotFound.into()),
        }
    }
}

impl AsError for query::report::credit::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CustomerNotFound(_) => Some(CustomerError::NotFound.into()),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;
    use service::{
        command::create_loan, domain::customer, underwriting::InvalidRequest,
    };

    use super::{AsError as _, Error};

    #[test]
    fn maps_known_errors() {
        let err = tracerr::new!(create_loan::ExecutionError::CustomerNotFound(
            customer::Id::new(),
        ))
        .into_error();
        assert_eq!(err.code, "CUSTOMER_NOT_FOUND");
        assert!(err.backtrace.is_some());

        let err = InvalidRequest::TenureOutOfRange(0).into_error();
        assert_eq!(err.code, "INVALID_REQUEST");
        assert_eq!(
            err.message,
            "tenure must be in `1..=600` months range, got 0",
        );

        let err = InvalidRequest::AmountOutOfRange(Money::new(Decimal::MAX))
            .into_error();
        assert_eq!(err.code, "INVALID_REQUEST");
        assert!(err.message.starts_with("loan amount must have at most 13"));
    }

    #[test]
    fn falls_back_to_internal() {
        let err = tracerr::new!(create_loan::ExecutionError::DateOutOfRange)
            .into_error();

        assert_eq!(err.code, "INTERNAL_ERROR");
        assert_eq!(err.message, "`Loan` end date is out of range");
        assert!(err.backtrace.is_some());
    }

    #[test]
    fn serializes_without_backtrace() {
        let err = Error::internal(&"boom");

        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"code": "INTERNAL_ERROR", "message": "boom"}),
        );
    }
}

//! [`Loan`] definitions.

use common::{unit, Date, DateOf, Money, Percent};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::customer;
#[cfg(doc)]
use crate::domain::Customer;

/// Loan issued to a [`Customer`].
///
/// [`Loan`]s are never mutated by the underwriting logic: they form the
/// historical ledger a credit decision is based on.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Loan {
    /// ID of this [`Loan`].
    pub id: Id,

    /// ID of the [`Customer`] this [`Loan`] is issued to.
    pub customer_id: customer::Id,

    /// Principal amount of this [`Loan`].
    pub amount: Money,

    /// [`Tenure`] of this [`Loan`].
    pub tenure: Tenure,

    /// Annual interest rate of this [`Loan`].
    pub interest_rate: Percent,

    /// Fixed monthly installment (EMI) of this [`Loan`].
    pub monthly_installment: Money,

    /// Number of installments paid on time so far.
    ///
    /// Never exceeds the [`Tenure`] of this [`Loan`].
    pub emis_paid_on_time: u32,

    /// [`Date`] this [`Loan`] starts at.
    pub start_date: StartDate,

    /// [`Date`] this [`Loan`] ends at.
    pub end_date: EndDate,
}

impl Loan {
    /// Indicates whether this [`Loan`] is still running on the provided
    /// [`Date`], i.e. it ends on that [`Date`] or later.
    #[must_use]
    pub fn is_active(&self, on: Date) -> bool {
        self.end_date.coerce::<()>() >= on
    }

    /// Returns the number of installments left to pay.
    #[must_use]
    pub fn repayments_left(&self) -> u32 {
        self.tenure.months().saturating_sub(self.emis_paid_on_time)
    }

    /// Checks whether the paid installments of this [`Loan`] fit into its
    /// [`Tenure`].
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.emis_paid_on_time <= self.tenure.months()
    }
}

/// ID of a [`Loan`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Duration of a [`Loan`] in whole months.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(into = "u32", try_from = "u32")]
pub struct Tenure(u32);

impl Tenure {
    /// Longest allowed [`Tenure`]: 50 years.
    ///
    /// Together with the interest rate capped at `100%` it keeps the
    /// compounding factor of an installment well inside [`Decimal`] range.
    ///
    /// [`Decimal`]: rust_decimal::Decimal
    pub const MAX_MONTHS: u32 = 600;

    /// Creates a new [`Tenure`] if the given `months` are in
    /// `1..=`[`Tenure::MAX_MONTHS`] range.
    #[must_use]
    pub fn new(months: u32) -> Option<Self> {
        (1..=Self::MAX_MONTHS).contains(&months).then_some(Self(months))
    }

    /// Returns the number of months in this [`Tenure`].
    #[must_use]
    pub const fn months(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Tenure {
    type Error = &'static str;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        Self::new(months).ok_or("`Tenure` must be in `1..=600` months range")
    }
}

/// [`Date`] when a [`Loan`] starts.
pub type StartDate = DateOf<(Loan, unit::Start)>;

/// [`Date`] when a [`Loan`] ends.
pub type EndDate = DateOf<(Loan, unit::End)>;

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::domain::customer;

    use super::{Id, Loan, Tenure};

    fn loan(paid: u32, tenure: u32, end: &str) -> Loan {
        Loan {
            id: Id::new(),
            customer_id: customer::Id::new(),
            amount: "100000".parse().unwrap(),
            tenure: Tenure::new(tenure).unwrap(),
            interest_rate: "10".parse().unwrap(),
            monthly_installment: "8791.59".parse().unwrap(),
            emis_paid_on_time: paid,
            start_date: Date::parse("2024-01-01").unwrap().coerce(),
            end_date: Date::parse(end).unwrap().coerce(),
        }
    }

    #[test]
    fn is_active_until_end_date_inclusive() {
        let l = loan(0, 12, "2025-01-01");

        assert!(l.is_active(Date::parse("2024-06-01").unwrap()));
        assert!(l.is_active(Date::parse("2025-01-01").unwrap()));
        assert!(!l.is_active(Date::parse("2025-01-02").unwrap()));
    }

    #[test]
    fn counts_repayments_left() {
        assert_eq!(loan(0, 12, "2025-01-01").repayments_left(), 12);
        assert_eq!(loan(5, 12, "2025-01-01").repayments_left(), 7);
        assert_eq!(loan(12, 12, "2025-01-01").repayments_left(), 0);
        assert_eq!(loan(13, 12, "2025-01-01").repayments_left(), 0);
    }

    #[test]
    fn checks_consistency() {
        assert!(loan(12, 12, "2025-01-01").is_consistent());
        assert!(!loan(13, 12, "2025-01-01").is_consistent());
    }

    #[test]
    fn bounds_tenure() {
        assert!(Tenure::new(0).is_none());
        assert_eq!(Tenure::new(1).map(Tenure::months), Some(1));
        assert!(Tenure::new(600).is_some());
        assert!(Tenure::new(601).is_none());
    }
}

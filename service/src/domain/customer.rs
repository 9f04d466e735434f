//! [`Customer`] definitions.

use std::sync::LazyLock;

use common::Money;
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Borrower of the lending platform.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Customer {
    /// ID of this [`Customer`].
    pub id: Id,

    /// First [`Name`] of this [`Customer`].
    pub first_name: Name,

    /// Last [`Name`] of this [`Customer`].
    pub last_name: Name,

    /// [`Age`] of this [`Customer`].
    pub age: Age,

    /// Monthly income of this [`Customer`].
    pub monthly_salary: Money,

    /// Maximum aggregate borrowing this [`Customer`] is pre-qualified for.
    ///
    /// Derived once on registration via [`approved_limit()`].
    pub approved_limit: Money,

    /// [`Phone`] number of this [`Customer`].
    pub phone: Phone,

    /// Total principal of the loans issued to this [`Customer`].
    pub current_debt: Money,
}

impl Customer {
    /// Returns the full name of this [`Customer`].
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Multiplier of a monthly salary giving the approved limit.
const SALARY_MULTIPLIER: u32 = 36;

/// Step the approved limit is rounded up to.
const LIMIT_STEP: u32 = 100_000;

/// Calculates the approved limit for the provided `monthly_salary`: `36`
/// salaries rounded up to the nearest `100 000`.
#[must_use]
pub fn approved_limit(monthly_salary: Money) -> Money {
    (monthly_salary * Decimal::from(SALARY_MULTIPLIER))
        .round_up_to(Decimal::from(LIMIT_STEP))
}

/// ID of a [`Customer`].
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

/// First or last name of a [`Customer`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(into = "String", try_from = "String")]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 100
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

impl TryFrom<String> for Name {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Age of a [`Customer`] in whole years.
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
#[serde(into = "u8", try_from = "u8")]
pub struct Age(u8);

impl Age {
    /// Minimal [`Age`] allowed to borrow.
    pub const ADULTHOOD: u8 = 18;

    /// Creates a new [`Age`] if the given `years` reach adulthood.
    #[must_use]
    pub fn new(years: u8) -> Option<Self> {
        (years >= Self::ADULTHOOD).then_some(Self(years))
    }
}

impl TryFrom<u8> for Age {
    type Error = &'static str;

    fn try_from(years: u8) -> Result<Self, Self::Error> {
        Self::new(years).ok_or("`Customer` must be at least 18 years old")
    }
}

impl FromStr for Age {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .map_err(|_| "invalid `Age`")
            .and_then(Self::try_from)
    }
}

/// Phone number of a [`Customer`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Into, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(into = "String", try_from = "String")]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[+]?\d[\d\s-]{6,14}\d$").expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

impl TryFrom<String> for Phone {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

#[cfg(test)]
mod spec {
    use common::Money;

    use super::{approved_limit, Age, Name, Phone};

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn derives_approved_limit() {
        assert_eq!(approved_limit(money("50000")), money("1800000"));
        assert_eq!(approved_limit(money("30000")), money("1100000"));
        assert_eq!(approved_limit(money("12345.67")), money("500000"));
        assert_eq!(approved_limit(Money::ZERO), Money::ZERO);
    }

    #[test]
    fn requires_adulthood() {
        assert!(Age::new(18).is_some());
        assert!(Age::new(65).is_some());
        assert!(Age::new(17).is_none());
        assert!("17".parse::<Age>().is_err());
        assert!("abc".parse::<Age>().is_err());
    }

    #[test]
    fn validates_name() {
        assert!(Name::new("John").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" John").is_none());
        assert!(Name::new("x".repeat(101)).is_none());
    }

    #[test]
    fn validates_phone() {
        assert!(Phone::new("1234567890").is_some());
        assert!(Phone::new("+91 98765-43210").is_some());
        assert!(Phone::new("12345").is_none());
        assert!(Phone::new("call me").is_none());
    }
}

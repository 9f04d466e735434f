//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;

/// Non-negative percentage not greater than `100`.
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(transparent)
)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero [`Percent`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided value is in
    /// `0..=100` range.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Creates a new [`Percent`] out of a whole number of percents.
    ///
    /// # Panics
    ///
    /// If `val` is greater than `100`.
    #[must_use]
    pub const fn whole(val: u8) -> Self {
        assert!(val <= 100, "`Percent` cannot exceed 100");
        Self(Decimal::from_parts(val as u32, 0, 0, false, 0))
    }

    /// Returns the value of this [`Percent`], e.g. `12.5` for `12.5%`.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Returns this [`Percent`] as a fraction of one, e.g. `0.125` for
    /// `12.5%`.
    #[must_use]
    pub fn fraction(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Percent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let val = <Decimal as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(val).ok_or_else(|| {
            serde::de::Error::custom("percent must be in `0..=100` range")
        })
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Percent;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn checks_range() {
        assert_eq!(Percent::new(Decimal::ZERO), Some(Percent::ZERO));
        assert!(Percent::new(decimal("12.5")).is_some());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_some());

        assert!(Percent::new(decimal("-0.01")).is_none());
        assert!(Percent::new(decimal("100.01")).is_none());
    }

    #[test]
    fn whole() {
        assert_eq!(Percent::whole(12).value(), Decimal::from(12));
        assert_eq!(Percent::whole(16), "16".parse().unwrap());
        assert!(Percent::whole(12) < Percent::whole(16));
    }

    #[test]
    fn fraction() {
        assert_eq!(
            "12.5".parse::<Percent>().unwrap().fraction(),
            decimal("0.125"),
        );
    }

    #[test]
    fn from_str() {
        assert!("10".parse::<Percent>().is_ok());
        assert!("abc".parse::<Percent>().is_err());
        assert!("-1".parse::<Percent>().is_err());
        assert!("101".parse::<Percent>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_checked() {
        use serde::{
            de::{value, IntoDeserializer as _},
            Deserialize as _,
        };

        fn de(s: &str) -> Result<Percent, value::Error> {
            Percent::deserialize(s.into_deserializer())
        }

        assert_eq!(de("12.5").unwrap().value(), decimal("12.5"));
        assert!(de("100.01").is_err());
        assert!(de("-1").is_err());
    }
}

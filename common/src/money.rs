//! [`Money`]-related definitions.

use std::{fmt, iter::Sum, ops, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

/// Amount of money in the lending currency.
///
/// All the arithmetic is performed on [`Decimal`]s, so no precision is lost
/// until an explicit rounding is requested via [`Money::round_to_cents()`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Money(Decimal);

impl Money {
    /// Zero [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Number of fractional digits kept by [`Money::round_to_cents()`].
    pub const CENTS_SCALE: u32 = 2;

    /// Number of integer digits an input amount may have.
    pub const MAX_INTEGER_DIGITS: u32 = 13;

    /// Creates a new [`Money`] of the provided `amount`.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Money`] is strictly greater than zero.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Indicates whether this [`Money`] has at most
    /// [`Money::MAX_INTEGER_DIGITS`] integer digits and at most
    /// [`Money::CENTS_SCALE`] fractional ones.
    ///
    /// Amounts within these bounds are safe to multiply and sum across a
    /// ledger without overflowing a [`Decimal`].
    #[must_use]
    pub fn fits_precision(self) -> bool {
        let whole = self.0.abs().trunc().normalize().mantissa();
        self.0.normalize().scale() <= Self::CENTS_SCALE
            && 10_i128
                .checked_pow(Self::MAX_INTEGER_DIGITS)
                .is_some_and(|max| whole < max)
    }

    /// Rounds this [`Money`] to whole cents.
    ///
    /// Midpoints are rounded away from zero (round-half-up for non-negative
    /// amounts): `0.125` becomes `0.13`.
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        Self(self.0.round_dp_with_strategy(
            Self::CENTS_SCALE,
            RoundingStrategy::MidpointAwayFromZero,
        ))
    }

    /// Rounds this [`Money`] up to the nearest multiple of the provided
    /// `step`.
    ///
    /// Non-positive `step`s leave the amount untouched.
    #[must_use]
    pub fn round_up_to(self, step: Decimal) -> Self {
        if step <= Decimal::ZERO {
            return self;
        }
        Self((self.0 / step).ceil() * step)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.is_integer().then(|| self.0.to_i128()).flatten() {
            Some(whole) => write!(f, "{whole}"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Self)
            .map_err(|_| "invalid amount")
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<u32> for Money {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl ops::Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl ops::Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

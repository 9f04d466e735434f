//! Installment (EMI) calculation.

use common::{Money, Percent};
use rust_decimal::{Decimal, MathematicalOps as _};

use crate::domain::loan::Tenure;

/// Number of months in a year.
const MONTHS_IN_YEAR: u32 = 12;

/// Calculates the fixed monthly installment amortizing the `principal` over
/// the `tenure` at the `annual_rate`:
///
/// ```text
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), where r = annual_rate / 12 / 100
/// ```
///
/// A zero rate degenerates into `P / n`.
///
/// The result is rounded half-up to whole cents exactly once, at the very
/// end, so repeated calls with the same inputs always agree to the cent.
#[must_use]
pub fn installment(
    principal: Money,
    annual_rate: Percent,
    tenure: Tenure,
) -> Money {
    let months = tenure.months();
    let rate = annual_rate.fraction() / Decimal::from(MONTHS_IN_YEAR);
    if rate.is_zero() {
        return Money::new(principal.amount() / Decimal::from(months))
            .round_to_cents();
    }

    let growth = (Decimal::ONE + rate)
        .checked_powu(u64::from(months))
        .expect("bounded by `Tenure::MAX_MONTHS` and `Percent` range");
    let annuity = rate * growth / (growth - Decimal::ONE);

    (principal * annuity).round_to_cents()
}

#[cfg(test)]
mod spec {
    use common::{Money, Percent};

    use crate::domain::loan::Tenure;

    use super::installment;

    fn emi(principal: &str, rate: &str, months: u32) -> Money {
        installment(
            principal.parse().unwrap(),
            rate.parse().unwrap(),
            Tenure::new(months).unwrap(),
        )
    }

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn zero_rate_splits_principal_evenly() {
        assert_eq!(emi("100000", "0", 12), money("8333.33"));
        assert_eq!(emi("120000", "0", 12), money("10000"));
        assert_eq!(emi("100", "0", 3), money("33.33"));
        assert_eq!(emi("200", "0", 3), money("66.67"));
    }

    #[test]
    fn amortizes_at_positive_rate() {
        assert_eq!(emi("100000", "10", 12), money("8791.59"));
        assert_eq!(emi("100000", "12", 12), money("8884.88"));
        assert_eq!(emi("100000", "12.5", 12), money("8908.29"));
        assert_eq!(emi("100000", "16", 12), money("9073.09"));
        assert_eq!(emi("200000", "10", 24), money("9228.99"));
        assert_eq!(emi("500000", "8.5", 60), money("10258.27"));
    }

    #[test]
    fn survives_extreme_bounds() {
        assert_eq!(emi("1000000", "100", 600), money("83333.33"));
        assert!(emi("999999999", "100", 600).is_positive());
        assert!(emi("1", "0.01", 1).is_positive());
    }

    #[test]
    fn is_positive_for_at_least_a_cent_per_month() {
        for principal in ["6", "1000", "250000", "10000000"] {
            for rate in ["0", "0.5", "7.25", "18", "36", "100"] {
                for months in [1, 6, 12, 60, 360, 600] {
                    assert!(
                        emi(principal, rate, months).is_positive(),
                        "{principal} at {rate}% for {months} months",
                    );
                }
            }
        }
    }

    #[test]
    fn grows_with_rate() {
        let rates = ["0", "0.01", "1", "9.99", "10", "12", "16", "24", "100"];
        for (principal, months) in [("100000", 12), ("2500000", 240)] {
            let emis = rates
                .iter()
                .map(|r| emi(principal, r, months))
                .collect::<Vec<_>>();
            assert!(
                emis.windows(2).all(|w| w[0] <= w[1]),
                "{principal} for {months} months: {emis:?}",
            );
        }
    }

    #[test]
    fn is_deterministic() {
        let rate: Percent = "13.75".parse().unwrap();
        let tenure = Tenure::new(47).unwrap();
        let first = installment(money("123456.78"), rate, tenure);

        for _ in 0..10 {
            assert_eq!(installment(money("123456.78"), rate, tenure), first);
        }
    }
}

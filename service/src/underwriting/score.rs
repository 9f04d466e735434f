//! Credit scoring of a [`Customer`] by its [`Loan`] history.

use common::{Date, Money};
use derive_more::{Display, Into};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Customer, Loan};

/// Composite credit rating of a [`Customer`] in `0..=100` range.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct CreditScore(u8);

impl CreditScore {
    /// [`CreditScore`] of a [`Customer`] without any [`Loan`] history.
    pub const NEUTRAL: Self = Self(50);

    /// Highest possible [`CreditScore`].
    pub const MAX: Self = Self(100);

    /// Creates a new [`CreditScore`] if the given `value` doesn't exceed
    /// [`CreditScore::MAX`].
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX.0).then_some(Self(value))
    }

    /// Returns the numeric value of this [`CreditScore`].
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Per-component points a [`CreditScore`] is summed from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Breakdown {
    /// Points for the share of installments paid on time.
    pub on_time_repayment: u8,

    /// Points for the number of [`Loan`]s taken.
    pub history_depth: u8,

    /// Points for [`Loan`]s started or ended in the evaluation year.
    pub recent_activity: u8,

    /// Points for the total principal ever borrowed.
    pub approved_volume: u8,

    /// Points for keeping active principal within the approved limit.
    pub limit_headroom: u8,
}

impl Breakdown {
    /// Cap of [`Breakdown::on_time_repayment`].
    pub const ON_TIME_REPAYMENT_CAP: u8 = 30;

    /// Cap of [`Breakdown::history_depth`].
    pub const HISTORY_DEPTH_CAP: u8 = 15;

    /// Cap of [`Breakdown::recent_activity`].
    pub const RECENT_ACTIVITY_CAP: u8 = 20;

    /// Cap of [`Breakdown::approved_volume`].
    pub const APPROVED_VOLUME_CAP: u8 = 20;

    /// Cap of [`Breakdown::limit_headroom`].
    pub const LIMIT_HEADROOM_CAP: u8 = 15;

    /// Calculates the [`Breakdown`] of the provided [`Loan`] history
    /// evaluated on the given [`Date`].
    ///
    /// [`None`] is returned if there is no history to evaluate.
    #[must_use]
    pub fn of(customer: &Customer, loans: &[Loan], on: Date) -> Option<Self> {
        if loans.is_empty() {
            return None;
        }

        Some(Self {
            on_time_repayment: on_time_repayment(loans),
            history_depth: capped(3, loans.len(), Self::HISTORY_DEPTH_CAP),
            recent_activity: recent_activity(loans, on),
            approved_volume: approved_volume(loans),
            limit_headroom: limit_headroom(customer, loans, on),
        })
    }

    /// Sums all the components into a [`CreditScore`].
    #[must_use]
    pub fn total(self) -> CreditScore {
        let Self {
            on_time_repayment,
            history_depth,
            recent_activity,
            approved_volume,
            limit_headroom,
        } = self;
        CreditScore(
            on_time_repayment
                + history_depth
                + recent_activity
                + approved_volume
                + limit_headroom,
        )
    }
}

/// Calculates the [`CreditScore`] of the [`Customer`] with the provided
/// [`Loan`] history evaluated on the given [`Date`].
///
/// A [`Customer`] without any history gets [`CreditScore::NEUTRAL`].
#[must_use]
pub fn score(customer: &Customer, loans: &[Loan], on: Date) -> CreditScore {
    Breakdown::of(customer, loans, on)
        .map_or(CreditScore::NEUTRAL, Breakdown::total)
}

/// Multiplies `count` by `points` saturating at `cap`.
fn capped(points: u8, count: usize, cap: u8) -> u8 {
    u8::try_from(count.saturating_mul(usize::from(points)))
        .map_or(cap, |p| p.min(cap))
}

/// Scores `floor(30 * paid / total)` installments across all the [`Loan`]s.
fn on_time_repayment(loans: &[Loan]) -> u8 {
    let (paid, total) = loans.iter().fold((0_u64, 0_u64), |(p, t), l| {
        (
            p + u64::from(l.emis_paid_on_time),
            t + u64::from(l.tenure.months()),
        )
    });
    if total == 0 {
        return 0;
    }

    let cap = Breakdown::ON_TIME_REPAYMENT_CAP;
    u8::try_from(paid * u64::from(cap) / total).map_or(cap, |p| p.min(cap))
}

/// Scores [`Loan`]s starting or ending in the calendar year of `on`.
fn recent_activity(loans: &[Loan], on: Date) -> u8 {
    let year = on.year();
    let count = loans
        .iter()
        .filter(|l| l.start_date.year() == year || l.end_date.year() == year)
        .count();
    capped(5, count, Breakdown::RECENT_ACTIVITY_CAP)
}

/// Scores the total principal by bands, the highest qualifying band wins.
fn approved_volume(loans: &[Loan]) -> u8 {
    const BANDS: [(u32, u8); 4] =
        [(1_000_000, 20), (500_000, 15), (100_000, 10), (0, 5)];

    let volume = loans.iter().map(|l| l.amount).sum::<Money>();
    BANDS
        .iter()
        .find(|(threshold, _)| volume.amount() > Decimal::from(*threshold))
        .map_or(0, |(_, points)| *points)
}

/// Zeroes the points if principal of active [`Loan`]s exceeds the approved
/// limit of the [`Customer`].
fn limit_headroom(customer: &Customer, loans: &[Loan], on: Date) -> u8 {
    let active = loans
        .iter()
        .filter(|l| l.is_active(on))
        .map(|l| l.amount)
        .sum::<Money>();
    if active > customer.approved_limit {
        0
    } else {
        Breakdown::LIMIT_HEADROOM_CAP
    }
}

#[cfg(test)]
mod spec {
    use crate::underwriting::fixture::{customer, date, loan};

    use super::{score, Breakdown, CreditScore};

    #[test]
    fn caps_sum_up_to_max() {
        assert_eq!(
            Breakdown::ON_TIME_REPAYMENT_CAP
                + Breakdown::HISTORY_DEPTH_CAP
                + Breakdown::RECENT_ACTIVITY_CAP
                + Breakdown::APPROVED_VOLUME_CAP
                + Breakdown::LIMIT_HEADROOM_CAP,
            CreditScore::MAX.value(),
        );
    }

    #[test]
    fn neutral_without_history() {
        let c = customer("50000");

        assert_eq!(score(&c, &[], date("2024-06-01")), CreditScore::NEUTRAL);
        assert_eq!(Breakdown::of(&c, &[], date("2024-06-01")), None);
    }

    #[test]
    fn scores_each_component() {
        let c = customer("50000");
        let loans = [
            loan(&c, "300000", (6, 12), ("2023-03-01", "2024-03-01")),
            loan(&c, "250000", (3, 24), ("2024-02-01", "2026-02-01")),
        ];

        let b = Breakdown::of(&c, &loans, date("2024-06-01")).unwrap();

        assert_eq!(
            b,
            Breakdown {
                // 9 of 36 installments paid: floor(7.5).
                on_time_repayment: 7,
                history_depth: 6,
                recent_activity: 10,
                approved_volume: 15,
                limit_headroom: 15,
            },
        );
        assert_eq!(b.total().value(), 53);
        assert_eq!(score(&c, &loans, date("2024-06-01")), b.total());
    }

    #[test]
    fn full_marks() {
        let c = customer("50000");
        let loans = (0..5)
            .map(|_| loan(&c, "300000", (12, 12), ("2024-01-01", "2025-01-01")))
            .collect::<Vec<_>>();

        assert_eq!(score(&c, &loans, date("2024-06-01")), CreditScore::MAX);
    }

    #[test]
    fn caps_history_depth_and_activity() {
        let c = customer("1000000");
        let loans = (0..9)
            .map(|_| loan(&c, "1000", (0, 12), ("2024-01-01", "2025-01-01")))
            .collect::<Vec<_>>();

        let b = Breakdown::of(&c, &loans, date("2024-06-01")).unwrap();

        assert_eq!(b.history_depth, Breakdown::HISTORY_DEPTH_CAP);
        assert_eq!(b.recent_activity, Breakdown::RECENT_ACTIVITY_CAP);
        assert_eq!(b.on_time_repayment, 0);
    }

    #[test]
    fn recent_activity_counts_start_or_end_year() {
        let c = customer("50000");
        let loans = [
            loan(&c, "1000", (0, 12), ("2024-05-01", "2025-05-01")),
            loan(&c, "1000", (0, 12), ("2023-05-01", "2024-05-01")),
            loan(&c, "1000", (0, 36), ("2022-05-01", "2025-05-01")),
            loan(&c, "1000", (0, 12), ("2021-05-01", "2022-05-01")),
        ];

        let b = Breakdown::of(&c, &loans, date("2024-12-31")).unwrap();

        assert_eq!(b.recent_activity, 10);
    }

    #[test]
    fn volume_bands_are_strict() {
        let c = customer("1000000");
        let at = date("2030-01-01");
        let band = |amount: &str| {
            let l = loan(&c, amount, (0, 12), ("2020-01-01", "2021-01-01"));
            Breakdown::of(&c, &[l], at).unwrap().approved_volume
        };

        assert_eq!(band("0.01"), 5);
        assert_eq!(band("100000"), 5);
        assert_eq!(band("100000.01"), 10);
        assert_eq!(band("500000"), 10);
        assert_eq!(band("500001"), 15);
        assert_eq!(band("1000000"), 15);
        assert_eq!(band("1000000.01"), 20);
    }

    #[test]
    fn penalizes_active_principal_over_limit() {
        // Approved limit is 1 100 000.
        let c = customer("30000");
        let at = date("2024-06-01");
        let headroom = |loans: &[_]| {
            Breakdown::of(&c, loans, at).unwrap().limit_headroom
        };

        let within = [
            loan(&c, "600000", (0, 24), ("2024-01-01", "2026-01-01")),
            loan(&c, "500000", (0, 24), ("2024-01-01", "2026-01-01")),
        ];
        assert_eq!(headroom(&within), 15);

        let over = [
            loan(&c, "600000", (0, 24), ("2024-01-01", "2026-01-01")),
            loan(&c, "500001", (0, 24), ("2024-01-01", "2026-01-01")),
        ];
        assert_eq!(headroom(&over), 0);

        let past = [
            loan(&c, "600000", (0, 24), ("2024-01-01", "2026-01-01")),
            loan(&c, "900000", (24, 24), ("2021-01-01", "2023-01-01")),
        ];
        assert_eq!(headroom(&past), 15);

        let ends_today =
            [loan(&c, "2000000", (0, 12), ("2023-06-01", "2024-06-01"))];
        assert_eq!(headroom(&ends_today), 0);
    }

    #[test]
    fn stays_within_range() {
        let c = customer("20000");
        let mut loans = Vec::new();
        for i in 0..12_u32 {
            loans.push(loan(
                &c,
                &(i * 150_000).to_string(),
                (i % 13, 12),
                ("2023-01-01", "2024-01-01"),
            ));
            for on in ["2022-06-01", "2023-06-01", "2024-01-01", "2030-01-01"] {
                let s = score(&c, &loans, date(on));
                assert!(s <= CreditScore::MAX, "{s} for {} loans", loans.len());
            }
        }
    }
}

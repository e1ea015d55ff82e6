//! Fixed-point money in BRL minor units.

use serde::{Deserialize, Serialize};

/// An amount of currency stored as a whole number of centavos.
///
/// Editing, totals, and persistence all stay in minor units so that no
/// floating-point value ever enters the arithmetic. Display formatting is
/// the job of `centavo-util::money_format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Builds an amount from a count of centavos. Negative amounts have no
    /// meaning in a budget and are clamped to zero.
    pub fn from_cents(cents: i64) -> Self {
        Money(cents.max(0))
    }

    /// Builds an amount from whole currency units.
    pub fn from_units(units: i64) -> Self {
        Money(units.max(0).saturating_mul(100))
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtracts, clamping at zero rather than going negative.
    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }

    /// Scales the amount by a unitless factor (quantity, day count).
    pub fn scale(self, factor: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(factor)))
    }

    /// Takes an integer percentage of the amount. Percentages above 100 are
    /// clamped; the division truncates toward zero, matching how the totals
    /// bar rounds a discount down.
    pub fn percent(self, pct: u8) -> Money {
        let pct = i64::from(pct.min(100));
        Money(self.0.saturating_mul(pct) / 100)
    }

    /// Clamps the amount into `0..=max`.
    pub fn clamp_to(self, max: Money) -> Money {
        Money(self.0.clamp(0, max.0))
    }
}

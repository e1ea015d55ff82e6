//! Budget aggregates: line items, discount precedence, and totals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// One role on the budget: a number of people booked for a number of days
/// at a daily rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Role or function being hired.
    pub role: String,
    /// How many people fill the role.
    pub quantity: u32,
    /// Contracted hours per day. Informational; not part of the total.
    pub hours_per_day: u32,
    /// Rate per person per day.
    pub daily_rate: Money,
    /// Number of days booked.
    pub days: u32,
}

impl LineItem {
    /// `quantity x days x daily_rate`.
    pub fn line_total(&self) -> Money {
        self.daily_rate.scale(self.quantity).scale(self.days)
    }

    pub fn is_empty(&self) -> bool {
        self.role.trim().is_empty() && self.quantity == 0 && self.daily_rate.is_zero() && self.days == 0
    }
}

/// The whole editable form: header fields plus line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub event_date: Option<NaiveDate>,
    /// Flat discount in centavos. Ignored while a percent discount is set.
    pub discount_amount: Money,
    /// Integer percent discount. Values above 100 are treated as 100.
    pub discount_percent: u8,
    pub items: Vec<LineItem>,
}

impl Budget {
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::ZERO, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// The discount actually applied: percent wins over the flat amount,
    /// and the result never exceeds the subtotal.
    pub fn applied_discount(&self) -> Money {
        let subtotal = self.subtotal();
        let raw = if self.discount_percent > 0 {
            subtotal.percent(self.discount_percent)
        } else {
            self.discount_amount
        };
        raw.clamp_to(subtotal)
    }

    pub fn total(&self) -> Money {
        self.subtotal().saturating_sub(self.applied_discount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(rate_cents: i64, quantity: u32, days: u32) -> LineItem {
        LineItem {
            role: "Model".into(),
            quantity,
            hours_per_day: 8,
            daily_rate: Money::from_cents(rate_cents),
            days,
        }
    }

    #[test]
    fn line_total_multiplies_rate_quantity_days() {
        assert_eq!(item(40_050, 2, 3).line_total().cents(), 240_300);
        assert_eq!(item(40_050, 0, 3).line_total(), Money::ZERO);
    }

    #[test]
    fn percent_discount_wins_over_flat_amount() {
        let budget = Budget {
            discount_amount: Money::from_cents(99_999),
            discount_percent: 10,
            items: vec![item(10_000, 1, 1)],
            ..Budget::default()
        };
        assert_eq!(budget.applied_discount().cents(), 1_000);
        assert_eq!(budget.total().cents(), 9_000);
    }

    #[test]
    fn discount_never_exceeds_subtotal() {
        let budget = Budget {
            discount_amount: Money::from_cents(50_000),
            items: vec![item(10_000, 1, 1)],
            ..Budget::default()
        };
        assert_eq!(budget.applied_discount().cents(), 10_000);
        assert_eq!(budget.total(), Money::ZERO);
    }

    #[test]
    fn oversized_percent_is_treated_as_full_discount() {
        let budget = Budget {
            discount_percent: 250,
            items: vec![item(10_000, 2, 1)],
            ..Budget::default()
        };
        assert_eq!(budget.applied_discount(), budget.subtotal());
        assert_eq!(budget.total(), Money::ZERO);
    }

    #[test]
    fn empty_budget_totals_to_zero() {
        let budget = Budget::default();
        assert_eq!(budget.subtotal(), Money::ZERO);
        assert_eq!(budget.total(), Money::ZERO);
    }
}

//! # Form Payload Contract
//!
//! The form submits what the masked fields display: money as
//! `"1.234,56"`, dates as `"05/08/2026"`, percentages as bare integers.
//! This module is the consumer side of that contract. It serializes a
//! [`Budget`] to a JSON payload of displayed strings and reads one back
//! through the same tolerant parsers the editor itself uses, so a payload
//! touched by hand (or produced by an older build) still loads.

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use centavo_types::{Budget, LineItem, Money};

use crate::date_format::{format_day_month_year, parse_day_month_year};
use crate::money_format::{format_cents, only_digits, parse_cents_flexible, parse_count};

/// Error surfaced when a payload cannot be read or written.
#[derive(Debug, Error)]
pub enum FormPayloadError {
    /// I/O failure reading or writing the budget file.
    #[error("budget file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file exists but does not hold JSON.
    #[error("budget file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON root is not an object.
    #[error("budget payload must be a JSON object")]
    NotAnObject,
    /// A date field holds digits that form no calendar date.
    #[error("field '{field}' holds an impossible date: {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

/// Serializes the budget as its displayed strings. Untouched optional
/// fields travel as empty strings, never as `"0,00"`.
pub fn to_payload(budget: &Budget) -> Value {
    let items: Vec<Value> = budget
        .items
        .iter()
        .map(|item| {
            json!({
                "role": item.role,
                "quantity": item.quantity.to_string(),
                "hours_per_day": item.hours_per_day.to_string(),
                "daily_rate": format_cents(item.daily_rate.cents()),
                "days": item.days.to_string(),
            })
        })
        .collect();

    json!({
        "event_date": budget.event_date.map(format_day_month_year).unwrap_or_default(),
        "discount_amount": if budget.discount_amount.is_zero() {
            String::new()
        } else {
            format_cents(budget.discount_amount.cents())
        },
        "discount_percent": if budget.discount_percent == 0 {
            String::new()
        } else {
            budget.discount_percent.to_string()
        },
        "items": items,
    })
}

/// Reads a budget back out of a payload of displayed strings.
///
/// Money and count fields never fail (the tolerant parsers degrade to
/// zero); a non-empty date that forms no calendar date is the one
/// structural error a payload can carry.
pub fn from_payload(payload: &Value) -> Result<Budget, FormPayloadError> {
    let root = payload.as_object().ok_or(FormPayloadError::NotAnObject)?;

    let date_text = string_field(payload, "event_date");
    let event_date = if date_text.trim().is_empty() {
        None
    } else {
        let digits = only_digits(&date_text);
        Some(parse_day_month_year(&digits).ok_or(FormPayloadError::InvalidDate {
            field: "event_date",
            value: date_text,
        })?)
    };

    let items = root
        .get("items")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(item_from_payload).collect())
        .unwrap_or_default();

    Ok(Budget {
        event_date,
        discount_amount: Money::from_cents(parse_cents_flexible(&string_field(payload, "discount_amount"))),
        discount_percent: parse_count(&string_field(payload, "discount_percent")).min(100) as u8,
        items,
    })
}

/// Writes the payload to disk, pretty-printed.
pub fn save(budget: &Budget, path: &Path) -> Result<(), FormPayloadError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(&to_payload(budget))?;
    fs::write(path, text)?;
    debug!(path = %path.display(), "budget payload written");
    Ok(())
}

/// Loads a payload from disk.
pub fn load(path: &Path) -> Result<Budget, FormPayloadError> {
    let text = fs::read_to_string(path)?;
    let payload: Value = serde_json::from_str(&text)?;
    from_payload(&payload)
}

fn item_from_payload(entry: &Value) -> LineItem {
    LineItem {
        role: string_field(entry, "role"),
        quantity: parse_count(&string_field(entry, "quantity")),
        hours_per_day: parse_count(&string_field(entry, "hours_per_day")),
        daily_rate: Money::from_cents(parse_cents_flexible(&string_field(entry, "daily_rate"))),
        days: parse_count(&string_field(entry, "days")),
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_budget() -> Budget {
        Budget {
            event_date: NaiveDate::from_ymd_opt(2026, 8, 5),
            discount_amount: Money::ZERO,
            discount_percent: 10,
            items: vec![LineItem {
                role: "Model".into(),
                quantity: 2,
                hours_per_day: 8,
                daily_rate: Money::from_cents(40_050),
                days: 3,
            }],
        }
    }

    #[test]
    fn payload_round_trips() {
        let budget = sample_budget();
        let payload = to_payload(&budget);
        assert_eq!(payload["items"][0]["daily_rate"], "400,50");
        assert_eq!(payload["event_date"], "05/08/2026");
        assert_eq!(from_payload(&payload).unwrap(), budget);
    }

    #[test]
    fn money_fields_accept_any_tolerated_spelling() {
        let payload = json!({
            "discount_amount": "R$ 1.234,5",
            "items": [{"role": "Extra", "quantity": "1", "daily_rate": "400.50", "days": "1"}],
        });
        let budget = from_payload(&payload).unwrap();
        assert_eq!(budget.discount_amount.cents(), 123_450);
        assert_eq!(budget.items[0].daily_rate.cents(), 40_050);
        assert_eq!(budget.items[0].hours_per_day, 0);
    }

    #[test]
    fn empty_optional_fields_stay_empty() {
        let payload = to_payload(&Budget::default());
        assert_eq!(payload["discount_amount"], "");
        assert_eq!(payload["discount_percent"], "");
        assert_eq!(payload["event_date"], "");
        assert_eq!(from_payload(&payload).unwrap(), Budget::default());
    }

    #[test]
    fn impossible_date_is_rejected() {
        let payload = json!({"event_date": "31/02/2026"});
        assert!(matches!(
            from_payload(&payload),
            Err(FormPayloadError::InvalidDate { field: "event_date", .. })
        ));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(matches!(from_payload(&json!([])), Err(FormPayloadError::NotAnObject)));
    }

    #[test]
    fn oversized_percent_clamps() {
        let payload = json!({"discount_percent": "950"});
        assert_eq!(from_payload(&payload).unwrap().discount_percent, 100);
    }

    #[test]
    fn save_and_load_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("budget.json");
        let budget = sample_budget();
        save(&budget, &path).unwrap();
        assert_eq!(load(&path).unwrap(), budget);
    }
}

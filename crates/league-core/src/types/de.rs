//! Lenient deserializers for the API's loosely typed fields.
//!
//! Prices arrive as JSON strings (`"123.45"`), plain numbers or `null` depending on the
//! endpoint. Anything unparseable reads as zero.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        _ => None,
    }
}

/// Decimal that defaults to zero when missing, null or malformed.
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_decimal(&value).unwrap_or(Decimal::ZERO))
}

/// Decimal that stays `None` when missing, null or malformed.
pub fn opt_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_decimal(&value))
}

/// Calendar date from either `YYYY-MM-DD` or an ISO datetime.
pub fn opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        let day = s.split('T').next().unwrap_or_default();
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Deserialize)]
    struct Price {
        #[serde(default, deserialize_with = "decimal")]
        value: Decimal,
        #[serde(default, deserialize_with = "opt_decimal")]
        change: Option<Decimal>,
        #[serde(default, deserialize_with = "opt_date")]
        day: Option<NaiveDate>,
    }

    #[test]
    fn test_decimal_from_string_and_number() {
        let p: Price = serde_json::from_str(r#"{"value": "187.25"}"#).unwrap();
        assert_eq!(p.value, dec!(187.25));

        let p: Price = serde_json::from_str(r#"{"value": 42.5}"#).unwrap();
        assert_eq!(p.value, dec!(42.5));
    }

    #[test]
    fn test_decimal_garbage_is_zero() {
        let p: Price = serde_json::from_str(r#"{"value": "n/a", "change": null}"#).unwrap();
        assert_eq!(p.value, Decimal::ZERO);
        assert_eq!(p.change, None);

        let p: Price = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.value, Decimal::ZERO);
    }

    #[test]
    fn test_date_prefix() {
        let p: Price = serde_json::from_str(r#"{"day": "2026-11-02T00:00:00Z"}"#).unwrap();
        assert_eq!(p.day, NaiveDate::from_ymd_opt(2026, 11, 2));

        let p: Price = serde_json::from_str(r#"{"day": "2026-11-02"}"#).unwrap();
        assert_eq!(p.day, NaiveDate::from_ymd_opt(2026, 11, 2));

        let p: Price = serde_json::from_str(r#"{"day": null}"#).unwrap();
        assert_eq!(p.day, None);
    }
}

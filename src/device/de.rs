// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lenient deserializers for loosely typed cloud values.
//!
//! The realtime database stores whatever the mobile app wrote, so numbers
//! sometimes arrive as strings and booleans as `0`/`1`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    as_f64(&value).ok_or_else(|| D::Error::custom(format!("expected a number, got {value}")))
}

pub(crate) fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => as_f64(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {value}"))),
    }
}

pub(crate) fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    as_i64(&value).ok_or_else(|| D::Error::custom(format!("expected an integer, got {value}")))
}

pub(crate) fn optional_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => as_i64(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {value}"))),
    }
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.to_ascii_lowercase().as_str(), "true" | "1" | "on"),
        Value::Null => false,
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "number")]
        temp: f64,
        #[serde(default, deserialize_with = "optional_number")]
        limit: Option<f64>,
        #[serde(deserialize_with = "integer")]
        stamp: i64,
        #[serde(deserialize_with = "flag")]
        power: bool,
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let sample: Sample = serde_json::from_value(serde_json::json!({
            "temp": "21.5",
            "limit": 25,
            "stamp": "1700000000000",
            "power": 1
        }))
        .unwrap();

        assert!((sample.temp - 21.5).abs() < f64::EPSILON);
        assert_eq!(sample.limit, Some(25.0));
        assert_eq!(sample.stamp, 1_700_000_000_000);
        assert!(sample.power);
    }

    #[test]
    fn missing_optional_is_none() {
        let sample: Sample = serde_json::from_value(serde_json::json!({
            "temp": 20,
            "stamp": 1.0,
            "power": "false"
        }))
        .unwrap();

        assert_eq!(sample.limit, None);
        assert_eq!(sample.stamp, 1);
        assert!(!sample.power);
    }

    #[test]
    fn rejects_garbage_numbers() {
        let result = serde_json::from_value::<Sample>(serde_json::json!({
            "temp": "warm",
            "stamp": 0,
            "power": true
        }));
        assert!(result.is_err());
    }
}

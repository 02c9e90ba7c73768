// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hourly energy statistics.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::Deserialize;

use super::de;

/// Energy consumed by a radiator during one full hour.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyConsumption {
    start: NaiveDateTime,
    end: NaiveDateTime,
    kwh: f64,
    effective_power: f64,
}

/// Shape of an hourly statistics node.
#[derive(Debug, Deserialize)]
pub(crate) struct RawEnergyStats {
    #[serde(deserialize_with = "de::number")]
    ec: f64,
    #[serde(default, deserialize_with = "de::optional_number")]
    effective_power: Option<f64>,
}

impl EnergyConsumption {
    /// Creates a consumption record.
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, kwh: f64, effective_power: f64) -> Self {
        Self {
            start,
            end,
            kwh,
            effective_power,
        }
    }

    /// Returns the start of the last full hour before `now`.
    ///
    /// Statistics for the running hour are incomplete, so the cloud is
    /// always queried for the previous one.
    #[must_use]
    pub fn previous_hour(now: NaiveDateTime) -> NaiveDateTime {
        let hour_start = now
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);
        hour_start - Duration::hours(1)
    }

    pub(crate) fn from_raw(start: NaiveDateTime, raw: RawEnergyStats) -> Self {
        Self::new(
            start,
            start + Duration::hours(1),
            raw.ec,
            raw.effective_power.unwrap_or_default(),
        )
    }

    /// Returns the start of the measured hour.
    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the end of the measured hour.
    #[must_use]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the energy consumed in kWh.
    #[must_use]
    pub fn kwh(&self) -> f64 {
        self.kwh
    }

    /// Returns the effective power in Watts.
    #[must_use]
    pub fn effective_power(&self) -> f64 {
        self.effective_power
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn previous_hour_truncates_and_steps_back() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 42, 17)
            .unwrap();
        let start = EnergyConsumption::previous_hour(now);
        assert_eq!(
            start,
            NaiveDate::from_ymd_opt(2024, 2, 29)
                .unwrap()
                .and_hms_opt(23, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn from_raw_spans_one_hour() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let raw: RawEnergyStats =
            serde_json::from_value(serde_json::json!({"ec": "0.35", "effective_power": 350}))
                .unwrap();

        let energy = EnergyConsumption::from_raw(start, raw);
        assert_eq!(energy.end() - energy.start(), Duration::hours(1));
        assert!((energy.kwh() - 0.35).abs() < f64::EPSILON);
        assert!((energy.effective_power() - 350.0).abs() < f64::EPSILON);
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Weekly heating schedule.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Mode of a single schedule slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleMode {
    /// Comfort slot (`C`).
    Comfort,
    /// Eco slot (`E`).
    Eco,
    /// No programmed slot (`O` or anything else).
    None,
}

impl From<char> for ScheduleMode {
    fn from(c: char) -> Self {
        match c {
            'C' => Self::Comfort,
            'E' => Self::Eco,
            _ => Self::None,
        }
    }
}

/// Weekly schedule as reported by the radiator.
///
/// One string per day starting on Monday, one character per hour.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use rointe_lib::types::{Schedule, ScheduleMode};
///
/// let day = format!("{}{}", "E".repeat(8), "C".repeat(16));
/// let schedule = Schedule::new(vec![day; 7]);
///
/// assert_eq!(schedule.mode_at(Weekday::Mon, 7), ScheduleMode::Eco);
/// assert_eq!(schedule.mode_at(Weekday::Sun, 20), ScheduleMode::Comfort);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(Vec<String>);

impl Schedule {
    /// Creates a schedule from its per-day strings.
    #[must_use]
    pub fn new(days: Vec<String>) -> Self {
        Self(days)
    }

    /// Returns the per-day strings.
    #[must_use]
    pub fn days(&self) -> &[String] {
        &self.0
    }

    /// Returns the slot mode for a weekday and hour.
    ///
    /// Missing days or hours are reported as [`ScheduleMode::None`].
    #[must_use]
    pub fn mode_at(&self, weekday: Weekday, hour: u32) -> ScheduleMode {
        let day = weekday.num_days_from_monday() as usize;

        self.0
            .get(day)
            .and_then(|slots| slots.chars().nth(hour as usize))
            .map_or(ScheduleMode::None, ScheduleMode::from)
    }

    /// Returns the slot mode active at the given local time.
    #[must_use]
    pub fn mode_at_time(&self, time: NaiveDateTime) -> ScheduleMode {
        self.mode_at(time.weekday(), time.hour())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn workweek() -> Schedule {
        let weekday = format!("{}{}{}", "O".repeat(7), "C".repeat(2), "E".repeat(15));
        let weekend = "C".repeat(24);
        let mut days = vec![weekday; 5];
        days.extend([weekend.clone(), weekend]);
        Schedule::new(days)
    }

    #[test]
    fn reads_slot_for_weekday_and_hour() {
        let schedule = workweek();
        assert_eq!(schedule.mode_at(Weekday::Tue, 3), ScheduleMode::None);
        assert_eq!(schedule.mode_at(Weekday::Tue, 8), ScheduleMode::Comfort);
        assert_eq!(schedule.mode_at(Weekday::Fri, 23), ScheduleMode::Eco);
        assert_eq!(schedule.mode_at(Weekday::Sat, 3), ScheduleMode::Comfort);
    }

    #[test]
    fn missing_slots_are_none() {
        let schedule = Schedule::new(vec!["CC".to_string()]);
        assert_eq!(schedule.mode_at(Weekday::Mon, 1), ScheduleMode::Comfort);
        assert_eq!(schedule.mode_at(Weekday::Mon, 5), ScheduleMode::None);
        assert_eq!(schedule.mode_at(Weekday::Wed, 0), ScheduleMode::None);
        assert_eq!(Schedule::default().mode_at(Weekday::Mon, 0), ScheduleMode::None);
    }

    #[test]
    fn mode_at_time_uses_monday_first() {
        let schedule = workweek();
        // 2024-01-06 is a Saturday.
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        assert_eq!(schedule.mode_at_time(saturday), ScheduleMode::Comfort);

        // 2024-01-08 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2024, 1, 8)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        assert_eq!(schedule.mode_at_time(monday), ScheduleMode::None);
    }

    #[test]
    fn deserializes_from_json_array() {
        let schedule: Schedule = serde_json::from_str(r#"["CE", "EC"]"#).unwrap();
        assert_eq!(schedule.days().len(), 2);
        assert_eq!(schedule.mode_at(Weekday::Tue, 0), ScheduleMode::Eco);
    }
}

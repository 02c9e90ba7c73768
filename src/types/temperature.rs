// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target temperature limits.

use crate::error::ValueError;

/// Temperature sent when a mode change needs one and no preset applies.
pub const DEFAULT_TEMPERATURE: f64 = 20.0;

/// Lowest selectable target temperature.
pub const TEMPERATURE_MIN: f64 = 7.0;

/// Highest selectable target temperature.
pub const TEMPERATURE_MAX: f64 = 30.0;

/// Target temperature increment.
pub const TEMPERATURE_STEP: f64 = 0.5;

/// Inclusive range of selectable target temperatures.
///
/// # Examples
///
/// ```
/// use rointe_lib::types::TemperatureRange;
///
/// let range = TemperatureRange::default();
/// assert!(range.validate(21.5).is_ok());
/// assert!(range.validate(35.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    min: f64,
    max: f64,
}

impl TemperatureRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Checks that a value lies within the range.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TemperatureOutOfRange`] for values outside the
    /// range or that are not finite.
    pub fn validate(&self, value: f64) -> Result<f64, ValueError> {
        if value.is_finite() && value >= self.min && value <= self.max {
            Ok(value)
        } else {
            Err(ValueError::TemperatureOutOfRange {
                min: self.min,
                max: self.max,
                actual: value,
            })
        }
    }
}

impl Default for TemperatureRange {
    fn default() -> Self {
        Self::new(TEMPERATURE_MIN, TEMPERATURE_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let range = TemperatureRange::default();
        assert_eq!(range.validate(7.0), Ok(7.0));
        assert_eq!(range.validate(30.0), Ok(30.0));
        assert!(range.validate(6.5).is_err());
        assert!(range.validate(f64::NAN).is_err());
    }

    #[test]
    fn custom_range() {
        let range = TemperatureRange::new(15.0, 22.0);
        assert!(range.validate(23.0).is_err());
        assert_eq!(range.max(), 22.0);
    }
}

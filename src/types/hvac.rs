// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat vocabulary exposed to users.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// HVAC mode a user can select on a radiator.
///
/// # Examples
///
/// ```
/// use rointe_lib::types::HvacMode;
///
/// let mode: HvacMode = "auto".parse().unwrap();
/// assert_eq!(mode, HvacMode::Auto);
/// assert!("cool".parse::<HvacMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HvacMode {
    /// Radiator switched off.
    Off,
    /// Manual heating at a fixed temperature.
    Heat,
    /// Heating driven by the weekly schedule.
    Auto,
}

impl HvacMode {
    /// All modes a radiator supports, in display order.
    pub const ALL: [Self; 3] = [Self::Off, Self::Heat, Self::Auto];

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Heat => "heat",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HvacMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "heat" => Ok(Self::Heat),
            "auto" => Ok(Self::Auto),
            _ => Err(ValueError::InvalidHvacMode(s.to_string())),
        }
    }
}

/// What the radiator is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HvacAction {
    /// Switched off.
    Off,
    /// Auto mode, waiting for a schedule slot.
    Idle,
    /// Heating.
    Heating,
}

impl HvacAction {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Idle => "idle",
            Self::Heating => "heating",
        }
    }
}

impl fmt::Display for HvacAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preset a user can select on a radiator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetMode {
    /// Comfort temperature.
    Comfort,
    /// Eco temperature.
    Eco,
    /// Anti-frost (ice) temperature.
    AntiFrost,
}

impl PresetMode {
    /// All presets a radiator supports, in display order.
    pub const ALL: [Self; 3] = [Self::Comfort, Self::Eco, Self::AntiFrost];

    /// Returns the user-facing name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comfort => "comfort",
            Self::Eco => "eco",
            Self::AntiFrost => "Anti-frost",
        }
    }
}

impl fmt::Display for PresetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "comfort" => Ok(Self::Comfort),
            "eco" => Ok(Self::Eco),
            "anti-frost" | "ice" => Ok(Self::AntiFrost),
            _ => Err(ValueError::InvalidPresetMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hvac_mode_parse() {
        assert_eq!("off".parse::<HvacMode>().unwrap(), HvacMode::Off);
        assert_eq!("HEAT".parse::<HvacMode>().unwrap(), HvacMode::Heat);
        assert!(matches!(
            "cool".parse::<HvacMode>(),
            Err(ValueError::InvalidHvacMode(_))
        ));
    }

    #[test]
    fn preset_mode_parse_accepts_display_name() {
        assert_eq!(
            "Anti-frost".parse::<PresetMode>().unwrap(),
            PresetMode::AntiFrost
        );
        assert_eq!(
            PresetMode::AntiFrost.to_string().parse::<PresetMode>().unwrap(),
            PresetMode::AntiFrost
        );
        assert!("boost".parse::<PresetMode>().is_err());
    }

    #[test]
    fn display_order() {
        assert_eq!(HvacMode::ALL, [HvacMode::Off, HvacMode::Heat, HvacMode::Auto]);
        assert_eq!(PresetMode::ALL[2], PresetMode::AntiFrost);
    }
}

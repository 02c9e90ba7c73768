// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vendor working mode and preset values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Working mode of a radiator.
///
/// In `Auto` the radiator follows its weekly schedule, in `Manual` it holds
/// the target temperature set by the user.
///
/// # Examples
///
/// ```
/// use rointe_lib::types::DeviceMode;
///
/// assert_eq!(DeviceMode::Auto.as_str(), "auto");
/// assert_eq!(DeviceMode::from("manual"), DeviceMode::Manual);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum DeviceMode {
    /// Follow the weekly schedule.
    Auto,
    /// Hold the user target temperature.
    #[default]
    Manual,
}

impl DeviceMode {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

impl From<&str> for DeviceMode {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("auto") {
            Self::Auto
        } else {
            Self::Manual
        }
    }
}

impl From<String> for DeviceMode {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<DeviceMode> for &'static str {
    fn from(mode: DeviceMode) -> Self {
        mode.as_str()
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preset reported by the radiator in its `status` field.
///
/// `None` means the radiator runs at a temperature that matches no preset.
/// `Off` is reported in auto mode while the schedule has no active slot,
/// and after the radiator was switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Preset {
    /// Comfort temperature.
    Comfort,
    /// Eco temperature.
    Eco,
    /// Anti-frost temperature.
    Ice,
    /// No preset.
    #[default]
    None,
    /// Off or waiting for the schedule.
    Off,
}

impl Preset {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comfort => "comfort",
            Self::Eco => "eco",
            Self::Ice => "ice",
            Self::None => "none",
            Self::Off => "off",
        }
    }
}

impl From<&str> for Preset {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "comfort" => Self::Comfort,
            "eco" => Self::Eco,
            "ice" => Self::Ice,
            "off" => Self::Off,
            _ => Self::None,
        }
    }
}

impl From<String> for Preset {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Preset> for &'static str {
    fn from(preset: Preset) -> Self {
        preset.as_str()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_mode_from_str() {
        assert_eq!(DeviceMode::from("auto"), DeviceMode::Auto);
        assert_eq!(DeviceMode::from("AUTO"), DeviceMode::Auto);
        assert_eq!(DeviceMode::from("manual"), DeviceMode::Manual);
        assert_eq!(DeviceMode::from("whatever"), DeviceMode::Manual);
    }

    #[test]
    fn preset_unknown_maps_to_none() {
        assert_eq!(Preset::from("comfort"), Preset::Comfort);
        assert_eq!(Preset::from("Eco"), Preset::Eco);
        assert_eq!(Preset::from("ice"), Preset::Ice);
        assert_eq!(Preset::from("off"), Preset::Off);
        assert_eq!(Preset::from("boost"), Preset::None);
    }

    #[test]
    fn preset_serde_uses_wire_names() {
        let json = serde_json::to_string(&Preset::Ice).unwrap();
        assert_eq!(json, "\"ice\"");

        let parsed: Preset = serde_json::from_str("\"eco\"").unwrap();
        assert_eq!(parsed, Preset::Eco);
    }
}

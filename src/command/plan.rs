// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Translation of user intents into cloud patches.

use std::fmt;

use chrono::NaiveDateTime;

use super::DevicePatch;
use crate::device::RadiatorDevice;
use crate::error::ValueError;
use crate::state::StateChange;
use crate::types::{DEFAULT_TEMPERATURE, DeviceMode, HvacMode, Preset, PresetMode, ScheduleMode};

/// A user intent for a radiator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceCommand {
    /// Hold a target temperature in manual mode.
    SetTemperature(f64),
    /// Switch to one of the preset temperatures in manual mode.
    SetPreset(PresetMode),
    /// Switch off, heat manually or follow the schedule.
    SetHvacMode(HvacMode),
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetTemperature(temp) => write!(f, "set temperature {temp}"),
            Self::SetPreset(preset) => write!(f, "set preset {preset}"),
            Self::SetHvacMode(mode) => write!(f, "set HVAC mode {mode}"),
        }
    }
}

/// The requests a command needs and the state they lead to.
///
/// Patches must be sent in order. The outcome is only applied to the cached
/// record once every patch succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandPlan {
    patches: Vec<DevicePatch>,
    outcome: StateChange,
}

impl CommandPlan {
    /// Plans a command for a radiator.
    ///
    /// `now` is the local wall-clock time, used to read the schedule slot
    /// when switching to auto mode.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::TemperatureOutOfRange`] if a target temperature
    /// is outside the radiator's selectable range.
    pub fn for_device(
        device: &RadiatorDevice,
        command: &DeviceCommand,
        now: NaiveDateTime,
    ) -> Result<Self, ValueError> {
        match *command {
            DeviceCommand::SetTemperature(temp) => Self::set_temperature(device, temp),
            DeviceCommand::SetPreset(preset) => Ok(Self::set_preset(device, preset)),
            DeviceCommand::SetHvacMode(mode) => Ok(Self::set_hvac_mode(device, mode, now)),
        }
    }

    #[allow(clippy::float_cmp)]
    fn set_temperature(device: &RadiatorDevice, temp: f64) -> Result<Self, ValueError> {
        let temp = device.temperature_range().validate(temp)?;

        let preset = if temp == device.comfort_temp() {
            Preset::Comfort
        } else if temp == device.eco_temp() {
            Preset::Eco
        } else if temp == device.ice_temp() {
            Preset::Ice
        } else {
            Preset::None
        };

        Ok(Self {
            patches: vec![
                DevicePatch::new()
                    .with_temp(temp)
                    .with_mode(DeviceMode::Manual)
                    .with_power(true),
            ],
            outcome: StateChange::batch(vec![
                StateChange::TargetTemperature(temp),
                StateChange::Mode(DeviceMode::Manual),
                StateChange::Power(true),
                StateChange::Preset(preset),
            ]),
        })
    }

    fn set_preset(device: &RadiatorDevice, preset: PresetMode) -> Self {
        let (temp, status) = match preset {
            PresetMode::Comfort => (device.comfort_temp(), Preset::Comfort),
            PresetMode::Eco => (device.eco_temp(), Preset::Eco),
            PresetMode::AntiFrost => (device.ice_temp(), Preset::Ice),
        };

        Self {
            patches: vec![
                DevicePatch::new()
                    .with_power(true)
                    .with_mode(DeviceMode::Manual)
                    .with_temp(temp)
                    .with_status(status),
            ],
            outcome: StateChange::batch(vec![
                StateChange::Power(true),
                StateChange::Mode(DeviceMode::Manual),
                StateChange::TargetTemperature(temp),
                StateChange::Preset(status),
            ]),
        }
    }

    fn set_hvac_mode(device: &RadiatorDevice, mode: HvacMode, now: NaiveDateTime) -> Self {
        match mode {
            HvacMode::Off => Self::switch_off(device),
            HvacMode::Heat => Self {
                patches: vec![
                    DevicePatch::new()
                        .with_temp(DEFAULT_TEMPERATURE)
                        .with_mode(DeviceMode::Manual)
                        .with_power(true)
                        .with_status(Preset::None),
                ],
                outcome: StateChange::batch(vec![
                    StateChange::TargetTemperature(DEFAULT_TEMPERATURE),
                    StateChange::Power(true),
                    StateChange::Mode(DeviceMode::Manual),
                    StateChange::Preset(Preset::None),
                ]),
            },
            HvacMode::Auto => Self::follow_schedule(device, now),
        }
    }

    fn switch_off(device: &RadiatorDevice) -> Self {
        match device.mode() {
            DeviceMode::Manual => Self {
                patches: vec![
                    DevicePatch::new()
                        .with_temp(DEFAULT_TEMPERATURE)
                        .with_power(false)
                        .with_mode(DeviceMode::Manual)
                        .with_status(Preset::Off),
                ],
                outcome: StateChange::batch(vec![
                    StateChange::TargetTemperature(DEFAULT_TEMPERATURE),
                    StateChange::Power(false),
                    StateChange::Preset(Preset::Off),
                ]),
            },
            DeviceMode::Auto => Self {
                patches: vec![
                    DevicePatch::new()
                        .with_power(false)
                        .with_mode(DeviceMode::Auto)
                        .with_status(Preset::Off),
                ],
                outcome: StateChange::batch(vec![
                    StateChange::Power(false),
                    StateChange::Preset(Preset::Off),
                ]),
            },
        }
    }

    /// The cloud needs the temperature of the active schedule slot before
    /// it accepts the switch to auto mode, so this takes two patches.
    fn follow_schedule(device: &RadiatorDevice, now: NaiveDateTime) -> Self {
        let (temp, preset) = match device.schedule_mode_at(now) {
            ScheduleMode::Comfort => (device.comfort_temp(), Preset::Comfort),
            ScheduleMode::Eco => (device.eco_temp(), Preset::Eco),
            ScheduleMode::None if device.ice_mode() => (device.ice_temp(), Preset::Ice),
            ScheduleMode::None => (DEFAULT_TEMPERATURE, Preset::Off),
        };

        Self {
            patches: vec![
                DevicePatch::new().with_temp(temp),
                DevicePatch::new()
                    .with_mode(DeviceMode::Auto)
                    .with_power(true),
            ],
            outcome: StateChange::batch(vec![
                StateChange::TargetTemperature(temp),
                StateChange::Preset(preset),
                StateChange::Power(true),
                StateChange::Mode(DeviceMode::Auto),
            ]),
        }
    }

    /// Returns the patches to send, in order.
    #[must_use]
    pub fn patches(&self) -> &[DevicePatch] {
        &self.patches
    }

    /// Returns the state change to apply once every patch succeeded.
    #[must_use]
    pub fn outcome(&self) -> &StateChange {
        &self.outcome
    }

    /// Splits the plan into its patches and outcome.
    #[must_use]
    pub fn into_parts(self) -> (Vec<DevicePatch>, StateChange) {
        (self.patches, self.outcome)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    /// Comfort from 08:00 to 21:59 every day, eco otherwise.
    fn radiator(mode: &str, ice_mode: bool, schedule: &str) -> RadiatorDevice {
        let json = json!({
            "data": {
                "name": "Kitchen",
                "type": "radiator",
                "product_version": "v1",
                "nominal_power": 1000,
                "power": true,
                "status": "none",
                "mode": mode,
                "temp": 19.5,
                "temp_calc": 19.5,
                "temp_probe": 19.0,
                "comfort": 21.0,
                "eco": 17.5,
                "ice": 7.0,
                "ice_mode": ice_mode,
                "schedule": vec![schedule; 7]
            }
        });
        RadiatorDevice::from_json("dev-1", &json).unwrap()
    }

    fn default_schedule() -> String {
        format!("{}{}{}", "E".repeat(8), "C".repeat(14), "E".repeat(2))
    }

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 3)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap()
    }

    fn plan(device: &RadiatorDevice, command: DeviceCommand, hour: u32) -> CommandPlan {
        CommandPlan::for_device(device, &command, at(hour)).unwrap()
    }

    #[test]
    fn set_temperature_matching_preset() {
        let device = radiator("auto", false, &default_schedule());
        let plan = plan(&device, DeviceCommand::SetTemperature(17.5), 12);

        assert_eq!(
            plan.patches(),
            [DevicePatch::new()
                .with_temp(17.5)
                .with_mode(DeviceMode::Manual)
                .with_power(true)]
        );
        assert!(plan
            .outcome()
            .clone()
            .flatten()
            .contains(&StateChange::Preset(Preset::Eco)));
    }

    #[test]
    fn set_temperature_off_preset() {
        let device = radiator("manual", false, &default_schedule());
        let plan = plan(&device, DeviceCommand::SetTemperature(22.5), 12);

        assert!(plan
            .outcome()
            .clone()
            .flatten()
            .contains(&StateChange::Preset(Preset::None)));
    }

    #[test]
    fn set_temperature_out_of_range() {
        let device = radiator("manual", false, &default_schedule());
        let result = CommandPlan::for_device(&device, &DeviceCommand::SetTemperature(31.0), at(12));

        assert!(matches!(
            result,
            Err(ValueError::TemperatureOutOfRange { actual, .. }) if actual == 31.0
        ));
    }

    #[test]
    fn set_preset_anti_frost() {
        let device = radiator("auto", false, &default_schedule());
        let plan = plan(&device, DeviceCommand::SetPreset(PresetMode::AntiFrost), 12);

        let body = serde_json::to_value(&plan.patches()[0]).unwrap();
        assert_eq!(
            body,
            json!({"power": true, "mode": "manual", "temp": 7.0, "status": "ice"})
        );
    }

    #[test]
    fn hvac_off_in_manual_resets_temperature() {
        let device = radiator("manual", false, &default_schedule());
        let plan = plan(&device, DeviceCommand::SetHvacMode(HvacMode::Off), 12);

        let body = serde_json::to_value(&plan.patches()[0]).unwrap();
        assert_eq!(
            body,
            json!({"temp": 20.0, "power": false, "mode": "manual", "status": "off"})
        );
    }

    #[test]
    fn hvac_off_in_auto_keeps_mode() {
        let device = radiator("auto", false, &default_schedule());
        let plan = plan(&device, DeviceCommand::SetHvacMode(HvacMode::Off), 12);

        let body = serde_json::to_value(&plan.patches()[0]).unwrap();
        assert_eq!(body, json!({"power": false, "mode": "auto", "status": "off"}));
        assert!(!plan
            .outcome()
            .clone()
            .flatten()
            .iter()
            .any(|c| matches!(c, StateChange::TargetTemperature(_))));
    }

    #[test]
    fn hvac_heat() {
        let device = radiator("auto", false, &default_schedule());
        let plan = plan(&device, DeviceCommand::SetHvacMode(HvacMode::Heat), 12);

        let body = serde_json::to_value(&plan.patches()[0]).unwrap();
        assert_eq!(
            body,
            json!({"temp": 20.0, "mode": "manual", "power": true, "status": "none"})
        );
    }

    #[test]
    fn hvac_auto_sends_scheduled_temperature_first() {
        let device = radiator("manual", false, &default_schedule());

        let comfort = plan(&device, DeviceCommand::SetHvacMode(HvacMode::Auto), 12);
        assert_eq!(comfort.patches().len(), 2);
        assert_eq!(comfort.patches()[0], DevicePatch::new().with_temp(21.0));
        assert_eq!(
            comfort.patches()[1],
            DevicePatch::new().with_mode(DeviceMode::Auto).with_power(true)
        );

        let eco = plan(&device, DeviceCommand::SetHvacMode(HvacMode::Auto), 6);
        assert_eq!(eco.patches()[0].temp(), Some(17.5));
        assert!(eco
            .outcome()
            .clone()
            .flatten()
            .contains(&StateChange::Preset(Preset::Eco)));
    }

    #[test]
    fn hvac_auto_without_slot_uses_ice_mode() {
        let device = radiator("manual", true, &"O".repeat(24));
        let plan = plan(&device, DeviceCommand::SetHvacMode(HvacMode::Auto), 12);

        assert_eq!(plan.patches()[0].temp(), Some(7.0));
        assert!(plan
            .outcome()
            .clone()
            .flatten()
            .contains(&StateChange::Preset(Preset::Ice)));
    }

    #[test]
    fn hvac_auto_without_slot_or_ice_mode_waits() {
        let device = radiator("manual", false, &"O".repeat(24));
        let plan = plan(&device, DeviceCommand::SetHvacMode(HvacMode::Auto), 12);

        assert_eq!(plan.patches()[0].temp(), Some(DEFAULT_TEMPERATURE));

        let mut device = device;
        device.apply(plan.outcome());
        assert_eq!(device.preset(), Preset::Off);
        assert_eq!(device.mode(), DeviceMode::Auto);
        assert!(device.power());
    }

    #[test]
    fn command_display() {
        assert_eq!(
            DeviceCommand::SetPreset(PresetMode::AntiFrost).to_string(),
            "set preset Anti-frost"
        );
        assert_eq!(
            DeviceCommand::SetHvacMode(HvacMode::Heat).to_string(),
            "set HVAC mode heat"
        );
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat radiator record.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

use super::energy::EnergyConsumption;
use super::raw::{RawDevice, RawDeviceData};
use crate::error::{DeviceError, Error, ParseError};
use crate::event::DeviceId;
use crate::state::StateChange;
use crate::types::{
    DeviceMode, DeviceType, Preset, ProductVersion, Schedule, ScheduleMode, TemperatureRange,
};

/// Plain-data record of one Rointe radiator.
///
/// Built from the cloud JSON with [`from_json`](Self::from_json) and kept
/// current with [`update_from`](Self::update_from), which reports what
/// changed between polls.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiatorDevice {
    id: DeviceId,
    name: String,
    serial_number: Option<String>,
    device_type: DeviceType,
    product_version: ProductVersion,
    nominal_power: i64,
    power: bool,
    preset: Preset,
    mode: DeviceMode,
    temp: f64,
    temp_calc: f64,
    temp_probe: f64,
    comfort_temp: f64,
    eco_temp: f64,
    ice_temp: f64,
    um_max_temp: Option<f64>,
    um_min_temp: Option<f64>,
    user_mode: bool,
    ice_mode: bool,
    schedule: Schedule,
    schedule_day: Option<i64>,
    schedule_hour: Option<i64>,
    last_sync_app: Option<DateTime<Utc>>,
    last_sync_device: Option<DateTime<Utc>>,
    firmware_version: Option<String>,
    latest_firmware_version: Option<String>,
    energy: Option<EnergyConsumption>,
}

impl RadiatorDevice {
    /// Builds a record from a `devices/<id>` JSON node.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::MissingData`] if the node has no `data`
    /// section, or a parse error if a field has an unexpected shape.
    pub fn from_json(id: impl Into<DeviceId>, json: &serde_json::Value) -> Result<Self, Error> {
        let id = id.into();
        data_section(&id, json)?;
        let raw: RawDevice = serde_json::from_value(json.clone()).map_err(ParseError::from)?;
        let data = raw
            .data
            .ok_or_else(|| DeviceError::MissingData(id.to_string()))?;

        let firmware_version = raw.firmware.and_then(|f| f.firmware_version_device);

        Ok(Self::from_raw(id, raw.serialnumber, data, firmware_version))
    }

    /// Reads the product type of a `devices/<id>` node without parsing
    /// the rest of it.
    ///
    /// Products this library does not handle use other schemas, so the
    /// type must be known before [`from_json`](Self::from_json) runs.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::MissingData`] if the node has no `data`
    /// section, an empty one, or one without a `type`.
    pub fn device_type_of(
        id: &DeviceId,
        json: &serde_json::Value,
    ) -> Result<DeviceType, Error> {
        data_section(id, json)?
            .get("type")
            .and_then(serde_json::Value::as_str)
            .map(DeviceType::from)
            .ok_or_else(|| DeviceError::MissingData(id.to_string()).into())
    }

    fn from_raw(
        id: DeviceId,
        serial_number: Option<String>,
        data: RawDeviceData,
        firmware_version: Option<String>,
    ) -> Self {
        let user_mode_supported = data.product_version.supports_user_mode();

        Self {
            id,
            name: data.name,
            serial_number,
            device_type: data.device_type,
            product_version: data.product_version,
            nominal_power: data.nominal_power,
            power: data.power,
            preset: data.status,
            mode: data.mode,
            temp: data.temp,
            temp_calc: data.temp_calc,
            temp_probe: data.temp_probe,
            comfort_temp: data.comfort,
            eco_temp: data.eco,
            ice_temp: data.ice,
            um_max_temp: data.um_max_temp.filter(|_| user_mode_supported),
            um_min_temp: data.um_min_temp.filter(|_| user_mode_supported),
            user_mode: user_mode_supported && data.user_mode,
            ice_mode: data.ice_mode,
            schedule: data.schedule,
            schedule_day: data.schedule_day,
            schedule_hour: data.schedule_hour,
            last_sync_app: data
                .last_sync_datetime_app
                .and_then(DateTime::from_timestamp_millis),
            last_sync_device: data
                .last_sync_datetime_device
                .and_then(DateTime::from_timestamp_millis),
            firmware_version,
            latest_firmware_version: None,
            energy: None,
        }
    }

    /// Attaches hourly energy statistics.
    #[must_use]
    pub fn with_energy(mut self, energy: Option<EnergyConsumption>) -> Self {
        self.energy = energy;
        self
    }

    /// Attaches the latest firmware version available for this product.
    #[must_use]
    pub fn with_latest_firmware(mut self, version: Option<String>) -> Self {
        self.latest_firmware_version = version;
        self
    }

    // ========== Identification ==========

    /// Returns the vendor device id.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the serial number, if reported.
    #[must_use]
    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    /// Returns the product type.
    #[must_use]
    pub fn device_type(&self) -> &DeviceType {
        &self.device_type
    }

    /// Returns the hardware revision.
    #[must_use]
    pub fn product_version(&self) -> &ProductVersion {
        &self.product_version
    }

    /// Returns the nominal power in Watts.
    #[must_use]
    pub fn nominal_power(&self) -> i64 {
        self.nominal_power
    }

    // ========== Control state ==========

    /// Returns `true` if the radiator is switched on.
    #[must_use]
    pub fn power(&self) -> bool {
        self.power
    }

    /// Returns the active preset.
    #[must_use]
    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Returns the working mode.
    #[must_use]
    pub fn mode(&self) -> DeviceMode {
        self.mode
    }

    /// Returns the target temperature.
    #[must_use]
    pub fn temp(&self) -> f64 {
        self.temp
    }

    /// Returns the temperature computed by the radiator.
    #[must_use]
    pub fn temp_calc(&self) -> f64 {
        self.temp_calc
    }

    /// Returns the probe (room) temperature.
    #[must_use]
    pub fn temp_probe(&self) -> f64 {
        self.temp_probe
    }

    /// Returns the comfort preset temperature.
    #[must_use]
    pub fn comfort_temp(&self) -> f64 {
        self.comfort_temp
    }

    /// Returns the eco preset temperature.
    #[must_use]
    pub fn eco_temp(&self) -> f64 {
        self.eco_temp
    }

    /// Returns the anti-frost preset temperature.
    #[must_use]
    pub fn ice_temp(&self) -> f64 {
        self.ice_temp
    }

    /// Returns `true` if anti-frost applies outside schedule slots.
    #[must_use]
    pub fn ice_mode(&self) -> bool {
        self.ice_mode
    }

    // ========== User mode ==========

    /// Returns `true` if this product reports user mode limits.
    #[must_use]
    pub fn user_mode_supported(&self) -> bool {
        self.product_version.supports_user_mode()
    }

    /// Returns `true` if user mode is enabled.
    #[must_use]
    pub fn user_mode(&self) -> bool {
        self.user_mode
    }

    /// Returns the user mode upper limit.
    #[must_use]
    pub fn um_max_temp(&self) -> Option<f64> {
        self.um_max_temp
    }

    /// Returns the user mode lower limit.
    #[must_use]
    pub fn um_min_temp(&self) -> Option<f64> {
        self.um_min_temp
    }

    /// Returns the selectable target temperature range.
    ///
    /// Second generation radiators in user mode restrict the range to the
    /// user mode limits.
    #[must_use]
    pub fn temperature_range(&self) -> TemperatureRange {
        let default = TemperatureRange::default();
        if self.user_mode_supported() && self.user_mode {
            TemperatureRange::new(
                self.um_min_temp.unwrap_or(default.min()),
                self.um_max_temp.unwrap_or(default.max()),
            )
        } else {
            default
        }
    }

    // ========== Schedule ==========

    /// Returns the weekly schedule.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the schedule day reported by the radiator.
    #[must_use]
    pub fn schedule_day(&self) -> Option<i64> {
        self.schedule_day
    }

    /// Returns the schedule hour reported by the radiator.
    #[must_use]
    pub fn schedule_hour(&self) -> Option<i64> {
        self.schedule_hour
    }

    /// Returns the schedule slot active at the given local time.
    #[must_use]
    pub fn schedule_mode_at(&self, time: NaiveDateTime) -> ScheduleMode {
        self.schedule.mode_at_time(time)
    }

    /// Returns the schedule slot active now.
    #[must_use]
    pub fn current_schedule_mode(&self) -> ScheduleMode {
        self.schedule_mode_at(Local::now().naive_local())
    }

    // ========== Sync, firmware and energy ==========

    /// Returns when the app last wrote to the radiator.
    #[must_use]
    pub fn last_sync_app(&self) -> Option<DateTime<Utc>> {
        self.last_sync_app
    }

    /// Returns when the radiator last synced with the cloud.
    #[must_use]
    pub fn last_sync_device(&self) -> Option<DateTime<Utc>> {
        self.last_sync_device
    }

    /// Returns the installed firmware version.
    #[must_use]
    pub fn firmware_version(&self) -> Option<&str> {
        self.firmware_version.as_deref()
    }

    /// Returns the latest firmware version available.
    #[must_use]
    pub fn latest_firmware_version(&self) -> Option<&str> {
        self.latest_firmware_version.as_deref()
    }

    /// Returns the last hourly energy statistics.
    #[must_use]
    pub fn energy(&self) -> Option<&EnergyConsumption> {
        self.energy.as_ref()
    }

    // ========== Change detection ==========

    /// Lists the observable differences from `self` to `other`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn diff(&self, other: &RadiatorDevice) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if self.name != other.name {
            changes.push(StateChange::Name(other.name.clone()));
        }
        if self.power != other.power {
            changes.push(StateChange::Power(other.power));
        }
        if self.mode != other.mode {
            changes.push(StateChange::Mode(other.mode));
        }
        if self.preset != other.preset {
            changes.push(StateChange::Preset(other.preset));
        }
        if self.temp != other.temp {
            changes.push(StateChange::TargetTemperature(other.temp));
        }
        if self.temp_probe != other.temp_probe {
            changes.push(StateChange::ProbeTemperature(other.temp_probe));
        }
        if self.comfort_temp != other.comfort_temp
            || self.eco_temp != other.eco_temp
            || self.ice_temp != other.ice_temp
        {
            changes.push(StateChange::PresetTemperatures {
                comfort: other.comfort_temp,
                eco: other.eco_temp,
                ice: other.ice_temp,
            });
        }
        if self.user_mode != other.user_mode
            || self.um_min_temp != other.um_min_temp
            || self.um_max_temp != other.um_max_temp
        {
            changes.push(StateChange::UserMode {
                enabled: other.user_mode,
                min: other.um_min_temp,
                max: other.um_max_temp,
            });
        }
        if self.ice_mode != other.ice_mode {
            changes.push(StateChange::IceMode(other.ice_mode));
        }
        if self.schedule != other.schedule {
            changes.push(StateChange::Schedule(other.schedule.clone()));
        }
        if self.firmware_version != other.firmware_version
            || self.latest_firmware_version != other.latest_firmware_version
        {
            changes.push(StateChange::Firmware {
                installed: other.firmware_version.clone(),
                latest: other.latest_firmware_version.clone(),
            });
        }
        if self.energy != other.energy {
            changes.push(StateChange::Energy(other.energy.clone()));
        }

        changes
    }

    /// Replaces this record with a freshly polled one.
    ///
    /// A missing latest firmware version in `next` keeps the known one, since
    /// that lookup is best effort. Returns the changes that were observed.
    pub fn update_from(&mut self, mut next: RadiatorDevice) -> Vec<StateChange> {
        if next.latest_firmware_version.is_none() {
            next.latest_firmware_version = self.latest_firmware_version.clone();
        }
        next.id = self.id.clone();

        let changes = self.diff(&next);
        *self = next;
        changes
    }

    /// Applies a state change.
    ///
    /// Returns `true` if the record actually changed.
    #[allow(clippy::float_cmp)]
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Name(name) => replace(&mut self.name, name.clone()),
            StateChange::Power(power) => replace(&mut self.power, *power),
            StateChange::Mode(mode) => replace(&mut self.mode, *mode),
            StateChange::Preset(preset) => replace(&mut self.preset, *preset),
            StateChange::TargetTemperature(temp) => replace(&mut self.temp, *temp),
            StateChange::ProbeTemperature(temp) => replace(&mut self.temp_probe, *temp),
            StateChange::PresetTemperatures { comfort, eco, ice } => {
                let a = replace(&mut self.comfort_temp, *comfort);
                let b = replace(&mut self.eco_temp, *eco);
                let c = replace(&mut self.ice_temp, *ice);
                a || b || c
            }
            StateChange::UserMode { enabled, min, max } => {
                let a = replace(&mut self.user_mode, *enabled);
                let b = replace(&mut self.um_min_temp, *min);
                let c = replace(&mut self.um_max_temp, *max);
                a || b || c
            }
            StateChange::IceMode(ice_mode) => replace(&mut self.ice_mode, *ice_mode),
            StateChange::Schedule(schedule) => replace(&mut self.schedule, schedule.clone()),
            StateChange::Firmware { installed, latest } => {
                let a = replace(&mut self.firmware_version, installed.clone());
                let b = replace(&mut self.latest_firmware_version, latest.clone());
                a || b
            }
            StateChange::Energy(energy) => replace(&mut self.energy, energy.clone()),
            StateChange::Batch(changes) => changes
                .iter()
                .fold(false, |changed, change| self.apply(change) || changed),
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

fn data_section<'a>(
    id: &DeviceId,
    json: &'a serde_json::Value,
) -> Result<&'a serde_json::Map<String, serde_json::Value>, Error> {
    json.get("data")
        .and_then(serde_json::Value::as_object)
        .filter(|data| !data.is_empty())
        .ok_or_else(|| DeviceError::MissingData(id.to_string()).into())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    fn sample_json() -> serde_json::Value {
        json!({
            "serialnumber": "RT-0001",
            "firmware": { "firmware_version_device": "1.4.2" },
            "data": {
                "name": "Living room",
                "type": "radiator",
                "product_version": "V2",
                "nominal_power": "1500",
                "power": true,
                "status": "comfort",
                "mode": "auto",
                "temp": 21.0,
                "temp_calc": 21.0,
                "temp_probe": "19.5",
                "comfort": 21.0,
                "eco": 18.0,
                "ice": 7.0,
                "um_max_temp": 24,
                "um_min_temp": 16,
                "user_mode": true,
                "ice_mode": false,
                "schedule": ["EEEEEEECCCCCCCCCCCCCCCEE"],
                "schedule_day": 0,
                "schedule_hour": 7,
                "last_sync_datetime_app": 1_700_000_000_000_i64,
                "last_sync_datetime_device": "1700000005000"
            }
        })
    }

    #[test]
    fn from_json_reads_all_fields() {
        let device = RadiatorDevice::from_json("dev-1", &sample_json()).unwrap();

        assert_eq!(device.id().as_str(), "dev-1");
        assert_eq!(device.name(), "Living room");
        assert_eq!(device.serial_number(), Some("RT-0001"));
        assert_eq!(device.device_type(), &DeviceType::Radiator);
        assert_eq!(device.product_version().as_str(), "v2");
        assert_eq!(device.nominal_power(), 1500);
        assert!(device.power());
        assert_eq!(device.preset(), Preset::Comfort);
        assert_eq!(device.mode(), DeviceMode::Auto);
        assert!((device.temp_probe() - 19.5).abs() < f64::EPSILON);
        assert!(device.user_mode());
        assert_eq!(device.um_max_temp(), Some(24.0));
        assert_eq!(device.firmware_version(), Some("1.4.2"));
        assert_eq!(
            device.last_sync_device().map(|t| t.timestamp_millis()),
            Some(1_700_000_005_000)
        );
    }

    #[test]
    fn user_mode_ignored_on_v1() {
        let mut json = sample_json();
        json["data"]["product_version"] = json!("v1");

        let device = RadiatorDevice::from_json("dev-1", &json).unwrap();

        assert!(!device.user_mode_supported());
        assert!(!device.user_mode());
        assert_eq!(device.um_max_temp(), None);
        assert_eq!(device.temperature_range(), TemperatureRange::default());
    }

    #[test]
    fn temperature_range_uses_user_mode_limits() {
        let device = RadiatorDevice::from_json("dev-1", &sample_json()).unwrap();
        assert_eq!(device.temperature_range(), TemperatureRange::new(16.0, 24.0));
    }

    #[test]
    fn missing_data_is_rejected() {
        let result = RadiatorDevice::from_json("dev-9", &json!({"serialnumber": "x"}));
        assert!(matches!(
            result,
            Err(Error::Device(DeviceError::MissingData(id))) if id == "dev-9"
        ));
    }

    #[test]
    fn empty_data_is_rejected() {
        let result = RadiatorDevice::from_json("dev-9", &json!({"data": {}}));
        assert!(matches!(
            result,
            Err(Error::Device(DeviceError::MissingData(_)))
        ));
    }

    #[test]
    fn device_type_is_read_without_full_schema() {
        let id = DeviceId::new("oven-1");
        let oven = json!({"data": {"name": "Oven", "type": "oven", "product_version": "v1"}});

        let device_type = RadiatorDevice::device_type_of(&id, &oven).unwrap();
        assert_eq!(device_type, DeviceType::from("oven"));
        assert!(!device_type.is_supported());
        assert!(RadiatorDevice::from_json(id.clone(), &oven).is_err());

        assert!(matches!(
            RadiatorDevice::device_type_of(&id, &json!({"data": {"name": "x"}})),
            Err(Error::Device(DeviceError::MissingData(_)))
        ));
        assert!(matches!(
            RadiatorDevice::device_type_of(&id, &json!({"data": null})),
            Err(Error::Device(DeviceError::MissingData(_)))
        ));
    }

    #[test]
    fn malformed_field_is_a_parse_error() {
        let mut json = sample_json();
        json["data"]["temp"] = json!("hot");

        let result = RadiatorDevice::from_json("dev-1", &json);
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn schedule_mode_follows_schedule() {
        let device = RadiatorDevice::from_json("dev-1", &sample_json()).unwrap();
        // 2024-01-01 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert_eq!(
            device.schedule_mode_at(monday.and_hms_opt(6, 0, 0).unwrap()),
            ScheduleMode::Eco
        );
        assert_eq!(
            device.schedule_mode_at(monday.and_hms_opt(7, 0, 0).unwrap()),
            ScheduleMode::Comfort
        );
        // Tuesday has no schedule string.
        assert_eq!(
            device.schedule_mode_at(monday.and_hms_opt(7, 0, 0).unwrap() + chrono::Duration::days(1)),
            ScheduleMode::None
        );
    }

    #[test]
    fn update_from_reports_changes() {
        let mut device = RadiatorDevice::from_json("dev-1", &sample_json()).unwrap();

        let mut json = sample_json();
        json["data"]["power"] = json!(false);
        json["data"]["temp_probe"] = json!(20.0);
        let next = RadiatorDevice::from_json("dev-1", &json).unwrap();

        let changes = device.update_from(next);

        assert_eq!(
            changes,
            vec![
                StateChange::Power(false),
                StateChange::ProbeTemperature(20.0)
            ]
        );
        assert!(!device.power());
    }

    #[test]
    fn update_from_identical_is_empty() {
        let mut device = RadiatorDevice::from_json("dev-1", &sample_json()).unwrap();
        let next = RadiatorDevice::from_json("dev-1", &sample_json()).unwrap();

        assert!(device.update_from(next).is_empty());
    }

    #[test]
    fn update_from_keeps_known_latest_firmware() {
        let mut device = RadiatorDevice::from_json("dev-1", &sample_json())
            .unwrap()
            .with_latest_firmware(Some("1.5.0".to_string()));
        let next = RadiatorDevice::from_json("dev-1", &sample_json()).unwrap();

        assert!(device.update_from(next).is_empty());
        assert_eq!(device.latest_firmware_version(), Some("1.5.0"));
    }

    #[test]
    fn apply_reports_whether_state_changed() {
        let mut device = RadiatorDevice::from_json("dev-1", &sample_json()).unwrap();

        assert!(!device.apply(&StateChange::Power(true)));
        assert!(device.apply(&StateChange::batch(vec![
            StateChange::Power(true),
            StateChange::Mode(DeviceMode::Manual),
        ])));
        assert_eq!(device.mode(), DeviceMode::Manual);
    }
}

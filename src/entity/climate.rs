// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat entity.

use std::sync::Arc;

use super::base::RadiatorLink;
use super::info::{DeviceInfo, EntityInfo};
use crate::api::CloudApi;
use crate::command::DeviceCommand;
use crate::coordinator::Coordinator;
use crate::device::RadiatorDevice;
use crate::error::Error;
use crate::event::DeviceId;
use crate::types::{
    DeviceMode, HvacAction, HvacMode, Preset, PresetMode, TEMPERATURE_STEP, TemperatureRange,
};

/// Thermostat view of a radiator.
///
/// Reads come from the coordinator cache; setters send a command and then
/// refresh the coordinator.
#[derive(Debug)]
pub struct ClimateEntity<A> {
    link: RadiatorLink<A>,
    info: EntityInfo,
}

impl<A: CloudApi + 'static> ClimateEntity<A> {
    /// Creates the thermostat of a cached radiator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the radiator is not cached.
    pub fn new(coordinator: Arc<Coordinator<A>>, device_id: DeviceId) -> Result<Self, Error> {
        let device = coordinator
            .device(&device_id)
            .ok_or_else(|| Error::DeviceNotFound(device_id.to_string()))?;
        let info = EntityInfo::new(&device, None, None);

        Ok(Self {
            link: RadiatorLink::new(coordinator, device_id),
            info,
        })
    }

    /// Returns the entity identity.
    #[must_use]
    pub fn info(&self) -> &EntityInfo {
        &self.info
    }

    /// Returns the radiator entry as of the last refresh, or `None` once
    /// the radiator left the cache.
    #[must_use]
    pub fn device_info(&self) -> Option<DeviceInfo> {
        self.link.device_info()
    }

    /// Returns `true` if the last refresh succeeded and the radiator is cached.
    #[must_use]
    pub fn available(&self) -> bool {
        self.link.available()
    }

    /// Returns the entity icon.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        "mdi:radiator"
    }

    /// Returns the temperature unit.
    #[must_use]
    pub fn temperature_unit(&self) -> &'static str {
        "°C"
    }

    /// Returns the temperature the radiator is aiming for.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        self.link.radiator().as_ref().map(target_temperature)
    }

    /// Returns the probe temperature.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.link.radiator().map(|d| d.temp_probe())
    }

    /// Returns the lowest selectable target temperature.
    #[must_use]
    pub fn min_temp(&self) -> f64 {
        self.range().min()
    }

    /// Returns the highest selectable target temperature.
    #[must_use]
    pub fn max_temp(&self) -> f64 {
        self.range().max()
    }

    fn range(&self) -> TemperatureRange {
        self.link
            .radiator()
            .map(|d| d.temperature_range())
            .unwrap_or_default()
    }

    /// Returns the target temperature increment.
    #[must_use]
    pub fn target_temperature_step(&self) -> f64 {
        TEMPERATURE_STEP
    }

    /// Returns the selectable HVAC modes.
    #[must_use]
    pub fn hvac_modes(&self) -> &'static [HvacMode] {
        &HvacMode::ALL
    }

    /// Returns the selectable presets.
    #[must_use]
    pub fn preset_modes(&self) -> &'static [PresetMode] {
        &PresetMode::ALL
    }

    /// Returns the current HVAC mode.
    #[must_use]
    pub fn hvac_mode(&self) -> Option<HvacMode> {
        self.link.radiator().as_ref().map(hvac_mode)
    }

    /// Returns what the radiator is doing.
    #[must_use]
    pub fn hvac_action(&self) -> Option<HvacAction> {
        self.link.radiator().as_ref().map(hvac_action)
    }

    /// Returns the active preset, if the target matches one.
    #[must_use]
    pub fn preset_mode(&self) -> Option<PresetMode> {
        self.link.radiator().as_ref().and_then(preset_mode)
    }

    /// Sets a manual target temperature.
    ///
    /// # Errors
    ///
    /// Returns an error if the temperature is out of range or the cloud
    /// rejects the change.
    pub async fn set_temperature(&self, temperature: f64) -> Result<(), Error> {
        self.send(DeviceCommand::SetTemperature(temperature)).await
    }

    /// Sets the HVAC mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the cloud rejects the change.
    pub async fn set_hvac_mode(&self, mode: HvacMode) -> Result<(), Error> {
        tracing::debug!(device_id = %self.link.device_id(), %mode, "Setting HVAC mode");
        self.send(DeviceCommand::SetHvacMode(mode)).await
    }

    /// Sets a preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the cloud rejects the change.
    pub async fn set_preset_mode(&self, preset: PresetMode) -> Result<(), Error> {
        tracing::debug!(device_id = %self.link.device_id(), %preset, "Setting preset mode");
        self.send(DeviceCommand::SetPreset(preset)).await
    }

    async fn send(&self, command: DeviceCommand) -> Result<(), Error> {
        let coordinator = self.link.coordinator();

        if let Err(e) = coordinator
            .manager()
            .send_command(self.link.device_id(), command)
            .await
        {
            tracing::error!(
                device_id = %self.link.device_id(),
                name = self.info.name(),
                %command,
                error = %e,
                "Command failed"
            );
            return Err(e);
        }

        coordinator.request_refresh().await;
        Ok(())
    }
}

fn target_temperature(device: &RadiatorDevice) -> f64 {
    if device.mode() == DeviceMode::Manual {
        match device.preset() {
            Preset::Eco => return device.eco_temp(),
            Preset::Comfort => return device.comfort_temp(),
            Preset::Ice => return device.ice_temp(),
            Preset::None | Preset::Off => {}
        }
    }
    device.temp()
}

fn hvac_mode(device: &RadiatorDevice) -> HvacMode {
    if !device.power() {
        HvacMode::Off
    } else if device.mode() == DeviceMode::Auto {
        HvacMode::Auto
    } else {
        HvacMode::Heat
    }
}

fn hvac_action(device: &RadiatorDevice) -> HvacAction {
    // Auto mode between two schedule slots.
    if device.mode() == DeviceMode::Auto && device.preset() == Preset::Off {
        HvacAction::Idle
    } else if !device.power() {
        HvacAction::Off
    } else {
        HvacAction::Heating
    }
}

fn preset_mode(device: &RadiatorDevice) -> Option<PresetMode> {
    match device.preset() {
        Preset::Eco => Some(PresetMode::Eco),
        Preset::Comfort => Some(PresetMode::Comfort),
        Preset::Ice => Some(PresetMode::AntiFrost),
        Preset::None | Preset::Off => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::manager::DeviceManager;
    use crate::manager::fake::FakeCloud;

    fn radiator(overrides: &Value) -> Value {
        let mut data = json!({
            "name": "Lounge",
            "type": "radiator",
            "product_version": "v1",
            "nominal_power": 1200,
            "power": true,
            "status": "none",
            "mode": "manual",
            "temp": 22.5,
            "temp_calc": 22.5,
            "temp_probe": 20.5,
            "comfort": 21.0,
            "eco": 18.0,
            "ice": 7.0,
            "schedule": vec!["C".repeat(24); 7]
        });
        if let (Some(data), Some(overrides)) = (data.as_object_mut(), overrides.as_object()) {
            for (key, value) in overrides {
                data.insert(key.clone(), value.clone());
            }
        }
        json!({ "data": data })
    }

    async fn climate_for(overrides: Value) -> ClimateEntity<FakeCloud> {
        let cloud = FakeCloud::with_devices(&[("r1", radiator(&overrides))]);
        let coordinator = Arc::new(Coordinator::new(
            DeviceManager::new(cloud, "inst-1"),
            std::time::Duration::from_secs(60),
        ));
        coordinator.refresh().await.unwrap();
        ClimateEntity::new(coordinator, DeviceId::new("r1")).unwrap()
    }

    #[tokio::test]
    async fn static_properties() {
        let climate = climate_for(json!({})).await;

        assert!(climate.available());
        assert_eq!(climate.info().unique_id(), "rointe-r1");
        assert_eq!(climate.info().name(), "Lounge");
        assert_eq!(climate.icon(), "mdi:radiator");
        assert!((climate.target_temperature_step() - 0.5).abs() < f64::EPSILON);
        assert_eq!(climate.hvac_modes(), [HvacMode::Off, HvacMode::Heat, HvacMode::Auto]);
        assert_eq!(
            climate.preset_modes(),
            [PresetMode::Comfort, PresetMode::Eco, PresetMode::AntiFrost]
        );
    }

    #[tokio::test]
    async fn device_info_follows_refresh() {
        let climate = climate_for(json!({})).await;
        assert_eq!(climate.device_info().unwrap().sw_version(), None);

        let mut upgraded = radiator(&json!({"name": "Living room"}));
        upgraded["firmware"] = json!({"firmware_version_device": "1.1.0"});
        let coordinator = climate.link.coordinator();
        coordinator.manager().api().set_device("r1", upgraded);
        coordinator.refresh().await.unwrap();

        let info = climate.device_info().unwrap();
        assert_eq!(info.sw_version(), Some("1.1.0"));
        assert_eq!(info.name(), "Living room");
        assert_eq!(climate.info().unique_id(), "rointe-r1");
    }

    #[tokio::test]
    async fn unknown_device_is_rejected() {
        let cloud = FakeCloud::with_devices(&[]);
        let coordinator = Arc::new(Coordinator::new(
            DeviceManager::new(cloud, "inst-1"),
            std::time::Duration::from_secs(60),
        ));

        let result = ClimateEntity::new(coordinator, DeviceId::new("nope"));
        assert!(matches!(result, Err(Error::DeviceNotFound(_))));
    }

    #[tokio::test]
    async fn target_follows_manual_preset() {
        let climate = climate_for(json!({"status": "eco"})).await;
        assert_eq!(climate.target_temperature(), Some(18.0));
        assert_eq!(climate.preset_mode(), Some(PresetMode::Eco));

        let climate = climate_for(json!({"mode": "auto", "status": "eco"})).await;
        assert_eq!(climate.target_temperature(), Some(22.5));
    }

    #[tokio::test]
    async fn target_without_preset_is_temp() {
        let climate = climate_for(json!({})).await;
        assert_eq!(climate.target_temperature(), Some(22.5));
        assert_eq!(climate.current_temperature(), Some(20.5));
        assert_eq!(climate.preset_mode(), None);
    }

    #[tokio::test]
    async fn range_follows_user_mode_on_v2() {
        let climate = climate_for(json!({
            "product_version": "v2",
            "user_mode": true,
            "um_min_temp": 15,
            "um_max_temp": 25
        }))
        .await;
        assert!((climate.min_temp() - 15.0).abs() < f64::EPSILON);
        assert!((climate.max_temp() - 25.0).abs() < f64::EPSILON);

        let climate = climate_for(json!({"user_mode": true, "um_min_temp": 15, "um_max_temp": 25})).await;
        assert!((climate.min_temp() - 7.0).abs() < f64::EPSILON);
        assert!((climate.max_temp() - 30.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn hvac_mode_and_action() {
        let off = climate_for(json!({"power": false, "status": "off"})).await;
        assert_eq!(off.hvac_mode(), Some(HvacMode::Off));
        assert_eq!(off.hvac_action(), Some(HvacAction::Off));

        let waiting = climate_for(json!({"mode": "auto", "status": "off"})).await;
        assert_eq!(waiting.hvac_mode(), Some(HvacMode::Auto));
        assert_eq!(waiting.hvac_action(), Some(HvacAction::Idle));

        let heating = climate_for(json!({})).await;
        assert_eq!(heating.hvac_mode(), Some(HvacMode::Heat));
        assert_eq!(heating.hvac_action(), Some(HvacAction::Heating));
    }

    #[tokio::test]
    async fn anti_frost_preset() {
        let climate = climate_for(json!({"status": "ice"})).await;
        assert_eq!(climate.preset_mode(), Some(PresetMode::AntiFrost));
        assert_eq!(climate.target_temperature(), Some(7.0));
    }

    #[tokio::test]
    async fn setter_sends_command_and_refreshes() {
        let climate = climate_for(json!({})).await;
        let calls_before = climate
            .link
            .coordinator()
            .manager()
            .api()
            .installation_calls
            .load(std::sync::atomic::Ordering::SeqCst);

        climate.set_preset_mode(PresetMode::Comfort).await.unwrap();

        let api = climate.link.coordinator().manager().api();
        assert_eq!(api.patches.lock().len(), 1);
        assert_eq!(
            api.installation_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            calls_before + 1
        );
    }

    #[tokio::test]
    async fn setter_propagates_validation_error() {
        let climate = climate_for(json!({})).await;

        let result = climate.set_temperature(40.0).await;

        assert!(matches!(result, Err(Error::Value(_))));
        assert!(climate.link.coordinator().manager().api().patches.lock().is_empty());
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory cloud for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDateTime;
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::api::{CloudApi, Installation};
use crate::command::DevicePatch;
use crate::device::EnergyConsumption;
use crate::error::{ApiError, Error};
use crate::event::DeviceId;
use crate::types::{DeviceType, ProductVersion};

/// In-memory cloud used by manager and coordinator tests.
#[derive(Debug, Default)]
pub(crate) struct FakeCloud {
    pub(crate) installation: Mutex<Value>,
    pub(crate) devices: Mutex<HashMap<String, Value>>,
    pub(crate) patches: Mutex<Vec<(DeviceId, DevicePatch)>>,
    pub(crate) reject_patches: Mutex<bool>,
    pub(crate) installation_calls: AtomicUsize,
}

impl FakeCloud {
    pub(crate) fn with_devices(devices: &[(&str, Value)]) -> Self {
        let ids: serde_json::Map<String, Value> = devices
            .iter()
            .map(|(id, _)| ((*id).to_string(), Value::Bool(true)))
            .collect();
        let cloud = Self::default();
        *cloud.installation.lock() = json!({"zones": {"z1": {"devices": ids}}});
        *cloud.devices.lock() = devices
            .iter()
            .map(|(id, json)| ((*id).to_string(), json.clone()))
            .collect();
        cloud
    }

    pub(crate) fn set_device(&self, id: &str, json: Value) {
        self.devices.lock().insert(id.to_string(), json);
    }
}

impl CloudApi for FakeCloud {
    async fn get_installation(&self, installation_id: &str) -> Result<Installation, Error> {
        self.installation_calls.fetch_add(1, Ordering::SeqCst);
        let json = self.installation.lock().clone();
        Installation::from_json(installation_id, &json)
    }

    async fn get_device(&self, device_id: &DeviceId) -> Result<Value, Error> {
        self.devices
            .lock()
            .get(device_id.as_str())
            .cloned()
            .ok_or(Error::Api(ApiError::Status {
                operation: "get device",
                status: 404,
            }))
    }

    async fn get_latest_energy_stats(
        &self,
        _device_id: &DeviceId,
        now: NaiveDateTime,
    ) -> Result<Option<EnergyConsumption>, Error> {
        let start = EnergyConsumption::previous_hour(now);
        let end = start + chrono::Duration::hours(1);
        Ok(Some(EnergyConsumption::new(start, end, 0.25, 400.0)))
    }

    async fn get_latest_firmware(
        &self,
        _device_type: &DeviceType,
        _product_version: &ProductVersion,
        installed: &str,
    ) -> Result<Option<String>, Error> {
        Ok((installed == "1.0.0").then(|| "1.1.0".to_string()))
    }

    async fn patch_device_data(
        &self,
        device_id: &DeviceId,
        patch: &DevicePatch,
    ) -> Result<(), Error> {
        if *self.reject_patches.lock() {
            return Err(ApiError::InvalidAuth.into());
        }
        self.patches.lock().push((device_id.clone(), patch.clone()));
        Ok(())
    }
}

pub(crate) fn radiator_json(name: &str, device_type: &str, temp_probe: f64) -> Value {
    json!({
        "firmware": { "firmware_version_device": "1.0.0" },
        "data": {
            "name": name,
            "type": device_type,
            "product_version": "v1",
            "nominal_power": 1000,
            "power": true,
            "status": "comfort",
            "mode": "manual",
            "temp": 21.0,
            "temp_calc": 21.0,
            "temp_probe": temp_probe,
            "comfort": 21.0,
            "eco": 18.0,
            "ice": 7.0,
            "schedule": vec!["C".repeat(24); 7]
        }
    })
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Measurement entities.

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::base::RadiatorLink;
use super::info::{DeviceInfo, EntityInfo};
use crate::api::CloudApi;
use crate::coordinator::Coordinator;
use crate::device::RadiatorDevice;
use crate::error::Error;
use crate::event::DeviceId;

/// Kind of quantity a sensor measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorDeviceClass {
    /// Temperature in °C.
    Temperature,
    /// Instant power in W.
    Power,
    /// Energy in kWh.
    Energy,
}

/// How sensor values relate over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateClass {
    /// An instant reading.
    Measurement,
    /// A total that restarts at `last_reset`.
    Total,
}

/// Static description of a sensor.
#[derive(Debug)]
pub struct SensorDescription {
    /// Suffix of the unique id.
    pub key: &'static str,
    /// Suffix of the display name.
    pub name: &'static str,
    /// Unit of the value.
    pub unit: &'static str,
    /// Measured quantity.
    pub device_class: SensorDeviceClass,
    /// Time behaviour of the value.
    pub state_class: StateClass,
    value_fn: fn(&RadiatorDevice) -> Option<f64>,
    last_reset_fn: fn(&RadiatorDevice) -> Option<NaiveDateTime>,
}

fn no_reset(_: &RadiatorDevice) -> Option<NaiveDateTime> {
    None
}

#[allow(clippy::cast_precision_loss)]
fn nominal_power(device: &RadiatorDevice) -> Option<f64> {
    Some(device.nominal_power() as f64)
}

/// Sensors created for every radiator.
pub static SENSOR_DESCRIPTIONS: [SensorDescription; 4] = [
    SensorDescription {
        key: "current_temperature",
        name: "Current Temperature",
        unit: "°C",
        device_class: SensorDeviceClass::Temperature,
        state_class: StateClass::Measurement,
        value_fn: |d| Some(d.temp_probe()),
        last_reset_fn: no_reset,
    },
    SensorDescription {
        key: "effective_power",
        name: "Effective Power",
        unit: "W",
        device_class: SensorDeviceClass::Power,
        state_class: StateClass::Measurement,
        value_fn: |d| d.energy().map(|e| e.effective_power()),
        last_reset_fn: no_reset,
    },
    SensorDescription {
        key: "energy",
        name: "Energy Consumption",
        unit: "kWh",
        device_class: SensorDeviceClass::Energy,
        state_class: StateClass::Total,
        value_fn: |d| d.energy().map(|e| e.kwh()),
        last_reset_fn: |d| d.energy().map(|e| e.start()),
    },
    SensorDescription {
        key: "nominal_power",
        name: "Nominal Power",
        unit: "W",
        device_class: SensorDeviceClass::Power,
        state_class: StateClass::Measurement,
        value_fn: nominal_power,
        last_reset_fn: no_reset,
    },
];

/// One measurement of a radiator.
#[derive(Debug)]
pub struct SensorEntity<A> {
    link: RadiatorLink<A>,
    info: EntityInfo,
    description: &'static SensorDescription,
}

impl<A: CloudApi + 'static> SensorEntity<A> {
    /// Creates a sensor of a cached radiator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the radiator is not cached.
    pub fn new(
        coordinator: Arc<Coordinator<A>>,
        device_id: DeviceId,
        description: &'static SensorDescription,
    ) -> Result<Self, Error> {
        let device = coordinator
            .device(&device_id)
            .ok_or_else(|| Error::DeviceNotFound(device_id.to_string()))?;
        let info = EntityInfo::new(&device, Some(description.key), Some(description.name));

        Ok(Self {
            link: RadiatorLink::new(coordinator, device_id),
            info,
            description,
        })
    }

    /// Creates every sensor of [`SENSOR_DESCRIPTIONS`] for a radiator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the radiator is not cached.
    pub fn all_for(
        coordinator: &Arc<Coordinator<A>>,
        device_id: &DeviceId,
    ) -> Result<Vec<Self>, Error> {
        SENSOR_DESCRIPTIONS
            .iter()
            .map(|description| Self::new(Arc::clone(coordinator), device_id.clone(), description))
            .collect()
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

    /// Returns the sensor description.
    #[must_use]
    pub fn description(&self) -> &'static SensorDescription {
        self.description
    }

    /// Returns `true` if the last refresh succeeded and the radiator is cached.
    #[must_use]
    pub fn available(&self) -> bool {
        self.link.available()
    }

    /// Returns the current value.
    #[must_use]
    pub fn native_value(&self) -> Option<f64> {
        self.link
            .radiator()
            .and_then(|d| (self.description.value_fn)(&d))
    }

    /// Returns when a total sensor last restarted.
    #[must_use]
    pub fn last_reset(&self) -> Option<NaiveDateTime> {
        self.link
            .radiator()
            .and_then(|d| (self.description.last_reset_fn)(&d))
    }
}

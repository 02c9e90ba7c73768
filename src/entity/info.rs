// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identity of entities and of the radiator they belong to.

use serde::Serialize;

use crate::device::RadiatorDevice;
use crate::event::DeviceId;

/// Integration domain used in identifiers.
pub const DOMAIN: &str = "rointe";
/// Attribution attached to every entity.
pub const ATTRIBUTION: &str = "Data provided by rointeconnect.com";
/// Manufacturer reported for every radiator.
pub const MANUFACTURER: &str = "Rointe";

/// Registry entry of the physical radiator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    identifiers: Vec<(String, String)>,
    manufacturer: &'static str,
    name: String,
    model: String,
    sw_version: Option<String>,
}

impl DeviceInfo {
    /// Describes a radiator.
    #[must_use]
    pub fn from_device(device: &RadiatorDevice) -> Self {
        Self {
            identifiers: vec![(DOMAIN.to_string(), device.id().to_string())],
            manufacturer: MANUFACTURER,
            name: device.name().to_string(),
            model: format!("{} {}", device.device_type(), device.product_version()),
            sw_version: device.firmware_version().map(str::to_string),
        }
    }

    /// Returns the `(domain, id)` pairs identifying the radiator.
    #[must_use]
    pub fn identifiers(&self) -> &[(String, String)] {
        &self.identifiers
    }

    /// Returns the manufacturer.
    #[must_use]
    pub fn manufacturer(&self) -> &str {
        self.manufacturer
    }

    /// Returns the radiator name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the model, `<type> <version>`.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the installed firmware.
    #[must_use]
    pub fn sw_version(&self) -> Option<&str> {
        self.sw_version.as_deref()
    }
}

/// Identity of one entity.
///
/// The identity is fixed when the entity is created. The radiator entry it
/// belongs to changes with firmware upgrades and renames, so entities
/// derive their [`DeviceInfo`] from the cache on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityInfo {
    unique_id: String,
    name: String,
    attribution: &'static str,
}

impl EntityInfo {
    /// Builds the identity of an entity of `device`.
    ///
    /// `key` distinguishes several entities of one radiator and `label` is
    /// appended to the radiator name.
    #[must_use]
    pub fn new(device: &RadiatorDevice, key: Option<&str>, label: Option<&str>) -> Self {
        let name = match label {
            Some(label) => format!("{} {label}", device.name()),
            None => device.name().to_string(),
        };

        Self {
            unique_id: unique_id(device.id(), key),
            name,
            attribution: ATTRIBUTION,
        }
    }

    /// Returns the stable identifier.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the data attribution.
    #[must_use]
    pub fn attribution(&self) -> &str {
        self.attribution
    }
}

/// Formats `rointe-<id>` or `rointe-<id>-<key>`.
#[must_use]
pub fn unique_id(device_id: &DeviceId, key: Option<&str>) -> String {
    match key {
        Some(key) => format!("{DOMAIN}-{device_id}-{key}"),
        None => format!("{DOMAIN}-{device_id}"),
    }
}

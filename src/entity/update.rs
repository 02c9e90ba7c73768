// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware entity.

use std::sync::Arc;

use super::base::RadiatorLink;
use super::info::{DeviceInfo, EntityInfo};
use crate::api::CloudApi;
use crate::coordinator::Coordinator;
use crate::error::Error;
use crate::event::DeviceId;

const KEY: &str = "fw_update_available";
const NAME: &str = "Update Available";

/// Firmware status of a radiator.
#[derive(Debug)]
pub struct UpdateEntity<A> {
    link: RadiatorLink<A>,
    info: EntityInfo,
}

impl<A: CloudApi + 'static> UpdateEntity<A> {
    /// Creates the firmware entity of a cached radiator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the radiator is not cached.
    pub fn new(coordinator: Arc<Coordinator<A>>, device_id: DeviceId) -> Result<Self, Error> {
        let device = coordinator
            .device(&device_id)
            .ok_or_else(|| Error::DeviceNotFound(device_id.to_string()))?;
        let info = EntityInfo::new(&device, Some(KEY), Some(NAME));

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

    /// Returns the firmware running on the radiator.
    #[must_use]
    pub fn installed_version(&self) -> Option<String> {
        self.link
            .radiator()
            .and_then(|d| d.firmware_version().map(str::to_string))
    }

    /// Returns the firmware the radiator can be upgraded to.
    #[must_use]
    pub fn latest_version(&self) -> Option<String> {
        self.link
            .radiator()
            .and_then(|d| d.latest_firmware_version().map(str::to_string))
    }

    /// Returns `true` if a different firmware is published.
    #[must_use]
    pub fn update_available(&self) -> bool {
        match (self.installed_version(), self.latest_version()) {
            (Some(installed), Some(latest)) => installed != latest,
            (None, Some(_)) => true,
            (_, None) => false,
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use super::info::DeviceInfo;
use crate::api::CloudApi;
use crate::coordinator::Coordinator;
use crate::device::RadiatorDevice;
use crate::event::DeviceId;

/// Link between an entity and the cached radiator it projects.
#[derive(Debug)]
pub(crate) struct RadiatorLink<A> {
    coordinator: Arc<Coordinator<A>>,
    device_id: DeviceId,
}

impl<A: CloudApi + 'static> RadiatorLink<A> {
    pub(crate) fn new(coordinator: Arc<Coordinator<A>>, device_id: DeviceId) -> Self {
        Self {
            coordinator,
            device_id,
        }
    }

    pub(crate) fn coordinator(&self) -> &Coordinator<A> {
        &self.coordinator
    }

    pub(crate) fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    /// Current record, or `None` once the radiator left the cache.
    pub(crate) fn radiator(&self) -> Option<RadiatorDevice> {
        self.coordinator.device(&self.device_id)
    }

    /// Registry entry built from the current record.
    pub(crate) fn device_info(&self) -> Option<DeviceInfo> {
        self.radiator().map(|device| DeviceInfo::from_device(&device))
    }

    pub(crate) fn available(&self) -> bool {
        self.coordinator.last_update_success() && self.radiator().is_some()
    }
}

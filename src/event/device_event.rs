// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use crate::device::RadiatorDevice;
use crate::state::StateChange;
use crate::types::DeviceType;

use super::DeviceId;

/// Events emitted by the device manager.
///
/// These events notify subscribers about radiators discovered in the
/// installation and about state updates, whether they come from polling or
/// from a command issued through this library.
///
/// # Examples
///
/// ```
/// use rointe_lib::event::{DeviceEvent, DeviceId};
///
/// let event = DeviceEvent::device_added(DeviceId::new("dev-1"), "Bedroom");
/// assert!(event.is_lifecycle());
/// assert_eq!(event.device_id().as_str(), "dev-1");
/// ```
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// A radiator was seen for the first time.
    DeviceAdded {
        /// The ID of the added device.
        device_id: DeviceId,
        /// Its display name.
        name: String,
    },

    /// A device of an unsupported type was found and skipped.
    DeviceIgnored {
        /// The ID of the ignored device.
        device_id: DeviceId,
        /// The reported product type.
        device_type: DeviceType,
    },

    /// Radiator state changed.
    StateChanged {
        /// The ID of the device.
        device_id: DeviceId,
        /// The changes that occurred.
        change: StateChange,
        /// The complete new state of the device.
        new_state: Box<RadiatorDevice>,
    },
}

impl DeviceEvent {
    /// Returns the device ID associated with this event.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        match self {
            Self::DeviceAdded { device_id, .. }
            | Self::DeviceIgnored { device_id, .. }
            | Self::StateChanged { device_id, .. } => device_id,
        }
    }

    /// Returns `true` if this is a discovery event (added/ignored).
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::DeviceAdded { .. } | Self::DeviceIgnored { .. })
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Creates a device added event.
    #[must_use]
    pub fn device_added(device_id: DeviceId, name: impl Into<String>) -> Self {
        Self::DeviceAdded {
            device_id,
            name: name.into(),
        }
    }

    /// Creates a device ignored event.
    #[must_use]
    pub fn device_ignored(device_id: DeviceId, device_type: DeviceType) -> Self {
        Self::DeviceIgnored {
            device_id,
            device_type,
        }
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(change: StateChange, new_state: RadiatorDevice) -> Self {
        Self::StateChanged {
            device_id: new_state.id().clone(),
            change,
            new_state: Box::new(new_state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radiator(id: &str) -> RadiatorDevice {
        let json = serde_json::json!({
            "data": {
                "name": "Hall",
                "type": "radiator",
                "product_version": "v1",
                "nominal_power": 500,
                "power": false,
                "status": "off",
                "mode": "manual",
                "temp": 20,
                "temp_calc": 20,
                "temp_probe": 18,
                "comfort": 21,
                "eco": 18,
                "ice": 7
            }
        });
        RadiatorDevice::from_json(id, &json).unwrap()
    }

    #[test]
    fn device_id_extraction() {
        let id = DeviceId::new("dev-1");

        assert_eq!(DeviceEvent::device_added(id.clone(), "Hall").device_id(), &id);
        assert_eq!(
            DeviceEvent::device_ignored(id.clone(), DeviceType::from("oven")).device_id(),
            &id
        );

        let changed = DeviceEvent::state_changed(StateChange::Power(true), radiator("dev-1"));
        assert_eq!(changed.device_id(), &id);
    }

    #[test]
    fn event_kinds() {
        let id = DeviceId::new("dev-1");

        assert!(DeviceEvent::device_added(id.clone(), "Hall").is_lifecycle());
        assert!(DeviceEvent::device_ignored(id, DeviceType::from("oven")).is_lifecycle());

        let changed = DeviceEvent::state_changed(StateChange::Power(true), radiator("dev-2"));
        assert!(changed.is_state_change());
        assert!(!changed.is_lifecycle());
    }
}

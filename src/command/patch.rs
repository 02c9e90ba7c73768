// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Body of a `devices/<id>/data` patch.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{DeviceMode, Preset};

/// Partial update of a radiator's live state.
///
/// Only the fields that are set are serialized. The cloud also expects
/// `last_sync_datetime_app`, which [`stamped`](Self::stamped) fills in right
/// before sending.
///
/// # Examples
///
/// ```
/// use rointe_lib::command::DevicePatch;
/// use rointe_lib::types::DeviceMode;
///
/// let patch = DevicePatch::new()
///     .with_temp(21.5)
///     .with_mode(DeviceMode::Manual)
///     .with_power(true);
/// let json = serde_json::to_value(&patch).unwrap();
///
/// assert_eq!(json, serde_json::json!({"temp": 21.5, "mode": "manual", "power": true}));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DevicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<DeviceMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    power: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<Preset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_sync_datetime_app: Option<i64>,
}

impl DevicePatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target temperature.
    #[must_use]
    pub fn with_temp(mut self, temp: f64) -> Self {
        self.temp = Some(temp);
        self
    }

    /// Sets the working mode.
    #[must_use]
    pub fn with_mode(mut self, mode: DeviceMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the power flag.
    #[must_use]
    pub fn with_power(mut self, power: bool) -> Self {
        self.power = Some(power);
        self
    }

    /// Sets the preset status.
    #[must_use]
    pub fn with_status(mut self, status: Preset) -> Self {
        self.status = Some(status);
        self
    }

    /// Records the send time as epoch milliseconds.
    #[must_use]
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        self.last_sync_datetime_app = Some(now.timestamp_millis());
        self
    }

    /// Returns the target temperature, if set.
    #[must_use]
    pub fn temp(&self) -> Option<f64> {
        self.temp
    }

    /// Returns the working mode, if set.
    #[must_use]
    pub fn mode(&self) -> Option<DeviceMode> {
        self.mode
    }

    /// Returns the power flag, if set.
    #[must_use]
    pub fn power(&self) -> Option<bool> {
        self.power
    }

    /// Returns the preset status, if set.
    #[must_use]
    pub fn status(&self) -> Option<Preset> {
        self.status
    }

    /// Returns the send timestamp, if stamped.
    #[must_use]
    pub fn last_sync_datetime_app(&self) -> Option<i64> {
        self.last_sync_datetime_app
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire shape of a device node.

use serde::Deserialize;

use super::de;
use crate::types::{DeviceMode, DeviceType, Preset, ProductVersion, Schedule};

/// Top level `devices/<id>` node.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDevice {
    #[serde(default)]
    pub serialnumber: Option<String>,
    #[serde(default)]
    pub data: Option<RawDeviceData>,
    #[serde(default)]
    pub firmware: Option<RawFirmware>,
}

/// Live state stored under `devices/<id>/data`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDeviceData {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    #[serde(default)]
    pub product_version: ProductVersion,
    #[serde(deserialize_with = "de::integer")]
    pub nominal_power: i64,
    #[serde(deserialize_with = "de::flag")]
    pub power: bool,
    #[serde(default)]
    pub status: Preset,
    #[serde(default)]
    pub mode: DeviceMode,
    #[serde(deserialize_with = "de::number")]
    pub temp: f64,
    #[serde(deserialize_with = "de::number")]
    pub temp_calc: f64,
    #[serde(deserialize_with = "de::number")]
    pub temp_probe: f64,
    #[serde(deserialize_with = "de::number")]
    pub comfort: f64,
    #[serde(deserialize_with = "de::number")]
    pub eco: f64,
    #[serde(deserialize_with = "de::number")]
    pub ice: f64,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub um_max_temp: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub um_min_temp: Option<f64>,
    #[serde(default, deserialize_with = "de::flag")]
    pub user_mode: bool,
    #[serde(default, deserialize_with = "de::flag")]
    pub ice_mode: bool,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default, deserialize_with = "de::optional_integer")]
    pub schedule_day: Option<i64>,
    #[serde(default, deserialize_with = "de::optional_integer")]
    pub schedule_hour: Option<i64>,
    #[serde(default, deserialize_with = "de::optional_integer")]
    pub last_sync_datetime_app: Option<i64>,
    #[serde(default, deserialize_with = "de::optional_integer")]
    pub last_sync_datetime_device: Option<i64>,
}

/// Firmware section of a device node.
#[derive(Debug, Deserialize)]
pub(crate) struct RawFirmware {
    #[serde(default)]
    pub firmware_version_device: Option<String>,
}

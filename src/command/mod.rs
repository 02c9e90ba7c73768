// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat commands and their translation to cloud patches.
//!
//! Users think in three intents: set a temperature, pick a preset, pick an
//! HVAC mode. The radiator instead stores a `mode` (auto/manual), a
//! `status` preset, a `power` flag and a target `temp`. This module maps
//! each intent onto the patches the cloud expects and onto the state the
//! radiator will report once it has applied them.
//!
//! # Available Commands
//!
//! | Command | Patches sent | Resulting state |
//! |---------|--------------|-----------------|
//! | [`DeviceCommand::SetTemperature`] | temp, manual, power on | preset matched from temp |
//! | [`DeviceCommand::SetPreset`] | preset temp, manual, power on, status | preset |
//! | [`DeviceCommand::SetHvacMode`] `Off` | power off, status off | power off |
//! | [`DeviceCommand::SetHvacMode`] `Heat` | 20 °C, manual, power on, status none | manual |
//! | [`DeviceCommand::SetHvacMode`] `Auto` | scheduled temp, then auto + power on | auto |
//!
//! # Examples
//!
//! ```
//! use rointe_lib::command::{CommandPlan, DeviceCommand};
//! use rointe_lib::device::RadiatorDevice;
//! use rointe_lib::types::PresetMode;
//!
//! # let json = serde_json::json!({"data": {
//! #     "name": "Office", "type": "radiator", "product_version": "v1",
//! #     "nominal_power": 750, "power": false, "status": "off", "mode": "manual",
//! #     "temp": 20, "temp_calc": 20, "temp_probe": 18,
//! #     "comfort": 21, "eco": 18, "ice": 7
//! # }});
//! let device = RadiatorDevice::from_json("dev-1", &json).unwrap();
//! let plan = CommandPlan::for_device(
//!     &device,
//!     &DeviceCommand::SetPreset(PresetMode::Eco),
//!     chrono::Local::now().naive_local(),
//! )
//! .unwrap();
//!
//! assert_eq!(plan.patches().len(), 1);
//! assert_eq!(plan.patches()[0].temp(), Some(18.0));
//! ```

mod patch;
mod plan;

pub use patch::DevicePatch;
pub use plan::{CommandPlan, DeviceCommand};

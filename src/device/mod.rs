// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Radiator records built from the Rointe cloud JSON.
//!
//! The cloud describes each product as a JSON blob with a `data` section
//! holding the live state, a `serialnumber` and a `firmware` section.
//! [`RadiatorDevice`] flattens that blob into a plain record, tracks the
//! hourly [`EnergyConsumption`] and firmware information fetched alongside
//! it, and computes [`StateChange`](crate::state::StateChange)s between two
//! snapshots.
//!
//! # Examples
//!
//! ```
//! use rointe_lib::device::RadiatorDevice;
//! use rointe_lib::types::{DeviceMode, Preset};
//!
//! let json = serde_json::json!({
//!     "serialnumber": "SN-1",
//!     "data": {
//!         "name": "Bedroom",
//!         "type": "radiator",
//!         "product_version": "v1",
//!         "nominal_power": 1000,
//!         "power": true,
//!         "status": "eco",
//!         "mode": "manual",
//!         "temp": 19.0,
//!         "temp_calc": 19.0,
//!         "temp_probe": 18.4,
//!         "comfort": 21.0,
//!         "eco": 19.0,
//!         "ice": 7.0,
//!         "ice_mode": false,
//!         "schedule": [],
//!         "schedule_day": 0,
//!         "schedule_hour": 0,
//!         "last_sync_datetime_app": 1700000000000_i64,
//!         "last_sync_datetime_device": 1700000000000_i64
//!     }
//! });
//!
//! let device = RadiatorDevice::from_json("dev-1", &json).unwrap();
//! assert_eq!(device.name(), "Bedroom");
//! assert_eq!(device.preset(), Preset::Eco);
//! assert_eq!(device.mode(), DeviceMode::Manual);
//! ```

mod de;
mod energy;
mod radiator;
mod raw;

pub use energy::EnergyConsumption;
pub use radiator::RadiatorDevice;

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Home-automation entities projected from the radiator cache.
//!
//! Each radiator yields one [`ClimateEntity`], one [`SensorEntity`] per
//! entry of [`SENSOR_DESCRIPTIONS`] and one [`UpdateEntity`]. Entities read
//! the coordinator cache on every call, so they always reflect the last
//! refresh.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rointe_lib::RointeConfig;
//! use rointe_lib::coordinator::{Coordinator, Platform};
//! use rointe_lib::entity::{ClimateEntity, SensorEntity};
//! use rointe_lib::manager::DeviceManager;
//! use rointe_lib::types::PresetMode;
//!
//! # async fn example() -> rointe_lib::Result<()> {
//! let config = RointeConfig::new("me@example.com", "secret", "app-key");
//! let interval = config.refresh_interval();
//! let coordinator = Arc::new(Coordinator::new(DeviceManager::connect(config).await?, interval));
//! coordinator.refresh().await?;
//!
//! for id in coordinator.take_unregistered(Platform::Sensor) {
//!     for sensor in SensorEntity::all_for(&coordinator, &id)? {
//!         println!("{}: {:?}", sensor.info().name(), sensor.native_value());
//!     }
//! }
//!
//! for id in coordinator.take_unregistered(Platform::Climate) {
//!     let climate = ClimateEntity::new(Arc::clone(&coordinator), id)?;
//!     climate.set_preset_mode(PresetMode::Eco).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod base;
mod climate;
mod info;
mod sensor;
mod update;

pub use climate::ClimateEntity;
pub use info::{ATTRIBUTION, DOMAIN, DeviceInfo, EntityInfo, MANUFACTURER, unique_id};
pub use sensor::{SENSOR_DESCRIPTIONS, SensorDescription, SensorDeviceClass, SensorEntity, StateClass};
pub use update::UpdateEntity;

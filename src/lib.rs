// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Rointe` Lib - A Rust library to poll and control Rointe radiators.
//!
//! Rointe radiators report to the Rointe Connect cloud. This library signs
//! in to that cloud, polls every radiator of an installation and translates
//! thermostat commands into the patches the radiators understand.
//!
//! # Supported Features
//!
//! - **Polling**: radiator state, hourly energy statistics, firmware upgrades
//! - **Change detection**: events only for real differences between polls
//! - **Thermostat control**: target temperature, presets, HVAC modes
//! - **Entities**: climate, sensor and firmware views for home-automation hosts
//!
//! # Supported Devices
//!
//! - Radiators (`radiator`)
//! - Towel rails (`towel`)
//! - Thermostats (`therm`)
//!
//! # Quick Start
//!
//! ```no_run
//! use rointe_lib::RointeConfig;
//! use rointe_lib::command::DeviceCommand;
//! use rointe_lib::manager::DeviceManager;
//! use rointe_lib::types::PresetMode;
//!
//! #[tokio::main]
//! async fn main() -> rointe_lib::Result<()> {
//!     let config = RointeConfig::new("me@example.com", "secret", "app-key");
//!     let manager = DeviceManager::connect(config).await?;
//!
//!     for (id, radiator) in manager.update().await? {
//!         println!("{}: {} °C", radiator.name(), radiator.temp_probe());
//!         manager
//!             .send_command(&id, DeviceCommand::SetPreset(PresetMode::Eco))
//!             .await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Polling Loop
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rointe_lib::RointeConfig;
//! use rointe_lib::coordinator::Coordinator;
//! use rointe_lib::manager::DeviceManager;
//!
//! #[tokio::main]
//! async fn main() -> rointe_lib::Result<()> {
//!     let config = RointeConfig::from_toml_str(&std::fs::read_to_string("rointe.toml").unwrap())?;
//!     let interval = config.refresh_interval();
//!     let coordinator = Arc::new(Coordinator::new(DeviceManager::connect(config).await?, interval));
//!
//!     coordinator.add_listener(|devices| println!("{} radiators", devices.len()));
//!     coordinator.spawn().await.ok();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod command;
pub mod config;
pub mod coordinator;
pub mod device;
pub mod entity;
pub mod error;
pub mod event;
pub mod manager;
pub mod state;
pub mod subscription;
pub mod types;

pub use api::{CloudApi, RointeApi};
pub use command::{CommandPlan, DeviceCommand, DevicePatch};
pub use config::RointeConfig;
pub use coordinator::{Coordinator, Platform};
pub use device::{EnergyConsumption, RadiatorDevice};
pub use error::{ApiError, DeviceError, Error, ParseError, Result, ValueError};
pub use event::{DeviceEvent, DeviceId, EventBus};
pub use manager::DeviceManager;
pub use state::StateChange;
pub use subscription::{CallbackRegistry, SubscriptionId};
pub use types::{HvacAction, HvacMode, PresetMode};

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device cache for the radiators of a Rointe installation.
//!
//! # Overview
//!
//! The [`DeviceManager`] is the central component for applications that
//! follow a Rointe installation. It provides:
//!
//! - **Polling**: fetch every radiator with its energy statistics and firmware
//! - **State tracking**: one record per radiator, updated in place
//! - **Event system**: discoveries and state changes via broadcast channels
//! - **Commands**: thermostat intents translated to cloud patches
//!
//! # Examples
//!
//! ## Event Subscription
//!
//! ```no_run
//! use rointe_lib::RointeConfig;
//! use rointe_lib::event::DeviceEvent;
//! use rointe_lib::manager::DeviceManager;
//!
//! # async fn example() -> rointe_lib::Result<()> {
//! let config = RointeConfig::new("me@example.com", "secret", "app-key");
//! let manager = DeviceManager::connect(config).await?;
//! let mut events = manager.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(event) = events.recv().await {
//!         match event {
//!             DeviceEvent::StateChanged { device_id, change, .. } => {
//!                 println!("Device {device_id} changed: {change:?}");
//!             }
//!             DeviceEvent::DeviceAdded { device_id, name } => {
//!                 println!("Found {name} ({device_id})");
//!             }
//!             DeviceEvent::DeviceIgnored { .. } => {}
//!         }
//!     }
//! });
//!
//! manager.update().await?;
//! # Ok(())
//! # }
//! ```

mod device_manager;
#[cfg(test)]
pub(crate) mod fake;

pub use device_manager::DeviceManager;

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for radiator discovery and state changes.
//!
//! This module provides a pub/sub event system that plays the role of a
//! host dispatcher signal. The [`EventBus`] uses tokio's broadcast channel
//! to allow multiple subscribers to receive events.
//!
//! # Examples
//!
//! ```
//! use rointe_lib::event::{DeviceEvent, DeviceId, EventBus};
//!
//! let bus = EventBus::new();
//!
//! // Subscribe to events
//! let mut rx = bus.subscribe();
//!
//! // Publish an event
//! bus.publish(DeviceEvent::device_added(DeviceId::new("dev-1"), "Bedroom"));
//! ```

mod device_event;
mod device_id;
mod event_bus;

pub use device_event::DeviceEvent;
pub use device_id::DeviceId;
pub use event_bus::EventBus;

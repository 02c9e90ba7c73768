// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Radiator state change types.
//!
//! A [`StateChange`] describes one observable difference between two
//! snapshots of a [`RadiatorDevice`](crate::device::RadiatorDevice). Changes
//! are produced by diffing a freshly polled record against the cached one,
//! and by the optimistic update that follows a successful command.
//!
//! # Examples
//!
//! ```
//! use rointe_lib::state::StateChange;
//! use rointe_lib::types::{DeviceMode, Preset};
//!
//! let change = StateChange::batch(vec![
//!     StateChange::Power(true),
//!     StateChange::Mode(DeviceMode::Manual),
//!     StateChange::Preset(Preset::Eco),
//! ]);
//!
//! assert_eq!(change.change_count(), 3);
//! ```

mod state_change;

pub use state_change::StateChange;

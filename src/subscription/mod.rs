// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Listener callbacks for the polling coordinator.
//!
//! - [`SubscriptionId`] - A unique identifier for a listener, used to remove it
//! - [`CallbackRegistry`] - Registry that stores listeners and dispatches refresh results
//!
//! Listeners are usually registered through
//! [`Coordinator::add_listener`](crate::coordinator::Coordinator::add_listener).

mod callback;

pub use callback::{CallbackRegistry, SubscriptionId};

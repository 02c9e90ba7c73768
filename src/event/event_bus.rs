// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast channel for radiator events.

use tokio::sync::broadcast;

use super::DeviceEvent;

/// Events kept for a receiver that falls behind.
///
/// One poll publishes at most one event per radiator, so this covers many
/// polls of a large installation.
const BACKLOG: usize = 256;

/// Fan-out of [`DeviceEvent`]s to every subscriber of a manager.
///
/// A receiver that falls more than 256 events behind gets
/// `RecvError::Lagged` and resumes with the newest events.
///
/// # Examples
///
/// ```
/// use rointe_lib::event::{DeviceEvent, DeviceId, EventBus};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(DeviceEvent::device_added(DeviceId::new("dev-1"), "Bedroom"));
/// assert_eq!(rx.try_recv().unwrap().device_id().as_str(), "dev-1");
/// ```
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<DeviceEvent>,
}

impl EventBus {
    /// Creates an event bus without subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BACKLOG);
        Self { sender }
    }

    /// Returns a receiver for every event published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of live receivers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event.
    ///
    /// Without subscribers the event is dropped.
    pub fn publish(&self, event: DeviceEvent) {
        let device_id = event.device_id().clone();
        let lifecycle = event.is_lifecycle();

        match self.sender.send(event) {
            Ok(receivers) => {
                tracing::trace!(%device_id, lifecycle, receivers, "Published device event");
            }
            Err(_) => {
                tracing::trace!(%device_id, lifecycle, "No subscriber for device event");
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

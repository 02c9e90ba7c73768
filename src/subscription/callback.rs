// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Refresh listeners.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::device::RadiatorDevice;
use crate::error::Error;
use crate::event::DeviceId;

/// Handle of a registered listener, used to remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type Radiators = HashMap<DeviceId, RadiatorDevice>;

#[derive(Clone)]
enum Listener {
    Updated(Arc<dyn Fn(&Radiators) + Send + Sync>),
    Failed(Arc<dyn Fn(&Error) + Send + Sync>),
}

/// Listeners notified after every refresh of the radiator cache.
///
/// A refresh either hands the whole cache to the `on_updated` listeners or
/// its error to the `on_failed` listeners. Listeners run synchronously
/// without any lock held, so a listener may register or remove listeners.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    listeners: RwLock<HashMap<SubscriptionId, Listener>>,
}

impl CallbackRegistry {
    /// Creates a registry without listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: RwLock::new(HashMap::new()),
        }
    }

    fn insert(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().insert(id, listener);
        id
    }

    /// Registers a listener for successful refreshes.
    ///
    /// The listener receives every cached radiator.
    pub fn on_updated<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&HashMap<DeviceId, RadiatorDevice>) + Send + Sync + 'static,
    {
        self.insert(Listener::Updated(Arc::new(callback)))
    }

    /// Registers a listener for failed refreshes.
    pub fn on_failed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Error) + Send + Sync + 'static,
    {
        self.insert(Listener::Failed(Arc::new(callback)))
    }

    /// Removes a listener.
    ///
    /// Returns `true` if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.write().remove(&id).is_some()
    }

    /// Hands the outcome of a refresh to the matching listeners.
    pub fn dispatch(&self, outcome: Result<&HashMap<DeviceId, RadiatorDevice>, &Error>) {
        let listeners: Vec<Listener> = self.listeners.read().values().cloned().collect();

        for listener in listeners {
            match (&listener, outcome) {
                (Listener::Updated(callback), Ok(devices)) => callback(devices),
                (Listener::Failed(callback), Err(error)) => callback(error),
                _ => {}
            }
        }
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("listeners", &self.listeners.read().len())
            .finish_non_exhaustive()
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic polling and entity discovery.
//!
//! The [`Coordinator`] drives a [`DeviceManager`](crate::manager::DeviceManager)
//! at a fixed interval, notifies listeners after each refresh and hands every
//! newly seen radiator once to each entity [`Platform`].
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rointe_lib::RointeConfig;
//! use rointe_lib::coordinator::{Coordinator, Platform};
//! use rointe_lib::entity::ClimateEntity;
//! use rointe_lib::manager::DeviceManager;
//!
//! # async fn example() -> rointe_lib::Result<()> {
//! let config = RointeConfig::new("me@example.com", "secret", "app-key");
//! let interval = config.refresh_interval();
//! let manager = DeviceManager::connect(config).await?;
//! let coordinator = Arc::new(Coordinator::new(manager, interval));
//!
//! coordinator.refresh().await?;
//! let weak = Arc::downgrade(&coordinator);
//! coordinator.add_entities_for_seen_keys(Platform::Climate, move |ids| {
//!     let Some(coordinator) = weak.upgrade() else { return };
//!     for id in ids {
//!         if let Ok(climate) = ClimateEntity::new(Arc::clone(&coordinator), id) {
//!             println!("{}: {:?}", climate.info().name(), climate.current_temperature());
//!         }
//!     }
//! });
//!
//! let task = coordinator.spawn();
//! // ...
//! coordinator.shutdown();
//! task.await.ok();
//! # Ok(())
//! # }
//! ```

mod platform;

pub use platform::Platform;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::CloudApi;
use crate::config::{RointeConfig, non_zero_or};
use crate::device::RadiatorDevice;
use crate::error::Error;
use crate::event::DeviceId;
use crate::manager::DeviceManager;
use crate::subscription::{CallbackRegistry, SubscriptionId};

/// Per-platform bookkeeping of handed-out devices.
#[derive(Debug, Default)]
struct SeenKeys {
    seen: HashSet<DeviceId>,
    unregistered: Vec<DeviceId>,
}

/// Polls a [`DeviceManager`] and dispatches refresh results.
#[derive(Debug)]
pub struct Coordinator<A> {
    manager: DeviceManager<A>,
    interval: Duration,
    keys: Mutex<HashMap<Platform, SeenKeys>>,
    listeners: CallbackRegistry,
    /// Serializes refreshes from the loop and from commands.
    refresh_lock: tokio::sync::Mutex<()>,
    last_update_success: AtomicBool,
    shutdown: Notify,
}

impl<A: CloudApi + 'static> Coordinator<A> {
    /// Creates a coordinator polling `manager` every `interval`.
    ///
    /// A zero interval is replaced by
    /// [`RointeConfig::DEFAULT_REFRESH_INTERVAL`].
    #[must_use]
    pub fn new(manager: DeviceManager<A>, interval: Duration) -> Self {
        Self {
            manager,
            interval: non_zero_or(interval, RointeConfig::DEFAULT_REFRESH_INTERVAL),
            keys: Mutex::new(HashMap::new()),
            listeners: CallbackRegistry::new(),
            refresh_lock: tokio::sync::Mutex::new(()),
            last_update_success: AtomicBool::new(false),
            shutdown: Notify::new(),
        }
    }

    /// Returns the polled manager.
    #[must_use]
    pub fn manager(&self) -> &DeviceManager<A> {
        &self.manager
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` if the last refresh succeeded.
    #[must_use]
    pub fn last_update_success(&self) -> bool {
        self.last_update_success.load(Ordering::Acquire)
    }

    /// Returns the cached radiators.
    #[must_use]
    pub fn data(&self) -> HashMap<DeviceId, RadiatorDevice> {
        self.manager.devices()
    }

    /// Returns a cached radiator.
    #[must_use]
    pub fn device(&self, device_id: &DeviceId) -> Option<RadiatorDevice> {
        self.manager.device(device_id)
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Polls the installation once and notifies listeners.
    ///
    /// # Errors
    ///
    /// Returns the polling error after it was dispatched to the failure
    /// listeners.
    pub async fn refresh(&self) -> Result<(), Error> {
        let _guard = self.refresh_lock.lock().await;

        match self.manager.update().await {
            Ok(devices) => {
                self.register_keys(&devices);
                self.last_update_success.store(true, Ordering::Release);
                tracing::debug!(devices = devices.len(), "Refresh finished");
                self.listeners.dispatch(Ok(&devices));
                Ok(())
            }
            Err(e) => {
                self.last_update_success.store(false, Ordering::Release);
                tracing::warn!(error = %e, "Refresh failed");
                self.listeners.dispatch(Err(&e));
                Err(e)
            }
        }
    }

    /// Refreshes now, typically right after a command.
    ///
    /// Failures are logged and reported to listeners only.
    pub async fn request_refresh(&self) {
        // Already logged and dispatched.
        let _ = self.refresh().await;
    }

    fn register_keys(&self, devices: &HashMap<DeviceId, RadiatorDevice>) {
        let mut ids: Vec<&DeviceId> = devices.keys().collect();
        ids.sort();

        let mut keys = self.keys.lock();
        for platform in Platform::ALL {
            let entry = keys.entry(platform).or_default();
            for id in &ids {
                if entry.seen.insert((*id).clone()) {
                    entry.unregistered.push((*id).clone());
                }
            }
        }
    }

    /// Drains the radiators not yet handed to `platform`.
    ///
    /// Each radiator is returned once per platform over the coordinator's
    /// lifetime.
    pub fn take_unregistered(&self, platform: Platform) -> Vec<DeviceId> {
        self.keys
            .lock()
            .get_mut(&platform)
            .map(|entry| std::mem::take(&mut entry.unregistered))
            .unwrap_or_default()
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Registers a callback invoked after every successful refresh.
    pub fn add_listener<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&HashMap<DeviceId, RadiatorDevice>) + Send + Sync + 'static,
    {
        self.listeners.on_updated(callback)
    }

    /// Registers a callback invoked after every failed refresh.
    pub fn add_error_listener<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Error) + Send + Sync + 'static,
    {
        self.listeners.on_failed(callback)
    }

    /// Removes a listener.
    ///
    /// Returns `true` if the listener was registered.
    pub fn remove_listener(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Hands new radiators of `platform` to `add`.
    ///
    /// `add` is called right away with the radiators seen so far, then after
    /// each refresh that found new ones.
    pub fn add_entities_for_seen_keys<F>(self: &Arc<Self>, platform: Platform, add: F) -> SubscriptionId
    where
        F: Fn(Vec<DeviceId>) + Send + Sync + 'static,
    {
        let add = Arc::new(add);

        let ids = self.take_unregistered(platform);
        if !ids.is_empty() {
            add(ids);
        }

        let weak = Arc::downgrade(self);
        self.add_listener(move |_| {
            let Some(coordinator) = weak.upgrade() else {
                return;
            };
            let ids = coordinator.take_unregistered(platform);
            if !ids.is_empty() {
                tracing::debug!(%platform, count = ids.len(), "Adding entities");
                add(ids);
            }
        })
    }

    // =========================================================================
    // Polling loop
    // =========================================================================

    /// Refreshes at the configured interval until [`shutdown`](Self::shutdown).
    ///
    /// The first refresh happens immediately. Errors are logged and the loop
    /// keeps going.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(interval = ?self.interval, "Starting polling loop");

        loop {
            tokio::select! {
                _ = ticker.tick() => self.request_refresh().await,
                () = self.shutdown.notified() => break,
            }
        }

        tracing::info!("Polling loop stopped");
    }

    /// Runs the polling loop on a tokio task.
    #[must_use]
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<()> {
        let coordinator = Arc::clone(self);
        tokio::spawn(async move { coordinator.run().await })
    }

    /// Stops the polling loop.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

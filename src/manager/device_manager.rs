// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device manager for the radiators of one installation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;

use crate::api::{CloudApi, RointeApi};
use crate::command::{CommandPlan, DeviceCommand};
use crate::config::RointeConfig;
use crate::device::RadiatorDevice;
use crate::error::{ApiError, DeviceError, Error};
use crate::event::{DeviceEvent, DeviceId, EventBus};
use crate::types::DeviceType;

/// Manager for the radiators of a Rointe installation.
///
/// The `DeviceManager` polls the cloud, keeps one [`RadiatorDevice`] record
/// per radiator and publishes discovery and state change events.
///
/// # Features
///
/// - **Polling**: [`update`](Self::update) refreshes every radiator of the installation
/// - **Change Detection**: only real differences between polls are published
/// - **Commands**: [`send_command`](Self::send_command) patches the cloud and
///   applies the expected state right away
/// - **Event System**: subscribe to device events via broadcast channels
///
/// # Examples
///
/// ```no_run
/// use rointe_lib::RointeConfig;
/// use rointe_lib::command::DeviceCommand;
/// use rointe_lib::manager::DeviceManager;
/// use rointe_lib::types::HvacMode;
///
/// #[tokio::main]
/// async fn main() -> rointe_lib::Result<()> {
///     let config = RointeConfig::new("me@example.com", "secret", "app-key");
///     let manager = DeviceManager::connect(config).await?;
///
///     // Subscribe to events
///     let mut events = manager.subscribe();
///     tokio::spawn(async move {
///         while let Ok(event) = events.recv().await {
///             println!("Event: {:?}", event);
///         }
///     });
///
///     for (device_id, device) in manager.update().await? {
///         println!("{}: {} at {} °C", device_id, device.name(), device.temp_probe());
///         manager
///             .send_command(&device_id, DeviceCommand::SetHvacMode(HvacMode::Auto))
///             .await?;
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct DeviceManager<A> {
    api: Arc<A>,
    installation_id: String,
    /// Cached radiators, keyed by device ID.
    devices: RwLock<HashMap<DeviceId, RadiatorDevice>>,
    /// Devices of an unsupported type, reported once.
    ignored: Mutex<HashSet<DeviceId>>,
    event_bus: EventBus,
}

impl DeviceManager<RointeApi> {
    /// Signs in and creates a manager for the configured installation.
    ///
    /// Without an installation in the configuration, the first installation
    /// of the account is used.
    ///
    /// # Errors
    ///
    /// Returns an error if sign-in fails or the account has no installations.
    pub async fn connect(config: RointeConfig) -> Result<Self, Error> {
        let configured = config.installation_id().map(str::to_string);
        let api = RointeApi::new(config)?;

        let installation_id = match configured {
            Some(id) => id,
            None => {
                let installations = api.list_installations().await?;
                let Some((id, location)) = installations.into_iter().next() else {
                    return Err(ApiError::NoInstallations.into());
                };
                tracing::info!(installation_id = %id, %location, "Using first installation");
                id
            }
        };

        Ok(Self::new(api, installation_id))
    }
}

impl<A: CloudApi> DeviceManager<A> {
    /// Creates a manager for an installation.
    #[must_use]
    pub fn new(api: A, installation_id: impl Into<String>) -> Self {
        Self::with_api(Arc::new(api), installation_id)
    }

    /// Creates a manager sharing an existing client.
    #[must_use]
    pub fn with_api(api: Arc<A>, installation_id: impl Into<String>) -> Self {
        Self {
            api,
            installation_id: installation_id.into(),
            devices: RwLock::new(HashMap::new()),
            ignored: Mutex::new(HashSet::new()),
            event_bus: EventBus::new(),
        }
    }

    /// Returns the cloud client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the polled installation.
    #[must_use]
    pub fn installation_id(&self) -> &str {
        &self.installation_id
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribes to device events.
    ///
    /// Returns a receiver that will receive all events for all radiators.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    // =========================================================================
    // Cache
    // =========================================================================

    /// Returns a copy of a cached radiator.
    #[must_use]
    pub fn device(&self, device_id: &DeviceId) -> Option<RadiatorDevice> {
        self.devices.read().get(device_id).cloned()
    }

    /// Returns a copy of every cached radiator.
    #[must_use]
    pub fn devices(&self) -> HashMap<DeviceId, RadiatorDevice> {
        self.devices.read().clone()
    }

    /// Returns the IDs of the cached radiators.
    #[must_use]
    pub fn device_ids(&self) -> Vec<DeviceId> {
        self.devices.read().keys().cloned().collect()
    }

    /// Returns the number of cached radiators.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.read().len()
    }

    // =========================================================================
    // Polling
    // =========================================================================

    /// Polls every radiator of the installation.
    ///
    /// A radiator that cannot be fetched is logged and skipped; its cached
    /// record is kept. Returns a snapshot of the cache after the poll.
    ///
    /// # Errors
    ///
    /// Returns an error if the installation itself cannot be fetched.
    pub async fn update(&self) -> Result<HashMap<DeviceId, RadiatorDevice>, Error> {
        let installation = self.api.get_installation(&self.installation_id).await?;
        let now = Local::now().naive_local();

        for device_id in installation.device_ids() {
            match self.fetch_device(device_id, now).await {
                Ok(Some(device)) => self.add_or_update(device),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(%device_id, error = %e, "Failed to fetch device");
                }
            }
        }

        Ok(self.devices())
    }

    /// Fetches one radiator with its energy statistics and firmware.
    ///
    /// Returns `Ok(None)` for nodes without data and for unsupported types.
    async fn fetch_device(
        &self,
        device_id: &DeviceId,
        now: NaiveDateTime,
    ) -> Result<Option<RadiatorDevice>, Error> {
        let json = self.api.get_device(device_id).await?;

        let device_type = match RadiatorDevice::device_type_of(device_id, &json) {
            Ok(device_type) => device_type,
            Err(Error::Device(DeviceError::MissingData(_))) => {
                tracing::error!(%device_id, "Device has no valid data");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if !device_type.is_supported() {
            self.ignore(device_id, device_type);
            return Ok(None);
        }

        let device = RadiatorDevice::from_json(device_id.clone(), &json)?;

        let energy = match self.api.get_latest_energy_stats(device_id, now).await {
            Ok(energy) => energy,
            Err(e) => {
                tracing::warn!(%device_id, error = %e, "Failed to fetch energy statistics");
                None
            }
        };

        let latest_firmware = match device.firmware_version() {
            Some(installed) => self
                .api
                .get_latest_firmware(device.device_type(), device.product_version(), installed)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(%device_id, error = %e, "Failed to fetch firmware map");
                    None
                }),
            None => None,
        };

        Ok(Some(
            device
                .with_energy(energy)
                .with_latest_firmware(latest_firmware),
        ))
    }

    fn ignore(&self, device_id: &DeviceId, device_type: DeviceType) {
        if self.ignored.lock().insert(device_id.clone()) {
            tracing::warn!(%device_id, %device_type, "Ignoring unsupported device");
            self.event_bus
                .publish(DeviceEvent::device_ignored(device_id.clone(), device_type));
        }
    }

    /// Inserts a new radiator or merges a freshly polled record.
    fn add_or_update(&self, device: RadiatorDevice) {
        let device_id = device.id().clone();

        let event = {
            let mut devices = self.devices.write();
            match devices.get_mut(&device_id) {
                Some(cached) => {
                    let changes = cached.update_from(device);
                    if changes.is_empty() {
                        None
                    } else {
                        tracing::debug!(%device_id, count = changes.len(), "Device state changed");
                        Some(DeviceEvent::state_changed(
                            crate::state::StateChange::batch(changes),
                            cached.clone(),
                        ))
                    }
                }
                None => {
                    tracing::info!(%device_id, name = device.name(), "Found new device");
                    let event = DeviceEvent::device_added(device_id.clone(), device.name());
                    devices.insert(device_id, device);
                    Some(event)
                }
            }
        };

        if let Some(event) = event {
            self.event_bus.publish(event);
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Sends a command to a radiator.
    ///
    /// The patches are sent in order. Once all of them succeeded, the cached
    /// record takes the state the radiator is expected to report, so
    /// observers do not wait for the next poll.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the radiator is not cached, a
    /// value error if the command is out of range, or an API error if a
    /// patch is rejected. The cache is left untouched on error.
    pub async fn send_command(
        &self,
        device_id: &DeviceId,
        command: DeviceCommand,
    ) -> Result<(), Error> {
        let device = self
            .device(device_id)
            .ok_or_else(|| Error::DeviceNotFound(device_id.to_string()))?;

        let plan = CommandPlan::for_device(&device, &command, Local::now().naive_local())?;
        let (patches, outcome) = plan.into_parts();

        tracing::debug!(%device_id, %command, patches = patches.len(), "Sending command");

        for patch in &patches {
            self.api.patch_device_data(device_id, patch).await?;
        }

        let new_state = {
            let mut devices = self.devices.write();
            match devices.get_mut(device_id) {
                Some(cached) => cached.apply(&outcome).then(|| cached.clone()),
                None => None,
            }
        };

        if let Some(new_state) = new_state {
            self.event_bus
                .publish(DeviceEvent::state_changed(outcome, new_state));
        }

        Ok(())
    }
}

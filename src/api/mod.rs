// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Access to the Rointe Connect cloud.
//!
//! Rointe radiators sync their state to a Firebase realtime database. This
//! module authenticates against the Firebase identity provider and reads
//! and patches the database nodes that describe installations and devices.
//!
//! # Clients
//!
//! - [`RointeApi`]: HTTP implementation with automatic token renewal
//! - [`CloudApi`]: the operations the [`DeviceManager`](crate::manager::DeviceManager)
//!   needs, so tests and alternative transports can stand in for the cloud

mod auth;
mod client;
mod installation;

pub use auth::AuthToken;
pub use client::RointeApi;
pub use installation::{Installation, Zone};

use std::future::Future;

use chrono::NaiveDateTime;

use crate::command::DevicePatch;
use crate::device::EnergyConsumption;
use crate::error::Error;
use crate::event::DeviceId;
use crate::types::{DeviceType, ProductVersion};

/// Cloud operations used to poll and drive radiators.
pub trait CloudApi: Send + Sync {
    /// Fetches an installation with its zones and device ids.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InstallationNotFound`] if the account has no such
    /// installation, or an API error if the request fails.
    fn get_installation(
        &self,
        installation_id: &str,
    ) -> impl Future<Output = Result<Installation, Error>> + Send;

    /// Fetches the raw `devices/<id>` node.
    ///
    /// # Errors
    ///
    /// Returns an API error if the request fails.
    fn get_device(
        &self,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<serde_json::Value, Error>> + Send;

    /// Fetches the statistics of the last full hour before `now`.
    ///
    /// Returns `None` when the cloud has no statistics for that hour.
    ///
    /// # Errors
    ///
    /// Returns an API error if the request fails.
    fn get_latest_energy_stats(
        &self,
        device_id: &DeviceId,
        now: NaiveDateTime,
    ) -> impl Future<Output = Result<Option<EnergyConsumption>, Error>> + Send;

    /// Looks up the firmware a product can be upgraded to.
    ///
    /// Returns `None` when no upgrade is published for `installed`.
    ///
    /// # Errors
    ///
    /// Returns an API error if the request fails.
    fn get_latest_firmware(
        &self,
        device_type: &DeviceType,
        product_version: &ProductVersion,
        installed: &str,
    ) -> impl Future<Output = Result<Option<String>, Error>> + Send;

    /// Patches the `devices/<id>/data` node.
    ///
    /// # Errors
    ///
    /// Returns an API error if the request fails or is rejected.
    fn patch_device_data(
        &self,
        device_id: &DeviceId,
        patch: &DevicePatch,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

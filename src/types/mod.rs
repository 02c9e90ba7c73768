// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Rointe radiator control.
//!
//! This module provides type-safe representations of the values exchanged
//! with the Rointe cloud and of the user-facing thermostat vocabulary.
//!
//! # Types
//!
//! - [`DeviceMode`] - Vendor working mode (auto/manual)
//! - [`Preset`] - Vendor preset reported in the `status` field
//! - [`HvacMode`], [`HvacAction`], [`PresetMode`] - Thermostat vocabulary
//! - [`Schedule`], [`ScheduleMode`] - Weekly comfort/eco programme
//! - [`DeviceType`], [`ProductVersion`] - Product identification
//! - [`TemperatureRange`] - Selectable target temperature limits

mod hvac;
mod mode;
mod product;
mod schedule;
mod temperature;

pub use hvac::{HvacAction, HvacMode, PresetMode};
pub use mode::{DeviceMode, Preset};
pub use product::{DeviceType, ProductVersion};
pub use schedule::{Schedule, ScheduleMode};
pub use temperature::{
    DEFAULT_TEMPERATURE, TEMPERATURE_MAX, TEMPERATURE_MIN, TEMPERATURE_STEP, TemperatureRange,
};

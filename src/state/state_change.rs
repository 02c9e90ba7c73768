// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.

use crate::device::EnergyConsumption;
use crate::types::{DeviceMode, Preset, Schedule};

/// Represents a change in radiator state.
///
/// # Change Types
///
/// - [`StateChange::Power`] - Radiator switched on or off
/// - [`StateChange::Mode`] - Auto/manual working mode
/// - [`StateChange::Preset`] - Active preset reported in `status`
/// - [`StateChange::TargetTemperature`] - Target temperature
/// - [`StateChange::ProbeTemperature`] - Measured room temperature
/// - [`StateChange::Energy`] - Hourly energy statistics
/// - [`StateChange::Batch`] - Multiple changes grouped together
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// Display name changed.
    Name(String),

    /// Power state changed.
    Power(bool),

    /// Working mode changed.
    Mode(DeviceMode),

    /// Preset changed.
    Preset(Preset),

    /// Target temperature changed.
    TargetTemperature(f64),

    /// Probe temperature changed.
    ProbeTemperature(f64),

    /// One of the preset temperatures changed.
    PresetTemperatures {
        /// Comfort temperature.
        comfort: f64,
        /// Eco temperature.
        eco: f64,
        /// Anti-frost temperature.
        ice: f64,
    },

    /// User mode or its limits changed.
    UserMode {
        /// Whether user mode is enabled.
        enabled: bool,
        /// Lowest temperature allowed in user mode.
        min: Option<f64>,
        /// Highest temperature allowed in user mode.
        max: Option<f64>,
    },

    /// Anti-frost fallback toggled.
    IceMode(bool),

    /// Weekly schedule changed.
    Schedule(Schedule),

    /// Installed or available firmware changed.
    Firmware {
        /// Installed version.
        installed: Option<String>,
        /// Latest available version.
        latest: Option<String>,
    },

    /// Energy statistics updated.
    Energy(Option<EnergyConsumption>),

    /// Multiple changes at once.
    Batch(Vec<StateChange>),
}

impl StateChange {
    /// Creates a batch of changes.
    #[must_use]
    pub fn batch(changes: Vec<StateChange>) -> Self {
        Self::Batch(changes)
    }

    /// Returns `true` if this change affects how the thermostat is driven
    /// (power, mode, preset or target temperature).
    #[must_use]
    pub fn is_control(&self) -> bool {
        match self {
            Self::Power(_) | Self::Mode(_) | Self::Preset(_) | Self::TargetTemperature(_) => true,
            Self::Batch(changes) => changes.iter().any(Self::is_control),
            _ => false,
        }
    }

    /// Returns `true` if this is an energy statistics change.
    #[must_use]
    pub fn is_energy(&self) -> bool {
        matches!(self, Self::Energy(_))
    }

    /// Returns `true` if this is a batch of changes.
    #[must_use]
    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }

    /// Returns the number of individual changes.
    ///
    /// For batch changes, returns the total count of nested changes.
    #[must_use]
    pub fn change_count(&self) -> usize {
        match self {
            Self::Batch(changes) => changes.iter().map(Self::change_count).sum(),
            _ => 1,
        }
    }

    /// Flattens nested batches into a list of individual changes.
    #[must_use]
    pub fn flatten(self) -> Vec<StateChange> {
        match self {
            Self::Batch(changes) => changes.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

/// Entity platforms fed by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Thermostat entities.
    Climate,
    /// Measurement entities.
    Sensor,
    /// Firmware entities.
    Update,
}

impl Platform {
    /// Every platform, in registration order.
    pub const ALL: [Platform; 3] = [Self::Climate, Self::Sensor, Self::Update];

    /// Returns the platform name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Climate => "climate",
            Self::Sensor => "sensor",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let names: Vec<_> = Platform::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["climate", "sensor", "update"]);
    }
}

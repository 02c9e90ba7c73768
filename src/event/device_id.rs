// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identifier type.

use std::borrow::Borrow;
use std::fmt;

/// Identifier of a Rointe device.
///
/// This is the key the cloud uses under `devices/`, so it is stable across
/// restarts and unique per account.
///
/// # Examples
///
/// ```
/// use rointe_lib::event::DeviceId;
///
/// let id = DeviceId::new("-MxYzAbC123");
/// assert_eq!(id.as_str(), "-MxYzAbC123");
/// assert_eq!(id.to_string(), "-MxYzAbC123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Creates a device ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DeviceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&String> for DeviceId {
    fn from(id: &String) -> Self {
        Self(id.clone())
    }
}

impl Borrow<str> for DeviceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn equality_follows_raw_id() {
        assert_eq!(DeviceId::new("a"), DeviceId::from("a"));
        assert_ne!(DeviceId::new("a"), DeviceId::new("b"));
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(DeviceId::new("dev-1"), 1);
        assert_eq!(map.get("dev-1"), Some(&1));
    }
}

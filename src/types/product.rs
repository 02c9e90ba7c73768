// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Product identification types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of Rointe product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceType {
    /// Electric radiator.
    Radiator,
    /// Towel rail.
    Towel,
    /// Thermostat.
    Thermostat,
    /// Any other product the cloud reports.
    Other(String),
}

impl DeviceType {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Radiator => "radiator",
            Self::Towel => "towel",
            Self::Thermostat => "therm",
            Self::Other(other) => other,
        }
    }

    /// Returns `true` if this library can drive the product.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for DeviceType {
    fn from(s: &str) -> Self {
        match s {
            "radiator" => Self::Radiator,
            "towel" => Self::Towel,
            "therm" => Self::Thermostat,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for DeviceType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<DeviceType> for String {
    fn from(device_type: DeviceType) -> Self {
        device_type.as_str().to_string()
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hardware revision of a product, normalized to lowercase.
///
/// # Examples
///
/// ```
/// use rointe_lib::types::ProductVersion;
///
/// let version = ProductVersion::new("V2");
/// assert_eq!(version.as_str(), "v2");
/// assert!(version.supports_user_mode());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ProductVersion(String);

impl ProductVersion {
    /// Creates a product version, lowercasing the input.
    #[must_use]
    pub fn new(version: impl AsRef<str>) -> Self {
        Self(version.as_ref().to_lowercase())
    }

    /// Returns the normalized version string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// User mode limits are only reported by second generation products.
    #[must_use]
    pub fn supports_user_mode(&self) -> bool {
        self.0 == "v2"
    }
}

impl From<String> for ProductVersion {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<ProductVersion> for String {
    fn from(version: ProductVersion) -> Self {
        version.0
    }
}

impl fmt::Display for ProductVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Installation tree.

use serde_json::Value;

use crate::error::{Error, ParseError};
use crate::event::DeviceId;

/// A zone of an installation and the devices assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    id: String,
    device_ids: Vec<DeviceId>,
}

impl Zone {
    /// Returns the zone key.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the devices assigned to the zone.
    #[must_use]
    pub fn device_ids(&self) -> &[DeviceId] {
        &self.device_ids
    }
}

/// An installation (a home) with its zones.
///
/// # Examples
///
/// ```
/// use rointe_lib::api::Installation;
///
/// let json = serde_json::json!({
///     "location": "Home",
///     "zones": {
///         "z1": { "devices": { "dev-1": true, "dev-2": false } },
///         "z2": { "name": "Empty zone" }
///     }
/// });
///
/// let installation = Installation::from_json("inst-1", &json).unwrap();
/// let ids: Vec<_> = installation.device_ids().map(|id| id.as_str()).collect();
/// assert_eq!(ids, ["dev-1"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    id: String,
    location: Option<String>,
    zones: Vec<Zone>,
}

/// Firebase stores sets as `{key: true}`; removed members may linger as
/// `false` or `null`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

impl Installation {
    /// Parses an `installations2/<id>` node.
    ///
    /// Zones without a `devices` map are kept with no devices; device
    /// entries whose value is falsy are skipped.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the node is not an object.
    pub fn from_json(id: impl Into<String>, json: &Value) -> Result<Self, Error> {
        let id = id.into();
        let node = json.as_object().ok_or_else(|| ParseError::InvalidValue {
            field: format!("installation {id}"),
            message: "expected an object".to_string(),
        })?;

        let location = node
            .get("location")
            .and_then(Value::as_str)
            .map(str::to_string);

        let zones = node
            .get("zones")
            .and_then(Value::as_object)
            .map(|zones| {
                zones
                    .iter()
                    .map(|(zone_id, zone)| Zone {
                        id: zone_id.clone(),
                        device_ids: zone
                            .get("devices")
                            .and_then(Value::as_object)
                            .map(|devices| {
                                devices
                                    .iter()
                                    .filter(|(_, present)| is_truthy(present))
                                    .map(|(device_id, _)| DeviceId::from(device_id))
                                    .collect()
                            })
                            .unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            id,
            location,
            zones,
        })
    }

    /// Returns the installation id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the location name shown in the app.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the zones.
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Iterates over every device id of every zone.
    pub fn device_ids(&self) -> impl Iterator<Item = &DeviceId> {
        self.zones.iter().flat_map(|zone| zone.device_ids.iter())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_zones_and_devices() {
        let json = json!({
            "location": "Beach house",
            "userid": "user-1",
            "zones": {
                "z1": { "devices": { "a": true, "b": true } },
                "z2": { "devices": { "c": true, "d": null } },
                "z3": {}
            }
        });

        let installation = Installation::from_json("inst", &json).unwrap();

        assert_eq!(installation.id(), "inst");
        assert_eq!(installation.location(), Some("Beach house"));
        assert_eq!(installation.zones().len(), 3);
        assert_eq!(installation.device_ids().count(), 3);
        assert!(installation.zones().iter().any(|z| z.device_ids().is_empty()));
    }

    #[test]
    fn missing_zones_is_empty() {
        let installation = Installation::from_json("inst", &json!({})).unwrap();
        assert!(installation.zones().is_empty());
        assert_eq!(installation.location(), None);
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(Installation::from_json("inst", &json!("nope")).is_err());
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Rointe library.
//!
//! This module provides the error hierarchy used across the library: value
//! validation, cloud API communication, JSON parsing, device operations and
//! configuration loading.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the Rointe cloud.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during device operations.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Device was not found in the manager.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// The configured installation does not exist for this account.
    #[error("installation not found: {0}")]
    InstallationNotFound(String),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A target temperature is outside the selectable range of the device.
    #[error("temperature {actual} is out of range [{min}, {max}]")]
    TemperatureOutOfRange {
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
        /// The actual value that was provided.
        actual: f64,
    },

    /// An unknown HVAC mode string was provided.
    #[error("invalid HVAC mode: {0}")]
    InvalidHvacMode(String),

    /// An unknown preset mode string was provided.
    #[error("invalid preset mode: {0}")]
    InvalidPresetMode(String),
}

/// Errors related to communication with the Rointe cloud.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("{operation} returned HTTP {status}")]
    Status {
        /// The operation that was attempted.
        operation: &'static str,
        /// The returned status code.
        status: u16,
    },

    /// The credentials were rejected.
    #[error("invalid credentials")]
    InvalidAuth,

    /// The account has no installations.
    #[error("no installations found")]
    NoInstallations,
}

/// Errors related to parsing Rointe responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors related to device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The device reported a type this library does not handle.
    #[error("unsupported device type: {0}")]
    UnsupportedType(String),

    /// The device record has no `data` section.
    #[error("device {0} has no valid data")]
    MissingData(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

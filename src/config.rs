// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account and endpoint configuration.
//!
//! [`RointeConfig`] holds everything needed to reach the Rointe cloud:
//! account credentials, the application API key, endpoint hosts, the
//! request timeout and the polling interval. It can be built in code or
//! loaded from TOML.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use rointe_lib::RointeConfig;
//!
//! let config = RointeConfig::new("me@example.com", "secret", "app-key")
//!     .with_installation("-Installation1")
//!     .with_refresh_interval(Duration::from_secs(120));
//!
//! assert_eq!(config.installation_id(), Some("-Installation1"));
//! assert_eq!(config.refresh_interval(), Duration::from_secs(120));
//! ```

use std::fmt;
use std::time::Duration;

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer};

use crate::error::Error;

/// Default identity provider host.
pub const DEFAULT_AUTH_URL: &str = "https://www.googleapis.com";
/// Default token refresh host.
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com";
/// Default realtime database host.
pub const DEFAULT_FIREBASE_URL: &str = "https://elife-prod.firebaseio.com";

/// Configuration for a Rointe Connect account.
#[derive(Clone, Deserialize)]
pub struct RointeConfig {
    username: String,
    password: String,
    api_key: String,
    #[serde(default)]
    installation_id: Option<String>,
    #[serde(default = "default_auth_url")]
    auth_url: String,
    #[serde(default = "default_token_url")]
    token_url: String,
    #[serde(default = "default_firebase_url")]
    firebase_url: String,
    #[serde(
        default = "default_timeout",
        rename = "timeout_secs",
        deserialize_with = "positive_secs"
    )]
    timeout: Duration,
    #[serde(
        default = "default_refresh_interval",
        rename = "refresh_interval_secs",
        deserialize_with = "positive_secs"
    )]
    refresh_interval: Duration,
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_firebase_url() -> String {
    DEFAULT_FIREBASE_URL.to_string()
}

fn default_timeout() -> Duration {
    RointeConfig::DEFAULT_TIMEOUT
}

fn default_refresh_interval() -> Duration {
    RointeConfig::DEFAULT_REFRESH_INTERVAL
}

fn positive_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let secs = u64::deserialize(deserializer)?;
    if secs == 0 {
        return Err(de::Error::invalid_value(
            Unexpected::Unsigned(0),
            &"a positive number of seconds",
        ));
    }
    Ok(Duration::from_secs(secs))
}

impl RointeConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
    /// Default interval between two polls of the installation.
    pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

    /// Creates a configuration with default endpoints.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            api_key: api_key.into(),
            installation_id: None,
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            firebase_url: default_firebase_url(),
            timeout: Self::DEFAULT_TIMEOUT,
            refresh_interval: Self::DEFAULT_REFRESH_INTERVAL,
        }
    }

    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is invalid, a required
    /// key (`username`, `password`, `api_key`) is missing, or a duration
    /// is zero.
    pub fn from_toml_str(toml: &str) -> Result<Self, Error> {
        Ok(toml::from_str(toml)?)
    }

    /// Selects the installation to poll.
    #[must_use]
    pub fn with_installation(mut self, installation_id: impl Into<String>) -> Self {
        self.installation_id = Some(installation_id.into());
        self
    }

    /// Overrides the identity provider host.
    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Overrides the token refresh host.
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Overrides the realtime database host.
    #[must_use]
    pub fn with_firebase_url(mut self, url: impl Into<String>) -> Self {
        self.firebase_url = url.into();
        self
    }

    /// Sets the request timeout.
    ///
    /// A zero timeout keeps [`DEFAULT_TIMEOUT`](Self::DEFAULT_TIMEOUT).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = non_zero_or(timeout, Self::DEFAULT_TIMEOUT);
        self
    }

    /// Sets the polling interval.
    ///
    /// A zero interval keeps
    /// [`DEFAULT_REFRESH_INTERVAL`](Self::DEFAULT_REFRESH_INTERVAL).
    #[must_use]
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = non_zero_or(interval, Self::DEFAULT_REFRESH_INTERVAL);
        self
    }

    /// Returns the account user name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the account password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the application API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the selected installation.
    #[must_use]
    pub fn installation_id(&self) -> Option<&str> {
        self.installation_id.as_deref()
    }

    /// Returns the identity provider host without trailing slash.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        self.auth_url.trim_end_matches('/')
    }

    /// Returns the token refresh host without trailing slash.
    #[must_use]
    pub fn token_url(&self) -> &str {
        self.token_url.trim_end_matches('/')
    }

    /// Returns the realtime database host without trailing slash.
    #[must_use]
    pub fn firebase_url(&self) -> &str {
        self.firebase_url.trim_end_matches('/')
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }
}

pub(crate) fn non_zero_or(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        tracing::warn!(fallback = ?fallback, "Zero duration replaced by default");
        fallback
    } else {
        value
    }
}

impl fmt::Debug for RointeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RointeConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("installation_id", &self.installation_id)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("firebase_url", &self.firebase_url)
            .field("timeout", &self.timeout)
            .field("refresh_interval", &self.refresh_interval)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RointeConfig::new("user", "pass", "key");
        assert_eq!(config.auth_url(), DEFAULT_AUTH_URL);
        assert_eq!(config.token_url(), DEFAULT_TOKEN_URL);
        assert_eq!(config.firebase_url(), DEFAULT_FIREBASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
        assert_eq!(config.installation_id(), None);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config =
            RointeConfig::new("user", "pass", "key").with_firebase_url("http://127.0.0.1:9000/");
        assert_eq!(config.firebase_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn debug_hides_password() {
        let config = RointeConfig::new("user", "hunter2", "key");
        let debug = format!("{config:?}");
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("key\""));
    }

    #[test]
    fn deserialize_from_toml() {
        let config = RointeConfig::from_toml_str(
            r#"
            username = "me@example.com"
            password = "secret"
            api_key = "app-key"
            installation_id = "-Inst"
            timeout_secs = 5
            refresh_interval_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.username(), "me@example.com");
        assert_eq!(config.api_key(), "app-key");
        assert_eq!(config.installation_id(), Some("-Inst"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
        assert_eq!(config.firebase_url(), DEFAULT_FIREBASE_URL);
    }

    #[test]
    fn sub_second_durations_are_kept() {
        let config = RointeConfig::new("user", "pass", "key")
            .with_timeout(Duration::from_millis(1500))
            .with_refresh_interval(Duration::from_millis(500));

        assert_eq!(config.timeout(), Duration::from_millis(1500));
        assert_eq!(config.refresh_interval(), Duration::from_millis(500));
    }

    #[test]
    fn zero_durations_keep_defaults() {
        let config = RointeConfig::new("user", "pass", "key")
            .with_timeout(Duration::ZERO)
            .with_refresh_interval(Duration::ZERO);

        assert_eq!(config.timeout(), RointeConfig::DEFAULT_TIMEOUT);
        assert_eq!(config.refresh_interval(), RointeConfig::DEFAULT_REFRESH_INTERVAL);
    }

    #[test]
    fn toml_zero_interval_fails() {
        let result = RointeConfig::from_toml_str(
            r#"
            username = "me"
            password = "secret"
            api_key = "key"
            refresh_interval_secs = 0
            "#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn toml_missing_credentials_fails() {
        let result = RointeConfig::from_toml_str(r#"username = "me""#);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}

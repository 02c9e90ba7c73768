// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the Rointe cloud.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;

use super::auth::{AuthToken, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
use super::installation::Installation;
use super::CloudApi;
use crate::command::DevicePatch;
use crate::config::RointeConfig;
use crate::device::EnergyConsumption;
use crate::error::{ApiError, Error, ParseError};
use crate::event::DeviceId;
use crate::types::{DeviceType, ProductVersion};

const VERIFY_PASSWORD_PATH: &str = "/identitytoolkit/v3/relyingparty/verifyPassword";
const ACCOUNT_INFO_PATH: &str = "/identitytoolkit/v3/relyingparty/getAccountInfo";
const REFRESH_TOKEN_PATH: &str = "/v1/token";
const INSTALLATIONS_PATH: &str = "/installations2.json";

/// HTTP client for the Rointe Connect cloud.
///
/// Every data request first makes sure a valid ID token is available:
/// the first call signs in with the account credentials, later calls reuse
/// the token until it is about to expire and then renew it with the
/// refresh token, falling back to a new sign-in if renewal fails.
///
/// # Examples
///
/// ```no_run
/// use rointe_lib::RointeConfig;
/// use rointe_lib::api::RointeApi;
///
/// # async fn example() -> rointe_lib::Result<()> {
/// let api = RointeApi::new(RointeConfig::new("me@example.com", "secret", "app-key"))?;
///
/// for (id, location) in api.list_installations().await? {
///     println!("{id}: {location}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RointeApi {
    config: RointeConfig,
    client: Client,
    session: Mutex<Option<AuthToken>>,
    local_id: Mutex<Option<String>>,
}

impl RointeApi {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: RointeConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            config,
            client,
            session: Mutex::new(None),
            local_id: Mutex::new(None),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RointeConfig {
        &self.config
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Signs in with the account credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidAuth`] if the credentials are rejected.
    pub async fn login(&self) -> Result<AuthToken, Error> {
        let url = format!("{}{VERIFY_PASSWORD_PATH}", self.config.auth_url());
        let body = LoginRequest {
            email: self.config.username(),
            password: self.config.password(),
            return_secure_token: true,
        };

        tracing::debug!(user = %self.config.username(), "Signing in to Rointe Connect");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key())])
            .json(&body)
            .send()
            .await
            .map_err(ApiError::Http)?;

        if !response.status().is_success() {
            tracing::error!(status = response.status().as_u16(), "Sign-in rejected");
            return Err(ApiError::InvalidAuth.into());
        }

        let login: LoginResponse = response.json().await.map_err(ApiError::Http)?;
        login.into_token(Utc::now())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthToken, Error> {
        let url = format!("{}{REFRESH_TOKEN_PATH}", self.config.token_url());
        let body = RefreshRequest {
            grant_type: "refresh_token",
            refresh_token,
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key())])
            .json(&body)
            .send()
            .await
            .map_err(ApiError::Http)?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                operation: "token refresh",
                status: response.status().as_u16(),
            }
            .into());
        }

        let refreshed: RefreshResponse = response.json().await.map_err(ApiError::Http)?;
        refreshed.into_token(Utc::now())
    }

    /// Returns a valid ID token, signing in or renewing as needed.
    async fn ensure_valid_auth(&self) -> Result<String, Error> {
        let mut session = self.session.lock().await;

        if let Some(token) = session.as_ref() {
            if !token.is_expired(Utc::now()) {
                return Ok(token.id_token().to_string());
            }

            if let Some(refresh_token) = token.refresh_token().map(str::to_string) {
                match self.refresh(&refresh_token).await {
                    Ok(token) => {
                        tracing::debug!(expires_at = %token.expires_at(), "Renewed ID token");
                        let id_token = token.id_token().to_string();
                        *session = Some(token);
                        return Ok(id_token);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Token renewal failed, signing in again");
                    }
                }
            }
        }

        let token = match self.login().await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(error = %e, "Unable to authenticate with Rointe Connect");
                *session = None;
                return Err(e);
            }
        };

        if let Some(local_id) = token.local_id() {
            *self.local_id.lock().await = Some(local_id.to_string());
        }

        let id_token = token.id_token().to_string();
        *session = Some(token);
        Ok(id_token)
    }

    /// Forgets the current token so the next request signs in again.
    async fn invalidate_session(&self) {
        *self.session.lock().await = None;
    }

    /// Returns the account id used to filter installations.
    ///
    /// # Errors
    ///
    /// Returns an API error if the account info request fails, or a parse
    /// error if the response has no user.
    pub async fn get_local_id(&self) -> Result<String, Error> {
        if let Some(local_id) = self.local_id.lock().await.clone() {
            return Ok(local_id);
        }

        let id_token = self.ensure_valid_auth().await?;

        // Sign-in usually returns the account id already.
        if let Some(local_id) = self.local_id.lock().await.clone() {
            return Ok(local_id);
        }

        let url = format!("{}{ACCOUNT_INFO_PATH}", self.config.auth_url());
        let request = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key())])
            .json(&serde_json::json!({ "idToken": id_token }));

        let response: Value = self.send_json("get account info", request).await?;

        let local_id = response
            .pointer("/users/0/localId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ParseError::MissingField("users[0].localId".to_string()))?;

        *self.local_id.lock().await = Some(local_id.clone());
        Ok(local_id)
    }

    // =========================================================================
    // Installations
    // =========================================================================

    async fn query_installations(&self, local_id: &str) -> Result<Value, Error> {
        let id_token = self.ensure_valid_auth().await?;
        let url = format!("{}{INSTALLATIONS_PATH}", self.config.firebase_url());
        let equal_to = format!("\"{local_id}\"");
        let request = self.client.get(&url).query(&[
            ("auth", id_token.as_str()),
            ("orderBy", "\"userid\""),
            ("equalTo", equal_to.as_str()),
        ]);

        self.send_json("get installations", request).await
    }

    /// Lists the installations of an account as id to location name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NoInstallations`] if the account has none.
    pub async fn get_installations(&self, local_id: &str) -> Result<BTreeMap<String, String>, Error> {
        let response = self.query_installations(local_id).await?;

        let installations: BTreeMap<String, String> = response
            .as_object()
            .map(|nodes| {
                nodes
                    .iter()
                    .map(|(id, node)| {
                        let location = node
                            .get("location")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string();
                        (id.clone(), location)
                    })
                    .collect()
            })
            .unwrap_or_default();

        if installations.is_empty() {
            tracing::error!("No Rointe installations found");
            return Err(ApiError::NoInstallations.into());
        }

        Ok(installations)
    }

    /// Signs in and lists the account installations.
    ///
    /// This is what a setup flow runs to validate credentials and let the
    /// user pick an installation.
    ///
    /// # Errors
    ///
    /// Returns an error if sign-in fails or the account has no installations.
    pub async fn list_installations(&self) -> Result<BTreeMap<String, String>, Error> {
        let local_id = self.get_local_id().await?;
        self.get_installations(&local_id).await
    }

    /// Fetches one installation of an account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InstallationNotFound`] if the account has no
    /// installation with that id.
    pub async fn get_installation_by_id(
        &self,
        installation_id: &str,
        local_id: &str,
    ) -> Result<Installation, Error> {
        let response = self.query_installations(local_id).await?;

        match response.get(installation_id) {
            Some(node) if !node.is_null() => Installation::from_json(installation_id, node),
            _ => {
                tracing::error!(installation_id, "Installation not found");
                Err(Error::InstallationNotFound(installation_id.to_string()))
            }
        }
    }

    // =========================================================================
    // Transport helpers
    // =========================================================================

    fn data_url(&self, path: &str) -> String {
        format!("{}/{path}.json", self.config.firebase_url())
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<T, Error> {
        let id_token = self.ensure_valid_auth().await?;
        let request = self
            .client
            .get(self.data_url(path))
            .query(&[("auth", id_token.as_str())]);

        self.send_json(operation, request).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, Error> {
        let response = request.send().await.map_err(ApiError::Http)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(operation, status = status.as_u16(), "Request not authorized");
            self.invalidate_session().await;
            return Err(ApiError::InvalidAuth.into());
        }

        if !status.is_success() {
            tracing::error!(operation, status = status.as_u16(), "Request failed");
            return Err(ApiError::Status {
                operation,
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(ApiError::Http)?;
        tracing::trace!(operation, body = %body, "Received response");

        Ok(serde_json::from_str(&body).map_err(ParseError::from)?)
    }
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

impl CloudApi for RointeApi {
    async fn get_installation(&self, installation_id: &str) -> Result<Installation, Error> {
        let local_id = self.get_local_id().await?;
        self.get_installation_by_id(installation_id, &local_id)
            .await
    }

    async fn get_device(&self, device_id: &DeviceId) -> Result<Value, Error> {
        let path = format!("devices/{}", segment(device_id.as_str()));
        self.get_data("get device", &path).await
    }

    async fn get_latest_energy_stats(
        &self,
        device_id: &DeviceId,
        now: NaiveDateTime,
    ) -> Result<Option<EnergyConsumption>, Error> {
        let start = EnergyConsumption::previous_hour(now);
        let path = format!(
            "history_statistics/{}/daily/{}/energy/{}0000",
            segment(device_id.as_str()),
            start.format("%Y/%m/%d"),
            start.format("%H"),
        );

        let node: Option<Value> = self.get_data("get energy stats", &path).await?;
        match node {
            None | Some(Value::Null) => Ok(None),
            Some(node) => {
                let raw = serde_json::from_value(node).map_err(ParseError::from)?;
                Ok(Some(EnergyConsumption::from_raw(start, raw)))
            }
        }
    }

    async fn get_latest_firmware(
        &self,
        device_type: &DeviceType,
        product_version: &ProductVersion,
        installed: &str,
    ) -> Result<Option<String>, Error> {
        let path = format!(
            "firmware_new/{}/{}",
            segment(device_type.as_str()),
            segment(product_version.as_str()),
        );

        let node: Value = self.get_data("get firmware", &path).await?;

        Ok(node
            .get(installed)
            .and_then(|upgrade| upgrade.get("end_version"))
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn patch_device_data(&self, device_id: &DeviceId, patch: &DevicePatch) -> Result<(), Error> {
        let id_token = self.ensure_valid_auth().await?;
        let body = patch.clone().stamped(Utc::now());
        let path = format!("devices/{}/data", segment(device_id.as_str()));

        tracing::debug!(%device_id, body = ?body, "Sending patch request");

        let request = self
            .client
            .patch(self.data_url(&path))
            .query(&[("auth", id_token.as_str())])
            .json(&body);

        let _: Value = self.send_json("patch device", request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_joins_host_and_path() {
        let api = RointeApi::new(
            RointeConfig::new("u", "p", "k").with_firebase_url("http://localhost:9000/"),
        )
        .unwrap();
        assert_eq!(
            api.data_url("devices/abc"),
            "http://localhost:9000/devices/abc.json"
        );
    }

    #[test]
    fn segment_encodes_reserved_characters() {
        assert_eq!(segment("-Mx/1"), "-Mx%2F1");
        assert_eq!(segment("plain"), "plain");
    }
}

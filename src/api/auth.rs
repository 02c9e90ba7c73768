// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identity provider tokens.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, ParseError};

/// Tokens are renewed this long before the identity provider expires them.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// A Firebase ID token with its renewal information.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    id_token: String,
    refresh_token: Option<String>,
    local_id: Option<String>,
    expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// Creates a token that expires `expires_in` seconds after `now`.
    #[must_use]
    pub fn new(
        id_token: impl Into<String>,
        refresh_token: Option<String>,
        local_id: Option<String>,
        expires_in: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id_token: id_token.into(),
            refresh_token,
            local_id,
            expires_at: now + Duration::seconds(expires_in),
        }
    }

    /// Returns the bearer value passed as `auth` to the database.
    #[must_use]
    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    /// Returns the refresh token, if the provider issued one.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns the account id returned alongside the token.
    #[must_use]
    pub fn local_id(&self) -> Option<&str> {
        self.local_id.as_deref()
    }

    /// Returns when the provider expires the token.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` if the token must be renewed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("local_id", &self.local_id)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Body of a password sign-in request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

/// Password sign-in response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
    pub local_id: Option<String>,
    pub expires_in: Option<String>,
}

/// Body of a token refresh request.
#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub grant_type: &'static str,
    pub refresh_token: &'a str,
}

/// Token refresh response. The secure token endpoint uses snake case.
#[derive(Debug, Deserialize)]
pub(crate) struct RefreshResponse {
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user_id: Option<String>,
    pub expires_in: Option<String>,
}

fn expires_in(value: Option<&str>) -> Result<i64, Error> {
    let value = value.ok_or_else(|| ParseError::MissingField("expiresIn".to_string()))?;
    value.parse().map_err(|_| {
        ParseError::InvalidValue {
            field: "expiresIn".to_string(),
            message: format!("not a number of seconds: {value}"),
        }
        .into()
    })
}

impl LoginResponse {
    pub(crate) fn into_token(self, now: DateTime<Utc>) -> Result<AuthToken, Error> {
        let id_token = self
            .id_token
            .ok_or_else(|| ParseError::MissingField("idToken".to_string()))?;
        let expires_in = expires_in(self.expires_in.as_deref())?;

        Ok(AuthToken::new(
            id_token,
            self.refresh_token,
            self.local_id,
            expires_in,
            now,
        ))
    }
}

impl RefreshResponse {
    pub(crate) fn into_token(self, now: DateTime<Utc>) -> Result<AuthToken, Error> {
        let id_token = self
            .id_token
            .ok_or_else(|| ParseError::MissingField("id_token".to_string()))?;
        let expires_in = expires_in(self.expires_in.as_deref())?;

        Ok(AuthToken::new(
            id_token,
            self.refresh_token,
            self.user_id,
            expires_in,
            now,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_uses_margin() {
        let now = Utc::now();
        let token = AuthToken::new("id", None, None, 3600, now);

        assert!(!token.is_expired(now));
        assert!(!token.is_expired(now + Duration::seconds(3500)));
        assert!(token.is_expired(now + Duration::seconds(3541)));
    }

    #[test]
    fn login_response_into_token() {
        let now = Utc::now();
        let response: LoginResponse = serde_json::from_value(serde_json::json!({
            "idToken": "abc",
            "refreshToken": "def",
            "localId": "user-1",
            "expiresIn": "3600"
        }))
        .unwrap();

        let token = response.into_token(now).unwrap();
        assert_eq!(token.id_token(), "abc");
        assert_eq!(token.refresh_token(), Some("def"));
        assert_eq!(token.local_id(), Some("user-1"));
        assert_eq!(token.expires_at(), now + Duration::seconds(3600));
    }

    #[test]
    fn login_response_without_token_fails() {
        let response: LoginResponse =
            serde_json::from_value(serde_json::json!({"expiresIn": "3600"})).unwrap();
        assert!(matches!(
            response.into_token(Utc::now()),
            Err(Error::Parse(ParseError::MissingField(_)))
        ));
    }

    #[test]
    fn refresh_response_into_token() {
        let response: RefreshResponse = serde_json::from_value(serde_json::json!({
            "id_token": "new",
            "refresh_token": "next",
            "user_id": "user-1",
            "expires_in": "60"
        }))
        .unwrap();

        let token = response.into_token(Utc::now()).unwrap();
        assert_eq!(token.id_token(), "new");
        assert_eq!(token.refresh_token(), Some("next"));
    }

    #[test]
    fn debug_hides_tokens() {
        let token = AuthToken::new("secret-id", Some("secret-refresh".into()), None, 60, Utc::now());
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret"));
    }
}

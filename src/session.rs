// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authentication and account operations.
//!
//! [`Cloud`] is the entry point of the crate. It owns a transport and turns
//! credentials into an authenticated [`User`], whose graph is hydrated before
//! it is returned.

use std::fmt;
use std::sync::Arc;

use serde::de::{DeserializeOwned, IgnoredAny};

use crate::command::{CreateAccountRequest, NewAccount, NewLocation};
use crate::error::Result;
use crate::protocol::{ApiRequest, PASSWORD_HEADER, Transport, endpoint};
use crate::response::{self, SessionResponse};
use crate::user::User;

#[cfg(feature = "http")]
use crate::protocol::{HttpClient, HttpConfig};

// ============================================================================
// Session - Authenticated transport handle
// ============================================================================

/// An authenticated handle on the cloud.
///
/// Cloning a session is cheap: the transport and the key are shared. Every
/// entity of a [`User`] graph carries a clone so it can issue its own calls.
/// The key never appears in `Debug` output.
pub struct Session<T> {
    transport: Arc<T>,
    key: Arc<str>,
    key_expire: Option<Arc<str>>,
}

impl<T: Transport> Session<T> {
    pub(crate) fn new(transport: Arc<T>, response: SessionResponse) -> Self {
        Self {
            transport,
            key: response.key.into(),
            key_expire: response.key_expire.map(Into::into),
        }
    }

    /// Returns the session key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the key expiry reported at login, if any.
    #[must_use]
    pub fn key_expire(&self) -> Option<&str> {
        self.key_expire.as_deref()
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends an authenticated request and decodes the verified response.
    pub(crate) async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        let request = request.with_api_key(&self.key);
        let raw = self.transport.send(&request).await?;
        response::decode(&raw)
    }

    /// Sends an authenticated request whose body only carries the envelope.
    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<()> {
        self.call::<IgnoredAny>(request).await.map(|_| ())
    }
}

#[cfg(test)]
impl Session<crate::protocol::ScriptedTransport> {
    /// Session with key `K1` over a scripted transport.
    pub(crate) fn scripted(transport: crate::protocol::ScriptedTransport) -> Self {
        Self::new(
            Arc::new(transport),
            SessionResponse {
                key: "K1".to_string(),
                key_expire: None,
            },
        )
    }
}

impl<T> Clone for Session<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            key: Arc::clone(&self.key),
            key_expire: self.key_expire.clone(),
        }
    }
}

impl<T> fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("key", &"<redacted>")
            .field("key_expire", &self.key_expire)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Cloud - Unauthenticated entry point
// ============================================================================

/// Entry point for logging in and creating accounts.
///
/// # Examples
///
/// ```no_run
/// use presence_lib::Cloud;
/// use presence_lib::protocol::{HttpConfig, Server};
///
/// # async fn example() -> presence_lib::Result<()> {
/// let cloud = Cloud::http(HttpConfig::for_server(Server::Developer))?;
/// let user = cloud.login("u@example.com", "secret", None).await?;
///
/// for device in user.devices() {
///     println!("{} ({:?})", device.id(), device.desc());
/// }
///
/// user.logout().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Cloud<T> {
    transport: Arc<T>,
}

impl<T: Transport> Cloud<T> {
    /// Creates an entry point over the given transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    /// Creates an entry point over an already shared transport.
    #[must_use]
    pub fn from_shared(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Logs in and returns the fully hydrated user.
    ///
    /// `expiry` is the key lifetime requested from the server; `None` asks
    /// for a key that does not expire.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`](crate::Error::Api) if the credentials are
    /// rejected or any hydration call fails, and transport or parse errors
    /// as they occur.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        expiry: Option<i64>,
    ) -> Result<User<T>> {
        tracing::info!(username, "Logging in");

        let request = ApiRequest::get(endpoint::login(username, expiry))
            .with_header(PASSWORD_HEADER, password);
        let raw = self.transport.send(&request).await?;
        let session: SessionResponse = response::decode(&raw)?;

        User::connect(Session::new(Arc::clone(&self.transport), session)).await
    }

    /// Creates an account with its first location and returns the hydrated
    /// user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`](crate::Error::Api) if the server refuses the
    /// account (for example a duplicate username), and transport or parse
    /// errors as they occur.
    pub async fn create_account(
        &self,
        account: &NewAccount,
        location: &NewLocation,
    ) -> Result<User<T>> {
        tracing::info!(username = account.username(), "Creating account");

        let request = ApiRequest::post(endpoint::user()).with_json(&CreateAccountRequest {
            user: account,
            location,
        })?;
        let raw = self.transport.send(&request).await?;
        let session: SessionResponse = response::decode(&raw)?;

        User::connect(Session::new(Arc::clone(&self.transport), session)).await
    }
}

#[cfg(feature = "http")]
impl Cloud<HttpClient> {
    /// Creates an entry point over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn http(config: HttpConfig) -> Result<Self> {
        Ok(Self::new(config.into_client()?))
    }
}

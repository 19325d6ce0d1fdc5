// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for talking to the Presence cloud.
//!
//! Everything above this module sees the network through the [`Transport`]
//! trait: one request in, one raw response body out. The crate ships two
//! implementations:
//!
//! - [`HttpClient`]: HTTPS requests against a fixed host using `reqwest`
//! - [`ScriptedTransport`]: replays queued response bodies and records every
//!   request, for tests and dry runs
//!
//! Result codes inside the body are not interpreted here; that is the job of
//! [`response::verify`](crate::response::verify).

pub(crate) mod endpoint;
#[cfg(feature = "http")]
mod http;
mod scripted;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig, Server};
pub use scripted::ScriptedTransport;

use std::fmt;

use serde::Serialize;

use crate::error::{ParseError, TransportError};

/// Header carrying the session key on authenticated calls.
pub const API_KEY_HEADER: &str = "PRESENCE_API_KEY";
/// Header carrying the password on login.
pub const PASSWORD_HEADER: &str = "PASSWORD";
/// Content type header name.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
/// Content type of JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

const REDACTED_HEADERS: [&str; 2] = [API_KEY_HEADER, PASSWORD_HEADER];

/// HTTP method of a cloud request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request to the cloud.
///
/// The path is relative to the transport's host and already contains any
/// query string. `Debug` output hides the session key and password headers.
///
/// # Examples
///
/// ```
/// use presence_lib::protocol::{ApiRequest, Method, API_KEY_HEADER};
///
/// let request = ApiRequest::get("/cloud/json/user").with_header(API_KEY_HEADER, "K1");
/// assert_eq!(request.method(), Method::Get);
/// assert_eq!(request.header(API_KEY_HEADER), Some("K1"));
/// assert!(!format!("{request:?}").contains("K1"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<String>,
    headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// Creates a request without body or headers.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    /// Creates a `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Creates a `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Creates a `PUT` request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// Creates a `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Adds a header, replacing any previous value with the same name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(existing, _)| *existing != name);
        self.headers.push((name, value.into()));
        self
    }

    /// Adds the session key header.
    #[must_use]
    pub fn with_api_key(self, key: &str) -> Self {
        self.with_header(API_KEY_HEADER, key)
    }

    /// Serializes `body` as the JSON request body and sets the content type.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the body cannot be serialized.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ParseError> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self.with_header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE))
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the path, including any query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns all headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the value of the named header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if REDACTED_HEADERS.contains(&name.as_str()) {
                    (name.as_str(), "<redacted>")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("body", &self.body.as_ref().map(|_| "<json>"))
            .field("headers", &headers)
            .finish()
    }
}

/// Raw body returned by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response with the given body.
    #[must_use]
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, ParseError> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }
}

/// Sends requests to the cloud.
///
/// Implementations are stateless from the caller's point of view: one call,
/// one request, one response body. They do not retry.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends `request` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request cannot be delivered or the
    /// response cannot be read.
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `presence_lib` library.
//!
//! Every operation in the crate returns [`Result`]. The variants of [`Error`]
//! tell apart failures reported by the cloud (a non-zero `resultCode`),
//! identifiers rejected locally before any request is made, transport
//! failures, and response bodies that could not be decoded.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-zero `resultCode`.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A value was rejected locally, before any network call.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The request could not be delivered or the response not received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Returns the server result code if this is an [`Error::Api`].
    #[must_use]
    pub fn result_code(&self) -> Option<i64> {
        match self {
            Self::Api(err) => Some(err.code),
            _ => None,
        }
    }
}

/// A failure reported by the cloud through the response envelope.
///
/// `description` is taken from the fixed result-code catalog, `message`
/// is the server-provided `resultCodeMessage` (or the description when the
/// server sent none).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("({code}) {description}: {message}")]
pub struct ApiError {
    /// The non-zero `resultCode`.
    pub code: i64,
    /// Catalog description of the code.
    pub description: &'static str,
    /// Human-readable detail from the server.
    pub message: String,
}

/// Errors related to locally validated values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A device identifier contains a space character.
    #[error("invalid device id {0:?}: device ids cannot contain spaces")]
    InvalidIdentifier(String),

    /// A server name is not one of the known cloud servers.
    #[error("unknown server {0:?} (expected \"developer\" or \"esp\")")]
    UnknownServer(String),
}

/// Errors raised by a [`Transport`](crate::protocol::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// Numeric HTTP status.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// Connection to the server failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// A scripted transport ran out of queued responses.
    #[error("no scripted response left for {method} {path}")]
    ScriptExhausted {
        /// Method of the unanswered request.
        method: String,
        /// Path of the unanswered request.
        path: String,
    },
}

/// Errors related to decoding cloud responses.
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

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory transport replaying scripted responses.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::error::TransportError;
use crate::protocol::{ApiRequest, RawResponse, Transport};

/// Transport that answers requests from a queue of prepared bodies.
///
/// Responses are handed out in the order they were queued, regardless of
/// the request. Every request is recorded so tests can assert on paths,
/// headers and bodies afterwards. When the queue is empty, `send` fails with
/// [`TransportError::ScriptExhausted`].
///
/// # Examples
///
/// ```
/// use presence_lib::protocol::{ApiRequest, ScriptedTransport, Transport};
///
/// # async fn example() {
/// let transport = ScriptedTransport::new().with_json(serde_json::json!({"resultCode": 0}));
///
/// let response = transport.send(&ApiRequest::get("/cloud/json/user")).await.unwrap();
/// assert_eq!(response.json().unwrap()["resultCode"], 0);
/// assert_eq!(transport.requests()[0].path(), "/cloud/json/user");
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    /// Creates a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON response body.
    #[must_use]
    pub fn with_json(self, body: serde_json::Value) -> Self {
        self.push_json(body);
        self
    }

    /// Queues a JSON response body on a shared transport.
    pub fn push_json(&self, body: serde_json::Value) {
        self.push_raw(body.to_string());
    }

    /// Queues a raw response body.
    pub fn push_raw(&self, body: impl Into<Vec<u8>>) {
        self.responses.lock().push_back(RawResponse::new(body));
    }

    /// Returns a copy of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    /// Returns the number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Returns the number of queued responses not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.lock().len()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().push(request.clone());

        let next = self.responses.lock().pop_front();
        next.ok_or_else(|| TransportError::ScriptExhausted {
            method: request.method().to_string(),
            path: request.path().to_string(),
        })
    }
}

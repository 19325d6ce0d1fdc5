// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response envelope verification.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Error, ParseError};
use crate::protocol::RawResponse;

use super::result_code::{self, SUCCESS, UNKNOWN};

const RESULT_CODE: &str = "resultCode";
const RESULT_MESSAGE: &str = "resultCodeMessage";

/// Checks the `resultCode` of a decoded response.
///
/// Returns the object unchanged when the code is zero. Any other code fails
/// with [`Error::Api`], carrying the catalog description and the server's
/// `resultCodeMessage` (or the description when the server sent none).
///
/// # Errors
///
/// - [`Error::Api`] for a non-zero result code
/// - [`Error::Parse`] if `resultCode` is missing or not an integer
///
/// # Examples
///
/// ```
/// use presence_lib::response::verify;
/// use serde_json::json;
///
/// let ok = json!({"resultCode": 0, "key": "K1"});
/// assert_eq!(verify(ok.clone()).unwrap(), ok);
///
/// let err = verify(json!({"resultCode": 4})).unwrap_err();
/// assert_eq!(err.result_code(), Some(4));
/// ```
pub fn verify(value: Value) -> Result<Value, Error> {
    let raw_code = value
        .get(RESULT_CODE)
        .ok_or_else(|| ParseError::MissingField(RESULT_CODE.to_string()))?;
    let code = raw_code.as_i64().ok_or_else(|| ParseError::InvalidValue {
        field: RESULT_CODE.to_string(),
        message: format!("expected an integer, got {raw_code}"),
    })?;

    if code == SUCCESS {
        return Ok(value);
    }

    let description = result_code::describe(code).unwrap_or(UNKNOWN);
    let message = value
        .get(RESULT_MESSAGE)
        .and_then(Value::as_str)
        .map_or_else(|| description.to_string(), ToString::to_string);

    tracing::warn!(code, description, "Cloud rejected request");

    Err(ApiError {
        code,
        description,
        message,
    }
    .into())
}

/// Decodes a raw body, verifies its envelope and deserializes it into `R`.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the body is not JSON or does not match `R`,
/// and whatever [`verify`] returns for a failed envelope.
pub fn decode<R: DeserializeOwned>(response: &RawResponse) -> Result<R, Error> {
    let value = verify(response.json()?)?;
    serde_json::from_value(value).map_err(|e| Error::Parse(e.into()))
}

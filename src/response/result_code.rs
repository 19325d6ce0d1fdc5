// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Catalog of cloud result codes.
//!
//! The descriptions are part of the public contract: callers match on them
//! and they show up verbatim in error messages.

/// Result code of a successful call.
pub const SUCCESS: i64 = 0;

/// Description used for codes outside the catalog.
pub const UNKNOWN: &str = "Unknown error";

/// Every documented non-zero result code with its description.
pub const RESULT_CODES: [(i64, &str); 30] = [
    (1, "Internal error"),
    (2, "Wrong API key"),
    (3, "Wrong location ID"),
    (4, "Wrong device ID"),
    (5, "Wrong user ID"),
    (6, "Permission denied"),
    (7, "Wrong parameter value"),
    (8, "Missing required parameter"),
    (9, "Wrong username"),
    (10, "Wrong password"),
    (11, "Duplicate username"),
    (12, "Invalid email address"),
    (13, "Duplicate device ID"),
    (14, "Wrong product ID"),
    (15, "Device is offline"),
    (16, "Device is not registered"),
    (17, "Wrong parameter name"),
    (18, "Wrong parameter index"),
    (19, "Command not supported by device"),
    (20, "Command timed out"),
    (21, "Too many requests"),
    (22, "Quota exceeded"),
    (23, "API key expired"),
    (24, "Duplicate location name"),
    (25, "Wrong time zone"),
    (26, "Wrong country"),
    (27, "Wrong state"),
    (28, "Malformed request body"),
    (29, "Service temporarily unavailable"),
    (30, "Operation not supported"),
];

/// Returns the catalog description of `code`.
///
/// `None` for [`SUCCESS`] and for codes outside the catalog.
///
/// # Examples
///
/// ```
/// use presence_lib::response::describe;
///
/// assert_eq!(describe(2), Some("Wrong API key"));
/// assert_eq!(describe(0), None);
/// assert_eq!(describe(99), None);
/// ```
#[must_use]
pub fn describe(code: i64) -> Option<&'static str> {
    RESULT_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, description)| *description)
}

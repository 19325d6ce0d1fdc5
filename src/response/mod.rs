// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for Presence cloud JSON bodies.
//!
//! Every body the cloud returns is an envelope carrying an integer
//! `resultCode`. [`verify`] checks it, [`decode`] checks it and deserializes
//! the rest into one of the record types below.

mod envelope;
mod records;
mod result_code;

pub use envelope::{decode, verify};
pub use records::{
    DeviceRecord, DeviceResponse, DevicesResponse, LocationRecord, LocationsResponse,
    ParameterRecord, ParameterReport, ParametersResponse, SessionResponse, UserRecord, UserResponse,
};
pub use result_code::{RESULT_CODES, SUCCESS, describe};

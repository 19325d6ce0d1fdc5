// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request paths of the JSON cloud API.

use urlencoding::encode;

use crate::types::DeviceId;

const ROOT: &str = "/cloud/json";

/// Expiry sent on login when the caller asks for a non-expiring key.
pub(crate) const NO_EXPIRY: i64 = -1;

pub(crate) fn user() -> String {
    format!("{ROOT}/user")
}

pub(crate) fn login(username: &str, expiry: Option<i64>) -> String {
    format!(
        "{ROOT}/login?username={}&expiry={}",
        encode(username),
        expiry.unwrap_or(NO_EXPIRY)
    )
}

pub(crate) fn logout() -> String {
    format!("{ROOT}/logout")
}

pub(crate) fn locations() -> String {
    format!("{ROOT}/locations")
}

pub(crate) fn location_devices(location_id: u64) -> String {
    format!("{ROOT}/locations/{location_id}/devices")
}

pub(crate) fn register_device(location_id: u64, device_id: &DeviceId, product_id: u32) -> String {
    format!(
        "{ROOT}/locations/{location_id}/devices/{}?productId={product_id}",
        encode(device_id.as_str())
    )
}

pub(crate) fn device(device_id: &DeviceId) -> String {
    format!("{ROOT}/devices/{}", encode(device_id.as_str()))
}

pub(crate) fn parameters() -> String {
    format!("{ROOT}/parameters")
}

pub(crate) fn device_parameters<S: AsRef<str>>(device_id: &DeviceId, names: &[S]) -> String {
    let mut path = format!("{ROOT}/devices/{}/parameters", encode(device_id.as_str()));
    for (i, name) in names.iter().enumerate() {
        path.push(if i == 0 { '?' } else { '&' });
        path.push_str("name=");
        path.push_str(&encode(name.as_ref()));
    }
    path
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire records returned by the cloud.
//!
//! Each record mirrors one JSON object. The resource's own id is the only
//! required field; everything else defaults to `None` (or an empty list)
//! when absent, so sparse responses never fail to hydrate.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::{DeviceId, Timezone};

/// Accepts a string, number or boolean and keeps its textual form.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Accepts any value and keeps it only if it decodes as `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(value) => serde_json::from_value(value)
            .inspect_err(|e| tracing::debug!(error = %e, "Ignoring undecodable field"))
            .ok(),
    })
}

/// A user object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "UserWire")]
pub struct UserRecord {
    /// Server-assigned user id.
    pub id: u64,
    /// Login name (usually an email address).
    pub user_name: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
}

/// User object as sent, with both spellings of each name field.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWire {
    id: u64,
    #[serde(default, deserialize_with = "text")]
    user_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    username: Option<String>,
    #[serde(default, deserialize_with = "text")]
    first_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    firstname: Option<String>,
    #[serde(default, deserialize_with = "text")]
    last_name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    lastname: Option<String>,
    #[serde(default, deserialize_with = "text")]
    email: Option<String>,
}

impl From<UserWire> for UserRecord {
    fn from(wire: UserWire) -> Self {
        Self {
            id: wire.id,
            user_name: wire.user_name.or(wire.username),
            first_name: wire.first_name.or(wire.firstname),
            last_name: wire.last_name.or(wire.lastname),
            email: wire.email,
        }
    }
}

/// A location object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "LocationWire")]
pub struct LocationRecord {
    /// Server-assigned location id.
    pub id: u64,
    /// Display name.
    pub name: Option<String>,
    /// Time zone, `None` when absent or unreadable.
    pub timezone: Option<Timezone>,
    /// First street address line.
    pub addr_street1: Option<String>,
    /// Second street address line.
    pub addr_street2: Option<String>,
    /// City.
    pub addr_city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Postal code.
    pub zip: Option<String>,
}

/// Location object as sent.
///
/// Address fields come in camelCase on some calls and lowercase on others,
/// sometimes both at once; each spelling gets its own slot.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationWire {
    id: u64,
    #[serde(default, deserialize_with = "text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    timezone: Option<Timezone>,
    #[serde(default, deserialize_with = "text")]
    addr_street1: Option<String>,
    #[serde(default, deserialize_with = "text")]
    addrstreet1: Option<String>,
    #[serde(default, deserialize_with = "text")]
    addr_street2: Option<String>,
    #[serde(default, deserialize_with = "text")]
    addrstreet2: Option<String>,
    #[serde(default, deserialize_with = "text")]
    addr_city: Option<String>,
    #[serde(default, deserialize_with = "text")]
    addrcity: Option<String>,
    #[serde(default, deserialize_with = "text")]
    city: Option<String>,
    #[serde(default, deserialize_with = "text")]
    state: Option<String>,
    #[serde(default, deserialize_with = "text")]
    country: Option<String>,
    #[serde(default, deserialize_with = "text")]
    zip: Option<String>,
    #[serde(default, deserialize_with = "text")]
    zipcode: Option<String>,
}

impl From<LocationWire> for LocationRecord {
    fn from(wire: LocationWire) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            timezone: wire.timezone,
            addr_street1: wire.addr_street1.or(wire.addrstreet1),
            addr_street2: wire.addr_street2.or(wire.addrstreet2),
            addr_city: wire.addr_city.or(wire.addrcity).or(wire.city),
            state: wire.state,
            country: wire.country,
            zip: wire.zip.or(wire.zipcode),
        }
    }
}

/// A device object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceRecord {
    /// Device id.
    pub id: DeviceId,
    /// Product (type) id.
    #[serde(default, rename = "type")]
    pub product_id: Option<u32>,
    /// User description ("nickname").
    #[serde(default)]
    pub desc: Option<String>,
    /// Parameters embedded in the device listing, if any.
    #[serde(default)]
    pub parameters: Option<Vec<ParameterRecord>>,
}

/// A parameter object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ParameterWire")]
pub struct ParameterRecord {
    /// Parameter name, e.g. `outletStatus`.
    pub name: String,
    /// Optional index distinguishing parameters with the same name.
    pub index: Option<String>,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Multiplier applied to the raw value.
    pub multiplier: Option<String>,
    /// Current value.
    pub value: Option<String>,
    /// Time of the last update as reported by the server.
    pub last_update_time: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParameterWire {
    name: String,
    #[serde(default, deserialize_with = "text")]
    index: Option<String>,
    #[serde(default, deserialize_with = "text")]
    unit: Option<String>,
    #[serde(default, deserialize_with = "text")]
    units: Option<String>,
    #[serde(default, deserialize_with = "text")]
    multiplier: Option<String>,
    #[serde(default, deserialize_with = "text")]
    value: Option<String>,
    #[serde(default, deserialize_with = "text")]
    last_update_time: Option<String>,
}

impl From<ParameterWire> for ParameterRecord {
    fn from(wire: ParameterWire) -> Self {
        Self {
            name: wire.name,
            index: wire.index,
            unit: wire.unit.or(wire.units),
            multiplier: wire.multiplier,
            value: wire.value,
            last_update_time: wire.last_update_time,
        }
    }
}

/// Body returned by login and account creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Session key.
    pub key: String,
    /// Expiry of the key, if the server reports one.
    #[serde(default, deserialize_with = "text")]
    pub key_expire: Option<String>,
}

/// Body of `GET /user`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserResponse {
    /// The user.
    pub user: UserRecord,
}

/// Body of `GET /locations`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationsResponse {
    /// Locations in server order.
    #[serde(default)]
    pub locations: Vec<LocationRecord>,
}

/// Body of `GET /locations/{id}/devices`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DevicesResponse {
    /// Devices in server order.
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
}

/// Body of `GET /devices/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceResponse {
    /// The device.
    pub device: DeviceRecord,
}

/// Parameter data returned by a parameter query.
///
/// Querying parameters never touches a device's cached values; pass the
/// report to [`Device::apply_parameters`](crate::Device::apply_parameters)
/// to store it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterReport {
    /// Device the report belongs to, when the server names it.
    #[serde(default)]
    pub device_id: Option<String>,
    /// Parameters in server order.
    #[serde(default)]
    pub parameters: Vec<ParameterRecord>,
}

impl ParameterReport {
    /// Finds a parameter by name and index.
    #[must_use]
    pub fn get(&self, name: &str, index: Option<&str>) -> Option<&ParameterRecord> {
        self.parameters
            .iter()
            .find(|p| p.name == name && p.index.as_deref() == index)
    }
}

/// Body of the account-wide parameter query: one report per device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParametersResponse {
    /// Reports in server order.
    #[serde(default)]
    pub devices: Vec<ParameterReport>,
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identifier type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Identifier of a device registered with the cloud.
///
/// Device ids are case sensitive free-form strings chosen by the device
/// (often a MAC or EUI-64 derived string). The cloud rejects ids containing
/// a space, so the check happens locally at construction time and a
/// `DeviceId` value can never hold one.
///
/// # Examples
///
/// ```
/// use presence_lib::types::DeviceId;
///
/// let id = DeviceId::new("id-17").unwrap();
/// assert_eq!(id.as_str(), "id-17");
///
/// assert!(DeviceId::new("an id").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Creates a device identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidIdentifier`] if `id` contains a space.
    pub fn new(id: impl Into<String>) -> Result<Self, ValueError> {
        let id = id.into();
        if id.contains(' ') {
            return Err(ValueError::InvalidIdentifier(id));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceId({:?})", self.0)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DeviceId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DeviceId {
    type Error = ValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for DeviceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DeviceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ids_without_spaces() {
        let id = DeviceId::new("0x00124b0004a1b2c3").unwrap();
        assert_eq!(id.as_str(), "0x00124b0004a1b2c3");
        assert_eq!(id, "0x00124b0004a1b2c3");
    }

    #[test]
    fn rejects_embedded_space() {
        let err = DeviceId::new("living room plug").unwrap_err();
        assert_eq!(
            err,
            ValueError::InvalidIdentifier("living room plug".to_string())
        );
    }

    #[test]
    fn rejects_leading_and_trailing_space() {
        assert!(DeviceId::new(" plug").is_err());
        assert!(DeviceId::new("plug ").is_err());
    }

    #[test]
    fn other_whitespace_is_not_a_space() {
        // Only U+0020 is forbidden.
        assert!(DeviceId::new("plug\t1").is_ok());
    }

    #[test]
    fn parse_from_str() {
        let id: DeviceId = "id-18".parse().unwrap();
        assert_eq!(id.to_string(), "id-18");
        assert!("id 18".parse::<DeviceId>().is_err());
    }

    #[test]
    fn deserialize_validates() {
        let id: DeviceId = serde_json::from_str(r#""d1""#).unwrap();
        assert_eq!(id.as_str(), "d1");

        let err = serde_json::from_str::<DeviceId>(r#""d 1""#).unwrap_err();
        assert!(err.to_string().contains("cannot contain spaces"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = DeviceId::new("d1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""d1""#);
    }

    #[test]
    fn debug_format() {
        let id = DeviceId::new("d1").unwrap();
        assert_eq!(format!("{id:?}"), r#"DeviceId("d1")"#);
    }
}

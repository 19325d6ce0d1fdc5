// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Location time zone.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Time zone of a location.
///
/// The cloud reports a time zone either as a bare identifier
/// (`"US/Pacific"`) or as an object carrying the identifier, the UTC offset
/// in hours and a daylight saving flag. Offsets may be fractional
/// (`5.5` for India, `5.75` for Nepal) and are kept as whole minutes.
/// Both shapes deserialize into this type; it always serializes as the
/// object form.
///
/// # Examples
///
/// ```
/// use presence_lib::types::Timezone;
///
/// let bare: Timezone = serde_json::from_str(r#""US/Mountain""#).unwrap();
/// assert_eq!(bare.id(), "US/Mountain");
/// assert_eq!(bare.offset_minutes(), None);
///
/// let full: Timezone =
///     serde_json::from_str(r#"{"id": "Asia/Kolkata", "offset": 5.5, "dst": false}"#).unwrap();
/// assert_eq!(full.offset_minutes(), Some(330));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TimezoneRepr", into = "TimezoneWire")]
pub struct Timezone {
    id: String,
    offset_minutes: Option<i32>,
    dst: Option<bool>,
}

impl Timezone {
    /// Creates a time zone with just an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            offset_minutes: None,
            dst: None,
        }
    }

    /// Sets the UTC offset in minutes.
    #[must_use]
    pub fn with_offset_minutes(mut self, minutes: i32) -> Self {
        self.offset_minutes = Some(minutes);
        self
    }

    /// Sets the daylight saving flag.
    #[must_use]
    pub fn with_dst(mut self, dst: bool) -> Self {
        self.dst = Some(dst);
        self
    }

    /// Returns the time zone identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the UTC offset in minutes, if known.
    #[must_use]
    pub fn offset_minutes(&self) -> Option<i32> {
        self.offset_minutes
    }

    /// Returns the UTC offset in hours, if known.
    #[must_use]
    pub fn offset_hours(&self) -> Option<f64> {
        self.offset_minutes.map(|m| f64::from(m) / 60.0)
    }

    /// Returns whether daylight saving time applies, if known.
    #[must_use]
    pub fn dst(&self) -> Option<bool> {
        self.dst
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Largest offset accepted from the wire, in hours.
const MAX_OFFSET_HOURS: f64 = 24.0;

/// Reads an hour offset given as a number or numeric string.
///
/// Anything else, or a value outside ±24 h, is treated as unknown.
#[allow(clippy::cast_possible_truncation)]
fn offset_minutes<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let hours = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    // At most ±1440 minutes once bounded.
    Ok(hours
        .filter(|h| h.is_finite() && h.abs() <= MAX_OFFSET_HOURS)
        .map(|h| (h * 60.0).round() as i32))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimezoneRepr {
    Id(String),
    Full {
        id: String,
        #[serde(default, deserialize_with = "offset_minutes")]
        offset: Option<i32>,
        #[serde(default)]
        dst: Option<bool>,
    },
}

impl From<TimezoneRepr> for Timezone {
    fn from(repr: TimezoneRepr) -> Self {
        match repr {
            TimezoneRepr::Id(id) => Self::new(id),
            TimezoneRepr::Full { id, offset, dst } => Self {
                id,
                offset_minutes: offset,
                dst,
            },
        }
    }
}

#[derive(Serialize)]
struct TimezoneWire {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dst: Option<bool>,
}

impl From<Timezone> for TimezoneWire {
    fn from(tz: Timezone) -> Self {
        // whole hours go out as integers, like the cloud sends them
        let offset = tz.offset_minutes.and_then(|m| {
            if m % 60 == 0 {
                Some(Number::from(m / 60))
            } else {
                Number::from_f64(f64::from(m) / 60.0)
            }
        });
        Self {
            id: tz.id,
            offset,
            dst: tz.dst,
        }
    }
}

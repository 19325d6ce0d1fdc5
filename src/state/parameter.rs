// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single cached device parameter.

use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::response::ParameterRecord;

/// A named, optionally indexed value slot on a device.
///
/// Parameters are identified by their `(name, index)` pair. All other fields
/// are whatever the cloud last reported and may be absent.
///
/// # Examples
///
/// ```
/// use presence_lib::Parameter;
///
/// let param = Parameter::new("outletStatus").with_value("ON");
/// assert_eq!(param.name(), "outletStatus");
/// assert_eq!(param.index(), None);
/// assert_eq!(param.value(), Some("ON"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    index: Option<String>,
    unit: Option<String>,
    multiplier: Option<String>,
    value: Option<String>,
    last_update_time: Option<String>,
}

impl Parameter {
    /// Creates a parameter with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
            unit: None,
            multiplier: None,
            value: None,
            last_update_time: None,
        }
    }

    /// Sets the index.
    #[must_use]
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Sets the unit of measure.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the multiplier.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: impl Into<String>) -> Self {
        self.multiplier = Some(multiplier.into());
        self
    }

    /// Sets the value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the last update time as reported by the cloud.
    #[must_use]
    pub fn with_last_update_time(mut self, time: impl Into<String>) -> Self {
        self.last_update_time = Some(time.into());
        self
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the index.
    #[must_use]
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Returns the unit of measure.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Returns the multiplier.
    #[must_use]
    pub fn multiplier(&self) -> Option<&str> {
        self.multiplier.as_deref()
    }

    /// Returns the value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the last update time exactly as the cloud sent it.
    #[must_use]
    pub fn last_update_time(&self) -> Option<&str> {
        self.last_update_time.as_deref()
    }

    /// Parses the last update time as an RFC 3339 timestamp.
    ///
    /// Returns `None` when the time is absent or not RFC 3339.
    ///
    /// # Examples
    ///
    /// ```
    /// use presence_lib::Parameter;
    ///
    /// let param = Parameter::new("power").with_last_update_time("2013-08-14T10:00:00-07:00");
    /// let time = param.last_update().unwrap();
    /// assert_eq!(time.offset().local_minus_utc(), -7 * 3600);
    /// ```
    #[must_use]
    pub fn last_update(&self) -> Option<DateTime<FixedOffset>> {
        self.last_update_time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
    }

    /// Returns `true` if this parameter has the given identity.
    #[must_use]
    pub fn is(&self, name: &str, index: Option<&str>) -> bool {
        self.name == name && self.index.as_deref() == index
    }
}

impl From<ParameterRecord> for Parameter {
    fn from(record: ParameterRecord) -> Self {
        Self {
            name: record.name,
            index: record.index,
            unit: record.unit,
            multiplier: record.multiplier,
            value: record.value,
            last_update_time: record.last_update_time,
        }
    }
}

impl From<&ParameterRecord> for Parameter {
    fn from(record: &ParameterRecord) -> Self {
        Self::from(record.clone())
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(index) = &self.index {
            write!(f, "[{index}]")?;
        }
        write!(f, " = {}", self.value.as_deref().unwrap_or("?"))?;
        if let Some(unit) = &self.unit {
            write!(f, " {unit}")?;
        }
        Ok(())
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device request bodies.

use serde::Serialize;

/// A single parameter write sent to a device.
///
/// # Examples
///
/// ```
/// use presence_lib::command::ParameterCommand;
///
/// let cmd = ParameterCommand::new("outletStatus", "ON");
/// assert_eq!(cmd.name(), "outletStatus");
/// assert_eq!(cmd.index(), None);
///
/// let indexed = ParameterCommand::new("ppc.dimmer", "50").with_index("2");
/// assert_eq!(indexed.index(), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterCommand {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<String>,
    value: String,
}

impl ParameterCommand {
    /// Creates an unindexed parameter write.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
            value: value.into(),
        }
    }

    /// Sets the parameter index.
    #[must_use]
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter index.
    #[must_use]
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Returns the value to write.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Body of `PUT /cloud/json/devices/{id}/parameters`.
#[derive(Debug, Serialize)]
pub(crate) struct SetParametersRequest<'a> {
    pub(crate) params: &'a [ParameterCommand],
}

/// Body of `PUT /cloud/json/devices/{id}`.
#[derive(Debug, Serialize)]
pub(crate) struct NicknameRequest<'a> {
    pub(crate) device: NicknameFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NicknameFields<'a> {
    pub(crate) desc: &'a str,
}

impl<'a> NicknameRequest<'a> {
    pub(crate) fn new(desc: &'a str) -> Self {
        Self {
            device: NicknameFields { desc },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parameter_write_without_index() {
        let params = [ParameterCommand::new("outletStatus", "OFF")];
        assert_eq!(
            serde_json::to_value(SetParametersRequest { params: &params }).unwrap(),
            json!({"params": [{"name": "outletStatus", "value": "OFF"}]})
        );
    }

    #[test]
    fn parameter_write_with_index() {
        let params = [ParameterCommand::new("power", "1").with_index("3")];
        assert_eq!(
            serde_json::to_value(SetParametersRequest { params: &params }).unwrap(),
            json!({"params": [{"name": "power", "index": "3", "value": "1"}]})
        );
    }

    #[test]
    fn nickname_body() {
        assert_eq!(
            serde_json::to_value(NicknameRequest::new("Kitchen lamp")).unwrap(),
            json!({"device": {"desc": "Kitchen lamp"}})
        );
    }
}

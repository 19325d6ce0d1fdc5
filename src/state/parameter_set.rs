// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered parameter cache of one device.

use crate::response::ParameterReport;

use super::Parameter;

/// Cached parameters of a device, unique by `(name, index)`.
///
/// Entries keep the order in which they were first inserted. Setting a
/// parameter whose `(name, index)` already exists replaces that entry in
/// place.
///
/// # Examples
///
/// ```
/// use presence_lib::state::ParameterSet;
/// use presence_lib::Parameter;
///
/// let mut params = ParameterSet::new();
/// params.set(Parameter::new("outletStatus").with_value("ON"));
/// params.set(Parameter::new("outletStatus").with_value("OFF"));
///
/// assert_eq!(params.len(), 1);
/// assert_eq!(params.get("outletStatus", None).unwrap().value(), Some("OFF"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<Parameter>,
}

impl ParameterSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a parameter.
    ///
    /// Returns `true` if the set changed.
    pub fn set(&mut self, parameter: Parameter) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|p| p.is(parameter.name(), parameter.index()))
        {
            Some(existing) if *existing == parameter => false,
            Some(existing) => {
                *existing = parameter;
                true
            }
            None => {
                self.entries.push(parameter);
                true
            }
        }
    }

    /// Looks up a parameter by name and index.
    #[must_use]
    pub fn get(&self, name: &str, index: Option<&str>) -> Option<&Parameter> {
        self.entries.iter().find(|p| p.is(name, index))
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.entries.iter()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no parameters are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Upserts every parameter of a report.
    ///
    /// Returns `true` if any entry changed.
    pub fn apply(&mut self, report: &ParameterReport) -> bool {
        report
            .parameters
            .iter()
            .fold(false, |changed, record| self.set(record.into()) || changed)
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Parameter> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        let mut set = Self::new();
        for parameter in iter {
            set.set(parameter);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn same_identity_updates_in_place() {
        let mut params = ParameterSet::new();

        assert!(params.set(Parameter::new("outletStatus").with_value("ON")));
        assert!(params.set(Parameter::new("outletStatus").with_value("OFF")));

        assert_eq!(params.len(), 1);
        assert_eq!(
            params.get("outletStatus", None).and_then(Parameter::value),
            Some("OFF")
        );
    }

    #[test]
    fn unchanged_value_reports_no_change() {
        let mut params = ParameterSet::new();
        params.set(Parameter::new("outletStatus").with_value("ON"));
        assert!(!params.set(Parameter::new("outletStatus").with_value("ON")));
    }

    #[test]
    fn different_indexes_are_distinct() {
        let mut params = ParameterSet::new();
        params.set(Parameter::new("power").with_value("1"));
        params.set(Parameter::new("power").with_index("1").with_value("2"));
        params.set(Parameter::new("power").with_index("2").with_value("3"));

        assert_eq!(params.len(), 3);
        assert_eq!(
            params.get("power", Some("2")).and_then(Parameter::value),
            Some("3")
        );
    }

    #[test]
    fn replacement_keeps_position() {
        let mut params: ParameterSet = [
            Parameter::new("a").with_value("1"),
            Parameter::new("b").with_value("2"),
        ]
        .into_iter()
        .collect();

        params.set(Parameter::new("a").with_value("9"));

        let names: Vec<_> = params.iter().map(Parameter::name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(params.get("a", None).and_then(Parameter::value), Some("9"));
    }

    #[test]
    fn apply_report_upserts() {
        let mut params = ParameterSet::new();
        params.set(Parameter::new("outletStatus").with_value("ON"));

        let report: ParameterReport = serde_json::from_value(json!({
            "parameters": [
                {"name": "outletStatus", "value": "OFF"},
                {"name": "power", "value": 0, "unit": "W"}
            ]
        }))
        .unwrap();

        assert!(params.apply(&report));
        assert_eq!(params.len(), 2);
        assert_eq!(
            params.get("outletStatus", None).and_then(Parameter::value),
            Some("OFF")
        );
        assert!(!params.apply(&report));
    }
}

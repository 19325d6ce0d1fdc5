// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached device parameter state.
//!
//! A [`Parameter`] is one value slot on a device, identified by its
//! `(name, index)` pair. A [`ParameterSet`] holds a device's parameters and
//! enforces that identity: setting an existing pair updates it in place.
//!
//! # Examples
//!
//! ```
//! use presence_lib::state::{Parameter, ParameterSet};
//!
//! let mut params = ParameterSet::new();
//!
//! // Set returns true if the set actually changed
//! assert!(params.set(Parameter::new("outletStatus").with_value("ON")));
//! assert!(!params.set(Parameter::new("outletStatus").with_value("ON")));
//! ```

mod parameter;
mod parameter_set;

pub use parameter::Parameter;
pub use parameter_set::ParameterSet;

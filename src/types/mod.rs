// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the request and entity layers.
//!
//! # Types
//!
//! - [`DeviceId`] - Device identifier, guaranteed not to contain a space
//! - [`Timezone`] - Location time zone, bare id or full object form

mod device_id;
mod timezone;

pub use device_id::DeviceId;
pub use timezone::Timezone;

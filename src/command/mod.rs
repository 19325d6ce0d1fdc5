// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request bodies sent to the Presence cloud.
//!
//! Each type serializes to exactly the JSON object the cloud expects. Fields
//! left unset are omitted from the body rather than sent as `null`.
//!
//! | Type | Sent by |
//! |------|---------|
//! | [`NewAccount`] | [`Cloud::create_account`](crate::Cloud::create_account) |
//! | [`NewLocation`] | [`Cloud::create_account`](crate::Cloud::create_account) |
//! | [`ParameterCommand`] | [`Device::send_command`](crate::Device::send_command) |
//!
//! # Examples
//!
//! ```
//! use presence_lib::command::{NewAccount, NewLocation};
//!
//! let account = NewAccount::new("u@example.com", "secret", "MyApp", "u@example.com");
//! let home = NewLocation::new("Home");
//! assert_eq!(account.app_name(), "MyApp");
//! assert_eq!(home.name(), "Home");
//! ```

mod account;
mod device;

pub use account::{NewAccount, NewLocation};
pub use device::ParameterCommand;

pub(crate) use account::CreateAccountRequest;
pub(crate) use device::{NicknameRequest, SetParametersRequest};

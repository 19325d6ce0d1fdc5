// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `presence_lib` - A Rust client for the People Power Presence cloud.
//!
//! This library provides an async API to log into a Presence account, walk
//! its locations and registered devices, and read and write device
//! parameters over the cloud's JSON REST interface.
//!
//! # Supported Features
//!
//! - **Accounts**: login (with optional key expiry), account creation, logout
//! - **Hydration**: the user, its locations and each location's devices are
//!   loaded in one sequential cascade
//! - **Devices**: registration, nicknames, parameter queries and parameter
//!   commands
//! - **Errors**: every response is checked for a non-zero `resultCode`,
//!   which maps to a typed [`ApiError`]
//!
//! # Quick Start
//!
//! ```no_run
//! use presence_lib::Cloud;
//! use presence_lib::protocol::{HttpConfig, Server};
//!
//! #[tokio::main]
//! async fn main() -> presence_lib::Result<()> {
//!     let cloud = Cloud::http(HttpConfig::for_server(Server::Developer))?;
//!     let mut user = cloud.login("u@example.com", "secret", None).await?;
//!     println!("{user}");
//!
//!     // Turn every smart plug on
//!     for device in user.devices_by_product_id(2012) {
//!         device.send_command("outletStatus", None, "ON").await?;
//!     }
//!
//!     // Read back one device and store the answer
//!     if let Some(plug) = user.device_mut("0004a3000001") {
//!         let report = plug.populate_parameters(Some(&["outletStatus"])).await?;
//!         plug.apply_parameters(&report);
//!     }
//!
//!     user.logout().await
//! }
//! ```
//!
//! ## Testing Without a Server
//!
//! [`ScriptedTransport`](protocol::ScriptedTransport) answers requests from
//! a queue of prepared bodies and records what was sent:
//!
//! ```
//! use presence_lib::Cloud;
//! use presence_lib::protocol::ScriptedTransport;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let transport = ScriptedTransport::new()
//!     .with_json(json!({"resultCode": 0, "key": "K1"}))
//!     .with_json(json!({"resultCode": 0, "user": {"id": 1, "userName": "u"}}))
//!     .with_json(json!({"resultCode": 0, "locations": []}));
//!
//! let user = Cloud::new(transport).login("u", "pw", None).await.unwrap();
//! assert_eq!(user.key(), "K1");
//! # }
//! ```

pub mod command;
mod device;
pub mod error;
mod location;
pub mod protocol;
pub mod response;
mod session;
pub mod state;
pub mod types;
mod user;

pub use command::{NewAccount, NewLocation, ParameterCommand};
pub use device::Device;
pub use error::{ApiError, Error, ParseError, Result, TransportError, ValueError};
pub use location::{Address, Location};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig, Server};
pub use protocol::{ScriptedTransport, Transport};
pub use response::ParameterReport;
pub use session::{Cloud, Session};
pub use state::{Parameter, ParameterSet};
pub use types::{DeviceId, Timezone};
pub use user::User;

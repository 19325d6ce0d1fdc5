// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Devices registered at a location.
//!
//! A [`Device`] caches what the cloud last reported about it: its product
//! type, description and parameters. Operations that write to the cloud
//! update the cache only where the server's answer confirms the new value.
//!
//! # Reading versus commanding
//!
//! [`Device::send_command`] asks the cloud to change a parameter on the
//! physical device. The cached value is left alone; call
//! [`Device::populate_parameters`] and [`Device::apply_parameters`] to
//! observe the result.
//!
//! ```no_run
//! use presence_lib::{Cloud, protocol::HttpConfig};
//!
//! # async fn example() -> presence_lib::Result<()> {
//! let cloud = Cloud::http(HttpConfig::default())?;
//! let mut user = cloud.login("u@example.com", "secret", None).await?;
//!
//! if let Some(plug) = user.device_mut("0004a3000001") {
//!     plug.send_command("outletStatus", None, "ON").await?;
//!
//!     let report = plug.populate_parameters(Some(&["outletStatus"])).await?;
//!     plug.apply_parameters(&report);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

use crate::command::{NicknameRequest, ParameterCommand, SetParametersRequest};
use crate::error::Result;
use crate::protocol::{ApiRequest, Transport, endpoint};
use crate::response::{DeviceRecord, DeviceResponse, ParameterReport};
use crate::session::Session;
use crate::state::{Parameter, ParameterSet};
use crate::types::DeviceId;

/// A device registered at a location.
#[derive(Debug)]
pub struct Device<T> {
    session: Session<T>,
    id: DeviceId,
    product_id: Option<u32>,
    desc: Option<String>,
    parameters: ParameterSet,
}

impl<T: Transport> Device<T> {
    /// Creates a device with an empty parameter cache.
    pub(crate) fn new(
        session: Session<T>,
        id: DeviceId,
        product_id: Option<u32>,
        desc: Option<String>,
    ) -> Self {
        Self {
            session,
            id,
            product_id,
            desc,
            parameters: ParameterSet::new(),
        }
    }

    pub(crate) fn from_record(session: Session<T>, record: DeviceRecord) -> Self {
        let parameters = record
            .parameters
            .unwrap_or_default()
            .into_iter()
            .map(Parameter::from)
            .collect();

        Self {
            session,
            id: record.id,
            product_id: record.product_id,
            desc: record.desc,
            parameters,
        }
    }

    /// Returns the device id.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// Returns the product (type) id.
    #[must_use]
    pub fn product_id(&self) -> Option<u32> {
        self.product_id
    }

    /// Returns the description ("nickname").
    #[must_use]
    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    // ========== Cloud Operations ==========

    /// Reloads the product type and description from the cloud.
    ///
    /// Parameters embedded in the answer are merged into the cache.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails; the device is left unchanged.
    pub async fn refresh(&mut self) -> Result<()> {
        let DeviceResponse { device } = self
            .session
            .call(ApiRequest::get(endpoint::device(&self.id)))
            .await?;

        self.product_id = device.product_id;
        self.desc = device.desc;
        for record in device.parameters.unwrap_or_default() {
            self.parameters.set(record.into());
        }
        Ok(())
    }

    /// Queries current parameter values.
    ///
    /// With `Some(names)`, only those parameters are requested, in the given
    /// order. The cache is not modified; see [`Device::apply_parameters`].
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn populate_parameters(&self, names: Option<&[&str]>) -> Result<ParameterReport> {
        let path = endpoint::device_parameters(&self.id, names.unwrap_or_default());
        self.session.call(ApiRequest::get(path)).await
    }

    /// Stores a parameter report in the cache.
    ///
    /// Returns `true` if any cached parameter changed.
    pub fn apply_parameters(&mut self, report: &ParameterReport) -> bool {
        self.parameters.apply(report)
    }

    /// Sets the description of the device.
    ///
    /// The cached description changes only once the cloud accepted it.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails; the description is left unchanged.
    pub async fn set_nickname(&mut self, desc: &str) -> Result<()> {
        let request =
            ApiRequest::put(endpoint::device(&self.id)).with_json(&NicknameRequest::new(desc))?;
        self.session.execute(request).await?;

        tracing::info!(device = %self.id, desc, "Device renamed");
        self.desc = Some(desc.to_string());
        Ok(())
    }

    /// Asks the device to set one parameter.
    ///
    /// Cached parameters are not updated.
    ///
    /// # Errors
    ///
    /// Returns error if the cloud rejects the command.
    pub async fn send_command(&self, name: &str, index: Option<&str>, value: &str) -> Result<()> {
        let command = ParameterCommand::new(name, value);
        let command = match index {
            Some(index) => command.with_index(index),
            None => command,
        };
        self.send_commands(&[command]).await
    }

    /// Asks the device to set several parameters in one request.
    ///
    /// # Errors
    ///
    /// Returns error if the cloud rejects the command.
    pub async fn send_commands(&self, commands: &[ParameterCommand]) -> Result<()> {
        let request = ApiRequest::put(endpoint::device_parameters::<&str>(&self.id, &[]))
            .with_json(&SetParametersRequest { params: commands })?;

        tracing::debug!(device = %self.id, count = commands.len(), "Sending parameter command");
        self.session.execute(request).await
    }

    // ========== Parameter Cache ==========

    /// Inserts or replaces a cached parameter.
    ///
    /// Returns `true` if the cache changed.
    pub fn set_parameter(&mut self, parameter: Parameter) -> bool {
        self.parameters.set(parameter)
    }

    /// Looks up a cached parameter.
    #[must_use]
    pub fn parameter(&self, name: &str, index: Option<&str>) -> Option<&Parameter> {
        self.parameters.get(name, index)
    }

    /// Returns all cached parameters.
    #[must_use]
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }
}

impl<T> fmt::Display for Device<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Device {}", self.id)?;
        if let Some(product_id) = self.product_id {
            write!(f, " [type {product_id}]")?;
        }
        if let Some(desc) = &self.desc {
            write!(f, " \"{desc}\"")?;
        }
        Ok(())
    }
}

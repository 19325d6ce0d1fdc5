// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Locations of a user and the devices registered there.

use std::fmt;

use crate::device::Device;
use crate::error::Result;
use crate::protocol::{ApiRequest, Transport, endpoint};
use crate::response::{DevicesResponse, LocationRecord};
use crate::session::Session;
use crate::types::{DeviceId, Timezone};

/// Postal address of a location. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    /// First street line.
    pub street1: Option<String>,
    /// Second street line.
    pub street2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Postal code.
    pub zip: Option<String>,
}

/// A location (home, office, ...) owned by a user.
#[derive(Debug)]
pub struct Location<T> {
    session: Session<T>,
    id: u64,
    name: Option<String>,
    timezone: Option<Timezone>,
    address: Address,
    devices: Vec<Device<T>>,
}

impl<T: Transport> Location<T> {
    pub(crate) fn from_record(
        session: Session<T>,
        record: LocationRecord,
        devices: Vec<Device<T>>,
    ) -> Self {
        Self {
            session,
            id: record.id,
            name: record.name,
            timezone: record.timezone,
            address: Address {
                street1: record.addr_street1,
                street2: record.addr_street2,
                city: record.addr_city,
                state: record.state,
                country: record.country,
                zip: record.zip,
            },
            devices,
        }
    }

    /// Fetches the devices registered at a location.
    pub(crate) async fn fetch_devices(
        session: &Session<T>,
        location_id: u64,
    ) -> Result<Vec<Device<T>>> {
        let DevicesResponse { devices } = session
            .call(ApiRequest::get(endpoint::location_devices(location_id)))
            .await?;

        Ok(devices
            .into_iter()
            .map(|record| Device::from_record(session.clone(), record))
            .collect())
    }

    /// Returns the server-assigned id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the time zone.
    #[must_use]
    pub fn timezone(&self) -> Option<&Timezone> {
        self.timezone.as_ref()
    }

    /// Returns the postal address.
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Returns the devices in server order.
    #[must_use]
    pub fn devices(&self) -> &[Device<T>] {
        &self.devices
    }

    /// Finds a device by id.
    #[must_use]
    pub fn device(&self, id: &str) -> Option<&Device<T>> {
        self.devices.iter().find(|d| d.id() == id)
    }

    /// Finds a device by id for modification.
    pub fn device_mut(&mut self, id: &str) -> Option<&mut Device<T>> {
        self.devices.iter_mut().find(|d| d.id() == id)
    }

    /// Reloads the device list.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails; the current devices are kept.
    pub async fn refresh(&mut self) -> Result<()> {
        self.devices = Self::fetch_devices(&self.session, self.id).await?;
        Ok(())
    }

    /// Registers a new device at this location.
    ///
    /// The id is checked before anything is sent. When `desc` is given it is
    /// set as the device nickname right after registration. The device is
    /// added to this location only if every call succeeded.
    ///
    /// # Errors
    ///
    /// - [`Error::Value`](crate::Error::Value) if `device_id` contains a space
    /// - [`Error::Api`](crate::Error::Api) if the cloud refuses the
    ///   registration or the nickname
    pub async fn register_device(
        &mut self,
        device_id: &str,
        product_id: u32,
        desc: Option<&str>,
    ) -> Result<&mut Device<T>> {
        let id = DeviceId::new(device_id)?;

        self.session
            .execute(ApiRequest::post(endpoint::register_device(
                self.id, &id, product_id,
            )))
            .await?;
        tracing::info!(location = self.id, device = %id, product_id, "Device registered");

        let mut device = Device::new(self.session.clone(), id, Some(product_id), None);
        if let Some(desc) = desc {
            device.set_nickname(desc).await?;
        }

        let index = self.devices.len();
        self.devices.push(device);
        Ok(&mut self.devices[index])
    }
}

impl<T> fmt::Display for Location<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Location {} ({})",
            self.name.as_deref().unwrap_or("<unnamed>"),
            self.id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValueError};
    use crate::protocol::{Method, ScriptedTransport};
    use serde_json::json;

    fn location(transport: ScriptedTransport) -> Location<ScriptedTransport> {
        let record: LocationRecord = serde_json::from_value(json!({
            "id": 5,
            "name": "Home",
            "timezone": "US/Pacific",
            "addrStreet1": "1 Main St",
            "city": "Palo Alto"
        }))
        .unwrap();
        Location::from_record(Session::scripted(transport), record, Vec::new())
    }

    #[test]
    fn hydrated_fields() {
        let location = location(ScriptedTransport::new());

        assert_eq!(location.id(), 5);
        assert_eq!(location.name(), Some("Home"));
        assert_eq!(location.timezone().map(Timezone::id), Some("US/Pacific"));
        assert_eq!(location.address().street1.as_deref(), Some("1 Main St"));
        assert_eq!(location.address().city.as_deref(), Some("Palo Alto"));
        assert_eq!(location.address().zip, None);
        assert_eq!(location.to_string(), "Location Home (5)");
    }

    #[tokio::test]
    async fn id_with_space_is_rejected_without_network() {
        let mut location = location(ScriptedTransport::new());

        for bad in ["d 1", " ", "lead ", " trail"] {
            let err = location.register_device(bad, 7, None).await.unwrap_err();
            assert!(matches!(err, Error::Value(ValueError::InvalidIdentifier(ref id)) if id == bad));
        }

        assert_eq!(location.session.transport().request_count(), 0);
        assert!(location.devices().is_empty());
    }

    #[tokio::test]
    async fn register_without_description() {
        let transport = ScriptedTransport::new().with_json(json!({"resultCode": 0}));
        let mut location = location(transport);

        let device = location.register_device("d1", 2012, None).await.unwrap();
        assert_eq!(device.id(), "d1");
        assert_eq!(device.product_id(), Some(2012));
        assert_eq!(device.desc(), None);

        let requests = location.session.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method(), Method::Post);
        assert_eq!(
            requests[0].path(),
            "/cloud/json/locations/5/devices/d1?productId=2012"
        );
        assert_eq!(location.devices().len(), 1);
    }

    #[tokio::test]
    async fn register_with_description_sets_nickname() {
        let transport = ScriptedTransport::new()
            .with_json(json!({"resultCode": 0}))
            .with_json(json!({"resultCode": 0}));
        let mut location = location(transport);

        let device = location
            .register_device("d2", 7, Some("Porch"))
            .await
            .unwrap();
        assert_eq!(device.desc(), Some("Porch"));

        let requests = location.session.transport().requests();
        assert_eq!(requests[1].method(), Method::Put);
        assert_eq!(requests[1].path(), "/cloud/json/devices/d2");
    }

    #[tokio::test]
    async fn refused_registration_adds_nothing() {
        let transport = ScriptedTransport::new().with_json(json!({"resultCode": 13}));
        let mut location = location(transport);

        let err = location.register_device("d1", 7, None).await.unwrap_err();

        assert_eq!(err.result_code(), Some(13));
        assert!(location.devices().is_empty());
    }

    #[tokio::test]
    async fn failed_nickname_adds_nothing() {
        let transport = ScriptedTransport::new()
            .with_json(json!({"resultCode": 0}))
            .with_json(json!({"resultCode": 7}));
        let mut location = location(transport);

        assert!(location.register_device("d1", 7, Some("x")).await.is_err());
        assert!(location.devices().is_empty());
    }

    #[tokio::test]
    async fn refresh_replaces_devices() {
        let transport = ScriptedTransport::new()
            .with_json(json!({"resultCode": 0, "devices": [{"id": "a"}, {"id": "b", "type": 3}]}))
            .with_json(json!({"resultCode": 1}));
        let mut location = location(transport);

        location.refresh().await.unwrap();
        assert_eq!(location.devices().len(), 2);
        assert_eq!(location.device("b").and_then(Device::product_id), Some(3));
        assert_eq!(
            location.session.transport().requests()[0].path(),
            "/cloud/json/locations/5/devices"
        );

        assert!(location.refresh().await.is_err());
        assert_eq!(location.devices().len(), 2);
    }

    #[tokio::test]
    async fn device_mut_finds_by_id() {
        let transport = ScriptedTransport::new()
            .with_json(json!({"resultCode": 0, "devices": [{"id": "a"}]}));
        let mut location = location(transport);
        location.refresh().await.unwrap();

        assert!(location.device_mut("a").is_some());
        assert!(location.device_mut("z").is_none());
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The authenticated user and its location/device graph.

use std::fmt;

use crate::device::Device;
use crate::error::Result;
use crate::location::Location;
use crate::protocol::{ApiRequest, Transport, endpoint};
use crate::response::{
    LocationsResponse, ParameterReport, ParametersResponse, UserRecord, UserResponse,
};
use crate::session::Session;

/// An authenticated user with its locations and their devices.
///
/// Obtained from [`Cloud::login`](crate::Cloud::login) or
/// [`Cloud::create_account`](crate::Cloud::create_account), fully hydrated.
#[derive(Debug)]
pub struct User<T> {
    session: Session<T>,
    profile: UserRecord,
    locations: Vec<Location<T>>,
}

impl<T: Transport> User<T> {
    /// Hydrates a user for a fresh session.
    pub(crate) async fn connect(session: Session<T>) -> Result<Self> {
        let (profile, locations) = Self::fetch(&session).await?;
        tracing::info!(user = profile.id, locations = locations.len(), "Session established");

        Ok(Self {
            session,
            profile,
            locations,
        })
    }

    /// Loads the user, its locations and each location's devices, in order.
    async fn fetch(session: &Session<T>) -> Result<(UserRecord, Vec<Location<T>>)> {
        let UserResponse { user } = session.call(ApiRequest::get(endpoint::user())).await?;
        let LocationsResponse { locations } =
            session.call(ApiRequest::get(endpoint::locations())).await?;

        let mut hydrated = Vec::with_capacity(locations.len());
        for record in locations {
            let devices = Location::fetch_devices(session, record.id).await?;
            hydrated.push(Location::from_record(session.clone(), record, devices));
        }

        Ok((user, hydrated))
    }

    /// Reloads the whole graph.
    ///
    /// The current graph is replaced only once every call succeeded.
    ///
    /// # Errors
    ///
    /// Returns the first failing call's error; the user is left unchanged.
    pub async fn refresh(&mut self) -> Result<()> {
        let (profile, locations) = Self::fetch(&self.session).await?;
        self.profile = profile;
        self.locations = locations;
        Ok(())
    }

    /// Ends the session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`](crate::Error::Api) if the cloud refuses the
    /// logout.
    pub async fn logout(self) -> Result<()> {
        self.session
            .execute(ApiRequest::get(endpoint::logout()))
            .await?;
        tracing::info!(user = self.profile.id, "Logged out");
        Ok(())
    }

    // ========== Parameters ==========

    /// Queries the latest parameter values of every device of the account
    /// in one call.
    ///
    /// Returns one report per device, in server order. Cached parameters are
    /// not modified; see [`User::apply_parameters`].
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn populate_parameters(&self) -> Result<Vec<ParameterReport>> {
        let ParametersResponse { devices } = self
            .session
            .call(ApiRequest::get(endpoint::parameters()))
            .await?;
        Ok(devices)
    }

    /// Stores reports in the caches of the devices they name.
    ///
    /// Reports without a device id, or naming a device this user does not
    /// have, are skipped. Returns `true` if any cached parameter changed.
    pub fn apply_parameters(&mut self, reports: &[ParameterReport]) -> bool {
        let mut changed = false;
        for report in reports {
            let Some(id) = report.device_id.as_deref() else {
                continue;
            };
            match self.device_mut(id) {
                Some(device) => changed |= device.apply_parameters(report),
                None => tracing::debug!(device = id, "Skipping report for unknown device"),
            }
        }
        changed
    }

    // ========== Profile ==========

    /// Returns the session.
    #[must_use]
    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    /// Returns the session key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.session.key()
    }

    /// Returns the user id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.profile.id
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.profile.user_name.as_deref()
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.profile.first_name.as_deref()
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.profile.last_name.as_deref()
    }

    /// Returns the contact email.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.profile.email.as_deref()
    }

    // ========== Lookup ==========

    /// Returns the locations in server order.
    #[must_use]
    pub fn locations(&self) -> &[Location<T>] {
        &self.locations
    }

    /// Finds a location by id.
    #[must_use]
    pub fn location(&self, id: u64) -> Option<&Location<T>> {
        self.locations.iter().find(|l| l.id() == id)
    }

    /// Finds a location by id for modification.
    pub fn location_mut(&mut self, id: u64) -> Option<&mut Location<T>> {
        self.locations.iter_mut().find(|l| l.id() == id)
    }

    /// Iterates over every device of every location.
    pub fn devices(&self) -> impl Iterator<Item = &Device<T>> {
        self.locations.iter().flat_map(Location::devices)
    }

    /// Iterates over the devices of one product type.
    pub fn devices_by_product_id(&self, product_id: u32) -> impl Iterator<Item = &Device<T>> {
        self.devices()
            .filter(move |d| d.product_id() == Some(product_id))
    }

    /// Finds a device by id across all locations.
    #[must_use]
    pub fn device(&self, id: &str) -> Option<&Device<T>> {
        self.locations.iter().find_map(|l| l.device(id))
    }

    /// Finds a device by id across all locations, for modification.
    pub fn device_mut(&mut self, id: &str) -> Option<&mut Device<T>> {
        self.locations.iter_mut().find_map(|l| l.device_mut(id))
    }
}

impl<T: Transport> fmt::Display for User<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "User {} ({})",
            self.profile.user_name.as_deref().unwrap_or("<unknown>"),
            self.profile.id
        )?;
        for location in &self.locations {
            writeln!(f, "  + {location}")?;
            for device in location.devices() {
                writeln!(f, "    - {device}")?;
                for parameter in device.parameters() {
                    writeln!(f, "      * {parameter}")?;
                }
            }
        }
        Ok(())
    }
}

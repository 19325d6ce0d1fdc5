// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account creation bodies.

use std::fmt;

use serde::Serialize;

use crate::types::Timezone;

/// User fields sent when creating an account.
///
/// # Examples
///
/// ```
/// use presence_lib::command::NewAccount;
///
/// let account = NewAccount::new("u@example.com", "secret", "MyApp", "u@example.com")
///     .with_first_name("Ada");
/// assert_eq!(account.username(), "u@example.com");
/// assert!(!format!("{account:?}").contains("secret"));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewAccount {
    username: String,
    password: String,
    #[serde(rename = "appName")]
    app_name: String,
    email: String,
    #[serde(rename = "firstname", skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(rename = "lastname", skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
}

impl NewAccount {
    /// Creates account fields with the required values.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        app_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            app_name: app_name.into(),
            email: email.into(),
            first_name: None,
            last_name: None,
        }
    }

    /// Sets the first name.
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Sets the last name.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the application name registered with the account.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns the contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("app_name", &self.app_name)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// Location fields sent when creating an account.
///
/// Only the name is required. Unset fields are left out of the body.
///
/// # Examples
///
/// ```
/// use presence_lib::command::NewLocation;
/// use presence_lib::types::Timezone;
///
/// let home = NewLocation::new("Home")
///     .with_timezone(Timezone::new("US/Pacific"))
///     .with_city("Palo Alto")
///     .with_zip("94301");
/// assert_eq!(home.name(), "Home");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timezone: Option<Timezone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    addr_street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    addr_street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    addr_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zip: Option<String>,
}

impl NewLocation {
    /// Creates a location with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timezone: None,
            addr_street1: None,
            addr_street2: None,
            addr_city: None,
            state: None,
            country: None,
            zip: None,
        }
    }

    /// Sets the time zone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = Some(timezone);
        self
    }

    /// Sets the street address lines.
    #[must_use]
    pub fn with_street(mut self, line1: impl Into<String>, line2: Option<String>) -> Self {
        self.addr_street1 = Some(line1.into());
        self.addr_street2 = line2;
        self
    }

    /// Sets the city.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.addr_city = Some(city.into());
        self
    }

    /// Sets the state or province.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the postal code.
    #[must_use]
    pub fn with_zip(mut self, zip: impl Into<String>) -> Self {
        self.zip = Some(zip.into());
        self
    }

    /// Returns the location name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Body of `POST /cloud/json/user`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateAccountRequest<'a> {
    pub(crate) user: &'a NewAccount,
    pub(crate) location: &'a NewLocation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn account_body_uses_wire_names_and_omits_unset_fields() {
        let account = NewAccount::new("u@example.com", "pw", "Demo", "u@example.com")
            .with_last_name("Lovelace");

        assert_eq!(
            serde_json::to_value(&account).unwrap(),
            json!({
                "username": "u@example.com",
                "password": "pw",
                "appName": "Demo",
                "email": "u@example.com",
                "lastname": "Lovelace"
            })
        );
    }

    #[test]
    fn location_body_with_bare_name() {
        assert_eq!(
            serde_json::to_value(NewLocation::new("Home")).unwrap(),
            json!({"name": "Home"})
        );
    }

    #[test]
    fn location_body_with_address() {
        let location = NewLocation::new("Home")
            .with_timezone(Timezone::new("US/Pacific").with_offset_minutes(-480))
            .with_street("1 Main St", None)
            .with_city("Palo Alto")
            .with_state("CA")
            .with_country("US")
            .with_zip("94301");

        assert_eq!(
            serde_json::to_value(&location).unwrap(),
            json!({
                "name": "Home",
                "timezone": {"id": "US/Pacific", "offset": -8},
                "addrStreet1": "1 Main St",
                "addrCity": "Palo Alto",
                "state": "CA",
                "country": "US",
                "zip": "94301"
            })
        );
    }

    #[test]
    fn create_account_wraps_user_and_location() {
        let account = NewAccount::new("a", "b", "c", "d");
        let location = NewLocation::new("Home");
        let body = serde_json::to_value(CreateAccountRequest {
            user: &account,
            location: &location,
        })
        .unwrap();

        assert_eq!(body["user"]["appName"], "c");
        assert_eq!(body["location"]["name"], "Home");
    }

    #[test]
    fn debug_hides_password() {
        let account = NewAccount::new("a", "hunter2", "c", "d");
        let debug = format!("{account:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}

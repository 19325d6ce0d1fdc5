// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTPS transport using wiremock.

use presence_lib::protocol::{ApiRequest, HttpClient, HttpConfig, Transport};
use presence_lib::{Cloud, Error, NewAccount, NewLocation, TransportError, User};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok(mut body: serde_json::Value) -> ResponseTemplate {
    body["resultCode"] = json!(0);
    ResponseTemplate::new(200).set_body_json(body)
}

fn cloud(server: &MockServer) -> Cloud<HttpClient> {
    Cloud::http(HttpConfig::new(server.uri())).unwrap()
}

/// Mounts the hydration calls for an account with one location and one plug.
async fn mount_graph(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/cloud/json/user"))
        .and(header("PRESENCE_API_KEY", "K1"))
        .respond_with(ok(json!({"user": {"id": 42, "userName": "u@example.com"}})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cloud/json/locations"))
        .and(header("PRESENCE_API_KEY", "K1"))
        .respond_with(ok(json!({"locations": [
            {"id": 1, "name": "Home", "timezone": {"id": "US/Pacific", "offset": -8}}
        ]})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cloud/json/locations/1/devices"))
        .and(header("PRESENCE_API_KEY", "K1"))
        .respond_with(ok(json!({"devices": [
            {"id": "plug1", "type": 2012, "desc": "Heater"}
        ]})))
        .mount(server)
        .await;
}

async fn login(server: &MockServer) -> User<HttpClient> {
    Mock::given(method("GET"))
        .and(path("/cloud/json/login"))
        .respond_with(ok(json!({"key": "K1"})))
        .mount(server)
        .await;
    mount_graph(server).await;

    cloud(server).login("u@example.com", "pw", None).await.unwrap()
}

// ============================================================================
// HttpClient Tests
// ============================================================================

mod http_client {
    use super::*;

    #[tokio::test]
    async fn sends_method_headers_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/cloud/json/devices/d1"))
            .and(header("PRESENCE_API_KEY", "K1"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({"device": {"desc": "x"}})))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(mock_server.uri()).unwrap();
        let request = ApiRequest::put("/cloud/json/devices/d1")
            .with_api_key("K1")
            .with_json(&json!({"device": {"desc": "x"}}))
            .unwrap();

        let response = client.send(&request).await.unwrap();
        assert_eq!(response.json().unwrap()["resultCode"], 0);
    }

    #[tokio::test]
    async fn error_status_with_envelope_is_passed_through() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"resultCode": 2})))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(mock_server.uri()).unwrap();
        let response = client.send(&ApiRequest::get("/cloud/json/user")).await.unwrap();
        assert_eq!(response.json().unwrap()["resultCode"], 2);
    }

    #[tokio::test]
    async fn error_status_without_envelope_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(mock_server.uri()).unwrap();
        let err = client
            .send(&ApiRequest::get("/cloud/json/user"))
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Status { status: 502, .. }));
    }
}

// ============================================================================
// Session Tests
// ============================================================================

mod session {
    use super::*;

    #[tokio::test]
    async fn login_hydrates_user_graph() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cloud/json/login"))
            .and(query_param("username", "u@example.com"))
            .and(query_param("expiry", "-1"))
            .and(header("PASSWORD", "pw"))
            .respond_with(ok(json!({"key": "K1"})))
            .expect(1)
            .mount(&mock_server)
            .await;
        mount_graph(&mock_server).await;

        let user = cloud(&mock_server)
            .login("u@example.com", "pw", None)
            .await
            .unwrap();

        assert_eq!(user.key(), "K1");
        assert_eq!(user.id(), 42);
        assert_eq!(user.locations().len(), 1);

        let home = user.location(1).unwrap();
        assert_eq!(home.timezone().unwrap().offset_minutes(), Some(-480));
        assert_eq!(home.devices()[0].desc(), Some("Heater"));
    }

    #[tokio::test]
    async fn wrong_password_is_an_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cloud/json/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCode": 10,
                "resultCodeMessage": "Authentication failed"
            })))
            .mount(&mock_server)
            .await;

        let err = cloud(&mock_server)
            .login("u@example.com", "bad", Some(60))
            .await
            .unwrap_err();

        match err {
            Error::Api(api) => {
                assert_eq!(api.code, 10);
                assert_eq!(api.description, "Wrong password");
                assert_eq!(api.message, "Authentication failed");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_a_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let err = cloud(&mock_server).login("u", "pw", None).await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn create_account() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/cloud/json/user"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({
                "user": {
                    "username": "new@example.com",
                    "password": "pw",
                    "appName": "Demo",
                    "email": "new@example.com"
                },
                "location": {"name": "Home", "zip": "94301"}
            })))
            .respond_with(ok(json!({"key": "K1"})))
            .expect(1)
            .mount(&mock_server)
            .await;
        mount_graph(&mock_server).await;

        let user = cloud(&mock_server)
            .create_account(
                &NewAccount::new("new@example.com", "pw", "Demo", "new@example.com"),
                &NewLocation::new("Home").with_zip("94301"),
            )
            .await
            .unwrap();

        assert_eq!(user.devices().count(), 1);
    }

    #[tokio::test]
    async fn logout() {
        let mock_server = MockServer::start().await;
        let user = login(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/cloud/json/logout"))
            .and(header("PRESENCE_API_KEY", "K1"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        user.logout().await.unwrap();
    }
}

// ============================================================================
// Device Tests
// ============================================================================

mod device {
    use super::*;

    #[tokio::test]
    async fn register_device_with_nickname() {
        let mock_server = MockServer::start().await;
        let mut user = login(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/cloud/json/locations/1/devices/plug9"))
            .and(query_param("productId", "2012"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/cloud/json/devices/plug9"))
            .and(body_json(json!({"device": {"desc": "Porch"}})))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let home = user.location_mut(1).unwrap();
        let device = home
            .register_device("plug9", 2012, Some("Porch"))
            .await
            .unwrap();
        assert_eq!(device.desc(), Some("Porch"));

        assert_eq!(user.devices_by_product_id(2012).count(), 2);
    }

    #[tokio::test]
    async fn invalid_device_id_sends_nothing() {
        let mock_server = MockServer::start().await;
        let mut user = login(&mock_server).await;

        Mock::given(method("POST"))
            .respond_with(ok(json!({})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = user
            .location_mut(1)
            .unwrap()
            .register_device("bad id", 2012, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Value(_)));
    }

    #[tokio::test]
    async fn send_command_then_read_back() {
        let mock_server = MockServer::start().await;
        let mut user = login(&mock_server).await;

        Mock::given(method("PUT"))
            .and(path("/cloud/json/devices/plug1/parameters"))
            .and(body_json(json!({"params": [{"name": "outletStatus", "value": "ON"}]})))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cloud/json/devices/plug1/parameters"))
            .and(query_param("name", "outletStatus"))
            .respond_with(ok(json!({
                "deviceId": "plug1",
                "parameters": [{"name": "outletStatus", "value": "ON", "lastUpdateTime": "2013-08-14T10:00:00Z"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let plug = user.device_mut("plug1").unwrap();
        plug.send_command("outletStatus", None, "ON").await.unwrap();
        assert!(plug.parameter("outletStatus", None).is_none());

        let report = plug
            .populate_parameters(Some(&["outletStatus"]))
            .await
            .unwrap();
        plug.apply_parameters(&report);

        let status = plug.parameter("outletStatus", None).unwrap();
        assert_eq!(status.value(), Some("ON"));
        assert!(status.last_update().is_some());
    }

    #[tokio::test]
    async fn offline_device_reports_result_code() {
        let mock_server = MockServer::start().await;
        let user = login(&mock_server).await;

        Mock::given(method("PUT"))
            .and(path("/cloud/json/devices/plug1/parameters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resultCode": 15})))
            .mount(&mock_server)
            .await;

        let err = user
            .device("plug1")
            .unwrap()
            .send_command("outletStatus", None, "OFF")
            .await
            .unwrap_err();
        assert_eq!(err.result_code(), Some(15));
    }

    #[tokio::test]
    async fn refresh_single_device() {
        let mock_server = MockServer::start().await;
        let mut user = login(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/cloud/json/devices/plug1"))
            .respond_with(ok(json!({"device": {"id": "plug1", "type": 2012, "desc": "Radiator"}})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let plug = user.device_mut("plug1").unwrap();
        plug.refresh().await.unwrap();
        assert_eq!(plug.desc(), Some("Radiator"));
    }
}

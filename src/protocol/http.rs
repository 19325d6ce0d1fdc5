// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTPS transport for the Presence cloud.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;

use crate::error::{TransportError, ValueError};
use crate::protocol::{ApiRequest, Method, RawResponse, Transport};

// ============================================================================
// Server - Known cloud hosts
// ============================================================================

/// Known Presence cloud servers.
///
/// # Examples
///
/// ```
/// use presence_lib::protocol::Server;
///
/// let server: Server = "esp".parse().unwrap();
/// assert_eq!(server.host(), "esp.peoplepowerco.com");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Server {
    /// Developer sandbox.
    #[default]
    Developer,
    /// Production platform.
    Esp,
}

impl Server {
    /// Returns the host name of the server.
    #[must_use]
    pub const fn host(&self) -> &'static str {
        match self {
            Self::Developer => "developer.peoplepowerco.com",
            Self::Esp => "esp.peoplepowerco.com",
        }
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Developer => "developer",
            Self::Esp => "esp",
        })
    }
}

impl FromStr for Server {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "developer" | "dev" => Ok(Self::Developer),
            "esp" => Ok(Self::Esp),
            _ => Err(ValueError::UnknownServer(s.to_string())),
        }
    }
}

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for the HTTPS transport.
///
/// Every request goes to one fixed host. HTTPS on port 443 is the default;
/// prefixing the host with `http://` switches to plain HTTP, which is only
/// useful against local test servers.
///
/// # Examples
///
/// ```
/// use presence_lib::protocol::{HttpConfig, Server};
/// use std::time::Duration;
///
/// let config = HttpConfig::for_server(Server::Esp).with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "https://esp.peoplepowerco.com");
///
/// let local = HttpConfig::new("http://127.0.0.1:8080");
/// assert_eq!(local.base_url(), "http://127.0.0.1:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_HTTP_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given host.
    ///
    /// The host may carry an explicit `http://` or `https://` scheme and a
    /// `:port` suffix.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let (use_https, rest) = if let Some(rest) = host.strip_prefix("http://") {
            (false, rest)
        } else if let Some(rest) = host.strip_prefix("https://") {
            (true, rest)
        } else {
            (true, host.as_str())
        };
        let rest = rest.trim_end_matches('/');

        let default_port = if use_https {
            Self::DEFAULT_HTTPS_PORT
        } else {
            Self::DEFAULT_HTTP_PORT
        };
        let (host, port) = match rest.rsplit_once(':') {
            Some((name, port)) => match port.parse() {
                Ok(port) => (name.to_string(), port),
                Err(_) => (rest.to_string(), default_port),
            },
            None => (rest.to_string(), default_port),
        };

        Self {
            host,
            port,
            use_https,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Creates a configuration for one of the known servers.
    #[must_use]
    pub fn for_server(server: Server) -> Self {
        Self::new(server.host())
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is used.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix = if (self.use_https && self.port == Self::DEFAULT_HTTPS_PORT)
            || (!self.use_https && self.port == Self::DEFAULT_HTTP_PORT)
        {
            String::new()
        } else {
            format!(":{}", self.port)
        };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, TransportError> {
        let base_url = self.base_url();

        // One connection per request; nothing is kept idle between calls.
        let client = Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(TransportError::Http)?;

        Ok(HttpClient { base_url, client })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::for_server(Server::default())
    }
}

// ============================================================================
// HttpClient - reqwest based transport
// ============================================================================

/// HTTPS transport sending each [`ApiRequest`] to a fixed host.
///
/// # Examples
///
/// ```no_run
/// use presence_lib::protocol::{ApiRequest, HttpClient, Transport};
///
/// # async fn example() -> presence_lib::Result<()> {
/// let client = HttpClient::new("developer.peoplepowerco.com")?;
/// let response = client.send(&ApiRequest::get("/cloud/json/user")).await?;
/// println!("{} bytes", response.body().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Creates a client for the given host with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, TransportError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Transport for HttpClient {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let url = self.build_url(request.path());

        tracing::debug!(method = %request.method(), path = %request.path(), "Sending HTTP request");

        let method = match request.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                TransportError::ConnectionFailed(e.to_string())
            } else {
                TransportError::Http(e)
            }
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(TransportError::Http)?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Received HTTP response");

        // Error statuses that still carry an envelope are left to the verifier.
        if !status.is_success() && !carries_envelope(&body) {
            return Err(TransportError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(RawResponse::new(body.to_vec()))
    }
}

fn carries_envelope(body: &[u8]) -> bool {
    serde_json::from_slice::<serde_json::Value>(body)
        .is_ok_and(|value| value.get("resultCode").is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = HttpConfig::new("developer.peoplepowerco.com");
        assert_eq!(config.host(), "developer.peoplepowerco.com");
        assert_eq!(config.port(), 443);
        assert!(config.use_https());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_default_is_developer_server() {
        assert_eq!(
            HttpConfig::default().base_url(),
            "https://developer.peoplepowerco.com"
        );
    }

    #[test]
    fn config_plain_http_with_port() {
        let config = HttpConfig::new("http://127.0.0.1:8080");
        assert!(!config.use_https());
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 8080);
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn config_plain_http_default_port() {
        let config = HttpConfig::new("http://localhost/");
        assert_eq!(config.port(), 80);
        assert_eq!(config.base_url(), "http://localhost");
    }

    #[test]
    fn config_custom_https_port() {
        let config = HttpConfig::new("esp.peoplepowerco.com").with_port(8443);
        assert_eq!(config.base_url(), "https://esp.peoplepowerco.com:8443");
    }

    #[test]
    fn config_with_timeout() {
        let config = HttpConfig::default().with_timeout(Duration::from_secs(30));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn server_presets() {
        assert_eq!(Server::Developer.host(), "developer.peoplepowerco.com");
        assert_eq!(
            HttpConfig::for_server(Server::Esp).base_url(),
            "https://esp.peoplepowerco.com"
        );
    }

    #[test]
    fn server_from_str() {
        assert_eq!("developer".parse::<Server>().unwrap(), Server::Developer);
        assert_eq!("ESP".parse::<Server>().unwrap(), Server::Esp);
        assert_eq!(
            "staging".parse::<Server>(),
            Err(ValueError::UnknownServer("staging".to_string()))
        );
    }

    #[test]
    fn client_builds_url_from_path() {
        let client = HttpClient::new("developer.peoplepowerco.com").unwrap();
        assert_eq!(
            client.build_url("/cloud/json/user"),
            "https://developer.peoplepowerco.com/cloud/json/user"
        );
    }

    #[test]
    fn envelope_detection() {
        assert!(carries_envelope(br#"{"resultCode": 2}"#));
        assert!(!carries_envelope(b"<html>Bad Gateway</html>"));
        assert!(!carries_envelope(br#"{"error": "nope"}"#));
    }
}

// Shared device HTTP client
//
// Wraps `reqwest::Client` with device URL construction, optional Basic
// auth, and response classification. Both generation clients delegate
// every request here and only differ in paths and target schemas.

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::auth::DeviceAddress;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client bound to one device endpoint.
///
/// Every call is a single GET: no retry, no redirect handling beyond the
/// reqwest defaults, no connection reuse guarantees.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    address: DeviceAddress,
}

impl DeviceClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(address: DeviceAddress, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, address })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, address: DeviceAddress) -> Self {
        Self { http, address }
    }

    /// The device this client talks to.
    pub fn address(&self) -> &DeviceAddress {
        &self.address
    }

    /// GET `http://<host>/<path>?<query>` and decode the body into `T`.
    ///
    /// Basic auth is attached only when the address carries credentials.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        let url = self.address.endpoint(path);
        debug!("GET {url} params={query:?}");

        let mut builder = self.http.get(&url).query(query);
        if let Some(creds) = self.address.credentials() {
            builder = builder.basic_auth(creds.username(), Some(creds.password().expose_secret()));
        }

        let resp = builder.send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let url = resp.url().to_string();
        let body = resp.text().await?;
        trace!(%url, %status, "body: {body}");

        if !status.is_success() {
            return Err(Error::HttpStatus {
                url,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Value of the `turn` query parameter on the relay endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    On,
    Off,
}

impl Turn {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

// Generation 1 endpoints
//
// Thin typed wrappers over `DeviceClient::get`; no postcondition checks
// happen here, callers get exactly what the device echoed.

use tracing::debug;

use crate::auth::DeviceAddress;
use crate::client::{DeviceClient, Turn};
use crate::error::Error;
use crate::gen1::models::{DeviceInfo, DeviceStatus, Relay};
use crate::transport::TransportConfig;

/// Client for legacy REST firmware.
#[derive(Debug, Clone)]
pub struct Gen1Client {
    inner: DeviceClient,
}

impl Gen1Client {
    pub fn new(address: DeviceAddress, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            inner: DeviceClient::new(address, transport)?,
        })
    }

    /// Wrap an existing `DeviceClient`.
    pub fn from_client(inner: DeviceClient) -> Self {
        Self { inner }
    }

    pub fn address(&self) -> &DeviceAddress {
        self.inner.address()
    }

    /// Device identity.
    ///
    /// `GET /shelly`
    pub async fn info(&self) -> Result<DeviceInfo, Error> {
        self.inner.get("shelly", &[]).await
    }

    /// Full status snapshot.
    ///
    /// `GET /status`
    pub async fn status(&self) -> Result<DeviceStatus, Error> {
        self.inner.get("status", &[]).await
    }

    /// Switch relay 0 and return the state the device echoes back.
    ///
    /// `GET /relay/0?turn=on|off`
    pub async fn set_relay(&self, turn: Turn) -> Result<Relay, Error> {
        debug!(turn = turn.as_str(), "switching relay");
        self.inner.get("relay/0", &[("turn", turn.as_str())]).await
    }
}

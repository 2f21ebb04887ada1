// Generation 2 endpoints

use tracing::debug;

use crate::auth::DeviceAddress;
use crate::client::{DeviceClient, Turn};
use crate::error::Error;
use crate::gen2::models::{DeviceInfo, DeviceStatus, SwitchState};
use crate::transport::TransportConfig;

/// Client for RPC-style firmware.
#[derive(Debug, Clone)]
pub struct Gen2Client {
    inner: DeviceClient,
}

impl Gen2Client {
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

    /// Status of every component (`sys`, `wifi`, `switch:0`, ...).
    ///
    /// `GET /rpc/Shelly.GetStatus`
    pub async fn status(&self) -> Result<DeviceStatus, Error> {
        self.inner.get("rpc/Shelly.GetStatus", &[]).await
    }

    /// Switch output 0 through the legacy-compatible relay endpoint.
    ///
    /// `GET /relay/0?turn=on|off`
    pub async fn set_relay(&self, turn: Turn) -> Result<SwitchState, Error> {
        debug!(turn = turn.as_str(), "switching output");
        self.inner.get("relay/0", &[("turn", turn.as_str())]).await
    }
}

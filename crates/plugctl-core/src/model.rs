// ── Normalized device model ──
//
// Generation-independent view of a plug. Both wire schemas are folded
// into these types by `convert`; the presentation layer only ever sees
// this shape.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Generation;

/// Relay output state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum RelayState {
    On,
    Off,
}

impl RelayState {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for RelayState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// One energy measurement. Generation 1 only fills power, total and
/// relay; generation 2 fills everything it reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyReading {
    pub power_watt: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    pub total_kwh: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_celsius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relay: Option<RelayState>,
}

/// Everything `info` shows, composed from one identity and one status
/// fetch. The two fetches are independent requests, so the snapshot is
/// not guaranteed to describe a single instant.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub host: String,
    pub generation: Generation,
    pub identity: Identity,
    pub status: SystemSummary,
    pub network: NetworkSummary,
    pub updates: UpdateSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relay: Option<RelaySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meter: Option<EnergyReading>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub model: String,
    pub firmware: String,
    pub mac: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemSummary {
    /// `None` while the device clock is not synced.
    pub time: Option<DateTime<Utc>>,
    pub uptime_secs: u64,
    pub memory_total: u64,
    pub memory_free: u64,
    pub storage_total: u64,
    pub storage_free: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
    pub ip: Option<String>,
    pub ssid: Option<String>,
    /// dBm, absent while the radio is disconnected.
    pub rssi: Option<i32>,
    /// Generation 1 only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<CloudSummary>,
    /// Generation 1 only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mqtt_connected: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CloudSummary {
    pub enabled: bool,
    pub connected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateSummary {
    pub has_update: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelaySummary {
    pub state: RelayState,
    /// Present only while a timer is armed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimerSummary {
    pub started: Option<DateTime<Utc>>,
    pub duration_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_secs: Option<u64>,
}

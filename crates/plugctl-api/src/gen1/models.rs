// Generation 1 (legacy REST) response types
//
// Mirrors the JSON returned by `/shelly`, `/status` and `/relay/0`.
// Fields use container-level `#[serde(default)]` because firmware
// versions differ in which keys they emit.

use serde::{Deserialize, Serialize};

// ── Identity ─────────────────────────────────────────────────────────

/// Response of `GET /shelly`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    /// Model identifier, e.g. `SHPLG-S`.
    #[serde(rename = "type")]
    pub device_type: String,
    pub mac: String,
    /// Whether HTTP requests require authentication.
    pub auth: bool,
    /// Current firmware version.
    pub fw: String,
    /// 1 if the device identifies itself by its full MAC address.
    pub longid: u8,
}

// ── Status ───────────────────────────────────────────────────────────

/// Response of `GET /status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceStatus {
    #[serde(rename = "wifi_sta")]
    pub wifi: WifiStatus,
    pub cloud: CloudStatus,
    pub mqtt: MqttStatus,
    /// Local time, `HH:MM`.
    pub time: String,
    /// Unix timestamp if synced, 0 otherwise.
    pub unixtime: i64,
    /// Cloud serial number.
    pub serial: i64,
    pub mac: String,
    pub update: UpdateStatus,
    pub fs: FileSystemStatus,
    /// Seconds since boot.
    pub uptime: u64,
    /// One entry per output channel.
    pub relays: Vec<Relay>,
    /// One entry per output channel.
    pub meters: Vec<Meter>,
    pub ram_total: u64,
    pub ram_free: u64,
    pub fs_size: u64,
    pub fs_free: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiStatus {
    pub connected: bool,
    pub ssid: String,
    pub ip: String,
    pub rssi: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudStatus {
    pub enabled: bool,
    pub connected: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttStatus {
    pub connected: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateStatus {
    pub status: String,
    pub has_update: bool,
    pub new_version: String,
    pub old_version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSystemStatus {
    pub size: u64,
    pub free: u64,
}

// ── Channels ─────────────────────────────────────────────────────────

/// Relay state, as found in `relays[]` and echoed by `GET /relay/0`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Relay {
    pub ison: bool,
    pub has_timer: bool,
    /// Unix timestamp of timer start.
    pub timer_started: i64,
    /// Seconds.
    pub timer_duration: u64,
    /// Seconds.
    pub timer_remaining: u64,
    pub overpower: bool,
    /// What caused the last state change (`http`, `input`, `timer`, ...).
    pub source: String,
}

/// Power meter reading from `meters[]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meter {
    /// Instantaneous power in watts.
    pub power: f64,
    /// Overpower threshold.
    pub overpower: f64,
    pub is_valid: bool,
    pub timestamp: i64,
    /// Energy counters for the last three whole minutes, in watt-minutes.
    pub counters: Vec<f64>,
    /// Cumulative energy in watt-minutes.
    pub total: u64,
}

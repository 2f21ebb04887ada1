// Generation 2 (RPC-style) response types
//
// Mirrors the JSON returned by `/shelly`, `/rpc/Shelly.GetStatus` and the
// legacy-compatible `/relay/0`. Nested components are optional because a
// device may expose zero switch channels, and battery devices omit several
// system fields.

use serde::{Deserialize, Deserializer, Serialize};

/// Reads a JSON `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Identity ─────────────────────────────────────────────────────────

/// Response of `GET /shelly`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    pub id: String,
    pub mac: String,
    pub model: String,
    /// Hardware generation.
    #[serde(rename = "gen")]
    pub generation: u8,
    pub fw_id: String,
    /// Firmware version.
    pub ver: String,
    /// Application name.
    pub app: String,
    /// Only present on multi-profile devices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub auth_en: bool,
    /// `null` when authentication is disabled.
    pub auth_domain: Option<String>,
    /// Only reported when `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discoverable: Option<bool>,
    // Provisioning fields, only returned with `ident=true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fw_sbits: Option<String>,
}

// ── Status ───────────────────────────────────────────────────────────

/// Response of `GET /rpc/Shelly.GetStatus`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceStatus {
    #[serde(rename = "sys")]
    pub system: Option<SystemStatus>,
    #[serde(rename = "switch:0")]
    pub switch: Option<SwitchStatus>,
    pub wifi: Option<WifiStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    pub mac: String,
    pub restart_required: bool,
    /// `HH:MM` local time, `null` until synced.
    pub time: Option<String>,
    /// `null` until synced.
    pub unixtime: Option<i64>,
    pub last_sync_ts: Option<i64>,
    /// Seconds since boot.
    #[serde(deserialize_with = "null_as_default")]
    pub uptime: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub ram_size: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub ram_free: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub fs_size: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub fs_free: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub cfg_rev: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub kvs_rev: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_rev: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_rev: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knx_rev: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub btrelay_rev: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bthc_rev: Option<u64>,
    pub available_updates: AvailableUpdates,
    /// Battery devices only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wakeup_reason: Option<WakeupReason>,
    /// Battery devices only, seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wakeup_period: Option<u64>,
    /// Offset from UTC in seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub utc_offset: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<UpdateInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stable: Option<UpdateInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateInfo {
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WakeupReason {
    /// `poweron`, `software_restart`, `deepsleep_wake`, `internal`, `unknown`
    pub boot: String,
    /// `button`, `usb`, `periodic`, `status_update`, `alarm`, ...
    pub cause: String,
}

// ── Switch ───────────────────────────────────────────────────────────

/// Full status of the `switch:0` component: relay plus metering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchStatus {
    pub id: u32,
    pub source: String,
    pub output: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_started_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_duration: Option<f64>,
    /// Active power, watts.
    #[serde(deserialize_with = "null_as_default")]
    pub apower: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub voltage: f64,
    /// Amperes.
    #[serde(deserialize_with = "null_as_default")]
    pub current: f64,
    /// Power factor.
    #[serde(deserialize_with = "null_as_default")]
    pub pf: f64,
    /// Hz.
    #[serde(deserialize_with = "null_as_default")]
    pub freq: f64,
    pub aenergy: Option<ActiveEnergy>,
    pub ret_aenergy: Option<ReturnedEnergy>,
    pub temperature: Option<Temperature>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Active energy counter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveEnergy {
    /// Watt-hours.
    pub total: f64,
    /// Milliwatt-hours for the last three complete minutes.
    pub by_minute: Vec<f64>,
    /// Start of the current minute, unix seconds.
    pub minute_ts: i64,
}

/// Returned (reverse-flow) active energy counter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnedEnergy {
    /// Watt-hours.
    pub total: f64,
    pub by_minute: Vec<f64>,
    pub minute_ts: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Temperature {
    #[serde(rename = "tC")]
    pub celsius: Option<f64>,
    #[serde(rename = "tF")]
    pub fahrenheit: Option<f64>,
}

/// Echo of `GET /relay/0?turn=...`.
///
/// The legacy-compatible endpoint reports `ison`; RPC firmware names the
/// same flag `output`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchState {
    #[serde(alias = "output")]
    pub ison: bool,
    pub has_timer: bool,
    pub timer_started_at: i64,
    pub timer_duration: f64,
    pub timer_remaining: f64,
    pub overpower: bool,
    pub source: String,
}

// ── WiFi ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiStatus {
    /// `null` while disconnected.
    pub sta_ip: Option<String>,
    /// `disconnected`, `connecting`, `connected`, `got ip`
    pub status: String,
    pub ssid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bssid: Option<String>,
    /// dBm, `null` while disconnected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ap_client_count: Option<u32>,
}

/// Body of the `WiFi.Scan` RPC. Schema only; no client call issues it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiScanResult {
    pub results: Vec<WifiNetwork>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WifiNetwork {
    /// `null` for hidden networks.
    pub ssid: Option<String>,
    pub bssid: String,
    /// Authentication method, 0-5.
    pub auth: u8,
    pub channel: u32,
    /// dBm.
    pub rssi: i32,
}

// ── Wire-to-model conversions ──
//
// Folds each generation's raw `plugctl_api` response types into the
// normalized `model` types. Energy conversions own the precondition
// checks: a status without the sub-records a reading needs is an error,
// never a zero-filled default.

use chrono::{DateTime, Utc};

use plugctl_api::{gen1, gen2};

use crate::config::Generation;
use crate::error::CoreError;
use crate::model::{
    CloudSummary, DeviceReport, EnergyReading, Identity, NetworkSummary, RelayState, RelaySummary,
    SystemSummary, TimerSummary, UpdateSummary,
};

/// Generation 1 meters count energy in watt-minutes.
pub const KWH_PER_WATT_MINUTE: f64 = 1.0 / 60_000.0;

/// Generation 2 meters count energy in watt-hours.
pub const WATT_HOURS_PER_KWH: f64 = 1000.0;

// ── Helpers ────────────────────────────────────────────────────────

/// Epoch seconds to `DateTime<Utc>`. The devices report 0 before the
/// clock is synced.
fn epoch_to_datetime(epoch: i64) -> Option<DateTime<Utc>> {
    if epoch == 0 {
        return None;
    }
    DateTime::from_timestamp(epoch, 0)
}

fn non_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_owned())
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn gen1_total_kwh(meter: &gen1::models::Meter) -> f64 {
    meter.total as f64 * KWH_PER_WATT_MINUTE
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn whole_seconds(secs: f64) -> u64 {
    secs.max(0.0).round() as u64
}

// ── Generation 1 ───────────────────────────────────────────────────

/// Energy reading from a generation 1 status.
///
/// Requires exactly one meter. A relay list, when present, must pair up
/// with the meters; a status that reports no relays yields a reading
/// without relay state.
pub fn gen1_energy(status: &gen1::models::DeviceStatus) -> Result<EnergyReading, CoreError> {
    let [meter] = status.meters.as_slice() else {
        return Err(CoreError::precondition("no meter information received"));
    };

    let relay = match status.relays.as_slice() {
        [] => None,
        [relay] => Some(RelayState::from(relay.ison)),
        _ => return Err(CoreError::precondition("invalid relay information received")),
    };

    Ok(EnergyReading {
        power_watt: meter.power,
        voltage: None,
        current: None,
        frequency: None,
        total_kwh: gen1_total_kwh(meter),
        internal_celsius: None,
        relay,
    })
}

pub fn gen1_report(
    host: &str,
    info: &gen1::models::DeviceInfo,
    status: &gen1::models::DeviceStatus,
) -> DeviceReport {
    let relay = match status.relays.as_slice() {
        [relay] => Some(RelaySummary {
            state: RelayState::from(relay.ison),
            timer: relay.has_timer.then(|| TimerSummary {
                started: epoch_to_datetime(relay.timer_started),
                duration_secs: relay.timer_duration,
                remaining_secs: Some(relay.timer_remaining),
            }),
        }),
        _ => None,
    };

    let meter = match status.meters.as_slice() {
        [meter] => Some(EnergyReading {
            power_watt: meter.power,
            voltage: None,
            current: None,
            frequency: None,
            total_kwh: gen1_total_kwh(meter),
            internal_celsius: None,
            relay: relay.as_ref().map(|r| r.state),
        }),
        _ => None,
    };

    DeviceReport {
        host: host.to_owned(),
        generation: Generation::Gen1,
        identity: Identity {
            model: info.device_type.clone(),
            firmware: info.fw.clone(),
            mac: status.mac.clone(),
        },
        status: SystemSummary {
            time: epoch_to_datetime(status.unixtime),
            uptime_secs: status.uptime,
            memory_total: status.ram_total,
            memory_free: status.ram_free,
            storage_total: status.fs_size,
            storage_free: status.fs_free,
        },
        network: NetworkSummary {
            ip: non_empty(&status.wifi.ip),
            ssid: non_empty(&status.wifi.ssid),
            rssi: Some(status.wifi.rssi),
            cloud: Some(CloudSummary {
                enabled: status.cloud.enabled,
                connected: status.cloud.connected,
            }),
            mqtt_connected: Some(status.mqtt.connected),
        },
        updates: UpdateSummary {
            has_update: status.update.has_update,
            latest: non_empty(&status.update.new_version),
        },
        relay,
        meter,
    }
}

// ── Generation 2 ───────────────────────────────────────────────────

fn switch_energy(switch: &gen2::models::SwitchStatus) -> Option<EnergyReading> {
    let energy = switch.aenergy.as_ref()?;
    Some(EnergyReading {
        power_watt: switch.apower,
        voltage: Some(switch.voltage),
        current: Some(switch.current),
        frequency: Some(switch.freq),
        total_kwh: energy.total / WATT_HOURS_PER_KWH,
        internal_celsius: switch.temperature.as_ref().and_then(|t| t.celsius),
        relay: Some(RelayState::from(switch.output)),
    })
}

/// Energy reading from a generation 2 status.
///
/// Requires the `switch:0` component and its active energy counter.
pub fn gen2_energy(status: &gen2::models::DeviceStatus) -> Result<EnergyReading, CoreError> {
    let Some(switch) = status.switch.as_ref() else {
        return Err(CoreError::precondition("no switch information received"));
    };
    switch_energy(switch).ok_or_else(|| CoreError::precondition("no meter information received"))
}

pub fn gen2_report(
    host: &str,
    info: &gen2::models::DeviceInfo,
    status: &gen2::models::DeviceStatus,
) -> DeviceReport {
    let sys = status.system.clone().unwrap_or_default();
    let wifi = status.wifi.clone().unwrap_or_default();
    let stable = sys.available_updates.stable.as_ref();

    let relay = status.switch.as_ref().map(|switch| RelaySummary {
        state: RelayState::from(switch.output),
        timer: switch.timer_started_at.map(|started| TimerSummary {
            started: epoch_to_datetime(started),
            duration_secs: switch.timer_duration.map_or(0, whole_seconds),
            remaining_secs: None,
        }),
    });

    DeviceReport {
        host: host.to_owned(),
        generation: Generation::Gen2,
        identity: Identity {
            model: info.model.clone(),
            firmware: info.ver.clone(),
            mac: sys.mac.clone(),
        },
        status: SystemSummary {
            time: sys.unixtime.and_then(epoch_to_datetime),
            uptime_secs: sys.uptime,
            memory_total: sys.ram_size,
            memory_free: sys.ram_free,
            storage_total: sys.fs_size,
            storage_free: sys.fs_free,
        },
        network: NetworkSummary {
            ip: wifi.sta_ip,
            ssid: wifi.ssid,
            rssi: wifi.rssi,
            cloud: None,
            mqtt_connected: None,
        },
        updates: UpdateSummary {
            has_update: stable.is_some(),
            latest: stable.map(|u| u.version.clone()),
        },
        relay,
        meter: status.switch.as_ref().and_then(switch_energy),
    }
}

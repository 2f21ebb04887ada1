// ── Presentation layer ──
//
// Turns normalized model values into finished output strings. Nothing
// here performs I/O: callers write the returned string to their sink
// only once rendering has fully succeeded.

use std::collections::BTreeMap;
use std::fmt::{Display, Write as _};
use std::time::Duration;

use bytesize::ByteSize;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::config::{Generation, OutputFormat, RenderOptions};
use crate::error::CoreError;
use crate::model::{DeviceReport, EnergyReading};

const LABEL_WIDTH: usize = 20;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

// ── Entry points ────────────────────────────────────────────────────

/// Fails for formats the info report cannot be rendered in.
pub fn ensure_info_format(format: OutputFormat) -> Result<(), CoreError> {
    match format {
        OutputFormat::Text | OutputFormat::Json => Ok(()),
        OutputFormat::Metrics => Err(CoreError::Unsupported {
            operation: "metrics output for device info".into(),
        }),
    }
}

pub fn render_info(report: &DeviceReport, options: &RenderOptions) -> Result<String, CoreError> {
    ensure_info_format(options.format)?;
    match options.format {
        OutputFormat::Json => to_json(report),
        _ => Ok(info_text(report)),
    }
}

/// `generation` picks the metrics key for the energy counter: gen1
/// reports `today_energy_kwh`, gen2 `total_energy_kwh`.
pub fn render_energy(
    reading: &EnergyReading,
    generation: Generation,
    options: &RenderOptions,
) -> Result<String, CoreError> {
    match options.format {
        OutputFormat::Text => Ok(energy_text(reading)),
        OutputFormat::Json => to_json(&EnergyJson::from(reading)),
        OutputFormat::Metrics => to_json(&MetricsEnvelope {
            labels: &options.labels,
            metrics: Metrics::new(reading, generation),
        }),
    }
}

// ── Text ────────────────────────────────────────────────────────────

struct TextReport {
    out: String,
}

impl TextReport {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn heading(&mut self, title: &str) {
        let _ = writeln!(self.out, "{title}\n");
    }

    fn section(&mut self, title: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.heading(title);
    }

    fn field(&mut self, label: &str, value: impl Display) {
        let _ = writeln!(self.out, "{label:>LABEL_WIDTH$}: {value}");
    }

    fn finish(self) -> String {
        self.out
    }
}

fn bytes(n: u64) -> String {
    ByteSize::b(n).to_string_as(true)
}

fn duration(secs: u64) -> String {
    humantime::format_duration(Duration::from_secs(secs)).to_string()
}

fn local_time(time: Option<&DateTime<Utc>>) -> String {
    time.map_or_else(
        || "not synced".to_owned(),
        |t| t.with_timezone(&Local).format(TIME_FORMAT).to_string(),
    )
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("n/a")
}

fn meter_fields(report: &mut TextReport, reading: &EnergyReading) {
    report.field("Power", format_args!("{:.2} Watt", reading.power_watt));
    if let Some(v) = reading.voltage {
        report.field("Voltage", format_args!("{v:.2} V"));
    }
    if let Some(a) = reading.current {
        report.field("Current", format_args!("{a:.2} Amp"));
    }
    if let Some(hz) = reading.frequency {
        report.field("Frequency", format_args!("{hz:.2} Hz"));
    }
    report.field(
        "Total Consumption",
        format_args!("{:.2} kWh", reading.total_kwh),
    );
    if let Some(c) = reading.internal_celsius {
        report.field("Internal Temp", format_args!("{c:.2} C"));
    }
}

/// Fixed-layout `info` report.
pub fn info_text(report: &DeviceReport) -> String {
    let mut text = TextReport::new();
    text.heading(&format!("Shelly device information for {}", report.host));

    text.section("Device Information");
    text.field("Device Type", &report.identity.model);
    text.field("Firmware", &report.identity.firmware);
    text.field("MAC Address", &report.identity.mac);

    let status = &report.status;
    text.section("Device Status");
    text.field("Time", local_time(status.time.as_ref()));
    text.field("Uptime", duration(status.uptime_secs));
    text.field("Memory Total", bytes(status.memory_total));
    text.field("Memory Free", bytes(status.memory_free));
    text.field("Storage Total", bytes(status.storage_total));
    text.field("Storage Free", bytes(status.storage_free));

    let network = &report.network;
    text.section("Network Information");
    text.field("IP Address", or_unknown(network.ip.as_deref()));
    text.field("WiFi SSID", or_unknown(network.ssid.as_deref()));
    match network.rssi {
        Some(rssi) => text.field("WiFi Strength", rssi),
        None => text.field("WiFi Strength", "n/a"),
    }
    if let Some(cloud) = network.cloud {
        text.field("Cloud Enabled", cloud.enabled);
        if cloud.enabled {
            text.field("Cloud Connected", cloud.connected);
        }
    }
    if let Some(mqtt) = network.mqtt_connected {
        text.field("MQTT Connected", mqtt);
    }

    text.section("Updates Information");
    text.field("Has Update", report.updates.has_update);
    if let Some(latest) = &report.updates.latest {
        text.field("Latest Available", latest);
    }

    if let Some(relay) = &report.relay {
        text.section("Relay Information");
        text.field("Power Status", relay.state);
        if let Some(timer) = &relay.timer {
            text.field("Timer", true);
            text.field("Started", local_time(timer.started.as_ref()));
            text.field("Duration", duration(timer.duration_secs));
            if let Some(remaining) = timer.remaining_secs {
                text.field("Remaining", duration(remaining));
            }
        }
    }

    if let Some(meter) = &report.meter {
        text.section("Meter Information");
        meter_fields(&mut text, meter);
    }

    text.finish()
}

/// `energy` report in text form.
pub fn energy_text(reading: &EnergyReading) -> String {
    let mut text = TextReport::new();
    text.section("Meter Information");
    if let Some(relay) = reading.relay {
        text.field("Powered On", relay.is_on());
    }
    meter_fields(&mut text, reading);
    text.finish()
}

// ── JSON / metrics ──────────────────────────────────────────────────

fn to_json<T: Serialize>(value: &T) -> Result<String, CoreError> {
    let mut out = serde_json::to_string_pretty(value)
        .map_err(|e| CoreError::Internal(format!("JSON encoding: {e}")))?;
    out.push('\n');
    Ok(out)
}

fn relay_flag(reading: &EnergyReading) -> Option<u8> {
    reading.relay.map(|r| u8::from(r.is_on()))
}

#[derive(Serialize)]
struct EnergyJson {
    power_watt: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    power_volt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    power_ampere: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    power_frequency: Option<f64>,
    power_total_kwh: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    internal_celsius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_on: Option<u8>,
}

impl From<&EnergyReading> for EnergyJson {
    fn from(r: &EnergyReading) -> Self {
        Self {
            power_watt: r.power_watt,
            power_volt: r.voltage,
            power_ampere: r.current,
            power_frequency: r.frequency,
            power_total_kwh: r.total_kwh,
            internal_celsius: r.internal_celsius,
            is_on: relay_flag(r),
        }
    }
}

#[derive(Serialize)]
struct MetricsEnvelope<'a> {
    labels: &'a BTreeMap<String, String>,
    metrics: Metrics,
}

#[derive(Serialize)]
struct Metrics {
    current_power_watt: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_power_volt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_power_ampere: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_power_frequency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    internal_celsius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    today_energy_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_energy_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relay_on: Option<u8>,
}

impl Metrics {
    fn new(r: &EnergyReading, generation: Generation) -> Self {
        let (today_energy_kwh, total_energy_kwh) = match generation {
            Generation::Gen1 => (Some(r.total_kwh), None),
            Generation::Gen2 => (None, Some(r.total_kwh)),
        };
        Self {
            current_power_watt: r.power_watt,
            current_power_volt: r.voltage,
            current_power_ampere: r.current,
            current_power_frequency: r.frequency,
            internal_celsius: r.internal_celsius,
            today_energy_kwh,
            total_energy_kwh,
            relay_on: relay_flag(r),
        }
    }
}

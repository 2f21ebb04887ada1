// ── Runtime plug configuration ──
//
// These types describe *which* device to talk to and *how* to present
// the results. They never touch disk: the binary (or a test) builds a
// `PlugConfig` and `RenderOptions` and hands them in.

use std::collections::BTreeMap;
use std::time::Duration;

use plugctl_api::{DeviceAddress, TransportConfig};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Device API family. Chosen explicitly, never probed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Generation {
    /// Legacy REST firmware (`/status`).
    #[default]
    #[serde(rename = "gen1", alias = "1", alias = "legacy")]
    #[strum(to_string = "gen1", serialize = "1", serialize = "legacy")]
    Gen1,
    /// RPC firmware (`/rpc/Shelly.GetStatus`).
    #[serde(rename = "gen2", alias = "2", alias = "rpc")]
    #[strum(to_string = "gen2", serialize = "2", serialize = "rpc")]
    Gen2,
}

/// Everything needed to construct a [`Plug`](crate::Plug).
#[derive(Debug, Clone)]
pub struct PlugConfig {
    pub address: DeviceAddress,
    pub generation: Generation,
    pub transport: TransportConfig,
}

impl PlugConfig {
    /// Parse `address` and pair it with `generation` and default transport
    /// settings. An address without a host is a configuration error.
    pub fn new(address: &str, generation: Generation) -> Result<Self, CoreError> {
        Ok(Self {
            address: DeviceAddress::parse(address)?,
            generation,
            transport: TransportConfig::default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.with_timeout(timeout);
        self
    }
}

/// Output form for render operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Column-aligned human report.
    #[default]
    Text,
    /// Flat, pretty-printed JSON object.
    Json,
    /// `{"labels": {...}, "metrics": {...}}` envelope.
    Metrics,
}

/// Presentation settings passed to every render call.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Attached verbatim to the metrics envelope; ignored by other formats.
    pub labels: BTreeMap<String, String>,
}

impl RenderOptions {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            labels: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_labels(mut self, labels: impl IntoIterator<Item = (String, String)>) -> Self {
        self.labels.extend(labels);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_parses_aliases() {
        for raw in ["gen1", "GEN1", "1", "legacy"] {
            assert_eq!(raw.parse::<Generation>().ok(), Some(Generation::Gen1), "{raw}");
        }
        for raw in ["gen2", "2", "rpc", "RPC"] {
            assert_eq!(raw.parse::<Generation>().ok(), Some(Generation::Gen2), "{raw}");
        }
        assert!("gen3".parse::<Generation>().is_err());
    }

    #[test]
    fn generation_displays_canonical_name() {
        assert_eq!(Generation::Gen1.to_string(), "gen1");
        assert_eq!(Generation::Gen2.to_string(), "gen2");
    }

    #[test]
    fn empty_address_is_a_configuration_error() {
        let result = PlugConfig::new("  ", Generation::Gen2);
        assert!(matches!(result, Err(CoreError::Configuration { .. })));
    }
}

// ── Uniform plug interface ──
//
// One closed enum over the per-generation clients. The variant is fixed
// at construction from `PlugConfig::generation`; every caller above this
// point is generation-agnostic.

use std::io::Write;

use plugctl_api::{DeviceAddress, Gen1Client, Gen2Client, Turn};
use tracing::debug;

use crate::config::{Generation, PlugConfig, RenderOptions};
use crate::convert;
use crate::error::CoreError;
use crate::model::{DeviceReport, EnergyReading, RelayState};
use crate::render;

/// A connected-on-demand smart plug.
///
/// Each operation issues its own request(s); nothing is cached between
/// calls.
#[derive(Debug, Clone)]
pub enum Plug {
    Gen1(Gen1Client),
    Gen2(Gen2Client),
}

impl Plug {
    /// Build the client for `config.generation`. No request is sent.
    pub fn new(config: &PlugConfig) -> Result<Self, CoreError> {
        let address = config.address.clone();
        let plug = match config.generation {
            Generation::Gen1 => Self::Gen1(Gen1Client::new(address, &config.transport)?),
            Generation::Gen2 => Self::Gen2(Gen2Client::new(address, &config.transport)?),
        };
        debug!(address = %config.address, generation = %config.generation, "plug client ready");
        Ok(plug)
    }

    pub fn generation(&self) -> Generation {
        match self {
            Self::Gen1(_) => Generation::Gen1,
            Self::Gen2(_) => Generation::Gen2,
        }
    }

    pub fn address(&self) -> &DeviceAddress {
        match self {
            Self::Gen1(c) => c.address(),
            Self::Gen2(c) => c.address(),
        }
    }

    // ── Control ──────────────────────────────────────────────────────

    /// Switch the relay on. Fails if the device echoes any other state.
    pub async fn turn_on(&self) -> Result<RelayState, CoreError> {
        self.switch(RelayState::On).await
    }

    /// Switch the relay off. Fails if the device echoes any other state.
    pub async fn turn_off(&self) -> Result<RelayState, CoreError> {
        self.switch(RelayState::Off).await
    }

    async fn switch(&self, target: RelayState) -> Result<RelayState, CoreError> {
        let turn = match target {
            RelayState::On => Turn::On,
            RelayState::Off => Turn::Off,
        };

        let echoed = match self {
            Self::Gen1(c) => c.set_relay(turn).await?.ison,
            Self::Gen2(c) => c.set_relay(turn).await?.ison,
        };
        let reported = RelayState::from(echoed);

        if reported != target {
            return Err(CoreError::Postcondition {
                expected: target,
                reported,
            });
        }
        Ok(reported)
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Identity plus status, as two sequential requests.
    pub async fn report(&self) -> Result<DeviceReport, CoreError> {
        let host = self.address().to_string();
        match self {
            Self::Gen1(c) => {
                let info = c.info().await?;
                let status = c.status().await?;
                Ok(convert::gen1_report(&host, &info, &status))
            }
            Self::Gen2(c) => {
                let info = c.info().await?;
                let status = c.status().await?;
                Ok(convert::gen2_report(&host, &info, &status))
            }
        }
    }

    /// Current energy reading from one status request.
    pub async fn energy(&self) -> Result<EnergyReading, CoreError> {
        match self {
            Self::Gen1(c) => convert::gen1_energy(&c.status().await?),
            Self::Gen2(c) => convert::gen2_energy(&c.status().await?),
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Write the device report to `sink`. The sink is untouched unless
    /// every fetch and the rendering succeed.
    pub async fn render_info<W: Write>(
        &self,
        sink: &mut W,
        options: &RenderOptions,
    ) -> Result<(), CoreError> {
        render::ensure_info_format(options.format)?;
        let report = self.report().await?;
        let out = render::render_info(&report, options)?;
        sink.write_all(out.as_bytes())?;
        Ok(())
    }

    /// Write the energy reading to `sink` in `options.format`. The sink is
    /// untouched on any error, including missing meter data.
    pub async fn render_energy<W: Write>(
        &self,
        sink: &mut W,
        options: &RenderOptions,
    ) -> Result<(), CoreError> {
        let reading = self.energy().await?;
        let out = render::render_energy(&reading, self.generation(), options)?;
        sink.write_all(out.as_bytes())?;
        Ok(())
    }
}

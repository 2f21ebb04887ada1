//! Generation-agnostic plug layer between `plugctl-api` and the CLI.
//!
//! - **[`Plug`]**: closed enum over the legacy REST and RPC clients,
//!   selected by an explicit [`Generation`]. Exposes control
//!   ([`turn_on`](Plug::turn_on), [`turn_off`](Plug::turn_off)) with an
//!   echo check, raw-to-model reads ([`report`](Plug::report),
//!   [`energy`](Plug::energy)) and sink-writing renders.
//!
//! - **Model** ([`model`]): [`EnergyReading`] and [`DeviceReport`], the one
//!   shape both wire schemas are normalized into by [`convert`].
//!
//! - **Presentation** ([`render`]): text, flat JSON and metrics-envelope
//!   output, driven by [`RenderOptions`].

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod plug;
pub mod render;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{Generation, OutputFormat, PlugConfig, RenderOptions};
pub use error::CoreError;
pub use model::{DeviceReport, EnergyReading, RelayState};
pub use plug::Plug;

pub use plugctl_api::{Credentials, DeviceAddress, TransportConfig};

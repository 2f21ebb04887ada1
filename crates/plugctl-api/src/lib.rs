// plugctl-api: Async Rust client for power-metering plugs (legacy REST + RPC)

pub mod auth;
pub mod client;
pub mod error;
pub mod gen1;
pub mod gen2;
pub mod transport;

pub use auth::{Credentials, DeviceAddress};
pub use client::{DeviceClient, Turn};
pub use error::Error;
pub use gen1::Gen1Client;
pub use gen2::Gen2Client;
pub use transport::TransportConfig;

// Generation 2 (RPC-style) API
//
// Identity stays on `/shelly`, status moves to `/rpc/Shelly.GetStatus`.
// Actuation keeps using the legacy-compatible `/relay/<n>` endpoint.

pub mod client;
pub mod models;

pub use client::Gen2Client;

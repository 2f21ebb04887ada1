// Generation 1 (legacy REST) API
//
// Plain JSON resources: `/shelly` for identity, `/status` for everything
// else, `/relay/<n>` for actuation.

pub mod client;
pub mod models;

pub use client::Gen1Client;

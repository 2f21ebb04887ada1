//! Relay switching.

use plugctl_core::{Plug, RelayState};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub async fn handle(plug: &Plug, target: RelayState, global: &GlobalOpts) -> Result<(), CliError> {
    let confirmed = match target {
        RelayState::On => plug.turn_on().await?,
        RelayState::Off => plug.turn_off().await?,
    };
    if !global.quiet {
        let word = if confirmed.is_on() { "on" } else { "off" };
        println!("Device turned {word}");
    }
    Ok(())
}

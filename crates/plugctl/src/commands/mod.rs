//! Command dispatch: bridges CLI args to `Plug` operations.

pub mod config_cmd;
pub mod energy;
pub mod info;
pub mod power;

use std::collections::BTreeMap;

use plugctl_core::{Plug, RelayState};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    plug: &Plug,
    labels: BTreeMap<String, String>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::On => power::handle(plug, RelayState::On, global).await,
        Command::Off => power::handle(plug, RelayState::Off, global).await,
        Command::Info(args) => info::handle(plug, &args).await,
        Command::Energy(args) => energy::handle(plug, args, labels).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

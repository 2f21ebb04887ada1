//! Energy readings in text, JSON or metrics form.

use std::collections::BTreeMap;

use plugctl_core::{OutputFormat, Plug, RenderOptions};

use crate::cli::EnergyArgs;
use crate::error::CliError;

pub async fn handle(
    plug: &Plug,
    args: EnergyArgs,
    profile_labels: BTreeMap<String, String>,
) -> Result<(), CliError> {
    let format = match (args.json, args.metrics) {
        (_, true) => OutputFormat::Metrics,
        (true, false) => OutputFormat::Json,
        (false, false) => OutputFormat::Text,
    };

    // --label entries win over the profile's labels
    let options = RenderOptions::new(format)
        .with_labels(profile_labels)
        .with_labels(args.labels);

    plug.render_energy(&mut std::io::stdout(), &options)
        .await?;
    Ok(())
}

use plugctl_core::{OutputFormat, Plug, RenderOptions};

use crate::cli::InfoArgs;
use crate::error::CliError;

pub async fn handle(plug: &Plug, args: &InfoArgs) -> Result<(), CliError> {
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    plug.render_info(&mut std::io::stdout(), &RenderOptions::new(format))
        .await?;
    Ok(())
}

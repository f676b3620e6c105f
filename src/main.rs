//! limesurvey - command-line client for the LimeSurvey RemoteControl API.

use anyhow::Result;
use limesurvey_rpc::cli::Cli;
use limesurvey_rpc::config::{init_logging, ClientSettings};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // --log-level wins over the configured level; a broken config is
    // reported later by the command itself.
    let log_level = cli.log_level.clone().or_else(|| {
        ClientSettings::load(cli.config.as_deref())
            .ok()
            .map(|settings| settings.log_level)
    });
    init_logging(log_level.as_deref())?;

    cli.run().await
}

//! droid-doctor entry point
//!
//! Parses the command line, loads configuration, installs the tracing
//! subscriber and runs the selected checks.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use droid_doctor::commands::{Cli, DoctorCommand};
use droid_doctor::common::{APP_NAME, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config().await?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{} v{} checking environment...", APP_NAME, VERSION);

    let command = DoctorCommand {
        checks: cli.check_set(),
        config,
    };
    let summary = command.execute().await;

    let code = command.exit_code(&summary);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

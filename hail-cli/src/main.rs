use clap::Parser;
use tracing::debug;

use hail_cli::app;
use hail_cli::cli::Cli;
use hail_cli::config::Settings;
use hail_cli::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.apply_overrides(
        cli.backend.as_deref(),
        cli.store.as_deref(),
        cli.log_level.as_deref(),
    );

    logging::init_logging(&settings.logging.level, settings.logging.file.as_deref())?;
    debug!(?settings, "starting");

    let output = app::run(&settings, cli.command).await?;
    print!("{output}");

    Ok(())
}

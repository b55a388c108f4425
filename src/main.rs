//! Predscope - a terminal dashboard for stock price predictions.

use anyhow::Context;
use predscope::{App, Config};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The terminal belongs to the UI, so logs go to a daily file.
    let log_dir = predscope::config::log_dir().context("resolving log directory")?;
    let file_appender = tracing_appender::rolling::daily(&log_dir, "predscope.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "predscope=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    // Load configuration
    let config = Config::load_or_default().context("loading configuration")?;
    tracing::info!(base_url = %config.api.base_url, "Starting predscope");

    // Run the application
    let mut app = App::new(config).context("starting the terminal UI")?;
    app.run().await?;

    tracing::info!("Exiting");
    Ok(())
}

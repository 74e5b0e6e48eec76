pub mod config;
pub mod mqtt;

use crate::config::Config;
use crate::mqtt::mqtt_listener::MqttListener;
use color_eyre::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    config::ensure_default_config().await?;
    let config = Config::load().await?;

    info!(
        "Watching {} on {}:{}",
        config.mqtt.subscription.topic, config.mqtt.server.host, config.mqtt.server.port
    );

    let mut listener = MqttListener::new(config.mqtt);

    // Blocks until the process is killed or the transport fails. A failed
    // connection is not retried; the error report is the exit.
    listener.run().await?;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

//! Configuration loading for plantwatch.
//!
//! One toml file under `~/.config/plantwatch/` holds everything. Missing
//! configuration gracefully degrades to defaults rather than preventing
//! startup; only an unreadable or unparsable file is a hard error.

use crate::mqtt::config::MqttConfig;
use color_eyre::eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_DIR: &str = ".config/plantwatch";
const CONFIG_FILE: &str = "config.toml";

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub mqtt: MqttConfig,
}

impl Config {
    pub async fn load() -> Result<Self> {
        Self::load_from(&config_file_path()).await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path)
            .await
            .map_err(|e| eyre!("Failed to check if config file exists: {}", e))?
        {
            warn!(
                "Config file {} does not exist, using defaults",
                path.display()
            );
            return Ok(Config::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| eyre!("Failed to parse config file: {}", e))
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| eyre!("Failed to serialize config: {}", e))?;

        tokio::fs::write(path, content)
            .await
            .map_err(|e| eyre!("Failed to write config file: {}", e))?;

        Ok(())
    }
}

/// Creates the config directory and a default config file on first run, so
/// users have something to edit instead of guessing the file format. The
/// credential keys are written commented out, matching the unauthenticated
/// default broker.
pub async fn ensure_default_config() -> Result<()> {
    let mut base_path = get_home_dir();
    base_path.push(CONFIG_DIR);

    let config_path = base_path.join(CONFIG_FILE);

    if tokio::fs::try_exists(&config_path)
        .await
        .map_err(|e| eyre!("Failed to check if config file exists: {}", e))?
    {
        return Ok(());
    }

    info!("Creating default configuration at {}", config_path.display());

    tokio::fs::create_dir_all(&base_path)
        .await
        .map_err(|e| eyre!("Failed to create config directory: {}", e))?;

    let mut content = toml::to_string_pretty(&Config::default())
        .map_err(|e| eyre!("Failed to serialize default config: {}", e))?;

    // If your broker requires auth:
    content.push_str(
        "\n# [mqtt.server.credentials]\n# user = \"user\"\n# pw = \"pass\"\n",
    );

    tokio::fs::write(&config_path, content)
        .await
        .map_err(|e| eyre!("Failed to write default config file: {}", e))?;

    Ok(())
}

fn config_file_path() -> PathBuf {
    let mut path = get_home_dir();
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);
    path
}

fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| {
        warn!("Could not determine home directory, using current directory");
        PathBuf::from(".")
    })
}

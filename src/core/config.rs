use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Environment variable holding the upstream API credential. The key is
/// server-held and never crosses the client boundary; its absence is fatal
/// at `serve` startup only.
pub const UPSTREAM_KEY_ENV: &str = "WORLDCOININDEX_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub upstream_base_url: String,
    /// When true, proxy responses carry the untouched upstream payload
    /// under `raw_api_response`. Off by default.
    pub debug_passthrough: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen_addr: "127.0.0.1:3000".to_string(),
            upstream_base_url: "https://www.worldcoinindex.com".to_string(),
            debug_passthrough: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct WatchConfig {
    pub proxy_url: String,
    /// Fiat codes the dashboard cycles through; the first entry is the
    /// startup selection.
    pub currencies: Vec<String>,
    pub refresh_interval_secs: u64,
    pub resize_debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        WatchConfig {
            proxy_url: "http://127.0.0.1:3000".to_string(),
            currencies: ["usd", "eur", "gbp", "inr", "jpy"]
                .map(String::from)
                .to_vec(),
            refresh_interval_secs: 60,
            resize_debounce_ms: 200,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub watch: WatchConfig,
}

impl AppConfig {
    /// Loads the config from the default location. A missing file is not an
    /// error; every field has a default so the app runs unconfigured.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "coindeck")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

/// Reads the upstream API credential from the environment, honoring a
/// `.env` file in the working directory.
pub fn upstream_api_key() -> Result<String> {
    dotenvy::dotenv().ok();
    std::env::var(UPSTREAM_KEY_ENV).with_context(|| {
        format!("{UPSTREAM_KEY_ENV} is not set; the upstream market API requires a key")
    })
}

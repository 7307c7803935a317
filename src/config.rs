use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/demo.toml";

/// Demo driver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Ticks to simulate.
    pub ticks: u64,
    /// Furnace variant ("iron" or "zenith").
    pub variant: String,
    /// Path to the smelting catalog JSON.
    pub catalog_path: String,
    /// Run on the electric fuel path (pre-charges the energy buffer).
    pub electric: bool,
    /// Ore units loaded into the input slot.
    pub ore_count: u8,
    /// Coal units loaded into the fuel slot.
    pub coal_count: u8,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ticks: 1_000,
            variant: "iron".to_string(),
            catalog_path: "config/smelting.json".to_string(),
            electric: false,
            ore_count: 8,
            coal_count: 2,
        }
    }
}

impl DemoConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<DemoConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    DemoConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                DemoConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}

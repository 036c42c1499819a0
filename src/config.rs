use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use crate::error::ShopError;
use crate::money::CurrencyFormat;
use crate::validation::BusinessHours;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Empty disables the log file; console output only
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default)]
    pub use_json: bool,
    #[serde(default)]
    pub rotation: LogRotation,
    #[serde(default)]
    pub shop: ShopConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "./logs".to_string()
}

fn default_log_file() -> String {
    "kedai.log".to_string()
}

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    Daily,
    #[default]
    Never,
}

/// Storefront behaviour knobs
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ShopConfig {
    /// Handoff destination, international form without `+`
    pub whatsapp_number: String,
    pub currency: CurrencyFormat,
    pub business_hours: BusinessHours,
    /// Reservations accepted from today up to this many days ahead
    pub booking_window_days: u32,
    /// Cosmetic "processing" pause before the link opens
    pub handoff_delay_ms: u64,
    pub catalog_path: String,
    pub preference_path: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: "6281234567890".to_string(),
            currency: CurrencyFormat::default(),
            business_hours: BusinessHours::default(),
            booking_window_days: 7,
            handoff_delay_ms: 1500,
            catalog_path: "config/catalog.yaml".to_string(),
            preference_path: "./data/preferences.json".to_string(),
        }
    }
}

impl ShopConfig {
    pub fn handoff_delay(&self) -> Duration {
        Duration::from_millis(self.handoff_delay_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            log_file: default_log_file(),
            use_json: false,
            rotation: LogRotation::default(),
            shop: ShopConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml`
    pub fn load(env: &str) -> Result<Self, ShopError> {
        Self::load_from(&format!("config/{}.yaml", env))
    }

    pub fn load_from(config_path: &str) -> Result<Self, ShopError> {
        let content = fs::read_to_string(config_path).map_err(|source| ShopError::ConfigRead {
            path: config_path.to_string(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ShopError::ConfigParse {
            path: config_path.to_string(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

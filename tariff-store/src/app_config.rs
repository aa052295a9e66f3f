use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// JSON dataset the store is loaded from
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Fallback for `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "tariff=warn".to_string()
}

/// Sizes of the generated demo dataset
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SeedConfig {
    pub venues: usize,
    pub members: usize,
    pub products: usize,
    pub modifiers: usize,
    pub modifiers_per_option: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            venues: 8,
            members: 20,
            products: 10,
            modifiers: 12,
            modifiers_per_option: 3,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &run_mode)
    }

    pub fn load_from(config_dir: &str, run_mode: &str) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{}/default", config_dir)))
            // Per-environment overrides, optional
            .add_source(
                config::File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false),
            )
            // Local overrides, not checked in
            .add_source(config::File::with_name(&format!("{}/local", config_dir)).required(false))
            // e.g. `TARIFF__DATA__PATH=/tmp/data.json`
            .add_source(config::Environment::with_prefix("TARIFF").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

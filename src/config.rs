use crate::store::IdStrategy;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "ESTATE_DATA_DIR";
pub const ID_STRATEGY_VAR: &str = "ESTATE_ID_STRATEGY";
pub const SEED_VAR: &str = "ESTATE_SEED";
pub const LOG_VAR: &str = "ESTATE_LOG";

/// Runtime settings for the browser
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Directory holding one JSON file per collection
    pub data_dir: PathBuf,
    /// How new record identifiers are generated
    pub id_strategy: IdStrategy,
    /// Write the sample listings when `properties` is empty
    pub seed_sample_listings: bool,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("estate_data"),
            id_strategy: IdStrategy::Uuid,
            seed_sample_listings: true,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(strategy) = lookup(ID_STRATEGY_VAR) {
            config.id_strategy = strategy
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{}: {}", ID_STRATEGY_VAR, e))?;
        }
        if let Some(seed) = lookup(SEED_VAR) {
            config.seed_sample_listings = parse_flag(SEED_VAR, &seed)?;
        }
        if let Some(filter) = lookup(LOG_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}

fn parse_flag(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{}: expected true or false, got '{}'", var, other),
    }
}

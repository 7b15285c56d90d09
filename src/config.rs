/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use thiserror::Error;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone)]
pub struct Config {
    pub pool: PoolConfig,
    pub timing: TimingConfig,
}

#[derive(Deserialize, Clone)]
pub struct PoolConfig {
    pub n_units: u8,
    pub n_floors: u8,
    pub start_floor: u8,
}

#[derive(Deserialize, Clone)]
pub struct TimingConfig {
    pub travel_tick_ms: u64,
    pub dwell_tick_ms: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    Ok(toml::from_str(&config_str)?)
}

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Limits and presentation settings. Unset fields fall back to the defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub pool_size: Option<usize>,
    pub max_city_name_len: Option<usize>,
    pub max_flights_per_city: Option<usize>,
    pub table: Option<bool>,
    pub color: Option<bool>,
}

impl Config {
    pub const DEFAULT_POOL_SIZE: usize = 50;
    pub const DEFAULT_MAX_CITY_NAME_LEN: usize = 20;
    pub const DEFAULT_MAX_FLIGHTS_PER_CITY: usize = 5;

    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies the pool size given on the command line. Anything that is not
    /// a positive integer is rejected.
    pub fn with_pool_size(mut self, raw: &str) -> Result<Config, ConfigError> {
        let size = raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::PoolSize)?;
        self.pool_size = Some(size);
        Ok(self)
    }

    pub fn validate(self) -> Result<Config, ConfigError> {
        if self.pool_size() == 0 {
            return Err(ConfigError::PoolSize);
        }
        if self.max_city_name_len() == 0 {
            return Err(ConfigError::NotPositive { field: "max_city_name_len" });
        }
        if self.max_flights_per_city() == 0 {
            return Err(ConfigError::NotPositive { field: "max_flights_per_city" });
        }
        Ok(self)
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size.unwrap_or(Self::DEFAULT_POOL_SIZE)
    }

    pub fn max_city_name_len(&self) -> usize {
        self.max_city_name_len.unwrap_or(Self::DEFAULT_MAX_CITY_NAME_LEN)
    }

    pub fn max_flights_per_city(&self) -> usize {
        self.max_flights_per_city
            .unwrap_or(Self::DEFAULT_MAX_FLIGHTS_PER_CITY)
    }

    pub fn table(&self) -> bool {
        self.table.unwrap_or(false)
    }

    pub fn color(&self) -> bool {
        self.color.unwrap_or(true)
    }
}

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::chart::ChartLabels;
use crate::io::dataset::ColumnNames;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address '{addr}'")]
    BindAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Server settings, read from the environment with development defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub columns: ColumnNames,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("co.csv"),
            columns: ColumnNames::default(),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or empty keys keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        let default_cols = defaults.columns;

        Self {
            data_path: get("CO2_DATA_PATH").map(PathBuf::from).unwrap_or(defaults.data_path),
            columns: ColumnNames {
                entity: get("CO2_ENTITY_COLUMN").unwrap_or(default_cols.entity),
                year: get("CO2_YEAR_COLUMN").unwrap_or(default_cols.year),
                value: get("CO2_VALUE_COLUMN").unwrap_or(default_cols.value),
            },
            host: get("HOST").unwrap_or(defaults.host),
            port: get("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|source| ConfigError::BindAddr { addr, source })
    }

    /// Axis labels follow the dataset's column names.
    pub fn chart_labels(&self) -> ChartLabels {
        ChartLabels {
            category: self.columns.entity.clone(),
            time: self.columns.year.clone(),
            value: self.columns.value.clone(),
        }
    }
}

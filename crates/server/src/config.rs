use predictor::PredictorConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds. Covers a lazy first-request training run.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory holding the dataset CSV
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory holding the model and schema artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// Trees in the forest when training
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,

    /// Write a synthetic dataset at start-up when none exists
    #[serde(default)]
    pub generate_dataset_if_missing: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            data_dir: default_data_dir(),
            model_dir: default_model_dir(),
            n_estimators: default_n_estimators(),
            generate_dataset_if_missing: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file, then
    /// `SYMPTOMATCH__*` environment variables.
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env is normal outside development.
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(config::Environment::with_prefix("SYMPTOMATCH").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Predictor settings derived from the directories and forest size.
    pub fn predictor_config(&self) -> PredictorConfig {
        PredictorConfig::from_dirs(&self.data_dir, &self.model_dir)
            .with_n_estimators(self.n_estimators)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_body_size_mb() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("model")
}

fn default_n_estimators() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 5001);
        assert_eq!(cfg.bind_addr, "0.0.0.0");
        assert_eq!(cfg.max_body_size(), 1024 * 1024);
        assert!(cfg.enable_cors);
        assert!(!cfg.generate_dataset_if_missing);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 5001);
    }

    #[test]
    fn test_predictor_config_follows_dirs() {
        let cfg = ServerConfig {
            data_dir: PathBuf::from("/srv/data"),
            model_dir: PathBuf::from("/srv/model"),
            n_estimators: 25,
            ..ServerConfig::default()
        };
        let p = cfg.predictor_config();
        assert_eq!(p.dataset_path, PathBuf::from("/srv/data/disease_dataset.csv"));
        assert_eq!(p.model_path, PathBuf::from("/srv/model/disease_model.bin"));
        assert_eq!(p.schema_path, PathBuf::from("/srv/model/model_columns.bin"));
        assert_eq!(p.n_estimators, 25);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let cfg: ServerConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "port = 9000\ngenerate_dataset_if_missing = true",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.port, 9000);
        assert!(cfg.generate_dataset_if_missing);
        assert_eq!(cfg.n_estimators, 100);
    }
}

use crate::ingestion::{DEFAULT_BROKERS, DEFAULT_DATA_SOURCE, DEFAULT_TOPIC, IngestionOptions};
use crate::labels::LabelSet;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub prometheus: PrometheusConfig,
    pub druid: DruidConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PrometheusConfig {
    pub address: String,
    /// Instant query whose result labels become the spec's dimensions.
    pub query: String,
    pub timeout_secs: u64,
    pub tls_skip_verify: bool,
    /// PEM file with an extra root certificate; empty means none.
    pub tls_cert_path: String,
}

impl Default for PrometheusConfig {
    fn default() -> Self {
        Self {
            address: "http://prometheus:9090".into(),
            query: r#"{__name__=~"job:.+"}"#.into(),
            timeout_secs: 10,
            tls_skip_verify: false,
            tls_cert_path: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DruidConfig {
    pub data_source: String,
    pub topic: String,
    /// Comma-separated Kafka bootstrap servers.
    pub brokers: String,
    /// Emit the SSL consumer properties block.
    pub ssl: bool,
}

impl Default for DruidConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.into(),
            topic: DEFAULT_TOPIC.into(),
            brokers: DEFAULT_BROKERS.into(),
            ssl: false,
        }
    }
}

impl DruidConfig {
    pub fn ingestion_options(&self, labels: LabelSet) -> IngestionOptions {
        IngestionOptions {
            data_source: self.data_source.clone(),
            topic: self.topic.clone(),
            brokers: self.brokers.clone(),
            labels,
            ssl: self.ssl,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub stdout: bool,
    pub path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            stdout: true,
            path: None,
        }
    }
}

impl AppConfig {
    /// Reads `$CONFIG_FILE`, or `config.toml` when unset. A missing default
    /// file falls back to built-in defaults; a missing explicit file is an error.
    pub fn load() -> anyhow::Result<Self> {
        let config = Self::discover(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::load`] but without validation, so command-line
    /// overrides can be applied first.
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::read(Path::new(&path)),
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::read(Path::new(DEFAULT_CONFIG_PATH))
            }
            Err(_) => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path.display(), e))?;
        Ok(toml::from_str(&s)?)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let address = &self.prometheus.address;
        anyhow::ensure!(
            address.starts_with("http://") || address.starts_with("https://"),
            "prometheus.address must start with http:// or https://, got {:?}",
            address
        );
        anyhow::ensure!(
            !self.prometheus.query.trim().is_empty(),
            "prometheus.query must be non-empty"
        );
        anyhow::ensure!(
            self.prometheus.timeout_secs > 0,
            "prometheus.timeout_secs must be > 0, got {}",
            self.prometheus.timeout_secs
        );
        anyhow::ensure!(
            !self.druid.data_source.is_empty(),
            "druid.data_source must be non-empty"
        );
        anyhow::ensure!(!self.druid.topic.is_empty(), "druid.topic must be non-empty");
        anyhow::ensure!(
            self.output.stdout || self.output.path.as_deref().is_some_and(|p| !p.is_empty()),
            "output needs stdout = true or a non-empty output.path"
        );
        Ok(())
    }
}

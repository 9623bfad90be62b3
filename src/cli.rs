// Command-line flags; each one overrides the matching config file value

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "promdruid", version)]
#[command(
    about = "Generate a Druid Kafka ingestion spec from a Prometheus query result",
    long_about = None
)]
pub struct Cli {
    /// Config file (default: $CONFIG_FILE or ./config.toml)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// The address of the Prometheus server to send the query to
    #[arg(short = 'a', long = "address")]
    pub address: Option<String>,
    /// The query to send to the Prometheus server
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,
    /// Query timeout in seconds
    #[arg(long = "timeout-secs")]
    pub timeout_secs: Option<u64>,
    /// Skip TLS certificate verification (`--tls-skip-verify=false` turns it off)
    #[arg(long = "tls-skip-verify", num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub tls_skip_verify: Option<bool>,
    /// Path to a PEM root certificate for the Prometheus server
    #[arg(long = "tls-cert-path", value_name = "FILE")]
    pub tls_cert_path: Option<String>,
    /// Druid dataSource name
    #[arg(long = "data-source")]
    pub data_source: Option<String>,
    /// Kafka topic to ingest from
    #[arg(long = "topic")]
    pub topic: Option<String>,
    /// Kafka brokers, e.g. kafka01:9092,kafka02:9092
    #[arg(long = "brokers")]
    pub brokers: Option<String>,
    /// Add the SSL consumer properties (`--ssl=false` turns them off)
    #[arg(long = "ssl", num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub ssl: Option<bool>,
    /// Also write the spec to this file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<String>,
    /// Do not print the spec to stdout
    #[arg(long = "no-stdout")]
    pub no_stdout: bool,
}

impl Cli {
    /// Loads the config named by `--config` (or the default lookup) and
    /// applies the flags on top.
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        let config = self.apply(AppConfig::discover(self.config.as_deref())?);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(v) = &self.address {
            config.prometheus.address = v.clone();
        }
        if let Some(v) = &self.query {
            config.prometheus.query = v.clone();
        }
        if let Some(v) = self.timeout_secs {
            config.prometheus.timeout_secs = v;
        }
        if let Some(v) = self.tls_skip_verify {
            config.prometheus.tls_skip_verify = v;
        }
        if let Some(v) = &self.tls_cert_path {
            config.prometheus.tls_cert_path = v.clone();
        }
        if let Some(v) = &self.data_source {
            config.druid.data_source = v.clone();
        }
        if let Some(v) = &self.topic {
            config.druid.topic = v.clone();
        }
        if let Some(v) = &self.brokers {
            config.druid.brokers = v.clone();
        }
        if let Some(v) = self.ssl {
            config.druid.ssl = v;
        }
        if let Some(v) = &self.output {
            config.output.path = Some(v.clone());
        }
        if self.no_stdout {
            config.output.stdout = false;
        }
        config
    }
}

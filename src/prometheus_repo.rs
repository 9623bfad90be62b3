// Prometheus instant queries over the HTTP API

use crate::config::PrometheusConfig;
use crate::error::QueryError;
use crate::models::{ApiResponse, ApiStatus, QueryResult};
use std::time::Duration;
use tracing::{instrument, warn};

const QUERY_PATH: &str = "/api/v1/query";

/// Result of one instant query plus any non-fatal server warnings.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub result: QueryResult,
    pub warnings: Vec<String>,
}

pub struct PrometheusRepo {
    client: reqwest::Client,
    base_url: String,
}

impl PrometheusRepo {
    pub fn connect(config: &PrometheusConfig) -> Result<Self, QueryError> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(crate::version::user_agent());
        if config.tls_skip_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if !config.tls_cert_path.is_empty() {
            builder = builder.add_root_certificate(load_certificate(&config.tls_cert_path)?);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.address.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Evaluates `query` at the current time.
    #[instrument(skip(self), fields(repo = "prometheus", operation = "query"))]
    pub async fn query(&self, query: &str) -> Result<QueryOutcome, QueryError> {
        let url = format!("{}{}", self.base_url, QUERY_PATH);
        let time = format!("{:.3}", chrono::Utc::now().timestamp_millis() as f64 / 1000.0);
        let resp = self
            .client
            .get(&url)
            .query(&[("query", query), ("time", time.as_str())])
            .send()
            .await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        let parsed: ApiResponse = match serde_json::from_slice(&body) {
            Ok(r) => r,
            Err(_) if !status.is_success() => {
                return Err(QueryError::Api {
                    error_type: format!("http {}", status.as_u16()),
                    error: String::from_utf8_lossy(&body).trim().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let outcome = into_outcome(parsed)?;
        for w in &outcome.warnings {
            warn!("prometheus warning: {}", w);
        }
        Ok(outcome)
    }
}

fn into_outcome(resp: ApiResponse) -> Result<QueryOutcome, QueryError> {
    match (resp.status, resp.data) {
        (ApiStatus::Success, Some(result)) => Ok(QueryOutcome {
            result,
            warnings: resp.warnings,
        }),
        (ApiStatus::Success, None) => Err(QueryError::Api {
            error_type: "bad_response".into(),
            error: "response has no data".into(),
        }),
        (ApiStatus::Error, _) => Err(QueryError::Api {
            error_type: resp.error_type.unwrap_or_else(|| "unknown".into()),
            error: resp.error.unwrap_or_default(),
        }),
    }
}

fn load_certificate(path: &str) -> Result<reqwest::Certificate, QueryError> {
    let pem = std::fs::read(path).map_err(|e| QueryError::Certificate {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    reqwest::Certificate::from_pem(&pem).map_err(|e| QueryError::Certificate {
        path: path.to_string(),
        message: e.to_string(),
    })
}

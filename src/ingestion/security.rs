// Fixed SSL settings for the Kafka consumer

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TRUSTSTORE_LOCATION: &str = "/var/private/ssl/truststore.p12";
pub const KEYSTORE_LOCATION: &str = "/var/private/ssl/keystore.p12";
pub const TRUSTSTORE_PASSWORD_VAR: &str = "DRUID_TRUSTSTORE_PASSWORD";
pub const KEYSTORE_PASSWORD_VAR: &str = "DRUID_KEYSTORE_PASSWORD";
pub const ENABLED_PROTOCOLS: &str = "TLSv1.2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityProtocol {
    #[serde(rename = "SSL")]
    Ssl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreType {
    #[serde(rename = "PKCS12")]
    Pkcs12,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordProviderType {
    Environment,
}

/// Reference to a secret Druid resolves at runtime; never the secret itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordProvider {
    #[serde(rename = "type")]
    pub type_: PasswordProviderType,
    pub variable: String,
}

impl PasswordProvider {
    pub fn environment(variable: impl Into<String>) -> Self {
        Self {
            type_: PasswordProviderType::Environment,
            variable: variable.into(),
        }
    }
}

/// SSL consumer properties. Present as a whole or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslConfig {
    #[serde(rename = "security.protocol")]
    pub security_protocol: SecurityProtocol,
    #[serde(rename = "ssl.truststore.type")]
    pub truststore_type: StoreType,
    #[serde(rename = "ssl.enabled.protocols")]
    pub enabled_protocols: String,
    #[serde(rename = "ssl.truststore.location")]
    pub truststore_location: String,
    #[serde(rename = "ssl.truststore.password")]
    pub truststore_password: PasswordProvider,
    #[serde(rename = "ssl.keystore.location")]
    pub keystore_location: String,
    #[serde(rename = "ssl.keystore.password")]
    pub keystore_password: PasswordProvider,
}

impl SslConfig {
    /// The one SSL setup we deploy: PKCS12 stores under /var/private/ssl,
    /// passwords taken from the Druid process environment.
    pub fn opinionated() -> Self {
        Self {
            security_protocol: SecurityProtocol::Ssl,
            truststore_type: StoreType::Pkcs12,
            enabled_protocols: ENABLED_PROTOCOLS.into(),
            truststore_location: TRUSTSTORE_LOCATION.into(),
            truststore_password: PasswordProvider::environment(TRUSTSTORE_PASSWORD_VAR),
            keystore_location: KEYSTORE_LOCATION.into(),
            keystore_password: PasswordProvider::environment(KEYSTORE_PASSWORD_VAR),
        }
    }
}

/// Some SSL keys were present but not all of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("partial SSL consumer properties, missing: {}", .missing.join(", "))]
pub struct PartialSslConfig {
    pub missing: Vec<&'static str>,
}

/// SSL keys as found in a parsed document, each one optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SslFields {
    #[serde(rename = "security.protocol")]
    security_protocol: Option<SecurityProtocol>,
    #[serde(rename = "ssl.truststore.type")]
    truststore_type: Option<StoreType>,
    #[serde(rename = "ssl.enabled.protocols")]
    enabled_protocols: Option<String>,
    #[serde(rename = "ssl.truststore.location")]
    truststore_location: Option<String>,
    #[serde(rename = "ssl.truststore.password")]
    truststore_password: Option<PasswordProvider>,
    #[serde(rename = "ssl.keystore.location")]
    keystore_location: Option<String>,
    #[serde(rename = "ssl.keystore.password")]
    keystore_password: Option<PasswordProvider>,
}

impl SslFields {
    /// `None` when no key is present, the full config when all are.
    pub(crate) fn into_config(self) -> Result<Option<SslConfig>, PartialSslConfig> {
        match self {
            SslFields {
                security_protocol: Some(security_protocol),
                truststore_type: Some(truststore_type),
                enabled_protocols: Some(enabled_protocols),
                truststore_location: Some(truststore_location),
                truststore_password: Some(truststore_password),
                keystore_location: Some(keystore_location),
                keystore_password: Some(keystore_password),
            } => Ok(Some(SslConfig {
                security_protocol,
                truststore_type,
                enabled_protocols,
                truststore_location,
                truststore_password,
                keystore_location,
                keystore_password,
            })),
            fields => {
                let present = [
                    ("security.protocol", fields.security_protocol.is_some()),
                    ("ssl.truststore.type", fields.truststore_type.is_some()),
                    ("ssl.enabled.protocols", fields.enabled_protocols.is_some()),
                    ("ssl.truststore.location", fields.truststore_location.is_some()),
                    ("ssl.truststore.password", fields.truststore_password.is_some()),
                    ("ssl.keystore.location", fields.keystore_location.is_some()),
                    ("ssl.keystore.password", fields.keystore_password.is_some()),
                ];
                if present.iter().all(|(_, p)| !p) {
                    return Ok(None);
                }
                Err(PartialSslConfig {
                    missing: present
                        .iter()
                        .filter(|(_, p)| !p)
                        .map(|(key, _)| *key)
                        .collect(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keys_is_no_block() {
        assert_eq!(SslFields::default().into_config(), Ok(None));
    }

    #[test]
    fn single_key_reports_the_rest_missing() {
        let fields = SslFields {
            security_protocol: Some(SecurityProtocol::Ssl),
            ..SslFields::default()
        };
        let err = fields.into_config().unwrap_err();
        assert_eq!(err.missing.len(), 6);
        assert!(!err.missing.contains(&"security.protocol"));
    }
}

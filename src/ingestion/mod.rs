// Druid Kafka ingestion spec (legacy parser-based dataSchema)

pub mod security;

use crate::labels::LabelSet;
use serde::{Deserialize, Serialize};

pub use security::{PartialSslConfig, PasswordProvider, SslConfig};
use security::SslFields;

pub const DEFAULT_DATA_SOURCE: &str = "prometheus";
pub const DEFAULT_TOPIC: &str = "prometheus";
pub const DEFAULT_BROKERS: &str = "kafka01:9090,kafka02:9090,kafka03:9090";

/// Root of the document submitted to Druid's supervisor API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaIngestionSpec {
    #[serde(rename = "type")]
    pub type_: String,
    pub data_schema: DataSchema,
    pub io_config: IoConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSchema {
    pub data_source: String,
    pub parser: Parser,
    pub metrics_spec: Vec<Metric>,
    pub granularity_spec: GranularitySpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parser {
    #[serde(rename = "type")]
    pub type_: String,
    pub parse_spec: ParseSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSpec {
    pub format: String,
    pub timestamp_spec: TimestampSpec,
    pub flatten_spec: FlattenSpec,
    pub dimensions_spec: DimensionsSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampSpec {
    pub column: String,
    pub format: String,
}

/// Maps nested input records onto Druid's flat columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlattenSpec {
    pub fields: FieldList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionsSpec {
    pub dimensions: Vec<String>,
}

pub type FieldList = Vec<Field>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// JSONPath lookup into the record.
    Path,
    /// Top-level key of the record.
    Root,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "type")]
    pub type_: FieldType,
    pub name: String,
    pub expr: String,
}

/// Ingestion-time aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GranularitySpec {
    #[serde(rename = "type")]
    pub type_: String,
    pub segment_granularity: String,
    pub query_granularity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IoConfig {
    pub topic: String,
    pub consumer_properties: ConsumerProperties,
    pub task_duration: String,
    pub use_earliest_offset: bool,
}

/// Properties handed to the Kafka consumer.
///
/// Parsing rejects documents that carry only some of the SSL keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConsumerProperties")]
pub struct ConsumerProperties {
    #[serde(rename = "bootstrap.servers")]
    pub bootstrap_servers: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<SslConfig>,
}

#[derive(Deserialize)]
struct RawConsumerProperties {
    #[serde(rename = "bootstrap.servers")]
    bootstrap_servers: String,
    #[serde(flatten)]
    ssl: SslFields,
}

impl TryFrom<RawConsumerProperties> for ConsumerProperties {
    type Error = PartialSslConfig;

    fn try_from(raw: RawConsumerProperties) -> Result<Self, Self::Error> {
        Ok(Self {
            bootstrap_servers: raw.bootstrap_servers,
            ssl: raw.ssl.into_config()?,
        })
    }
}

impl Default for KafkaIngestionSpec {
    fn default() -> Self {
        Self {
            type_: "kafka".into(),
            data_schema: DataSchema {
                data_source: DEFAULT_DATA_SOURCE.into(),
                parser: Parser {
                    type_: "string".into(),
                    parse_spec: ParseSpec {
                        format: "json".into(),
                        timestamp_spec: TimestampSpec {
                            column: "timestamp".into(),
                            format: "iso".into(),
                        },
                        flatten_spec: FlattenSpec { fields: Vec::new() },
                        dimensions_spec: DimensionsSpec {
                            dimensions: Vec::new(),
                        },
                    },
                },
                metrics_spec: vec![
                    Metric {
                        name: "count".into(),
                        type_: "count".into(),
                        field_name: None,
                    },
                    Metric {
                        name: "value".into(),
                        type_: "doubleMax".into(),
                        field_name: Some("value".into()),
                    },
                ],
                granularity_spec: GranularitySpec {
                    type_: "uniform".into(),
                    segment_granularity: "HOUR".into(),
                    query_granularity: "MINUTE".into(),
                },
            },
            io_config: IoConfig {
                topic: DEFAULT_TOPIC.into(),
                consumer_properties: ConsumerProperties {
                    bootstrap_servers: DEFAULT_BROKERS.into(),
                    ssl: None,
                },
                task_duration: "PT10M".into(),
                use_earliest_offset: true,
            },
        }
    }
}

/// Everything the builder takes from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionOptions {
    pub data_source: String,
    pub topic: String,
    /// Comma-separated `host:port` list, passed through untouched.
    pub brokers: String,
    pub labels: LabelSet,
    pub ssl: bool,
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.into(),
            topic: DEFAULT_TOPIC.into(),
            brokers: DEFAULT_BROKERS.into(),
            labels: LabelSet::new(),
            ssl: false,
        }
    }
}

impl KafkaIngestionSpec {
    /// Builds the full spec. Total: any input yields a document.
    pub fn build(options: &IngestionOptions) -> Self {
        let mut spec = Self::default();
        spec.data_schema.data_source = options.data_source.clone();
        spec.io_config.topic = options.topic.clone();
        spec.io_config.consumer_properties.bootstrap_servers = options.brokers.clone();

        let parse_spec = &mut spec.data_schema.parser.parse_spec;
        parse_spec.flatten_spec.fields = options.labels.to_field_list();
        parse_spec.dimensions_spec.dimensions = options.labels.to_dimensions();

        if options.ssl {
            spec.io_config.consumer_properties.ssl = Some(SslConfig::opinionated());
        }
        spec
    }

    pub fn fields(&self) -> &[Field] {
        &self.data_schema.parser.parse_spec.flatten_spec.fields
    }

    pub fn dimensions(&self) -> &[String] {
        &self.data_schema.parser.parse_spec.dimensions_spec.dimensions
    }
}

// Shared test helpers

#![allow(dead_code)]

use promdruid::models::{Metric, QueryResult, Sample, ValuePair};

pub const UNIX_TIMESTAMP: f64 = 1583395744.0;

pub fn sample(labels: &[(&str, &str)], ts_offset: f64) -> Sample {
    Sample {
        metric: Metric::from_pairs(labels.iter().copied()),
        value: Some(ValuePair(UNIX_TIMESTAMP + ts_offset, "0".into())),
        histogram: None,
    }
}

pub fn vector(samples: Vec<Sample>) -> QueryResult {
    QueryResult::Vector(samples)
}

pub const JSON_BASIC: &str = r#"{
    "type": "kafka",
    "dataSchema": {
        "dataSource": "test",
        "parser": {
            "type": "string",
            "parseSpec": {
                "format": "json",
                "timestampSpec": {
                    "column": "timestamp",
                    "format": "iso"
                },
                "flattenSpec": {
                    "fields": [
                        {
                            "type": "path",
                            "name": "instance",
                            "expr": "$.labels.instance"
                        },
                        {
                            "type": "path",
                            "name": "job",
                            "expr": "$.labels.job"
                        },
                        {
                            "type": "root",
                            "name": "name",
                            "expr": "name"
                        },
                        {
                            "type": "root",
                            "name": "value",
                            "expr": "value"
                        }
                    ]
                },
                "dimensionsSpec": {
                    "dimensions": [
                        "name",
                        "instance",
                        "job"
                    ]
                }
            }
        },
        "metricsSpec": [
            {
                "name": "count",
                "type": "count"
            },
            {
                "name": "value",
                "type": "doubleMax",
                "fieldName": "value"
            }
        ],
        "granularitySpec": {
            "type": "uniform",
            "segmentGranularity": "HOUR",
            "queryGranularity": "MINUTE"
        }
    },
    "ioConfig": {
        "topic": "test",
        "consumerProperties": {
            "bootstrap.servers": "test"
        },
        "taskDuration": "PT10M",
        "useEarliestOffset": true
    }
}"#;

pub const CONSUMER_PROPERTIES_SSL: &str = r#""consumerProperties": {
            "bootstrap.servers": "test",
            "security.protocol": "SSL",
            "ssl.truststore.type": "PKCS12",
            "ssl.enabled.protocols": "TLSv1.2",
            "ssl.truststore.location": "/var/private/ssl/truststore.p12",
            "ssl.truststore.password": {
                "type": "environment",
                "variable": "DRUID_TRUSTSTORE_PASSWORD"
            },
            "ssl.keystore.location": "/var/private/ssl/keystore.p12",
            "ssl.keystore.password": {
                "type": "environment",
                "variable": "DRUID_KEYSTORE_PASSWORD"
            }
        },"#;

/// The basic document with the SSL consumer properties spliced in.
pub fn json_ssl() -> String {
    JSON_BASIC.replace(
        r#""consumerProperties": {
            "bootstrap.servers": "test"
        },"#,
        CONSUMER_PROPERTIES_SSL,
    )
}

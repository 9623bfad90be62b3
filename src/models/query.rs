// Prometheus instant/range query results

use super::Metric;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `[<unix seconds>, "<value>"]` as sent by the Prometheus HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuePair(pub f64, pub String);

impl ValuePair {
    pub fn timestamp(&self) -> f64 {
        self.0
    }

    pub fn value(&self) -> &str {
        &self.1
    }
}

/// One element of an instant vector. Float samples carry `value`, native
/// histogram samples carry `histogram` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub metric: Metric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValuePair>,
    /// `[<unix seconds>, {count, sum, buckets}]`, kept opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram: Option<serde_json::Value>,
}

/// One series of a range matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSeries {
    pub metric: Metric,
    pub values: Vec<ValuePair>,
}

/// The `data` object of a query response; `resultType` selects the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resultType", content = "result", rename_all = "lowercase")]
pub enum QueryResult {
    Vector(Vec<Sample>),
    Matrix(Vec<RangeSeries>),
    Scalar(ValuePair),
    String(ValuePair),
}

impl QueryResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            QueryResult::Vector(_) => ResultKind::Vector,
            QueryResult::Matrix(_) => ResultKind::Matrix,
            QueryResult::Scalar(_) => ResultKind::Scalar,
            QueryResult::String(_) => ResultKind::String,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Vector,
    Matrix,
    Scalar,
    String,
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResultKind::Vector => "vector",
            ResultKind::Matrix => "matrix",
            ResultKind::Scalar => "scalar",
            ResultKind::String => "string",
        })
    }
}

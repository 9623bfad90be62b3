// Label discovery from query results and the label-derived parts of the spec

use crate::error::ExtractError;
use crate::ingestion::{Field, FieldList, FieldType};
use crate::models::{METRIC_NAME_LABEL, QueryResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Dimension for the metric name column written by prometheus-kafka-adapter.
pub const NAME_DIMENSION: &str = "name";

/// Distinct label names in first-seen order. Never contains `__name__`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// One `path` field per label, then the fixed `name` and `value` root fields.
    pub fn to_field_list(&self) -> FieldList {
        let mut fields: FieldList = self
            .0
            .iter()
            .map(|label| Field {
                type_: FieldType::Path,
                name: label.clone(),
                // Label names are not escaped; JSONPath metacharacters pass through.
                expr: format!("$.labels.{label}"),
            })
            .collect();
        fields.push(Field {
            type_: FieldType::Root,
            name: "name".into(),
            expr: "name".into(),
        });
        fields.push(Field {
            type_: FieldType::Root,
            name: "value".into(),
            expr: "value".into(),
        });
        fields
    }

    /// `["name", labels...]`, or empty when there are no labels at all.
    pub fn to_dimensions(&self) -> Vec<String> {
        if self.0.is_empty() {
            return Vec::new();
        }
        let mut dimensions = Vec::with_capacity(self.0.len() + 1);
        dimensions.push(NAME_DIMENSION.to_string());
        dimensions.extend(self.0.iter().cloned());
        dimensions
    }
}

/// Builds a set from arbitrary names, dropping duplicates and `__name__`.
impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let mut labels = Vec::new();
        for name in iter {
            let name = name.into();
            if name == METRIC_NAME_LABEL {
                continue;
            }
            if seen.insert(name.clone()) {
                labels.push(name);
            }
        }
        Self(labels)
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collects the distinct label names of an instant vector.
///
/// Samples are visited in order and each sample's labels in their own order;
/// a name is kept at its first sighting. `__name__` is skipped.
pub fn extract_unique_labels(result: &QueryResult) -> Result<LabelSet, ExtractError> {
    let QueryResult::Vector(samples) = result else {
        return Err(ExtractError::UnsupportedResultShape {
            found: result.kind(),
        });
    };

    let labels: LabelSet = samples
        .iter()
        .flat_map(|s| s.metric.labels())
        .map(|l| l.name.as_str())
        .collect();
    tracing::debug!(
        samples = samples.len(),
        labels = labels.len(),
        "extracted unique labels"
    );
    Ok(labels)
}

// Label sets attached to Prometheus samples

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Label holding the metric's own name; never treated as a regular label.
pub const METRIC_NAME_LABEL: &str = "__name__";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    pub name: String,
    pub value: String,
}

/// Labels of one sample, in the order the server sent them.
///
/// Serializes as a JSON object (`{"job": "node", ...}`). Deserializing keeps
/// document order instead of sorting or hashing the keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metric(Vec<Label>);

impl Metric {
    pub fn new(labels: Vec<Label>) -> Self {
        Self(labels)
    }

    /// Build from `(name, value)` pairs, e.g. in tests.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(name, value)| Label {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        )
    }

    pub fn labels(&self) -> &[Label] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.value.as_str())
    }

    /// Value of `__name__`, if present.
    pub fn metric_name(&self) -> Option<&str> {
        self.get(METRIC_NAME_LABEL)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for label in &self.0 {
            map.serialize_entry(&label.name, &label.value)?;
        }
        map.end()
    }
}

struct MetricVisitor;

impl<'de> Visitor<'de> for MetricVisitor {
    type Value = Metric;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of label names to label values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Metric, A::Error> {
        let mut labels = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, value)) = access.next_entry::<String, String>()? {
            // Last write wins on duplicate keys, keeping the first position.
            match labels.iter_mut().find(|l: &&mut Label| l.name == name) {
                Some(existing) => existing.value = value,
                None => labels.push(Label { name, value }),
            }
        }
        Ok(Metric(labels))
    }
}

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MetricVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_keeps_document_order() {
        let m: Metric =
            serde_json::from_str(r#"{"zone":"a","__name__":"up","instance":"x"}"#).unwrap();
        let names: Vec<&str> = m.labels().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["zone", "__name__", "instance"]);
        assert_eq!(m.metric_name(), Some("up"));
    }

    #[test]
    fn duplicate_keys_keep_first_position() {
        let m: Metric = serde_json::from_str(r#"{"a":"1","b":"2","a":"3"}"#).unwrap();
        assert_eq!(m.labels().len(), 2);
        assert_eq!(m.labels()[0].name, "a");
        assert_eq!(m.get("a"), Some("3"));
    }
}

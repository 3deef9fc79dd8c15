use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Label the backend uses for the primary toxicity probability.
pub const TOXIC_LABEL: &str = "toxic";

/// A probability in `[0, 1]`. Always finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    pub const ZERO: Probability = Probability(0.0);

    /// Build a probability, clamping finite out-of-range values.
    /// Returns `None` for NaN and infinities.
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Self(value.clamp(0.0, 1.0)))
    }

    /// Read a probability from a backend JSON value. Non-numbers yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_f64().and_then(Self::new)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Named probability metrics for one scored text, in backend key order.
///
/// Labels are backend-defined (`toxic`, `insult`, `obscene`, ...). Only
/// `toxic` carries meaning for severity; every label is kept for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreVector {
    entries: Vec<(String, Probability)>,
}

impl ScoreVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a backend JSON object.
    ///
    /// Non-object input gives an empty vector; entries whose value is not a
    /// number are dropped.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            if !value.is_null() {
                tracing::debug!(kind = json_kind(value), "score vector is not an object");
            }
            return Self::default();
        };

        let mut entries = Vec::with_capacity(map.len());
        for (label, raw) in map {
            match Probability::from_value(raw) {
                Some(p) => entries.push((label.clone(), p)),
                None => tracing::debug!(%label, "dropping non-numeric score"),
            }
        }
        Self { entries }
    }

    /// Insert or replace a label. New labels are appended.
    pub fn insert(&mut self, label: impl Into<String>, value: Probability) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<Probability> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| *p)
    }

    /// The `toxic` probability, if the backend reported one.
    pub fn toxic(&self) -> Option<Probability> {
        self.get(TOXIC_LABEL)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Probability)> {
        self.entries.iter().map(|(l, p)| (l.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: Into<String>> FromIterator<(L, Probability)> for ScoreVector {
    fn from_iter<I: IntoIterator<Item = (L, Probability)>>(iter: I) -> Self {
        let mut scores = ScoreVector::new();
        for (label, p) in iter {
            scores.insert(label, p);
        }
        scores
    }
}

impl Serialize for ScoreVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, p) in &self.entries {
            map.serialize_entry(label, p)?;
        }
        map.end()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn probability_clamps_out_of_range() {
        assert_eq!(Probability::new(1.5).unwrap().get(), 1.0);
        assert_eq!(Probability::new(-0.2).unwrap().get(), 0.0);
        assert_eq!(Probability::new(0.25).unwrap().get(), 0.25);
    }

    #[test]
    fn probability_rejects_non_finite() {
        assert!(Probability::new(f64::NAN).is_none());
        assert!(Probability::new(f64::INFINITY).is_none());
        assert!(Probability::from_value(&json!("0.5")).is_none());
    }

    #[test]
    fn score_vector_keeps_backend_key_order() {
        let scores = ScoreVector::from_value(&json!({
            "toxic": 0.9,
            "severe_toxic": 0.1,
            "obscene": 0.4,
            "insult": 0.3
        }));
        let labels: Vec<&str> = scores.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["toxic", "severe_toxic", "obscene", "insult"]);
    }

    #[test]
    fn score_vector_drops_non_numeric_entries() {
        let scores = ScoreVector::from_value(&json!({"toxic": "high", "insult": 0.2}));
        assert_eq!(scores.len(), 1);
        assert!(scores.toxic().is_none());
        assert_eq!(scores.get("insult").unwrap().get(), 0.2);
    }

    #[test]
    fn score_vector_from_non_object_is_empty() {
        assert!(ScoreVector::from_value(&json!([0.1, 0.2])).is_empty());
        assert!(ScoreVector::from_value(&Value::Null).is_empty());
    }

    #[test]
    fn score_vector_serializes_in_order() {
        let scores = ScoreVector::from_value(&json!({"toxic": 0.5, "insult": 0.25}));
        let encoded = serde_json::to_string(&scores).unwrap();
        assert_eq!(encoded, r#"{"toxic":0.5,"insult":0.25}"#);
    }

    #[test]
    fn insert_replaces_existing_label_in_place() {
        let mut scores: ScoreVector = [
            ("toxic", Probability::new(0.1).unwrap()),
            ("insult", Probability::new(0.2).unwrap()),
        ]
        .into_iter()
        .collect();
        scores.insert("toxic", Probability::new(0.7).unwrap());
        let pairs: Vec<(&str, f64)> = scores.iter().map(|(l, p)| (l, p.get())).collect();
        assert_eq!(pairs, vec![("toxic", 0.7), ("insult", 0.2)]);
    }
}

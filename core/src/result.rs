use serde::Serialize;
use serde_json::{Map, Value};

use crate::scores::ScoreVector;

/// One scored text. `text` is empty when the backend sent scores only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    text: String,
    scores: ScoreVector,
}

impl Item {
    pub fn new(text: impl Into<String>, scores: ScoreVector) -> Self {
        Self {
            text: text.into(),
            scores,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn scores(&self) -> &ScoreVector {
        &self.scores
    }

    pub(crate) fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            scores: self.scores,
        }
    }
}

/// Backend-computed summary over a batch.
///
/// Only `mean_toxicity` is interpreted; any other field is carried through
/// untouched in `extra` and re-emitted when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub mean_toxicity: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AggregateSummary {
    fn default() -> Self {
        Self {
            mean_toxicity: 0.0,
            extra: Map::new(),
        }
    }
}

impl AggregateSummary {
    pub fn new(mean_toxicity: f64) -> Self {
        Self {
            mean_toxicity,
            extra: Map::new(),
        }
    }

    /// Read an aggregate object. Anything that is not an object gives the
    /// default; a missing or non-numeric `mean_toxicity` reads as 0.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(map) = value.and_then(Value::as_object) else {
            return Self::default();
        };

        let mut extra = map.clone();
        let mean_toxicity = extra
            .remove("mean_toxicity")
            .and_then(|v| v.as_f64())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);

        Self {
            mean_toxicity,
            extra,
        }
    }
}

/// The uniform result every backend response is reduced to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanonicalResult {
    pub aggregate: AggregateSummary,
    pub items: Vec<Item>,
}

impl CanonicalResult {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

//! Reduce the backend's response layouts to a [`CanonicalResult`].
//!
//! The scoring backend has answered in three layouts over time:
//!
//! * `{aggregate, items: [{text, scores}]}`
//! * `{aggregate, scores: [...], comments: [...]}` (parallel arrays)
//! * `{aggregate, scores: [...]}`
//!
//! Layouts overlap (a payload can carry `items` and `scores`), so detection
//! order is fixed: items, then paired, then scores only.

use serde_json::Value;

use crate::result::{AggregateSummary, CanonicalResult, Item};
use crate::scores::{ScoreVector, json_kind};

/// Which layout a raw response uses. Borrowed from the raw payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape<'a> {
    Items(&'a [Value]),
    Paired {
        scores: &'a [Value],
        comments: &'a [Value],
    },
    ScoresOnly(&'a [Value]),
    Empty,
}

impl<'a> ResponseShape<'a> {
    pub fn detect(raw: &'a Value) -> Self {
        let array = move |key: &str| raw.get(key).and_then(Value::as_array).map(Vec::as_slice);

        if let Some(items) = array("items") {
            return ResponseShape::Items(items);
        }
        match (array("scores"), array("comments")) {
            (Some(scores), Some(comments)) => ResponseShape::Paired { scores, comments },
            (Some(scores), None) => ResponseShape::ScoresOnly(scores),
            (None, _) => ResponseShape::Empty,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResponseShape::Items(_) => "items",
            ResponseShape::Paired { .. } => "paired",
            ResponseShape::ScoresOnly(_) => "scores_only",
            ResponseShape::Empty => "empty",
        }
    }

    fn into_items(self) -> Vec<Item> {
        match self {
            ResponseShape::Items(items) => items.iter().map(item_from_value).collect(),
            // `scores` decides the length; surplus comments are dropped.
            ResponseShape::Paired { scores, comments } => scores
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let text = comments.get(i).and_then(Value::as_str).unwrap_or_default();
                    Item::new(text, ScoreVector::from_value(s))
                })
                .collect(),
            ResponseShape::ScoresOnly(scores) => scores
                .iter()
                .map(|s| Item::new("", ScoreVector::from_value(s)))
                .collect(),
            ResponseShape::Empty => Vec::new(),
        }
    }
}

fn item_from_value(value: &Value) -> Item {
    if !value.is_object() {
        tracing::debug!(kind = json_kind(value), "item is not an object");
    }
    let text = value.get("text").and_then(Value::as_str).unwrap_or_default();
    let scores = value
        .get("scores")
        .map(ScoreVector::from_value)
        .unwrap_or_default();
    Item::new(text, scores)
}

/// Normalize any JSON value. Never fails: missing or malformed fields
/// degrade to empty text, empty scores, zero mean, or no items.
pub fn normalize(raw: &Value) -> CanonicalResult {
    let shape = ResponseShape::detect(raw);
    tracing::debug!(shape = shape.name(), "normalizing scoring response");

    CanonicalResult {
        aggregate: AggregateSummary::from_value(raw.get("aggregate")),
        items: shape.into_items(),
    }
}

/// Normalize a response to a text submission, filling empty texts from the
/// submitted comments by position. Texts sent back by the backend win.
pub fn normalize_with_texts(raw: &Value, submitted: &[String]) -> CanonicalResult {
    let mut result = normalize(raw);
    result.items = result
        .items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match submitted.get(i) {
            Some(text) if item.text().is_empty() => item.with_text(text.as_str()),
            _ => item,
        })
        .collect();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn texts(result: &CanonicalResult) -> Vec<&str> {
        result.items.iter().map(Item::text).collect()
    }

    fn toxic(result: &CanonicalResult) -> Vec<Option<f64>> {
        result
            .items
            .iter()
            .map(|i| i.scores().toxic().map(|p| p.get()))
            .collect()
    }

    #[test]
    fn empty_object_gives_empty_result() {
        let result = normalize(&json!({}));
        assert!(result.items.is_empty());
        assert_eq!(result.aggregate.mean_toxicity, 0.0);
    }

    #[test]
    fn non_object_input_is_treated_as_empty() {
        for raw in [json!(null), json!(3), json!("x"), json!([1, 2])] {
            let result = normalize(&raw);
            assert!(result.items.is_empty());
            assert_eq!(result.aggregate.mean_toxicity, 0.0);
        }
    }

    #[test]
    fn items_layout_is_passed_through() {
        let raw = json!({
            "aggregate": {"mean_toxicity": 0.5},
            "items": [{"text": "hi", "scores": {"toxic": 0.9}}]
        });
        let result = normalize(&raw);
        assert_eq!(serde_json::to_value(&result).unwrap(), raw);
    }

    #[test]
    fn items_without_text_get_empty_text() {
        let raw = json!({"items": [{"scores": {"toxic": 0.1}}, {"text": 7, "scores": {}}]});
        let result = normalize(&raw);
        assert_eq!(texts(&result), vec!["", ""]);
        assert_eq!(toxic(&result), vec![Some(0.1), None]);
    }

    #[test]
    fn items_take_precedence_over_scores() {
        let raw = json!({
            "items": [{"text": "a", "scores": {"toxic": 0.2}}],
            "scores": [{"toxic": 0.9}, {"toxic": 0.8}],
            "comments": ["x", "y"]
        });
        let result = normalize(&raw);
        assert_eq!(ResponseShape::detect(&raw).name(), "items");
        assert_eq!(texts(&result), vec!["a"]);
    }

    #[test]
    fn paired_layout_zips_by_index() {
        let raw = json!({
            "aggregate": {"mean_toxicity": 0.2},
            "scores": [{"toxic": 0.1}, {"toxic": 0.8}],
            "comments": ["a", "b"]
        });
        let result = normalize(&raw);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "aggregate": {"mean_toxicity": 0.2},
                "items": [
                    {"text": "a", "scores": {"toxic": 0.1}},
                    {"text": "b", "scores": {"toxic": 0.8}}
                ]
            })
        );
    }

    #[test]
    fn paired_layout_with_short_comments_pads_with_empty_text() {
        let raw = json!({
            "scores": [{"toxic": 0.1}, {"toxic": 0.8}, {"toxic": 0.3}],
            "comments": ["a", "b"]
        });
        let result = normalize(&raw);
        assert_eq!(result.len(), 3);
        assert_eq!(texts(&result), vec!["a", "b", ""]);
    }

    #[test]
    fn paired_layout_drops_surplus_comments() {
        let raw = json!({
            "scores": [{"toxic": 0.1}],
            "comments": ["a", "b", "c"]
        });
        let result = normalize(&raw);
        assert_eq!(texts(&result), vec!["a"]);
    }

    #[test]
    fn scores_only_layout_has_empty_texts() {
        let raw = json!({"aggregate": {"mean_toxicity": 0.3}, "scores": [{"toxic": 0.5}]});
        let result = normalize(&raw);
        assert_eq!(result.aggregate.mean_toxicity, 0.3);
        assert_eq!(texts(&result), vec![""]);
        assert_eq!(toxic(&result), vec![Some(0.5)]);
    }

    #[test]
    fn comments_that_are_not_an_array_fall_back_to_scores_only() {
        let raw = json!({"scores": [{"toxic": 0.5}], "comments": "a"});
        assert_eq!(ResponseShape::detect(&raw).name(), "scores_only");
    }

    #[test]
    fn items_that_are_not_an_array_are_ignored() {
        let raw = json!({"items": {"text": "a"}, "scores": [{"toxic": 0.5}]});
        assert_eq!(ResponseShape::detect(&raw).name(), "scores_only");
    }

    #[test]
    fn comments_without_scores_give_no_items() {
        let raw = json!({"comments": ["a", "b"]});
        assert!(normalize(&raw).is_empty());
    }

    #[test]
    fn output_is_deterministic() {
        let raw = json!({
            "aggregate": {"mean_toxicity": 0.25, "model": "v2"},
            "scores": [{"toxic": 0.1, "insult": 0.05}, {"insult": 0.6, "toxic": 0.7}],
            "comments": ["first", "second"]
        });
        let a = serde_json::to_string(&normalize(&raw)).unwrap();
        let b = serde_json::to_string(&normalize(&raw)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn submitted_texts_fill_scores_only_items() {
        let raw = json!({"aggregate": {"mean_toxicity": 0.4}, "scores": [{"toxic": 0.2}, {"toxic": 0.6}]});
        let submitted = vec!["you are great".to_string(), "you are awful".to_string()];
        let result = normalize_with_texts(&raw, &submitted);
        assert_eq!(texts(&result), vec!["you are great", "you are awful"]);
    }

    #[test]
    fn submitted_texts_do_not_override_backend_texts() {
        let raw = json!({"items": [{"text": "from backend", "scores": {"toxic": 0.2}}, {"scores": {}}]});
        let submitted = vec!["local one".to_string(), "local two".to_string()];
        let result = normalize_with_texts(&raw, &submitted);
        assert_eq!(texts(&result), vec!["from backend", "local two"]);
    }

    #[test]
    fn submitted_texts_shorter_than_scores_leave_rest_empty() {
        let raw = json!({"scores": [{"toxic": 0.2}, {"toxic": 0.6}]});
        let result = normalize_with_texts(&raw, &["only".to_string()]);
        assert_eq!(texts(&result), vec!["only", ""]);
    }
}

use serde::Serialize;

use crate::classify::Level;
use crate::result::{CanonicalResult, Item};
use crate::scores::Probability;

/// Everything needed to draw a result, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub aggregate: AggregateView,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateView {
    /// Three decimal places.
    pub mean_toxicity: String,
    pub item_count: usize,
    pub level_counts: LevelCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl LevelCounts {
    fn record(&mut self, level: Level) {
        match level {
            Level::Low => self.low += 1,
            Level::Medium => self.medium += 1,
            Level::High => self.high += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `toxic` as a whole percentage; 0 when the label is missing.
    pub headline_percent: u8,
    pub level: Level,
    /// Bar fill, in percent of full width.
    pub bar_width: u8,
    pub scores: Vec<ScoreLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreLine {
    pub label: String,
    /// Three decimal places.
    pub value: String,
}

pub fn present(result: &CanonicalResult) -> ResultView {
    let cards: Vec<CardView> = result.items.iter().map(card).collect();

    let mut level_counts = LevelCounts::default();
    for c in &cards {
        level_counts.record(c.level);
    }

    ResultView {
        aggregate: AggregateView {
            mean_toxicity: format!("{:.3}", result.aggregate.mean_toxicity),
            item_count: cards.len(),
            level_counts,
        },
        cards,
    }
}

fn card(item: &Item) -> CardView {
    let toxic = item.scores().toxic().unwrap_or(Probability::ZERO).get();
    // Probability is clamped to [0, 1], so this stays within 0..=100.
    let headline_percent = (toxic * 100.0).round() as u8;

    CardView {
        text: (!item.text().is_empty()).then(|| item.text().to_string()),
        headline_percent,
        level: Level::from_percent(f64::from(headline_percent)),
        bar_width: headline_percent,
        scores: item
            .scores()
            .iter()
            .map(|(label, p)| ScoreLine {
                label: label.to_string(),
                value: format!("{:.3}", p.get()),
            })
            .collect(),
    }
}

use serde::{Deserialize, Serialize};

/// Percentage at or above which a score is `High`.
pub const HIGH_THRESHOLD_PERCENT: f64 = 70.0;
/// Percentage at or above which a score is `Medium`.
pub const MEDIUM_THRESHOLD_PERCENT: f64 = 40.0;

/// Discrete severity used for display.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    /// Classify a value on the percentage scale (`0..=100`).
    ///
    /// Lower band edges are inclusive: exactly 70 is `High`, exactly 40 is
    /// `Medium`. Any input is accepted; NaN falls through to `Low`.
    pub fn from_percent(percent: f64) -> Self {
        if percent >= HIGH_THRESHOLD_PERCENT {
            Level::High
        } else if percent >= MEDIUM_THRESHOLD_PERCENT {
            Level::Medium
        } else {
            Level::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classify a probability. Values outside `[0, 1]` are compared at face value.
pub fn classify(score: f64) -> Level {
    Level::from_percent(score * 100.0)
}

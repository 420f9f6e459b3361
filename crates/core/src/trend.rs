use crate::emotion::Emotion;
use crate::history::RollingHistory;
use serde::{Deserialize, Serialize};

/// Samples needed before any trend is reported.
pub const MIN_TREND_SAMPLES: usize = 3;
/// Trends look at this many most recent samples.
pub const TREND_WINDOW: usize = 5;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmotionTrend {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MovementTrend {
    Static,
    Calm,
    Animated,
    HighlyAnimated,
    InsufficientData,
}

impl MovementTrend {
    pub fn from_level(level: f64) -> Self {
        if level < 0.1 {
            MovementTrend::Static
        } else if level < 0.3 {
            MovementTrend::Calm
        } else if level < 0.6 {
            MovementTrend::Animated
        } else {
            MovementTrend::HighlyAnimated
        }
    }
}

/// Snapshot of the live trends plus the windows they were computed from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrendReport {
    pub emotion_trend: EmotionTrend,
    pub movement_trend: MovementTrend,
    pub confidence_average: f64,
    pub emotion_history: Vec<Emotion>,
    pub movement_history: Vec<f64>,
}

/// Read-only view over a [`RollingHistory`].
#[derive(Clone, Copy, Debug)]
pub struct TrendAnalyzer<'a> {
    history: &'a RollingHistory,
}

impl<'a> TrendAnalyzer<'a> {
    pub fn new(history: &'a RollingHistory) -> Self {
        Self { history }
    }

    /// Positive vs negative expressions over the recent window; equal counts are `Stable`.
    pub fn emotion_trend(&self) -> EmotionTrend {
        let emotions = self.history.emotions();
        if emotions.len() < MIN_TREND_SAMPLES {
            return EmotionTrend::InsufficientData;
        }
        let (positive, negative) =
            emotions
                .recent(TREND_WINDOW)
                .fold((0usize, 0usize), |(pos, neg), emotion| {
                    (
                        pos + usize::from(emotion.is_positive()),
                        neg + usize::from(emotion.is_negative()),
                    )
                });
        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => EmotionTrend::Improving,
            std::cmp::Ordering::Less => EmotionTrend::Declining,
            std::cmp::Ordering::Equal => EmotionTrend::Stable,
        }
    }

    pub fn movement_trend(&self) -> MovementTrend {
        let movements = self.history.movements();
        if movements.len() < MIN_TREND_SAMPLES {
            return MovementTrend::InsufficientData;
        }
        MovementTrend::from_level(mean(movements.recent(TREND_WINDOW).copied()))
    }

    pub fn confidence_average(&self) -> f64 {
        mean(self.history.confidences().iter().copied())
    }

    pub fn report(&self) -> TrendReport {
        TrendReport {
            emotion_trend: self.emotion_trend(),
            movement_trend: self.movement_trend(),
            confidence_average: self.confidence_average(),
            emotion_history: self.history.emotions().to_vec(),
            movement_history: self.history.movements().to_vec(),
        }
    }
}

/// Arithmetic mean, `0.0` for an empty sequence.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(samples: &[(Emotion, f64)]) -> RollingHistory {
        let mut history = RollingHistory::new(30);
        for &(emotion, movement) in samples {
            history.record(emotion, 0.5, movement);
        }
        history
    }

    #[test]
    fn two_samples_are_insufficient_three_are_not() {
        let two = history_of(&[(Emotion::Happy, 0.2), (Emotion::Happy, 0.2)]);
        let analyzer = TrendAnalyzer::new(&two);
        assert_eq!(analyzer.emotion_trend(), EmotionTrend::InsufficientData);
        assert_eq!(analyzer.movement_trend(), MovementTrend::InsufficientData);

        let three = history_of(&[
            (Emotion::Happy, 0.2),
            (Emotion::Happy, 0.2),
            (Emotion::Happy, 0.2),
        ]);
        let analyzer = TrendAnalyzer::new(&three);
        assert_eq!(analyzer.emotion_trend(), EmotionTrend::Improving);
        assert_eq!(analyzer.movement_trend(), MovementTrend::Calm);
    }

    #[test]
    fn only_last_five_emotions_count() {
        let history = history_of(&[
            (Emotion::Happy, 0.0),
            (Emotion::Happy, 0.0),
            (Emotion::Happy, 0.0),
            (Emotion::Sad, 0.0),
            (Emotion::Angry, 0.0),
            (Emotion::Neutral, 0.0),
            (Emotion::Fear, 0.0),
            (Emotion::Surprise, 0.0),
        ]);
        assert_eq!(
            TrendAnalyzer::new(&history).emotion_trend(),
            EmotionTrend::Declining
        );
    }

    #[test]
    fn equal_counts_are_stable() {
        let history = history_of(&[
            (Emotion::Happy, 0.0),
            (Emotion::Sad, 0.0),
            (Emotion::Neutral, 0.0),
        ]);
        assert_eq!(
            TrendAnalyzer::new(&history).emotion_trend(),
            EmotionTrend::Stable
        );
    }

    #[test]
    fn movement_bands() {
        assert_eq!(MovementTrend::from_level(0.05), MovementTrend::Static);
        assert_eq!(MovementTrend::from_level(0.1), MovementTrend::Calm);
        assert_eq!(MovementTrend::from_level(0.3), MovementTrend::Animated);
        assert_eq!(MovementTrend::from_level(0.6), MovementTrend::HighlyAnimated);
    }

    #[test]
    fn movement_trend_uses_recent_window_mean() {
        let history = history_of(&[
            (Emotion::Neutral, 0.9),
            (Emotion::Neutral, 0.9),
            (Emotion::Neutral, 0.0),
            (Emotion::Neutral, 0.0),
            (Emotion::Neutral, 0.0),
            (Emotion::Neutral, 0.1),
            (Emotion::Neutral, 0.1),
        ]);
        assert_eq!(
            TrendAnalyzer::new(&history).movement_trend(),
            MovementTrend::Static
        );
    }

    #[test]
    fn confidence_average_covers_full_history() {
        let mut history = RollingHistory::new(10);
        assert_eq!(TrendAnalyzer::new(&history).confidence_average(), 0.0);
        for c in [0.2, 0.4, 0.9] {
            history.record(Emotion::Neutral, c, 0.0);
        }
        let avg = TrendAnalyzer::new(&history).confidence_average();
        assert!((avg - 0.5).abs() < 1e-12);
    }
}

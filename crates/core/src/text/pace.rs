use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaceCategory {
    TooSlow,
    Optimal,
    TooFast,
}

impl PaceCategory {
    pub fn from_wpm(words_per_minute: f64) -> Self {
        if words_per_minute < 100.0 {
            PaceCategory::TooSlow
        } else if words_per_minute <= 160.0 {
            PaceCategory::Optimal
        } else {
            PaceCategory::TooFast
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PaceCategory::TooSlow => "Speaking a bit slowly. Pick up the pace to hold attention.",
            PaceCategory::Optimal => "Comfortable speaking pace, easy for an audience to follow.",
            PaceCategory::TooFast => "Speaking quickly. Slow down and let key points land.",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SpeakingRate {
    pub words_per_minute: f64,
    pub category: PaceCategory,
}

/// Words per minute of `transcript` spoken over `duration`, `None` for a zero duration.
pub fn speaking_rate(transcript: &str, duration: Duration) -> Option<SpeakingRate> {
    let minutes = duration.as_secs_f64() / 60.0;
    if minutes <= 0.0 {
        return None;
    }
    let words = transcript.split_whitespace().count() as f64;
    let words_per_minute = (words / minutes * 10.0).round() / 10.0;
    Some(SpeakingRate {
        words_per_minute,
        category: PaceCategory::from_wpm(words_per_minute),
    })
}

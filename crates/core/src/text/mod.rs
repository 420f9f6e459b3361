//! Multi-factor quality scoring of a spoken transcript.

mod backends;
mod lexicon;
pub mod pace;
mod scorer;
mod tokenize;

pub use backends::{GrammarChecker, SentimentAnalyzer, TextBackendError};
pub use pace::{speaking_rate, PaceCategory, SpeakingRate};
pub use scorer::{ScoreError, TextQualityScorer};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A scored aspect of a transcript. The first six are measured directly, the rest are
/// derived from them.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Clarity,
    Vocabulary,
    Grammar,
    Confidence,
    Engagement,
    Positivity,
    Fluency,
    Coherence,
    Pace,
    Energy,
    Tone,
    Authenticity,
    Persuasiveness,
    #[serde(rename = "Overall Impact")]
    OverallImpact,
}

impl Dimension {
    pub const ALL: [Dimension; 14] = [
        Dimension::Clarity,
        Dimension::Vocabulary,
        Dimension::Grammar,
        Dimension::Confidence,
        Dimension::Engagement,
        Dimension::Positivity,
        Dimension::Fluency,
        Dimension::Coherence,
        Dimension::Pace,
        Dimension::Energy,
        Dimension::Tone,
        Dimension::Authenticity,
        Dimension::Persuasiveness,
        Dimension::OverallImpact,
    ];

    pub const MEASURED: [Dimension; 6] = [
        Dimension::Clarity,
        Dimension::Vocabulary,
        Dimension::Grammar,
        Dimension::Confidence,
        Dimension::Engagement,
        Dimension::Positivity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Clarity => "Clarity",
            Dimension::Vocabulary => "Vocabulary",
            Dimension::Grammar => "Grammar",
            Dimension::Confidence => "Confidence",
            Dimension::Engagement => "Engagement",
            Dimension::Positivity => "Positivity",
            Dimension::Fluency => "Fluency",
            Dimension::Coherence => "Coherence",
            Dimension::Pace => "Pace",
            Dimension::Energy => "Energy",
            Dimension::Tone => "Tone",
            Dimension::Authenticity => "Authenticity",
            Dimension::Persuasiveness => "Persuasiveness",
            Dimension::OverallImpact => "Overall Impact",
        }
    }

    pub fn is_measured(&self) -> bool {
        Self::MEASURED.contains(self)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scores in `[0, 100]` for every [`Dimension`], plus coaching feedback.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TextScoreSet {
    pub scores: BTreeMap<Dimension, f64>,
    /// One line per measured dimension describing what drove its score.
    pub explanations: BTreeMap<Dimension, String>,
    pub feedback: Vec<String>,
    /// Scores are randomized placeholders because scoring itself failed.
    pub degraded: bool,
    /// Dimensions scored by a heuristic because their backend was missing or failed.
    pub fallbacks: Vec<Dimension>,
    pub word_count: usize,
}

impl TextScoreSet {
    pub fn score(&self, dimension: Dimension) -> f64 {
        self.scores.get(&dimension).copied().unwrap_or(0.0)
    }

    pub fn average(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.values().sum::<f64>() / self.scores.len() as f64
    }
}

mod backend;
mod classifier;
mod synthetic;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use backend::{BackendOutput, EmotionBackend, EmotionError, UnavailableBackend};
pub use classifier::{Classification, ClassificationSource, ClassifierStats, EmotionClassifier};
pub use synthetic::SyntheticEmotionBackend;

/// Per-class probabilities in `[0, 1]`.
pub type EmotionScores = BTreeMap<Emotion, f64>;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Surprise,
    Fear,
    Disgust,
    Neutral,
    NoFaceDetected,
    Error,
}

impl Emotion {
    /// Labels a classifier can produce for a visible face.
    pub const CLASSIFIABLE: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprise,
        Emotion::Fear,
        Emotion::Disgust,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprise => "surprise",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::Neutral => "neutral",
            Emotion::NoFaceDetected => "no_face_detected",
            Emotion::Error => "error",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "happy" | "happiness" => Some(Emotion::Happy),
            "sad" | "sadness" => Some(Emotion::Sad),
            "angry" | "anger" => Some(Emotion::Angry),
            "surprise" | "surprised" => Some(Emotion::Surprise),
            "fear" | "fearful" => Some(Emotion::Fear),
            "disgust" | "disgusted" => Some(Emotion::Disgust),
            "neutral" => Some(Emotion::Neutral),
            "no_face_detected" => Some(Emotion::NoFaceDetected),
            "error" => Some(Emotion::Error),
            _ => None,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Emotion::Happy | Emotion::Surprise)
    }

    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            Emotion::Sad | Emotion::Angry | Emotion::Fear | Emotion::Disgust
        )
    }

    /// True for labels that describe an observed expression.
    pub fn is_expression(&self) -> bool {
        !matches!(self, Emotion::NoFaceDetected | Emotion::Error)
    }

    /// How strongly this expression reads as engaged to an audience.
    pub fn engagement_weight(&self) -> f64 {
        match self {
            Emotion::Happy => 0.95,
            Emotion::Surprise => 0.85,
            Emotion::Neutral => 0.65,
            Emotion::Sad => 0.40,
            Emotion::Angry => 0.30,
            Emotion::Fear => 0.25,
            Emotion::Disgust => 0.20,
            Emotion::NoFaceDetected | Emotion::Error => 0.5,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

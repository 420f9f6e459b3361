use crate::emotion::Emotion;
use crate::pipeline::FrameAnalysisResult;
use crate::trend::{MovementTrend, TrendReport};
use serde::{Deserialize, Serialize};

const MAX_SUGGESTIONS: usize = 3;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    High,
    Medium,
    Low,
}

/// Coaching hints for the live view, derived from the latest frame and the current trends.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LiveFeedback {
    pub emotion_message: String,
    pub confidence_level: Level,
    pub movement_message: String,
    pub engagement_level: Level,
    pub suggestions: Vec<String>,
}

pub fn live_feedback(result: &FrameAnalysisResult, trends: &TrendReport) -> LiveFeedback {
    LiveFeedback {
        emotion_message: emotion_message(result.emotion),
        confidence_level: level(result.emotion_confidence, 0.7, 0.4),
        movement_message: movement_message(trends.movement_trend).to_string(),
        engagement_level: level(result.engagement_score, 0.7, 0.5),
        suggestions: suggestions(result),
    }
}

fn level(value: f64, high: f64, medium: f64) -> Level {
    if value > high {
        Level::High
    } else if value > medium {
        Level::Medium
    } else {
        Level::Low
    }
}

fn emotion_message(emotion: Emotion) -> String {
    match emotion {
        e if e.is_positive() => format!("Great energy! Your {e} expression is engaging."),
        Emotion::Neutral => "Neutral expression detected. Consider adding more emotion.".to_string(),
        Emotion::NoFaceDetected => "No face in view. Move into the centre of the frame.".to_string(),
        Emotion::Error => "Analysis hiccup on this frame.".to_string(),
        e => format!("{e} detected. Try to project more positivity."),
    }
}

fn movement_message(trend: MovementTrend) -> &'static str {
    match trend {
        MovementTrend::Static => "Very still. Consider adding gentle gestures.",
        MovementTrend::Calm => "Good movement level, calm and controlled.",
        MovementTrend::Animated => "Great animation! Your gestures are engaging.",
        MovementTrend::HighlyAnimated | MovementTrend::InsufficientData => {
            "Analyzing movement patterns..."
        }
    }
}

fn suggestions(result: &FrameAnalysisResult) -> Vec<String> {
    let mut suggestions = Vec::new();

    if result.emotion_confidence < 0.5 {
        suggestions.push("Face the camera so expressions can be read reliably.");
    }
    if matches!(result.emotion, Emotion::Sad | Emotion::Angry | Emotion::Fear) {
        suggestions.push("Smile more: positive expressions increase engagement.");
    }
    if result.emotion == Emotion::Neutral {
        suggestions.push("Show enthusiasm: add more expression to captivate your audience.");
    }
    if result.movement_level < 0.1 {
        suggestions.push("Add gestures to emphasize your points.");
    } else if result.movement_level > 0.8 {
        suggestions.push("Calm your movements a little for better focus.");
    }
    if result.engagement_score < 0.5 {
        suggestions.push("Increase energy: combine positive expressions with purposeful movement.");
    }

    if suggestions.is_empty() {
        suggestions.push("Great job! Keep your current presentation style.");
        suggestions.push("Your signals are well balanced, stay consistent.");
    }

    suggestions
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::EmotionScores;
    use crate::trend::EmotionTrend;
    use std::time::SystemTime;

    fn result(emotion: Emotion, confidence: f64, movement: f64, engagement: f64) -> FrameAnalysisResult {
        FrameAnalysisResult {
            emotion,
            emotion_confidence: confidence,
            emotion_scores: EmotionScores::new(),
            movement_level: movement,
            engagement_score: engagement,
            overall_confidence: (confidence + engagement) / 2.0,
            face_detected: true,
            face_regions: Vec::new(),
            timestamp: SystemTime::now(),
            analysis_latency_ms: 1.0,
            classification_source: None,
            error: None,
        }
    }

    fn trends(movement_trend: MovementTrend) -> TrendReport {
        TrendReport {
            emotion_trend: EmotionTrend::Stable,
            movement_trend,
            confidence_average: 0.5,
            emotion_history: Vec::new(),
            movement_history: Vec::new(),
        }
    }

    #[test]
    fn levels_use_strict_thresholds() {
        let fb = live_feedback(&result(Emotion::Happy, 0.7, 0.2, 0.5), &trends(MovementTrend::Calm));
        assert_eq!(fb.confidence_level, Level::Medium);
        assert_eq!(fb.engagement_level, Level::Low);

        let fb = live_feedback(&result(Emotion::Happy, 0.71, 0.2, 0.71), &trends(MovementTrend::Calm));
        assert_eq!(fb.confidence_level, Level::High);
        assert_eq!(fb.engagement_level, Level::High);

        let fb = live_feedback(&result(Emotion::Happy, 0.4, 0.2, 0.6), &trends(MovementTrend::Calm));
        assert_eq!(fb.confidence_level, Level::Low);
        assert_eq!(fb.engagement_level, Level::Medium);
    }

    #[test]
    fn emotion_messages() {
        let fb = live_feedback(&result(Emotion::Surprise, 0.9, 0.2, 0.8), &trends(MovementTrend::Calm));
        assert!(fb.emotion_message.contains("surprise"));
        let fb = live_feedback(&result(Emotion::Angry, 0.9, 0.2, 0.8), &trends(MovementTrend::Calm));
        assert!(fb.emotion_message.starts_with("angry detected"));
    }

    #[test]
    fn movement_message_follows_trend() {
        let fb = live_feedback(&result(Emotion::Happy, 0.9, 0.2, 0.8), &trends(MovementTrend::Static));
        assert!(fb.movement_message.contains("gentle gestures"));
        let fb = live_feedback(
            &result(Emotion::Happy, 0.9, 0.2, 0.8),
            &trends(MovementTrend::InsufficientData),
        );
        assert_eq!(fb.movement_message, "Analyzing movement patterns...");
    }

    #[test]
    fn suggestions_are_capped_at_three() {
        let fb = live_feedback(&result(Emotion::Sad, 0.2, 0.0, 0.2), &trends(MovementTrend::Static));
        assert_eq!(fb.suggestions.len(), 3);
        assert!(fb.suggestions[0].starts_with("Face the camera"));
    }

    #[test]
    fn balanced_signals_get_praise() {
        let fb = live_feedback(&result(Emotion::Happy, 0.9, 0.3, 0.8), &trends(MovementTrend::Calm));
        assert_eq!(fb.suggestions.len(), 2);
        assert!(fb.suggestions[0].starts_with("Great job"));
    }
}

//! End-of-session aggregation of the rolling histories into a report.

use crate::emotion::Emotion;
use crate::history::RollingHistory;
use crate::pipeline::PerformanceStats;
use crate::trend::{mean, EmotionTrend, MovementTrend, TrendAnalyzer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

const LOG_TARGET: &str = "summary";

pub const CONFIDENCE_WEIGHT: f64 = 40.0;
pub const DIVERSITY_WEIGHT: f64 = 15.0;
pub const MOVEMENT_WEIGHT: f64 = 200.0;
pub const SCORE_BASELINE: f64 = 45.0;

const DEFAULT_DOMINANT: Emotion = Emotion::Neutral;
const DEFAULT_DIVERSITY: u32 = 1;
const DEFAULT_AVERAGE_MOVEMENT: f64 = 0.3;
const DEFAULT_CONFIDENCE_AVERAGE: f64 = 0.8;
const DEFAULT_MOVEMENT_RANGE: MovementRange = MovementRange { min: 0.1, max: 0.5 };

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct MovementRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl PerformanceBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            PerformanceBand::Excellent
        } else if score >= 75.0 {
            PerformanceBand::Good
        } else if score >= 60.0 {
            PerformanceBand::Average
        } else {
            PerformanceBand::NeedsImprovement
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    pub duration_seconds: f64,
    pub total_frames_analyzed: u64,
    pub analysis_fps: f64,
    pub dominant_emotion: Emotion,
    pub emotion_distribution: BTreeMap<Emotion, usize>,
    pub emotion_diversity_score: u32,
    pub average_movement: f64,
    pub movement_range: MovementRange,
    pub movement_trend: MovementTrend,
    pub average_engagement: f64,
    pub confidence_average: f64,
    pub emotion_trend: EmotionTrend,
    pub insights: Vec<String>,
    pub overall_score: f64,
    pub performance_band: PerformanceBand,
    pub performance: PerformanceStats,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SessionSummarizer;

impl SessionSummarizer {
    pub fn summarize(
        &self,
        history: &RollingHistory,
        stats: &PerformanceStats,
        frames_analyzed: u64,
        duration: Duration,
    ) -> SessionSummary {
        let duration_seconds = duration.as_secs_f64();
        let analysis_fps = if duration_seconds > 0.0 {
            frames_analyzed as f64 / duration_seconds
        } else {
            0.0
        };

        let emotion_distribution = distribution(history);
        let trends = TrendAnalyzer::new(history);

        let (dominant_emotion, emotion_diversity_score, average_movement, movement_range, confidence_average) =
            if history.is_empty() {
                (
                    DEFAULT_DOMINANT,
                    DEFAULT_DIVERSITY,
                    DEFAULT_AVERAGE_MOVEMENT,
                    DEFAULT_MOVEMENT_RANGE,
                    DEFAULT_CONFIDENCE_AVERAGE,
                )
            } else {
                (
                    dominant_emotion(history).unwrap_or(DEFAULT_DOMINANT),
                    diversity(history),
                    mean(history.movements().iter().copied()),
                    observed_range(history),
                    trends.confidence_average(),
                )
            };

        let average_engagement = ((confidence_average + average_movement) / 2.0).min(1.0);
        let overall_score = overall_score(confidence_average, emotion_diversity_score, average_movement);

        let insights = insights(
            dominant_emotion,
            emotion_diversity_score,
            average_movement,
            confidence_average,
            stats,
        );

        tracing::info!(
            target: LOG_TARGET,
            frames = frames_analyzed,
            duration_seconds,
            dominant = %dominant_emotion,
            overall_score,
            "session summarized"
        );

        SessionSummary {
            duration_seconds,
            total_frames_analyzed: frames_analyzed,
            analysis_fps,
            dominant_emotion,
            emotion_distribution,
            emotion_diversity_score,
            average_movement,
            movement_range,
            movement_trend: trends.movement_trend(),
            average_engagement,
            confidence_average,
            emotion_trend: trends.emotion_trend(),
            insights,
            overall_score,
            performance_band: PerformanceBand::from_score(overall_score),
            performance: *stats,
        }
    }

    /// Summary of a session that produced no usable data.
    pub fn empty(&self, duration: Duration) -> SessionSummary {
        self.summarize(
            &RollingHistory::default(),
            &PerformanceStats::default(),
            0,
            duration,
        )
    }
}

/// `clamp(conf*40 + diversity*15 + movement*200 + 45, 0, 100)`.
pub fn overall_score(confidence_average: f64, diversity: u32, average_movement: f64) -> f64 {
    let raw = confidence_average * CONFIDENCE_WEIGHT
        + f64::from(diversity) * DIVERSITY_WEIGHT
        + average_movement * MOVEMENT_WEIGHT
        + SCORE_BASELINE;
    raw.clamp(0.0, 100.0)
}

fn distribution(history: &RollingHistory) -> BTreeMap<Emotion, usize> {
    let mut counts = BTreeMap::new();
    for emotion in history.emotions().iter() {
        *counts.entry(*emotion).or_insert(0) += 1;
    }
    counts
}

/// Most frequent expression; ties go to whichever appeared first.
fn dominant_emotion(history: &RollingHistory) -> Option<Emotion> {
    let mut first_seen: Vec<(Emotion, usize)> = Vec::new();
    for emotion in history.emotions().iter().filter(|e| e.is_expression()) {
        match first_seen.iter_mut().find(|(seen, _)| seen == emotion) {
            Some((_, count)) => *count += 1,
            None => first_seen.push((*emotion, 1)),
        }
    }
    let mut best: Option<(Emotion, usize)> = None;
    for (emotion, count) in first_seen {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((emotion, count));
        }
    }
    best.map(|(emotion, _)| emotion)
}

fn diversity(history: &RollingHistory) -> u32 {
    let distinct = history
        .emotions()
        .iter()
        .filter(|e| e.is_expression())
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    u32::try_from(distinct).unwrap_or(u32::MAX).max(1)
}

fn observed_range(history: &RollingHistory) -> MovementRange {
    history
        .movements()
        .iter()
        .fold(None, |range: Option<MovementRange>, &m| {
            Some(match range {
                None => MovementRange { min: m, max: m },
                Some(r) => MovementRange {
                    min: r.min.min(m),
                    max: r.max.max(m),
                },
            })
        })
        .unwrap_or(DEFAULT_MOVEMENT_RANGE)
}

fn insights(
    dominant: Emotion,
    diversity: u32,
    movement: f64,
    confidence: f64,
    stats: &PerformanceStats,
) -> Vec<String> {
    let mut insights = Vec::new();

    if stats.frames_processed > 0 {
        if stats.average_analysis_ms < 50.0 {
            insights.push("Excellent performance: ultra-fast analysis (< 50ms per frame)".to_string());
        } else if stats.average_analysis_ms < 100.0 {
            insights.push("Good performance: fast analysis keeps the live view smooth".to_string());
        }

        if stats.face_detection_rate > 90.0 {
            insights.push("Excellent face detection: consistent tracking throughout the session".to_string());
        } else if stats.face_detection_rate > 70.0 {
            insights.push("Good face detection: mostly consistent tracking".to_string());
        } else {
            insights.push("Face detection: consider better lighting or camera positioning".to_string());
        }
    }

    match dominant {
        Emotion::Happy => insights.push(
            "Positive energy: your expressions create a strong audience connection".to_string(),
        ),
        Emotion::Neutral => insights.push(
            "Neutral expression: add more emotional variety for better engagement".to_string(),
        ),
        _ => {}
    }

    if diversity >= 4 {
        insights.push("Excellent variety: great emotional range demonstrated".to_string());
    } else if diversity >= 2 {
        insights.push("Good expression range: nice variety, try expanding further".to_string());
    }

    if movement < 0.1 {
        insights.push("Static presentation: add gentle gestures for better engagement".to_string());
    } else if movement <= 0.4 {
        insights.push("Optimal movement: a good balance for professional presentations".to_string());
    } else {
        insights.push("High energy: great animation, make sure movements support your message".to_string());
    }

    if confidence >= 0.8 {
        insights.push("High confidence: consistent, high-quality signal".to_string());
    } else if confidence >= 0.6 {
        insights.push("Good confidence: solid performance with room for optimization".to_string());
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(samples: &[(Emotion, f64, f64)]) -> RollingHistory {
        let mut history = RollingHistory::new(30);
        for &(emotion, confidence, movement) in samples {
            history.record(emotion, confidence, movement);
        }
        history
    }

    #[test]
    fn empty_session_uses_defaults() {
        let summary = SessionSummarizer.empty(Duration::ZERO);
        assert_eq!(summary.dominant_emotion, Emotion::Neutral);
        assert_eq!(summary.emotion_diversity_score, 1);
        assert_eq!(summary.average_movement, 0.3);
        assert_eq!(summary.confidence_average, 0.8);
        assert!(summary.emotion_distribution.is_empty());
        assert_eq!(summary.movement_range, MovementRange { min: 0.1, max: 0.5 });
        assert_eq!(summary.analysis_fps, 0.0);
        assert_eq!(summary.emotion_trend, EmotionTrend::InsufficientData);
        assert!((summary.average_engagement - 0.55).abs() < 1e-12);
    }

    #[test]
    fn empty_session_skips_performance_insights() {
        let summary = SessionSummarizer.empty(Duration::from_secs(5));
        assert!(summary
            .insights
            .iter()
            .all(|i| !i.contains("performance") && !i.contains("detection")));
        assert!(summary.insights[0].starts_with("Neutral expression"));
    }

    #[test]
    fn overall_score_is_clamped() {
        // 1.0*40 + 7*15 + 1.0*200 + 45 = 390
        assert_eq!(overall_score(1.0, 7, 1.0), 100.0);
        assert_eq!(overall_score(0.0, 0, -1.0), 0.0);
        assert!((overall_score(0.5, 1, 0.0) - 80.0).abs() < 1e-12);
    }

    #[test]
    fn dominant_tie_goes_to_first_observed() {
        let history = history_of(&[
            (Emotion::Sad, 0.5, 0.1),
            (Emotion::Happy, 0.5, 0.1),
            (Emotion::Happy, 0.5, 0.1),
            (Emotion::Sad, 0.5, 0.1),
        ]);
        assert_eq!(dominant_emotion(&history), Some(Emotion::Sad));
    }

    #[test]
    fn no_face_and_error_are_not_counted_for_dominance_or_diversity() {
        let history = history_of(&[
            (Emotion::NoFaceDetected, 0.0, 0.1),
            (Emotion::NoFaceDetected, 0.0, 0.1),
            (Emotion::Error, 0.0, 0.1),
            (Emotion::Surprise, 0.6, 0.1),
        ]);
        assert_eq!(dominant_emotion(&history), Some(Emotion::Surprise));
        assert_eq!(diversity(&history), 1);
    }

    #[test]
    fn summary_aggregates_history() {
        let history = history_of(&[
            (Emotion::Happy, 0.9, 0.2),
            (Emotion::Happy, 0.8, 0.3),
            (Emotion::Neutral, 0.7, 0.1),
            (Emotion::Surprise, 0.6, 0.4),
        ]);
        let stats = PerformanceStats {
            frames_processed: 4,
            faces_detected: 4,
            average_analysis_ms: 20.0,
            cache_hit_rate: 50.0,
            face_detection_rate: 100.0,
            fps_capacity: 50.0,
        };
        let summary = SessionSummarizer.summarize(&history, &stats, 4, Duration::from_secs(2));

        assert_eq!(summary.dominant_emotion, Emotion::Happy);
        assert_eq!(summary.emotion_diversity_score, 3);
        assert_eq!(summary.emotion_distribution.get(&Emotion::Happy), Some(&2));
        assert!((summary.average_movement - 0.25).abs() < 1e-12);
        assert!((summary.confidence_average - 0.75).abs() < 1e-12);
        assert_eq!(summary.movement_range, MovementRange { min: 0.1, max: 0.4 });
        assert!((summary.analysis_fps - 2.0).abs() < 1e-12);
        assert_eq!(summary.emotion_trend, EmotionTrend::Improving);
        assert_eq!(summary.movement_trend, MovementTrend::Calm);
        assert_eq!(summary.overall_score, 100.0);
        assert_eq!(summary.performance_band, PerformanceBand::Excellent);

        assert_eq!(
            summary.insights,
            vec![
                "Excellent performance: ultra-fast analysis (< 50ms per frame)".to_string(),
                "Excellent face detection: consistent tracking throughout the session".to_string(),
                "Positive energy: your expressions create a strong audience connection".to_string(),
                "Good expression range: nice variety, try expanding further".to_string(),
                "Optimal movement: a good balance for professional presentations".to_string(),
                "Good confidence: solid performance with room for optimization".to_string(),
            ]
        );
    }

    #[test]
    fn engagement_is_capped_at_one() {
        let history = history_of(&[(Emotion::Happy, 1.0, 1.0); 3]);
        let summary =
            SessionSummarizer.summarize(&history, &PerformanceStats::default(), 3, Duration::from_secs(1));
        assert_eq!(summary.average_engagement, 1.0);
    }

    #[test]
    fn performance_bands() {
        assert_eq!(PerformanceBand::from_score(90.0), PerformanceBand::Excellent);
        assert_eq!(PerformanceBand::from_score(89.9), PerformanceBand::Good);
        assert_eq!(PerformanceBand::from_score(60.0), PerformanceBand::Average);
        assert_eq!(PerformanceBand::from_score(59.0), PerformanceBand::NeedsImprovement);
    }
}

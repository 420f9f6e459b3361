use crate::config::AnalyzerConfig;
use crate::emotion::{
    ClassificationSource, Emotion, EmotionBackend, EmotionClassifier, EmotionScores,
    SyntheticEmotionBackend, UnavailableBackend,
};
use crate::face::{detect_or_assume, CentralFaceDetector, FaceDetectError, FaceDetector, FaceRegion};
use crate::frame::Frame;
use crate::history::RollingHistory;
use crate::movement::FrameMovementEstimator;
use crate::trend::{TrendAnalyzer, TrendReport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Instant, SystemTime};

const LOG_TARGET: &str = "pipeline";

#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    #[error("frame has no pixels")]
    EmptyFrame,
    #[error(transparent)]
    FaceDetection(#[from] FaceDetectError),
}

/// Outcome of analyzing one frame.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FrameAnalysisResult {
    pub emotion: Emotion,
    pub emotion_confidence: f64,
    pub emotion_scores: EmotionScores,
    pub movement_level: f64,
    pub engagement_score: f64,
    pub overall_confidence: f64,
    pub face_detected: bool,
    pub face_regions: Vec<FaceRegion>,
    pub timestamp: SystemTime,
    pub analysis_latency_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_source: Option<ClassificationSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FrameAnalysisResult {
    fn no_face(movement_level: f64, analysis_latency_ms: f64) -> Self {
        Self {
            emotion: Emotion::NoFaceDetected,
            emotion_confidence: 0.0,
            emotion_scores: EmotionScores::new(),
            movement_level,
            engagement_score: 0.0,
            overall_confidence: 0.0,
            face_detected: false,
            face_regions: Vec::new(),
            timestamp: SystemTime::now(),
            analysis_latency_ms,
            classification_source: None,
            error: None,
        }
    }

    fn failed(error: String, analysis_latency_ms: f64) -> Self {
        Self {
            emotion: Emotion::Error,
            movement_level: 0.0,
            error: Some(error),
            ..Self::no_face(0.0, analysis_latency_ms)
        }
    }
}

/// Weight of the movement level in the engagement fusion: too little reads as stiff,
/// too much as restless.
pub fn movement_weight(movement: f64) -> f64 {
    if movement < 0.1 {
        0.6
    } else if movement <= 0.4 {
        1.0
    } else {
        (1.0 - (movement - 0.4) * 1.5).max(0.7)
    }
}

/// Fuses expression, movement and classifier confidence into an engagement score in `[0, 1]`.
pub fn engagement_score(emotion: Emotion, movement: f64, confidence: f64) -> f64 {
    let confidence_factor = (confidence * 1.2).min(1.0);
    let engagement = emotion.engagement_weight() * 0.5
        + movement_weight(movement) * 0.3
        + confidence_factor * 0.2;
    engagement.min(1.0)
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PerformanceStats {
    pub frames_processed: u64,
    pub faces_detected: u64,
    pub average_analysis_ms: f64,
    /// Percentage of frames answered from the classifier cache.
    pub cache_hit_rate: f64,
    /// Percentage of frames with a visible face.
    pub face_detection_rate: f64,
    /// Frames per second the pipeline could sustain at its average latency.
    pub fps_capacity: f64,
}

/// Everything needed to build a fresh pipeline for each session.
#[derive(Clone)]
pub struct PipelineBuilder {
    config: AnalyzerConfig,
    detector: Arc<dyn FaceDetector>,
    backend: Arc<dyn EmotionBackend>,
    synthetic_seed: Option<u64>,
}

impl PipelineBuilder {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            detector: Arc::new(CentralFaceDetector),
            backend: Arc::new(UnavailableBackend),
            synthetic_seed: None,
        }
    }

    pub fn face_detector(mut self, detector: Arc<dyn FaceDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn emotion_backend(mut self, backend: Arc<dyn EmotionBackend>) -> Self {
        self.backend = backend;
        self
    }

    /// Makes synthetic fallbacks reproducible.
    pub fn synthetic_seed(mut self, seed: u64) -> Self {
        self.synthetic_seed = Some(seed);
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn build(&self) -> FrameAnalysisPipeline {
        let mut classifier = EmotionClassifier::new(self.backend.clone(), &self.config);
        if let Some(seed) = self.synthetic_seed {
            classifier = classifier.with_synthetic(SyntheticEmotionBackend::seeded(seed));
        }
        FrameAnalysisPipeline {
            detector: self.detector.clone(),
            classifier,
            movement: FrameMovementEstimator::from_config(&self.config),
            history: RollingHistory::new(self.config.history_capacity.max(1)),
            latest: None,
            frames_processed: 0,
            faces_detected: 0,
            total_latency_ms: 0.0,
        }
    }
}

/// Per-frame orchestrator: movement, face detection, emotion, engagement fusion.
///
/// Owns the session's [`RollingHistory`]; it is the only writer.
pub struct FrameAnalysisPipeline {
    detector: Arc<dyn FaceDetector>,
    classifier: EmotionClassifier,
    movement: FrameMovementEstimator,
    history: RollingHistory,
    latest: Option<FrameAnalysisResult>,
    frames_processed: u64,
    faces_detected: u64,
    total_latency_ms: f64,
}

impl FrameAnalysisPipeline {
    /// Analyzes one frame. Never fails: internal errors become an `Emotion::Error` result.
    pub async fn analyze(&mut self, frame: &Frame) -> FrameAnalysisResult {
        let start = Instant::now();
        // Runs before anything can short-circuit so the baseline tracks every frame.
        let movement = self.movement.estimate(frame);

        let result = match self.try_analyze(frame, movement, start).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(target: LOG_TARGET, sequence = frame.sequence, error = %e, "frame analysis failed");
                FrameAnalysisResult::failed(e.to_string(), elapsed_ms(start))
            }
        };

        self.frames_processed += 1;
        self.total_latency_ms += result.analysis_latency_ms;
        if result.face_detected {
            self.faces_detected += 1;
        }
        self.latest = Some(result.clone());
        result
    }

    async fn try_analyze(
        &mut self,
        frame: &Frame,
        movement: f64,
        start: Instant,
    ) -> Result<FrameAnalysisResult, FrameError> {
        if frame.is_empty() {
            return Err(FrameError::EmptyFrame);
        }

        let faces = detect_or_assume(self.detector.as_ref(), &frame.image)?;
        if faces.is_empty() {
            return Ok(FrameAnalysisResult::no_face(movement, elapsed_ms(start)));
        }

        let classification = self.classifier.classify(&frame.image).await;
        let engagement = engagement_score(classification.emotion, movement, classification.confidence);
        let overall_confidence = (classification.confidence + engagement) / 2.0;

        self.history
            .record(classification.emotion, overall_confidence, movement);

        Ok(FrameAnalysisResult {
            emotion: classification.emotion,
            emotion_confidence: classification.confidence,
            emotion_scores: classification.scores,
            movement_level: movement,
            engagement_score: engagement,
            overall_confidence,
            face_detected: true,
            face_regions: faces,
            timestamp: SystemTime::now(),
            analysis_latency_ms: elapsed_ms(start),
            classification_source: Some(classification.source),
            error: None,
        })
    }

    pub fn latest(&self) -> Option<&FrameAnalysisResult> {
        self.latest.as_ref()
    }

    pub fn history(&self) -> &RollingHistory {
        &self.history
    }

    pub fn trends(&self) -> TrendReport {
        TrendAnalyzer::new(&self.history).report()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn stats(&self) -> PerformanceStats {
        if self.frames_processed == 0 {
            return PerformanceStats::default();
        }
        let frames = self.frames_processed as f64;
        let average_analysis_ms = self.total_latency_ms / frames;
        PerformanceStats {
            frames_processed: self.frames_processed,
            faces_detected: self.faces_detected,
            average_analysis_ms,
            cache_hit_rate: self.classifier.stats().cache_hits as f64 / frames * 100.0,
            face_detection_rate: self.faces_detected as f64 / frames * 100.0,
            fps_capacity: 1000.0 / average_analysis_ms.max(1.0),
        }
    }

    /// Drops all per-session state: histories, movement baseline, classifier cache, counters.
    pub fn reset(&mut self) {
        self.movement.reset();
        self.classifier.reset();
        self.history.clear();
        self.latest = None;
        self.frames_processed = 0;
        self.faces_detected = 0;
        self.total_latency_ms = 0.0;
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

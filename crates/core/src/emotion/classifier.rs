use crate::config::AnalyzerConfig;
use crate::emotion::{
    BackendOutput, Emotion, EmotionBackend, EmotionError, EmotionScores, SyntheticEmotionBackend,
    UnavailableBackend,
};
use image::imageops::FilterType;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

const LOG_TARGET: &str = "emotion::classifier";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    /// Fresh answer from the injected backend.
    Backend,
    /// Reused from the last fresh classification (frame-skip throttle).
    Cached,
    /// Randomized stand-in because the backend was missing, failed or too slow.
    Synthetic,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    pub emotion: Emotion,
    pub confidence: f64,
    pub scores: EmotionScores,
    pub latency_ms: f64,
    pub source: ClassificationSource,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifierStats {
    pub calls: u64,
    pub backend_calls: u64,
    pub synthetic_calls: u64,
    pub cache_hits: u64,
}

/// Adapter around an [`EmotionBackend`] that bounds per-frame cost.
///
/// Frames wider than the configured width are downscaled first. The backend only runs on
/// the first call and then on every `frame_skip_interval`-th call; calls in between return
/// the cached answer, so a result can be up to `frame_skip_interval - 1` frames stale.
/// A missing, failing or slow backend degrades to [`SyntheticEmotionBackend`]; `classify`
/// itself never fails.
pub struct EmotionClassifier {
    backend: Arc<dyn EmotionBackend>,
    synthetic: SyntheticEmotionBackend,
    frame_skip_interval: u32,
    max_width: u32,
    deadline: Duration,
    calls_since_refresh: u32,
    cached: Option<Classification>,
    stats: ClassifierStats,
}

impl EmotionClassifier {
    pub fn new(backend: Arc<dyn EmotionBackend>, config: &AnalyzerConfig) -> Self {
        Self {
            backend,
            synthetic: SyntheticEmotionBackend::new(),
            frame_skip_interval: config.frame_skip_interval.max(1),
            max_width: config.max_classify_width.max(1),
            deadline: config.classify_deadline,
            calls_since_refresh: 0,
            cached: None,
            stats: ClassifierStats::default(),
        }
    }

    /// Classifier with no model behind it; every fresh classification is synthetic.
    pub fn without_backend(config: &AnalyzerConfig) -> Self {
        Self::new(Arc::new(UnavailableBackend), config)
    }

    pub fn with_synthetic(mut self, synthetic: SyntheticEmotionBackend) -> Self {
        self.synthetic = synthetic;
        self
    }

    pub fn stats(&self) -> ClassifierStats {
        self.stats
    }

    pub fn reset(&mut self) {
        self.calls_since_refresh = 0;
        self.cached = None;
        self.stats = ClassifierStats::default();
    }

    pub async fn classify(&mut self, image: &RgbImage) -> Classification {
        let start = Instant::now();
        self.stats.calls += 1;

        if let Some(cached) = &self.cached {
            if self.calls_since_refresh < self.frame_skip_interval {
                self.calls_since_refresh += 1;
                self.stats.cache_hits += 1;
                return Classification {
                    latency_ms: elapsed_ms(start),
                    source: ClassificationSource::Cached,
                    ..cached.clone()
                };
            }
        }

        let prepared = downscale(image, self.max_width);
        let (output, emotion, confidence, source) = match self.run_backend(prepared).await {
            Ok((output, (emotion, confidence))) => {
                self.stats.backend_calls += 1;
                (output, emotion, confidence, ClassificationSource::Backend)
            }
            Err(e) => {
                match e {
                    EmotionError::Unavailable => {
                        tracing::debug!(target: LOG_TARGET, "no emotion backend, using synthetic result")
                    }
                    _ => {
                        tracing::warn!(target: LOG_TARGET, error = %e, "emotion backend failed, using synthetic result")
                    }
                }
                self.stats.synthetic_calls += 1;
                let output = self.synthetic.sample();
                let (emotion, confidence) = output.dominant().unwrap_or((Emotion::Neutral, 0.7));
                (output, emotion, confidence, ClassificationSource::Synthetic)
            }
        };

        let classification = Classification {
            emotion,
            confidence,
            scores: output.scores,
            latency_ms: elapsed_ms(start),
            source,
        };
        self.cached = Some(classification.clone());
        self.calls_since_refresh = 1;
        classification
    }

    async fn run_backend(
        &self,
        image: RgbImage,
    ) -> Result<(BackendOutput, (Emotion, f64)), EmotionError> {
        let output = tokio::time::timeout(self.deadline, self.backend.classify(image))
            .await
            .map_err(|_| EmotionError::DeadlineExceeded(self.deadline.as_millis()))??;
        let dominant = output.dominant().ok_or(EmotionError::EmptyScores)?;
        Ok((output, dominant))
    }
}

/// Aspect-preserving downscale to at most `max_width` pixels wide.
pub(crate) fn downscale(image: &RgbImage, max_width: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if width <= max_width {
        return image.clone();
    }
    let scale = f64::from(max_width) / f64::from(width);
    let new_height = ((f64::from(height) * scale).round() as u32).max(1);
    image::imageops::resize(image, max_width, new_height, FilterType::Triangle)
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

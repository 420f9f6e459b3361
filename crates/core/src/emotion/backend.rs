use crate::emotion::{Emotion, EmotionScores};
use futures::future::BoxFuture;
use futures::FutureExt;
use image::RgbImage;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmotionError {
    #[error("emotion backend unavailable")]
    Unavailable,
    #[error("emotion backend failed: {0}")]
    Failed(String),
    #[error("emotion backend returned no usable scores")]
    EmptyScores,
    #[error("emotion backend exceeded {0} ms deadline")]
    DeadlineExceeded(u128),
}

/// Raw output of a classification model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackendOutput {
    pub scores: EmotionScores,
}

impl BackendOutput {
    pub fn new(scores: EmotionScores) -> Self {
        Self { scores }
    }

    /// Highest-scoring classifiable label and its score. Ties keep the first label in
    /// declaration order.
    pub fn dominant(&self) -> Option<(Emotion, f64)> {
        self.scores
            .iter()
            .filter(|(emotion, score)| emotion.is_expression() && score.is_finite())
            .fold(None, |best: Option<(Emotion, f64)>, (&emotion, &score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((emotion, score)),
            })
            .map(|(emotion, score)| (emotion, score.clamp(0.0, 1.0)))
    }
}

/// A face/emotion model. Implementations receive the (possibly downscaled) frame.
pub trait EmotionBackend: Send + Sync {
    fn classify(&self, image: RgbImage) -> BoxFuture<'_, Result<BackendOutput, EmotionError>>;
}

/// Stands in when no model is installed.
#[derive(Clone, Debug, Default)]
pub struct UnavailableBackend;

impl EmotionBackend for UnavailableBackend {
    fn classify(&self, _image: RgbImage) -> BoxFuture<'_, Result<BackendOutput, EmotionError>> {
        async { Err(EmotionError::Unavailable) }.boxed()
    }
}

use crate::emotion::{BackendOutput, Emotion, EmotionBackend, EmotionError, EmotionScores};
use futures::future::BoxFuture;
use futures::FutureExt;
use image::RgbImage;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const MIN_CONFIDENCE: f64 = 0.7;
const MAX_CONFIDENCE: f64 = 0.95;
const MAX_OTHER_SCORE: f64 = 0.5;

/// Plausible random classifications for when no real model can answer.
///
/// The dominant label is drawn uniformly from [`Emotion::CLASSIFIABLE`] with a confidence
/// in `[0.7, 0.95]`; every other class scores below that.
pub struct SyntheticEmotionBackend {
    rng: Mutex<StdRng>,
}

impl SyntheticEmotionBackend {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn sample(&self) -> BackendOutput {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let dominant = Emotion::CLASSIFIABLE
            .choose(&mut *rng)
            .copied()
            .unwrap_or(Emotion::Neutral);
        let confidence = rng.random_range(MIN_CONFIDENCE..=MAX_CONFIDENCE);

        let scores: EmotionScores = Emotion::CLASSIFIABLE
            .iter()
            .map(|&emotion| {
                let score = if emotion == dominant {
                    confidence
                } else {
                    rng.random_range(0.0..MAX_OTHER_SCORE)
                };
                (emotion, score)
            })
            .collect();

        BackendOutput::new(scores)
    }
}

impl Default for SyntheticEmotionBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionBackend for SyntheticEmotionBackend {
    fn classify(&self, _image: RgbImage) -> BoxFuture<'_, Result<BackendOutput, EmotionError>> {
        let output = self.sample();
        async move { Ok(output) }.boxed()
    }
}

//! Frame-to-frame motion as a proxy for presenter gestures.

use crate::config::AnalyzerConfig;
use crate::frame::Frame;
use image::GrayImage;

/// Compares each frame against the previous one.
///
/// The stored baseline is replaced on every call, whatever the rest of the pipeline does
/// with the frame; skipping a frame here would make the next comparison span two frames
/// and spike.
#[derive(Clone, Debug)]
pub struct FrameMovementEstimator {
    pixel_threshold: u8,
    scale: f64,
    previous: Option<GrayImage>,
}

impl FrameMovementEstimator {
    pub fn new(pixel_threshold: u8, scale: f64) -> Self {
        Self {
            pixel_threshold,
            scale,
            previous: None,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(config.movement_pixel_threshold, config.movement_scale)
    }

    /// Movement level in `[0, 1]`; exactly `0.0` when there is no comparable baseline.
    pub fn estimate(&mut self, frame: &Frame) -> f64 {
        let gray = frame.to_gray();
        let level = match &self.previous {
            Some(previous) if previous.dimensions() == gray.dimensions() => {
                self.changed_fraction(previous, &gray)
            }
            Some(previous) => {
                tracing::debug!(
                    previous = ?previous.dimensions(),
                    current = ?gray.dimensions(),
                    "frame size changed, resetting movement baseline"
                );
                0.0
            }
            None => 0.0,
        };
        self.previous = Some(gray);
        level
    }

    pub fn has_baseline(&self) -> bool {
        self.previous.is_some()
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }

    fn changed_fraction(&self, previous: &GrayImage, current: &GrayImage) -> f64 {
        let total = current.as_raw().len();
        if total == 0 {
            return 0.0;
        }
        let changed = previous
            .as_raw()
            .iter()
            .zip(current.as_raw())
            .filter(|(a, b)| a.abs_diff(**b) > self.pixel_threshold)
            .count();
        (changed as f64 / total as f64 * self.scale).min(1.0)
    }
}

impl Default for FrameMovementEstimator {
    fn default() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }
}

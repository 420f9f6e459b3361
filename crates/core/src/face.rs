use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Axis-aligned face rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaceRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceRegion {
    /// The central half of a `width` x `height` frame.
    pub fn central(width: u32, height: u32) -> Self {
        Self {
            x: width / 4,
            y: height / 4,
            width: width / 2,
            height: height / 2,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceDetectError {
    /// No detector model could be loaded; callers assume a face is present.
    #[error("face detector unavailable")]
    Unavailable,
    #[error("face detection failed: {0}")]
    Failed(String),
}

pub trait FaceDetector: Send + Sync {
    /// Returns every face found; an empty list means nobody is in frame.
    fn detect(&self, image: &RgbImage) -> Result<Vec<FaceRegion>, FaceDetectError>;
}

/// Used when no detector is installed: assumes the presenter fills the centre of the frame.
#[derive(Clone, Debug, Default)]
pub struct CentralFaceDetector;

impl FaceDetector for CentralFaceDetector {
    fn detect(&self, image: &RgbImage) -> Result<Vec<FaceRegion>, FaceDetectError> {
        let (width, height) = image.dimensions();
        Ok(vec![FaceRegion::central(width, height)])
    }
}

/// Runs `detector`, treating an unavailable detector as "face in the centre".
pub fn detect_or_assume(
    detector: &dyn FaceDetector,
    image: &RgbImage,
) -> Result<Vec<FaceRegion>, FaceDetectError> {
    match detector.detect(image) {
        Err(FaceDetectError::Unavailable) => {
            tracing::debug!("face detector unavailable, assuming centred face");
            CentralFaceDetector.detect(image)
        }
        other => other,
    }
}

use crate::frame::Frame;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "session::source";
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can be opened for frame capture, typically a camera.
pub trait CameraDevice: Send + Sync {
    fn open(&self) -> Result<Box<dyn FrameSource>, SourceError>;
}

/// An opened capture stream. Dropping it releases the device.
pub trait FrameSource: Send {
    /// `None` is a transient miss; the caller may retry.
    fn next_frame(&mut self) -> Option<Frame>;
}

/// Replays the image files of a directory in file-name order, as if they came from a camera.
#[derive(Clone, Debug)]
pub struct DirectoryCamera {
    dir: PathBuf,
    looping: bool,
}

impl DirectoryCamera {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            looping: false,
        }
    }

    /// Restart from the first file after the last one instead of running dry.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn image_files(&self) -> Result<Vec<PathBuf>, SourceError> {
        if !self.dir.is_dir() {
            return Err(SourceError::DeviceUnavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if is_image && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl CameraDevice for DirectoryCamera {
    fn open(&self) -> Result<Box<dyn FrameSource>, SourceError> {
        let files = self.image_files()?;
        if files.is_empty() {
            return Err(SourceError::DeviceUnavailable(format!(
                "no image files in {}",
                self.dir.display()
            )));
        }
        tracing::info!(target: LOG_TARGET, dir = %self.dir.display(), frames = files.len(), "opened frame directory");
        Ok(Box::new(DirectoryFrames {
            files,
            next_index: 0,
            sequence: 0,
            looping: self.looping,
        }))
    }
}

struct DirectoryFrames {
    files: Vec<PathBuf>,
    next_index: usize,
    sequence: u64,
    looping: bool,
}

impl FrameSource for DirectoryFrames {
    fn next_frame(&mut self) -> Option<Frame> {
        if self.next_index >= self.files.len() {
            if !self.looping {
                return None;
            }
            self.next_index = 0;
        }
        let path = &self.files[self.next_index];
        self.next_index += 1;

        match image::open(path) {
            Ok(image) => {
                let frame = Frame::new(self.sequence, image.to_rgb8());
                self.sequence += 1;
                Some(frame)
            }
            Err(e) => {
                tracing::warn!(target: LOG_TARGET, path = %path.display(), error = %e, "failed to decode frame");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_frame(dir: &Path, name: &str, value: u8) {
        RgbImage::from_pixel(8, 6, Rgb([value, value, value]))
            .save(dir.join(name))
            .unwrap();
    }

    #[test]
    fn missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let camera = DirectoryCamera::new(dir.path().join("nope"));
        assert!(matches!(
            camera.open(),
            Err(SourceError::DeviceUnavailable(_))
        ));
    }

    #[test]
    fn empty_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();
        assert!(matches!(
            DirectoryCamera::new(dir.path()).open(),
            Err(SourceError::DeviceUnavailable(_))
        ));
    }

    #[test]
    fn frames_come_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "002.png", 200);
        write_frame(dir.path(), "001.png", 100);

        let mut source = DirectoryCamera::new(dir.path()).open().unwrap();
        let first = source.next_frame().unwrap();
        let second = source.next_frame().unwrap();
        assert_eq!(first.sequence, 0);
        assert_eq!(first.image.get_pixel(0, 0), &Rgb([100, 100, 100]));
        assert_eq!(second.sequence, 1);
        assert_eq!(second.image.get_pixel(0, 0), &Rgb([200, 200, 200]));
        assert!(source.next_frame().is_none());
    }

    #[test]
    fn undecodable_file_is_a_transient_miss() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("000.png"), b"garbage").unwrap();
        write_frame(dir.path(), "001.png", 50);

        let mut source = DirectoryCamera::new(dir.path()).open().unwrap();
        assert!(source.next_frame().is_none());
        let frame = source.next_frame().unwrap();
        assert_eq!(frame.sequence, 0);
    }

    #[test]
    fn looping_restarts_from_first_file() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "a.png", 1);

        let mut source = DirectoryCamera::new(dir.path()).looping(true).open().unwrap();
        for expected in 0..3 {
            assert_eq!(source.next_frame().unwrap().sequence, expected);
        }
    }
}

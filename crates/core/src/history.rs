use crate::config::DEFAULT_HISTORY_CAPACITY;
use crate::emotion::Emotion;
use crate::util::RingBuffer;

/// Bounded per-session window of the scalar outputs of each analyzed frame.
///
/// The three sequences are appended together, so they always have equal length.
#[derive(Clone, Debug)]
pub struct RollingHistory {
    emotions: RingBuffer<Emotion>,
    confidences: RingBuffer<f64>,
    movements: RingBuffer<f64>,
}

impl RollingHistory {
    /// # Panics
    /// If `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            emotions: RingBuffer::new(capacity),
            confidences: RingBuffer::new(capacity),
            movements: RingBuffer::new(capacity),
        }
    }

    pub fn record(&mut self, emotion: Emotion, confidence: f64, movement: f64) {
        self.emotions.push(emotion);
        self.confidences.push(confidence);
        self.movements.push(movement);
    }

    pub fn capacity(&self) -> usize {
        self.emotions.capacity()
    }

    pub fn len(&self) -> usize {
        self.emotions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty()
    }

    pub fn emotions(&self) -> &RingBuffer<Emotion> {
        &self.emotions
    }

    pub fn confidences(&self) -> &RingBuffer<f64> {
        &self.confidences
    }

    pub fn movements(&self) -> &RingBuffer<f64> {
        &self.movements
    }

    pub fn clear(&mut self) {
        self.emotions.clear();
        self.confidences.clear();
        self.movements.clear();
    }
}

impl Default for RollingHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

/// Fixed-capacity FIFO. Pushing into a full buffer evicts the oldest value.
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    buf: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        let mut buf = Vec::with_capacity(capacity);
        buf.resize_with(capacity, || None);
        Self {
            buf,
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends `value`, returning the evicted oldest value when the buffer was full.
    pub fn push(&mut self, value: T) -> Option<T> {
        let cap = self.capacity();
        let idx = (self.head + self.len) % cap;

        if self.len < cap {
            self.buf[idx] = Some(value);
            self.len += 1;
            None
        } else {
            let evicted = self.buf[self.head].replace(value);
            self.head = (self.head + 1) % cap;
            evicted
        }
    }

    pub fn get(&self, index_from_oldest: usize) -> Option<&T> {
        if index_from_oldest >= self.len {
            return None;
        }
        let idx = (self.head + index_from_oldest) % self.capacity();
        self.buf[idx].as_ref()
    }

    pub fn latest(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    /// The last `n` values (fewer if the buffer holds less), oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &T> {
        let skip = self.len.saturating_sub(n);
        (skip..self.len).filter_map(move |i| self.get(i))
    }

    pub fn clear(&mut self) {
        self.buf.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }
}

impl<T: Clone> RingBuffer<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_buffer_overwrites_oldest() {
        let mut rb = RingBuffer::new(3);
        assert!(rb.is_empty());

        assert_eq!(rb.push(1), None);
        assert_eq!(rb.push(2), None);
        assert_eq!(rb.push(3), None);
        assert!(rb.is_full());
        assert_eq!(rb.to_vec(), vec![1, 2, 3]);

        assert_eq!(rb.push(4), Some(1));
        assert_eq!(rb.to_vec(), vec![2, 3, 4]);
        assert_eq!(rb.latest(), Some(&4));
    }

    #[test]
    fn length_tracks_min_of_pushes_and_capacity() {
        for pushes in 0..12usize {
            let mut rb = RingBuffer::new(5);
            for v in 0..pushes {
                rb.push(v);
            }
            assert_eq!(rb.len(), pushes.min(5));
            let expected: Vec<usize> = (pushes.saturating_sub(5)..pushes).collect();
            assert_eq!(rb.to_vec(), expected);
        }
    }

    #[test]
    fn recent_returns_tail_in_order() {
        let mut rb = RingBuffer::new(4);
        for v in 1..=6 {
            rb.push(v);
        }
        assert_eq!(rb.recent(2).copied().collect::<Vec<_>>(), vec![5, 6]);
        assert_eq!(rb.recent(10).copied().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
        assert_eq!(rb.recent(0).count(), 0);
    }

    #[test]
    fn clear_resets_state() {
        let mut rb = RingBuffer::new(2);
        rb.push("a");
        rb.push("b");
        rb.push("c");
        rb.clear();
        assert!(rb.is_empty());
        assert_eq!(rb.latest(), None);
        rb.push("d");
        assert_eq!(rb.to_vec(), vec!["d"]);
    }
}

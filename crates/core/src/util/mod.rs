pub mod backoff;
pub mod ring_buffer;

pub use backoff::BackoffConfig;
pub use ring_buffer::RingBuffer;

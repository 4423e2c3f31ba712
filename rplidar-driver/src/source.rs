use crate::constants::N_READ_TRIALS;
use crate::error::RplidarError;
use crate::time::sleep_ms;
use std::collections::VecDeque;

/// Provider of an append-only byte sequence with an availability predicate
/// and a bounded-time read, plus the write side used by the command
/// handshake. The core depends only on this abstraction, not on any
/// specific transport.
pub trait ByteSource {
    /// Number of bytes that can be read without waiting.
    fn bytes_available(&mut self) -> Result<usize, RplidarError>;

    /// Read up to `n` immediately-available bytes.
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, RplidarError>;

    /// Write the whole buffer to the device.
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), RplidarError>;
}

/// Bounded-time exact read: polls availability a fixed number of times
/// with a short sleep in between, then gives up with `Timeout`.
pub(crate) fn read_exact<S: ByteSource + ?Sized>(
    source: &mut S,
    data_size: usize,
) -> Result<Vec<u8>, RplidarError> {
    assert!(data_size > 0);
    for _ in 0..N_READ_TRIALS {
        let n_read = source.bytes_available()?;
        if n_read < data_size {
            sleep_ms(10);
            continue;
        }
        return source.read_bytes(data_size);
    }
    Err(RplidarError::Timeout)
}

/// In-memory byte source for replay and tests: reads come from a queue of
/// pre-loaded chunks, writes are recorded for inspection.
#[derive(Default)]
pub struct ReplaySource {
    chunks: VecDeque<Vec<u8>>,
    written: Vec<u8>,
}

impl ReplaySource {
    pub fn new(chunks: Vec<Vec<u8>>) -> ReplaySource {
        ReplaySource {
            chunks: chunks.into(),
            written: Vec::new(),
        }
    }

    pub fn empty() -> ReplaySource {
        ReplaySource::default()
    }

    /// Queue another chunk, as if the device had produced more bytes.
    pub fn push_chunk(&mut self, chunk: Vec<u8>) {
        self.chunks.push_back(chunk);
    }

    /// Everything the session wrote to the device so far.
    pub fn written(&self) -> &[u8] {
        &self.written
    }
}

impl ByteSource for ReplaySource {
    fn bytes_available(&mut self) -> Result<usize, RplidarError> {
        Ok(self.chunks.front().map_or(0, Vec::len))
    }

    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, RplidarError> {
        let mut chunk = match self.chunks.pop_front() {
            Some(chunk) => chunk,
            None => return Err(RplidarError::SourceExhausted),
        };
        if n < chunk.len() {
            let rest = chunk.split_off(n);
            self.chunks.push_front(rest);
        }
        Ok(chunk)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), RplidarError> {
        self.written.extend_from_slice(data);
        Ok(())
    }
}

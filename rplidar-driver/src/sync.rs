use crate::constants::{CYCLE_MARKER, FRAME_MARKER, MARKER_SIZE};
use log::debug;
use rplidar_data::RawFrame;

/// Structure recovered from the raw byte stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncEvent {
    /// One angular frame is complete; the payload excludes the delimiter.
    FrameComplete(RawFrame),
    /// The cycle marker was seen; the session is over.
    SessionComplete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Frame,
    Cycle,
}

/// Segments an append-only byte stream into frames.
///
/// The synchronizer owns its accumulation buffer; all mutation goes through
/// `feed` and `reset`. Event emission depends only on the cumulative byte
/// stream, never on how it was chunked: a marker split across `feed` calls
/// is recognized once its last byte arrives, and bytes following a frame
/// marker are kept as the start of the next frame.
#[derive(Debug, Default)]
pub struct FrameSynchronizer {
    buffer: Vec<u8>,
    terminated: bool,
}

impl FrameSynchronizer {
    pub fn new() -> FrameSynchronizer {
        FrameSynchronizer::default()
    }

    /// Append newly-arrived bytes and return the events they complete.
    ///
    /// After `SessionComplete` the synchronizer is terminal: further calls
    /// are ignored until `reset`.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        if self.terminated {
            debug!("feed of {} bytes ignored after session end", bytes.len());
            return events;
        }
        self.buffer.extend_from_slice(bytes);

        while let Some((pos, marker)) = find_marker(&self.buffer) {
            match marker {
                Marker::Cycle => {
                    if pos > 0 {
                        let payload = self.buffer[..pos].to_vec();
                        events.push(SyncEvent::FrameComplete(RawFrame::new(payload)));
                    }
                    events.push(SyncEvent::SessionComplete);
                    self.terminated = true;
                    self.buffer.clear();
                    break;
                }
                Marker::Frame => {
                    let payload = self.buffer[..pos].to_vec();
                    events.push(SyncEvent::FrameComplete(RawFrame::new(payload)));
                    self.buffer.drain(..pos + MARKER_SIZE);
                }
            }
        }
        events
    }

    /// Discard buffered bytes and return to the initial state.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.terminated = false;
    }

    /// True once the cycle marker has been seen.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Bytes accumulated but not yet delimited.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }
}

/// Leftmost delimiter in the buffer. The cycle marker is tested first at
/// every position: a cycle ending must never be mistaken for the plain
/// frame marker its leading bytes resemble.
fn find_marker(buffer: &[u8]) -> Option<(usize, Marker)> {
    for (pos, window) in buffer.windows(MARKER_SIZE).enumerate() {
        if window == CYCLE_MARKER {
            return Some((pos, Marker::Cycle));
        }
        if window == FRAME_MARKER {
            return Some((pos, Marker::Frame));
        }
    }
    None
}

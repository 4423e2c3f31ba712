mod aggregate;
mod command;
mod constants;
mod decode;
mod error;
mod filter;
mod geometry;
mod numeric;
mod pipeline;
mod serial;
mod session;
mod source;
mod sync;
mod time;

pub use crate::aggregate::{aggregate_by_angle, AngleBucket};
pub use crate::command::{send_command, send_start_with_preset, Command};
pub use crate::decode::{
    decode_frame, decode_record, scan_commands, valid_records, CommandMark, RecordOutcome,
};
pub use crate::error::RplidarError;
pub use crate::filter::filter_outliers;
pub use crate::geometry::reconstruct;
pub use crate::pipeline::{process_frames, ScanSummary};
pub use crate::serial::open_port;
pub use crate::session::{
    join, run_capture, run_capture_with_source, CaptureEvent, CaptureSession, CaptureThreads,
    CapturedFrame,
};
pub use crate::source::{ByteSource, ReplaySource};
pub use crate::sync::{FrameSynchronizer, SyncEvent};

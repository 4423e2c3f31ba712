use crate::command::{send_command, send_start_with_preset, Command};
use crate::error::RplidarError;
use crate::serial::{flush, open_port};
use crate::source::ByteSource;
use crate::sync::{FrameSynchronizer, SyncEvent};
use crate::time::sleep_ms;
use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info, warn};
use rplidar_data::{RawFrame, ScanConfig, TurretSchedule};
use std::sync::mpsc;
use std::thread::JoinHandle;

/// One delimited frame stamped with its sequence index and turret angle.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedFrame {
    pub index: usize,
    pub turret_angle_deg: f64,
    pub frame: RawFrame,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CaptureEvent {
    Frame(CapturedFrame),
    SessionComplete,
}

/// Owns one scanning session over a byte source: the command handshake,
/// the frame synchronizer, and the turret schedule.
///
/// The session is single-threaded by design; `run_capture` provides the
/// one-worker wrapper. Reading the source is the only operation that may
/// wait, everything downstream is pure computation.
pub struct CaptureSession<S: ByteSource> {
    source: S,
    sync: FrameSynchronizer,
    schedule: TurretSchedule,
    frame_index: usize,
    complete: bool,
}

impl<S: ByteSource> CaptureSession<S> {
    pub fn new(source: S, config: &ScanConfig) -> CaptureSession<S> {
        CaptureSession {
            source,
            sync: FrameSynchronizer::new(),
            schedule: config.schedule.clone(),
            frame_index: 0,
            complete: false,
        }
    }

    /// START handshake, with the angle-step preset when the schedule uses
    /// a non-default step.
    pub fn start(&mut self) -> Result<(), RplidarError> {
        send_start_with_preset(&mut self.source, self.schedule.preset())
    }

    /// Pump the session once: read whatever bytes are available, feed the
    /// synchronizer, stamp completed frames, and drive the per-frame
    /// RESUME handshake. Returns immediately with no events when the
    /// source has nothing to offer.
    pub fn poll(&mut self) -> Result<Vec<CaptureEvent>, RplidarError> {
        let mut events = Vec::new();
        if self.complete {
            return Ok(events);
        }

        let n_read = self.source.bytes_available()?;
        if n_read == 0 {
            return Ok(events);
        }
        let bytes = self.source.read_bytes(n_read)?;

        for sync_event in self.sync.feed(&bytes) {
            match sync_event {
                SyncEvent::FrameComplete(frame) => {
                    if self.complete {
                        continue;
                    }
                    let index = self.frame_index;
                    self.frame_index += 1;
                    let turret_angle_deg = self.schedule.angle_for_frame(index);
                    info!(
                        "frame {} complete at turret angle {} ({} bytes)",
                        index,
                        turret_angle_deg,
                        frame.len()
                    );
                    events.push(CaptureEvent::Frame(CapturedFrame {
                        index,
                        turret_angle_deg,
                        frame,
                    }));

                    if self.frame_index >= self.schedule.expected_frames() {
                        info!(
                            "target of {} frames reached",
                            self.schedule.expected_frames()
                        );
                        self.complete = true;
                        send_command(&mut self.source, Command::Stop)?;
                        events.push(CaptureEvent::SessionComplete);
                    } else if !self.sync.is_terminated() {
                        send_command(&mut self.source, Command::Resume)?;
                    }
                }
                SyncEvent::SessionComplete => {
                    if !self.complete {
                        info!("end of cycle detected");
                        self.complete = true;
                        events.push(CaptureEvent::SessionComplete);
                    }
                }
            }
        }
        Ok(events)
    }

    /// External stop: discard any buffered-but-undelimited bytes and tell
    /// the device to stop. No partial frame is ever emitted.
    pub fn cancel(&mut self) -> Result<(), RplidarError> {
        let pending = self.sync.pending_len();
        if pending > 0 {
            warn!("discarding {} undelimited bytes on cancel", pending);
        }
        self.sync.reset();
        self.complete = true;
        send_command(&mut self.source, Command::Stop)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Handles of the capture worker.
pub struct CaptureThreads {
    capture_terminator_tx: Sender<bool>,
    capture_thread: Option<JoinHandle<()>>,
}

/// Open the port, perform the START handshake, and spawn the capture
/// worker. Events arrive on the returned channel until the session
/// completes or the worker is terminated.
pub fn run_capture(
    port_name: &str,
    config: ScanConfig,
) -> Result<(CaptureThreads, mpsc::Receiver<CaptureEvent>), RplidarError> {
    let mut port = open_port(port_name)?;
    // stale bytes from an earlier session would desynchronize the stream
    flush(&mut port)?;
    run_capture_with_source(port, config)
}

/// `run_capture` over any byte source; used directly for replay.
pub fn run_capture_with_source<S: ByteSource + Send + 'static>(
    source: S,
    config: ScanConfig,
) -> Result<(CaptureThreads, mpsc::Receiver<CaptureEvent>), RplidarError> {
    let mut session = CaptureSession::new(source, &config);
    session.start()?;

    let (capture_terminator_tx, capture_terminator_rx) = bounded(10);
    let (event_tx, event_rx) = mpsc::sync_channel::<CaptureEvent>(200);

    let capture_thread = Some(std::thread::spawn(move || {
        capture_loop(session, event_tx, capture_terminator_rx);
    }));

    Ok((
        CaptureThreads {
            capture_terminator_tx,
            capture_thread,
        },
        event_rx,
    ))
}

fn capture_loop<S: ByteSource>(
    mut session: CaptureSession<S>,
    event_tx: mpsc::SyncSender<CaptureEvent>,
    terminator_rx: Receiver<bool>,
) {
    loop {
        if do_terminate(&terminator_rx) {
            if let Err(e) = session.cancel() {
                warn!("{e}");
            }
            return;
        }

        let events = match session.poll() {
            Ok(events) => events,
            Err(e) => {
                error!("capture aborted: {e}");
                return;
            }
        };

        if events.is_empty() {
            sleep_ms(10);
            continue;
        }
        for event in events {
            if event_tx.send(event).is_err() {
                // receiver hung up; the session is over for us
                return;
            }
        }
        if session.is_complete() {
            return;
        }
    }
}

fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Ask the worker to stop and wait for it. Called automatically when
/// `CaptureThreads` is dropped.
pub fn join(threads: &mut CaptureThreads) {
    let _ = threads.capture_terminator_tx.send(true);
    if let Some(thread) = threads.capture_thread.take() {
        thread.join().unwrap();
    }
}

impl Drop for CaptureThreads {
    fn drop(&mut self) {
        join(self);
    }
}

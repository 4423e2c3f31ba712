use crate::constants::{RECORD_SIZE, SCAN_RESPONSE_HEADER};
use crate::numeric::{to_angle_degrees, to_distance_mm};
use rplidar_data::{MeasurementRecord, RawFrame, RecordReject};

/// Decode result of one 5-byte window. Rejections are surfaced so callers
/// can log or count drops; they are never errors.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordOutcome {
    Valid(MeasurementRecord),
    Rejected(RecordReject),
}

/// Decode every 5-byte record of one frame.
///
/// The scan-response header is located first; a frame without it yields no
/// outcomes at all. Decoding is positional: consecutive non-overlapping
/// windows from the byte after the header, with a trailing partial window
/// discarded.
pub fn decode_frame(frame: &RawFrame, max_distance_mm: f64) -> Vec<RecordOutcome> {
    let scan_data = match find_scan_response(&frame.bytes) {
        Some(offset) => &frame.bytes[offset + SCAN_RESPONSE_HEADER.len()..],
        None => return Vec::new(),
    };

    scan_data
        .chunks_exact(RECORD_SIZE)
        .map(|window| decode_record(window.try_into().unwrap(), max_distance_mm))
        .collect()
}

/// Keep only the valid measurements, in wire order.
pub fn valid_records(outcomes: Vec<RecordOutcome>) -> Vec<MeasurementRecord> {
    outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            RecordOutcome::Valid(record) => Some(record),
            RecordOutcome::Rejected(_) => None,
        })
        .collect()
}

/// Decode one wire record.
///
/// Byte 0 packs `start_flag` (bit 0), its inverse (bit 1), the check bit
/// (bit 2) and the 5-bit quality. Bytes 1-2 carry the Q6 angle with bit 7
/// of the low byte reserved; bytes 3-4 the little-endian Q2 distance.
pub fn decode_record(bytes: &[u8; RECORD_SIZE], max_distance_mm: f64) -> RecordOutcome {
    let b0 = bytes[0];
    let start_flag = b0 & 0x01 == 1;
    let not_start_flag = (b0 >> 1) & 0x01 == 1;
    let check_bit = (b0 >> 2) & 0x01;
    let quality = b0 >> 3;

    if check_bit != 1 {
        return RecordOutcome::Rejected(RecordReject::CheckBitClear);
    }
    if start_flag == not_start_flag {
        return RecordOutcome::Rejected(RecordReject::StartFlagParity);
    }

    let distance_mm = to_distance_mm(bytes[3], bytes[4]);
    if distance_mm == 0.0 {
        return RecordOutcome::Rejected(RecordReject::ZeroDistance);
    }
    if distance_mm > max_distance_mm {
        return RecordOutcome::Rejected(RecordReject::ImplausibleDistance);
    }

    RecordOutcome::Valid(MeasurementRecord {
        start_flag,
        quality,
        angle_deg: to_angle_degrees(bytes[1], bytes[2]),
        distance_mm,
    })
}

fn find_scan_response(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(SCAN_RESPONSE_HEADER.len())
        .position(|window| window == SCAN_RESPONSE_HEADER)
}

/// A recognized `A5 xx` request/response signature inside raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandMark {
    pub offset: usize,
    pub bytes: [u8; 2],
    pub description: &'static str,
}

/// Annotate command traffic interleaved with the scan data. Feeds the
/// external "commands" table; purely informational.
pub fn scan_commands(data: &[u8]) -> Vec<CommandMark> {
    let mut marks = Vec::new();
    for (offset, pair) in data.windows(2).enumerate() {
        if pair[0] != 0xA5 {
            continue;
        }
        let description = match pair[1] {
            0x25 => "STOP request",
            0x20 => "SCAN request",
            0x52 => "GET HEALTH request",
            0x50 => "GET INFO request",
            0x5A => "Response descriptor",
            0x40 => "RESET request",
            0x82 => "EXPRESS SCAN request",
            _ => continue,
        };
        marks.push(CommandMark {
            offset,
            bytes: [pair[0], pair[1]],
            description,
        });
    }
    marks
}

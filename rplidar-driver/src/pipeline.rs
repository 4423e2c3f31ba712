use crate::decode::{decode_frame, RecordOutcome};
use crate::error::RplidarError;
use crate::filter::filter_outliers;
use crate::geometry::reconstruct;
use crate::session::CapturedFrame;
use log::{debug, warn};
use rplidar_data::{PointSet, ScanConfig};

/// Outcome of processing one session's frames.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanSummary {
    /// Point set after outlier filtering.
    pub points: PointSet,
    /// Valid records decoded across all frames, before filtering.
    pub n_decoded: usize,
    /// Wire records dropped by validity checks.
    pub n_rejected: usize,
    /// Points removed by the outlier filter.
    pub n_outliers: usize,
}

/// Decode, reconstruct and filter a complete session.
///
/// Frames are processed in arrival order and each valid record becomes one
/// point; frames without a scan response contribute nothing and are only
/// logged. The outlier statistics need the whole session, so this runs
/// once over the full frame list, never incrementally.
///
/// A session that decodes to zero valid records is an explicit
/// `NoMeasurements` error: it almost always means the scan response header
/// was missed everywhere, and a silently empty output would hide that.
pub fn process_frames(
    frames: &[CapturedFrame],
    config: &ScanConfig,
) -> Result<ScanSummary, RplidarError> {
    let mut points = PointSet::new();
    let mut n_rejected = 0;

    for captured in frames {
        let outcomes = decode_frame(&captured.frame, config.max_distance_mm);
        if outcomes.is_empty() {
            warn!("no scan response in frame {}", captured.index);
            continue;
        }

        let mut frame_rejects = 0;
        for outcome in outcomes {
            match outcome {
                RecordOutcome::Valid(record) => {
                    points.push(reconstruct(&record, captured.turret_angle_deg, config.mode));
                }
                RecordOutcome::Rejected(_) => frame_rejects += 1,
            }
        }
        if frame_rejects > 0 {
            debug!("frame {}: {} records dropped", captured.index, frame_rejects);
        }
        n_rejected += frame_rejects;
    }

    if points.is_empty() {
        return Err(RplidarError::NoMeasurements);
    }

    let n_decoded = points.len();
    let filtered = filter_outliers(points, config.std_factor);
    Ok(ScanSummary {
        n_outliers: n_decoded - filtered.len(),
        points: filtered,
        n_decoded,
        n_rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCAN_RESPONSE_HEADER;
    use rplidar_data::{RawFrame, ReconstructionMode};

    fn captured(index: usize, turret_angle_deg: f64, records: &[[u8; 5]]) -> CapturedFrame {
        let mut bytes = SCAN_RESPONSE_HEADER.to_vec();
        for record in records {
            bytes.extend_from_slice(record);
        }
        CapturedFrame {
            index,
            turret_angle_deg,
            frame: RawFrame::new(bytes),
        }
    }

    #[test]
    fn test_process_frames_accumulates_across_frames() {
        let config = ScanConfig {
            mode: ReconstructionMode::VerticalTurret,
            ..ScanConfig::default()
        };
        let frames = [
            captured(0, 0.0, &[[0x05, 0x00, 0x01, 0x20, 0x00]]),
            captured(
                1,
                90.0,
                &[
                    [0x05, 0x00, 0x02, 0x40, 0x00],
                    [0x00, 0x00, 0x00, 0x00, 0x00], // dropped: check bit clear
                ],
            ),
        ];
        let summary = process_frames(&frames, &config).unwrap();
        assert_eq!(summary.n_decoded, 2);
        assert_eq!(summary.n_rejected, 1);
        assert_eq!(summary.n_outliers, 0);
        assert_eq!(summary.points.len(), 2);
        assert_eq!(summary.points.points[0].turret_angle_deg, 0.0);
        assert_eq!(summary.points.points[1].turret_angle_deg, 90.0);
    }

    #[test]
    fn test_headerless_frames_are_skipped_not_fatal() {
        let config = ScanConfig::default();
        let frames = [
            CapturedFrame {
                index: 0,
                turret_angle_deg: 0.0,
                frame: RawFrame::new(vec![0x12, 0x34]),
            },
            captured(1, 1.0, &[[0x05, 0x00, 0x01, 0x20, 0x00]]),
        ];
        let summary = process_frames(&frames, &config).unwrap();
        assert_eq!(summary.n_decoded, 1);
    }

    #[test]
    fn test_zero_measurements_is_an_explicit_error() {
        let config = ScanConfig::default();
        let frames = [CapturedFrame {
            index: 0,
            turret_angle_deg: 0.0,
            frame: RawFrame::new(vec![0xDE, 0xAD]),
        }];
        assert!(matches!(
            process_frames(&frames, &config),
            Err(RplidarError::NoMeasurements)
        ));
        assert!(matches!(
            process_frames(&[], &config),
            Err(RplidarError::NoMeasurements)
        ));
    }
}

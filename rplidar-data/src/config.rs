#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default gate width for the outlier filter, in standard deviations.
pub const DEFAULT_STD_FACTOR: f64 = 2.5;
/// Default upper bound on a physically plausible return, in millimeters.
pub const DEFAULT_MAX_DISTANCE_MM: f64 = 12000.0;
/// Default aggregation bucket width in degrees; groups by whole degrees.
pub const DEFAULT_BUCKET_WIDTH_DEG: f64 = 1.0;
/// Total turret sweep covered by one scanning cycle, in degrees.
pub const TURRET_SWEEP_DEG: f64 = 180.0;

/// Turret increments the device accepts as a wire preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AngleStep {
    OneDegree,
    TwoDegrees,
    FourDegrees,
}

impl AngleStep {
    pub fn degrees(self) -> f64 {
        match self {
            AngleStep::OneDegree => 1.0,
            AngleStep::TwoDegrees => 2.0,
            AngleStep::FourDegrees => 4.0,
        }
    }

    /// Byte sent after START to preset the per-frame increment.
    pub fn preset_byte(self) -> u8 {
        match self {
            AngleStep::OneDegree => 1,
            AngleStep::TwoDegrees => 2,
            AngleStep::FourDegrees => 4,
        }
    }

    /// Frames in a full sweep at this step (180 frames at 1 degree).
    pub fn expected_frames(self) -> usize {
        (TURRET_SWEEP_DEG / self.degrees()) as usize
    }
}

/// How turret angles are assigned to frames.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TurretSchedule {
    /// Frame index times a fixed step.
    Step(AngleStep),
    /// Explicit angle per frame, in degrees.
    Explicit(Vec<f64>),
}

impl TurretSchedule {
    /// Turret angle for the given frame index. An exhausted explicit list
    /// repeats its final angle: the turret stays at its last position once
    /// the schedule runs out.
    pub fn angle_for_frame(&self, index: usize) -> f64 {
        match self {
            TurretSchedule::Step(step) => index as f64 * step.degrees(),
            TurretSchedule::Explicit(angles) => match angles.get(index) {
                Some(angle) => *angle,
                None => angles.last().copied().unwrap_or(0.0),
            },
        }
    }

    /// Number of frames this schedule covers.
    pub fn expected_frames(&self) -> usize {
        match self {
            TurretSchedule::Step(step) => step.expected_frames(),
            TurretSchedule::Explicit(angles) => angles.len(),
        }
    }

    /// The wire preset to announce after START, when the schedule maps to
    /// a non-default fixed step.
    pub fn preset(&self) -> Option<AngleStep> {
        match self {
            TurretSchedule::Step(AngleStep::OneDegree) => None,
            TurretSchedule::Step(step) => Some(*step),
            TurretSchedule::Explicit(_) => None,
        }
    }
}

/// Geometric composition of sensor angle and turret angle.
///
/// This is a statement about how the sensor is physically mounted; it is
/// selected by the caller and never inferred from the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReconstructionMode {
    /// Sensor sweeps the horizontal plane; the turret (if any) rotates
    /// that plane about the vertical axis. z is always zero.
    Planar,
    /// Sensor is mounted with its 0/360 degree axis vertical so its sweep
    /// spans a vertical plane; the turret pans that plane around the room.
    VerticalTurret,
}

/// Configuration surface for one scanning session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanConfig {
    pub schedule: TurretSchedule,
    pub mode: ReconstructionMode,
    pub std_factor: f64,
    pub max_distance_mm: f64,
    pub bucket_width_deg: f64,
}

impl Default for ScanConfig {
    fn default() -> ScanConfig {
        ScanConfig {
            schedule: TurretSchedule::Step(AngleStep::OneDegree),
            mode: ReconstructionMode::VerticalTurret,
            std_factor: DEFAULT_STD_FACTOR,
            max_distance_mm: DEFAULT_MAX_DISTANCE_MM,
            bucket_width_deg: DEFAULT_BUCKET_WIDTH_DEG,
        }
    }
}

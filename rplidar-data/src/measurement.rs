#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One valid measurement decoded from a 5-byte scan record.
///
/// Angle and distance are already converted from their Q6/Q2 fixed-point
/// wire encodings; the angle is wrapped to `[0, 360)` degrees.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeasurementRecord {
    /// Start-of-rotation flag reported by the sensor.
    pub start_flag: bool,
    /// 5-bit return strength of the laser pulse.
    pub quality: u8,
    /// Sensor rotation angle in degrees, in `[0, 360)`.
    pub angle_deg: f64,
    /// Distance to the object in millimeters.
    pub distance_mm: f64,
}

/// Why a 5-byte record was dropped instead of decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RecordReject {
    /// The check bit was not set.
    CheckBitClear,
    /// Start flag and inverted start flag carried the same value.
    StartFlagParity,
    /// The sensor reported a distance of zero (no return).
    ZeroDistance,
    /// The distance exceeded the configured plausibility bound.
    ImplausibleDistance,
}

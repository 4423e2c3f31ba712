use crate::numeric::degree_to_radian;
use rplidar_data::{MeasurementRecord, Point3D, ReconstructionMode};

/// Compose one measurement with its frame's turret angle into a 3D point.
///
/// The two modes correspond to different physical mountings and are never
/// inferred from the data:
///
/// * `Planar` - the sensor sweeps the horizontal plane. The measurement
///   maps to `(d cos a, d sin a)` and the turret angle, when used, rotates
///   that plane about the vertical axis. `z` stays zero.
/// * `VerticalTurret` - the sensor is mounted with its zero-degree axis
///   vertical, so one rotation spans a vertical slice of the room:
///   `z = d cos a` is height, `r = d sin a` the in-plane reach, and the
///   turret angle pans the slice around the room.
///
/// Coordinates are full-precision millimeters; rounding happens only at
/// export boundaries.
pub fn reconstruct(
    record: &MeasurementRecord,
    turret_angle_deg: f64,
    mode: ReconstructionMode,
) -> Point3D {
    let angle_rad = degree_to_radian(record.angle_deg);
    let turret_rad = degree_to_radian(turret_angle_deg);
    let d = record.distance_mm;

    let (x_mm, y_mm, z_mm) = match mode {
        ReconstructionMode::Planar => {
            let x = d * angle_rad.cos();
            let y = d * angle_rad.sin();
            (
                x * turret_rad.cos() - y * turret_rad.sin(),
                x * turret_rad.sin() + y * turret_rad.cos(),
                0.0,
            )
        }
        ReconstructionMode::VerticalTurret => {
            let r_in_plane = d * angle_rad.sin();
            (
                r_in_plane * turret_rad.cos(),
                r_in_plane * turret_rad.sin(),
                d * angle_rad.cos(),
            )
        }
    };

    Point3D {
        x_mm,
        y_mm,
        z_mm,
        quality: record.quality,
        sensor_angle_deg: record.angle_deg,
        turret_angle_deg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn record(angle_deg: f64, distance_mm: f64) -> MeasurementRecord {
        MeasurementRecord {
            start_flag: false,
            quality: 47,
            angle_deg,
            distance_mm,
        }
    }

    #[test]
    fn test_planar_axes() {
        let p = reconstruct(&record(0.0, 100.0), 0.0, ReconstructionMode::Planar);
        assert!((p.x_mm - 100.0).abs() < EPS);
        assert!(p.y_mm.abs() < EPS);
        assert_eq!(p.z_mm, 0.0);

        let p = reconstruct(&record(90.0, 100.0), 0.0, ReconstructionMode::Planar);
        assert!(p.x_mm.abs() < EPS);
        assert!((p.y_mm - 100.0).abs() < EPS);
    }

    #[test]
    fn test_planar_turret_rotation() {
        // a point on the x axis rotated by 90 degrees lands on the y axis
        let p = reconstruct(&record(0.0, 50.0), 90.0, ReconstructionMode::Planar);
        assert!(p.x_mm.abs() < EPS);
        assert!((p.y_mm - 50.0).abs() < EPS);
    }

    #[test]
    fn test_vertical_turret_zero_angle_is_straight_up() {
        let p = reconstruct(&record(0.0, 200.0), 30.0, ReconstructionMode::VerticalTurret);
        assert!(p.x_mm.abs() < EPS);
        assert!(p.y_mm.abs() < EPS);
        assert!((p.z_mm - 200.0).abs() < EPS);
    }

    #[test]
    fn test_vertical_turret_horizontal_beam_follows_turret() {
        // sensor angle 90 degrees puts the beam in the horizontal plane
        let p = reconstruct(&record(90.0, 100.0), 0.0, ReconstructionMode::VerticalTurret);
        assert!((p.x_mm - 100.0).abs() < EPS);
        assert!(p.y_mm.abs() < EPS);
        assert!(p.z_mm.abs() < 1e-9 * 100.0 + 1e-7);

        let p = reconstruct(&record(90.0, 100.0), 90.0, ReconstructionMode::VerticalTurret);
        assert!(p.x_mm.abs() < 1e-7);
        assert!((p.y_mm - 100.0).abs() < 1e-7);
    }

    #[test]
    fn test_provenance_is_carried() {
        let p = reconstruct(&record(12.5, 340.0), 64.0, ReconstructionMode::VerticalTurret);
        assert_eq!(p.quality, 47);
        assert_eq!(p.sensor_angle_deg, 12.5);
        assert_eq!(p.turret_angle_deg, 64.0);
    }
}

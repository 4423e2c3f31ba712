#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One reconstructed point in millimeters, with the provenance needed for
/// downstream coloring and weighting.
#[derive(Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point3D {
    pub x_mm: f64,
    pub y_mm: f64,
    pub z_mm: f64,
    /// Return strength of the measurement this point came from.
    pub quality: u8,
    /// Sensor rotation angle of the source measurement, in degrees.
    pub sensor_angle_deg: f64,
    /// Turret angle of the frame this point belongs to, in degrees.
    pub turret_angle_deg: f64,
}

impl Point3D {
    /// Copy with coordinates rounded to two decimal places. Intended for
    /// export boundaries only; processing stages keep full precision.
    pub fn rounded(&self) -> Point3D {
        Point3D {
            x_mm: round2(self.x_mm),
            y_mm: round2(self.y_mm),
            z_mm: round2(self.z_mm),
            ..self.clone()
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.).round() / 100.
}

/// Ordered collection of points accumulated over one scanning session.
/// The outlier filter consumes a whole set at once.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointSet {
    pub points: Vec<Point3D>,
}

impl PointSet {
    pub fn new() -> PointSet {
        PointSet { points: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: Point3D) {
        self.points.push(point);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3D> {
        self.points.iter()
    }
}

impl From<Vec<Point3D>> for PointSet {
    fn from(points: Vec<Point3D>) -> PointSet {
        PointSet { points }
    }
}

impl IntoIterator for PointSet {
    type Item = Point3D;
    type IntoIter = std::vec::IntoIter<Point3D>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

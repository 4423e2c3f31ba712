use log::debug;
use rplidar_data::{Point3D, PointSet};

/// Remove statistical outliers from a complete point set.
///
/// Mean and sample standard deviation are computed per axis once, against
/// the input set; a point survives only when it sits within
/// `mean +/- std_factor * std` on all three axes at once. The statistics
/// are deliberately not recomputed between axes.
///
/// Degenerate inputs: sets with fewer than two points pass through
/// unchanged, and an axis with zero deviation imposes no constraint.
pub fn filter_outliers(set: PointSet, std_factor: f64) -> PointSet {
    if set.len() < 2 {
        return set;
    }

    let bounds = [
        AxisBound::over(&set, std_factor, |p| p.x_mm),
        AxisBound::over(&set, std_factor, |p| p.y_mm),
        AxisBound::over(&set, std_factor, |p| p.z_mm),
    ];

    let total = set.len();
    let points: Vec<Point3D> = set
        .into_iter()
        .filter(|p| {
            bounds[0].contains(p.x_mm) && bounds[1].contains(p.y_mm) && bounds[2].contains(p.z_mm)
        })
        .collect();
    debug!("outlier filter kept {} of {} points", points.len(), total);

    PointSet::from(points)
}

struct AxisBound {
    lower: f64,
    upper: f64,
    unconstrained: bool,
}

impl AxisBound {
    fn over(set: &PointSet, std_factor: f64, axis: fn(&Point3D) -> f64) -> AxisBound {
        let n = set.len() as f64;
        let mean = set.iter().map(axis).sum::<f64>() / n;
        let variance = set.iter().map(|p| (axis(p) - mean).powi(2)).sum::<f64>() / (n - 1.);
        let std = variance.sqrt();
        AxisBound {
            lower: mean - std_factor * std,
            upper: mean + std_factor * std,
            unconstrained: std == 0.0,
        }
    }

    fn contains(&self, value: f64) -> bool {
        self.unconstrained || (value >= self.lower && value <= self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, z: f64) -> Point3D {
        Point3D {
            x_mm: x,
            y_mm: y,
            z_mm: z,
            quality: 0,
            sensor_angle_deg: 0.,
            turret_angle_deg: 0.,
        }
    }

    /// 100 tightly clustered points, deterministic spread of about 1 mm.
    fn cluster() -> Vec<Point3D> {
        (0..100)
            .map(|i| {
                let wobble = (i % 10) as f64 * 0.1;
                point(1000. + wobble, 2000. - wobble, 500. + wobble)
            })
            .collect()
    }

    #[test]
    fn test_gross_outlier_is_removed() {
        let mut points = cluster();
        points.push(point(1500., 2000., 500.)); // hundreds of sigma out on x
        let filtered = filter_outliers(PointSet::from(points), 2.5);
        assert_eq!(filtered.len(), 100);
        assert!(filtered.iter().all(|p| p.x_mm < 1400.));
    }

    #[test]
    fn test_bound_is_checked_on_every_axis() {
        let mut points = cluster();
        points.push(point(1000., 2000., 900.)); // only z is out
        let filtered = filter_outliers(PointSet::from(points), 2.5);
        assert_eq!(filtered.len(), 100);
    }

    #[test]
    fn test_second_pass_removes_nothing() {
        let mut points = cluster();
        points.push(point(1500., 2000., 500.));
        let once = filter_outliers(PointSet::from(points), 2.5);
        let twice = filter_outliers(once.clone(), 2.5);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_variance_axis_is_unconstrained() {
        // all z identical; x carries the outlier
        let mut points: Vec<Point3D> = (0..50)
            .map(|i| point(100. + (i % 5) as f64, (i % 7) as f64, 42.))
            .collect();
        points.push(point(10_000., 3., 42.));
        let filtered = filter_outliers(PointSet::from(points), 2.5);
        assert_eq!(filtered.len(), 50);
        assert!(filtered.iter().all(|p| p.z_mm == 42.));
    }

    #[test]
    fn test_tiny_sets_pass_through() {
        let empty = filter_outliers(PointSet::new(), 2.5);
        assert!(empty.is_empty());

        let single = filter_outliers(PointSet::from(vec![point(1., 2., 3.)]), 2.5);
        assert_eq!(single.len(), 1);
    }
}

use crate::numeric::{degree_to_radian, round2};
use rplidar_data::MeasurementRecord;
use std::collections::BTreeMap;

/// Per-angle-bucket aggregate for the flat (non-3D) output mode.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleBucket {
    /// Lower edge of the bucket, in degrees.
    pub angle_deg: f64,
    /// Arithmetic mean distance of the bucket, in millimeters.
    pub distance_mm: f64,
    /// Arithmetic mean quality of the bucket.
    pub quality: f64,
    /// Number of measurements aggregated into the bucket.
    pub count: usize,
    /// Cartesian position recomputed from the averaged polar values,
    /// rounded for export.
    pub x_mm: f64,
    pub y_mm: f64,
}

/// Group measurements into angle buckets and average them.
///
/// The Cartesian coordinates are recomputed from the averaged polar values
/// rather than averaging per-record coordinates; averaging x/y directly
/// would bias buckets that straddle the 0/360 seam. A width of 1.0 degree
/// reproduces plain integer-degree truncation.
pub fn aggregate_by_angle(
    records: &[MeasurementRecord],
    bucket_width_deg: f64,
) -> Vec<AngleBucket> {
    assert!(bucket_width_deg > 0.0);

    let mut buckets: BTreeMap<i64, BucketAccumulator> = BTreeMap::new();
    for record in records {
        let key = (record.angle_deg / bucket_width_deg).floor() as i64;
        let acc = buckets.entry(key).or_default();
        acc.distance_sum += record.distance_mm;
        acc.quality_sum += record.quality as f64;
        acc.count += 1;
    }

    buckets
        .into_iter()
        .map(|(key, acc)| {
            let angle_deg = key as f64 * bucket_width_deg;
            let distance_mm = acc.distance_sum / acc.count as f64;
            let angle_rad = degree_to_radian(angle_deg);
            AngleBucket {
                angle_deg,
                distance_mm,
                quality: acc.quality_sum / acc.count as f64,
                count: acc.count,
                x_mm: round2(distance_mm * angle_rad.cos()),
                y_mm: round2(distance_mm * angle_rad.sin()),
            }
        })
        .collect()
}

#[derive(Default)]
struct BucketAccumulator {
    distance_sum: f64,
    quality_sum: f64,
    count: usize,
}

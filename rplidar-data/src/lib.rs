pub mod config;
pub mod frame;
pub mod measurement;
pub mod point;

pub use config::{AngleStep, ReconstructionMode, ScanConfig, TurretSchedule};
pub use frame::RawFrame;
pub use measurement::{MeasurementRecord, RecordReject};
pub use point::{Point3D, PointSet};

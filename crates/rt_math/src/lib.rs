//! RT math types.
//!
//! Everything in the tracer works in double precision: points, directions
//! and colours are all `glam::DVec3`.

pub use glam::DVec3;

/// Points and directions.
pub type Vec3 = DVec3;

/// Linear RGB colour, one channel per component. Values above 1.0 are legal
/// until the quantizer resolves them.
pub type Color = DVec3;

mod interval;
mod optics;
mod ray;

pub use interval::Interval;
pub use optics::{reflect, refract};
pub use ray::Ray;

//! Types

mod location;
mod ray;
mod status;
pub use location::Location;
pub use ray::{Ray, RayHit};
pub use status::{NewtonState, SolveStatus};

use nalgebra::RealField;
use num::NumCast;

/// Scalar type used for coordinates, control-point values and tolerances
pub trait RealScalar: RealField + NumCast + Copy + Send + Sync {}

impl<T: RealField + NumCast + Copy + Send + Sync> RealScalar for T {}

/// Convert an `f64` constant into the scalar type
pub(crate) fn cast<T: RealScalar>(value: f64) -> T {
    nalgebra::convert(value)
}

/// Convert an integer into the scalar type
pub(crate) fn cast_usize<T: RealScalar>(value: usize) -> T {
    nalgebra::convert(value as f64)
}

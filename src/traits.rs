//! Traits

mod basis;
mod coefficients;
#[cfg(feature = "serde")]
mod io;
mod spatial_index;
mod transform;

pub use basis::Basis;
pub use coefficients::CoefficientAccessor;
#[cfg(feature = "serde")]
pub use io::{ConvertToSerializable, RONExport, RONImport};
pub use spatial_index::{RayCandidate, RaySpatialIndex, SpatialIndex};
pub use transform::Transform;

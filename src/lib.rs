//! Point location and ray intersection for high-order tensor-product meshes
//!
//! Elements are described by control points weighted by a tensor-product polynomial basis on the
//! reference domain `[0, 1]^R`. Given a physical point, a [`Locator`] finds the element that
//! contains it and the reference coordinate of the point in that element by Newton iteration on
//! the candidates proposed by a spatial index.
//!
//! ```
//! use ndlocate::{
//!     basis::BernsteinBasis, shapes::unit_cube, spatial::BoundingBoxIndex, Locator,
//!     LocatorOptions,
//! };
//! use nalgebra::Vector3;
//!
//! let control_points = unit_cube::<f64>(2, 2, 2, 2).unwrap();
//! let index = BoundingBoxIndex::from_elements(&control_points);
//! let basis = BernsteinBasis::<f64, 3>::new(2).unwrap();
//! let locator = Locator::new(&control_points, basis, &index, LocatorOptions::default()).unwrap();
//!
//! let location = locator.locate_point(&Vector3::new(0.75, 0.25, 0.25));
//! assert_eq!(location.element, Some(4));
//! ```
#![cfg_attr(feature = "strict", deny(warnings), deny(unused_crate_dependencies))]
#![warn(missing_docs)]

pub mod basis;
pub mod coefficients;
pub mod control_points;
pub mod error;
pub mod intersect;
#[cfg(feature = "serde")]
mod io;
pub mod locator;
pub mod mesh_field;
pub mod newton;
pub mod shapes;
pub mod spatial;
pub mod topology;
pub mod traits;
pub mod transform;
pub mod types;

pub use control_points::ControlPointSet;
pub use error::{Error, Result};
pub use intersect::FaceIntersector;
pub use locator::{Locator, LocatorOptions};
pub use mesh_field::MeshField;
pub use newton::{NewtonOptions, NewtonSolver};

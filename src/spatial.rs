//! Reference implementations of the candidate-query interfaces
mod bounding_box;
mod index;

pub use bounding_box::BoundingBox;
pub use index::{BoundingBoxIndex, BoxCandidates, ExhaustiveIndex, RayBoxCandidates};

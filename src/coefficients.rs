//! Coefficient accessors
mod element;
mod face;

pub use element::ElementCoefficients;
pub use face::{FaceCoefficients, HexFace, HEX_FACE_COUNT};

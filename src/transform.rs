//! Element transforms and their combinators
mod element;
mod pair;
mod ray;

pub use element::ElementTransform;
pub use pair::PairTransform;
pub use ray::RayTransform;

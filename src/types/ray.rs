//! Rays and ray hits
use crate::types::RealScalar;
use nalgebra::{SVector, Vector3};

/// A ray `origin + s * direction` restricted to `near <= s <= far`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray<T: RealScalar> {
    /// Origin
    pub origin: Vector3<T>,
    /// Direction (not required to be normalised)
    pub direction: Vector3<T>,
    /// Smallest accepted distance parameter
    pub near: T,
    /// Largest accepted distance parameter
    pub far: T,
}

impl<T: RealScalar> Ray<T> {
    /// Create a ray with the range `[0, inf)`
    pub fn new(origin: Vector3<T>, direction: Vector3<T>) -> Self {
        Self {
            origin,
            direction,
            near: T::zero(),
            far: T::max_value().unwrap_or_else(T::one),
        }
    }

    /// Restrict the accepted range of the distance parameter
    pub fn with_range(mut self, near: T, far: T) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// The point at distance parameter `s`
    pub fn at(&self, s: T) -> Vector3<T> {
        self.origin + self.direction * s
    }

    /// Is `s` inside the accepted range?
    pub fn accepts(&self, s: T) -> bool {
        self.near <= s && s <= self.far
    }
}

/// Intersection of a ray with an element or element face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<T: RealScalar, const R: usize> {
    /// Index of the element or face that was hit
    pub entity: usize,
    /// Reference coordinate of the hit inside that entity
    pub reference: SVector<T, R>,
    /// Distance parameter along the ray
    pub distance: T,
}

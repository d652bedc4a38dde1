//! Axis-aligned bounding boxes
use crate::types::{Ray, RealScalar};
use nalgebra::SVector;

/// An axis-aligned box in `D` dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox<T: RealScalar, const D: usize> {
    min: SVector<T, D>,
    max: SVector<T, D>,
}

impl<T: RealScalar, const D: usize> BoundingBox<T, D> {
    /// Create a box from its corners
    pub fn new(min: SVector<T, D>, max: SVector<T, D>) -> Self {
        debug_assert!(min.iter().zip(max.iter()).all(|(a, b)| a <= b));
        Self { min, max }
    }

    /// The degenerate box containing a single point
    pub fn from_point(point: SVector<T, D>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Lower corner
    pub fn min(&self) -> &SVector<T, D> {
        &self.min
    }

    /// Upper corner
    pub fn max(&self) -> &SVector<T, D> {
        &self.max
    }

    /// Centre of the box
    pub fn center(&self) -> SVector<T, D> {
        (self.min + self.max) * crate::types::cast::<T>(0.5)
    }

    /// Largest side length
    pub fn max_extent(&self) -> T {
        (self.max - self.min).max()
    }

    /// Grow the box to contain `point`
    pub fn include(&mut self, point: &SVector<T, D>) {
        for d in 0..D {
            self.min[d] = self.min[d].min(point[d]);
            self.max[d] = self.max[d].max(point[d]);
        }
    }

    /// Grow the box to contain `other`
    pub fn merge(&mut self, other: &Self) {
        self.include(&other.min);
        self.include(&other.max);
    }

    /// Grow the box by `amount` on every side
    pub fn padded(&self, amount: T) -> Self {
        let pad = SVector::<T, D>::repeat(amount);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Does the closed box contain `point`?
    pub fn contains(&self, point: &SVector<T, D>) -> bool {
        (0..D).all(|d| self.min[d] <= point[d] && point[d] <= self.max[d])
    }

    /// Does the closed interval of component 0 contain `value`?
    ///
    /// Used for the range of a scalar field.
    pub fn contains_value(&self, value: T) -> bool {
        D > 0 && self.min[0] <= value && value <= self.max[0]
    }
}

impl<T: RealScalar> BoundingBox<T, 3> {
    /// The range of ray distances inside the box, clipped to the accepted range of the ray
    ///
    /// Returns `None` if the ray misses the box.
    pub fn intersect_ray(&self, ray: &Ray<T>) -> Option<(T, T)> {
        let mut enter = ray.near;
        let mut exit = ray.far;
        for d in 0..3 {
            let o = ray.origin[d];
            let dir = ray.direction[d];
            if dir == T::zero() {
                if o < self.min[d] || o > self.max[d] {
                    return None;
                }
                continue;
            }
            let mut t0 = (self.min[d] - o) / dir;
            let mut t1 = (self.max[d] - o) / dir;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            enter = enter.max(t0);
            exit = exit.min(t1);
            if enter > exit {
                return None;
            }
        }
        Some((enter, exit))
    }
}

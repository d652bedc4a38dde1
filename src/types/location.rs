//! Location result
use crate::types::RealScalar;
use nalgebra::SVector;

/// The element containing a query point and the reference coordinate of the point in that element
///
/// When no candidate element accepted the point, `element` is `None` and `reference` carries no
/// meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location<T: RealScalar, const D: usize> {
    /// Index of the containing element
    pub element: Option<usize>,
    /// Reference coordinate inside the element
    pub reference: SVector<T, D>,
}

impl<T: RealScalar, const D: usize> Location<T, D> {
    /// Create a location in element `element`
    pub fn new(element: usize, reference: SVector<T, D>) -> Self {
        Self {
            element: Some(element),
            reference,
        }
    }

    /// The result for a point that no element accepted
    pub fn not_found() -> Self {
        Self {
            element: None,
            reference: SVector::<T, D>::repeat(-T::one()),
        }
    }

    /// Was the point located?
    pub fn is_found(&self) -> bool {
        self.element.is_some()
    }

    /// Element index with `-1` standing for "not found"
    pub fn element_id(&self) -> i64 {
        self.element.map_or(-1, |e| e as i64)
    }
}

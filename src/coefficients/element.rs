//! Coefficients of a whole element
use crate::{control_points::ControlPointSet, traits::CoefficientAccessor, types::RealScalar};
use nalgebra::SVector;

/// Accessor for the control points of one element, in the element's local dof order
#[derive(Debug, Clone, Copy)]
pub struct ElementCoefficients<'a, T: RealScalar, const P: usize> {
    control_points: &'a ControlPointSet<T, P>,
    element: usize,
}

impl<'a, T: RealScalar, const P: usize> ElementCoefficients<'a, T, P> {
    /// Create an accessor bound to `element`
    pub fn new(control_points: &'a ControlPointSet<T, P>, element: usize) -> Self {
        debug_assert!(element < control_points.element_count());
        Self {
            control_points,
            element,
        }
    }
}

impl<T: RealScalar, const P: usize> CoefficientAccessor<P> for ElementCoefficients<'_, T, P> {
    type T = T;

    fn bind(&mut self, id: usize) {
        debug_assert!(id < self.control_points.element_count());
        self.element = id;
    }

    fn bound_id(&self) -> usize {
        self.element
    }

    fn dof_count(&self) -> usize {
        self.control_points.dofs_per_element()
    }

    fn coefficient(&self, local_index: usize) -> SVector<T, P> {
        self.control_points
            .value(self.control_points.element_dofs(self.element)[local_index])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rebind() {
        let cps = ControlPointSet::<f64, 1>::new(vec![3.0, 4.0, 5.0], vec![0, 1, 1, 2], 2).unwrap();
        let mut c = cps.element(0);
        assert_eq!(c.dof_count(), 2);
        assert_relative_eq!(c.coefficient(1)[0], 4.0);
        c.bind(1);
        assert_eq!(c.bound_id(), 1);
        assert_relative_eq!(c.coefficient(0)[0], 4.0);
        assert_relative_eq!(c.coefficient(1)[0], 5.0);
    }
}

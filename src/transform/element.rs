//! A basis composed with the coefficients of one element
use crate::{
    error::{Error, Result},
    traits::{Basis, CoefficientAccessor, Transform},
};
use nalgebra::{SMatrix, SVector};

/// The map of one element: a basis weighted by the element's coefficients
#[derive(Debug, Clone, Copy)]
pub struct ElementTransform<B, C, const R: usize, const P: usize> {
    basis: B,
    coefficients: C,
}

impl<B: Basis<R>, C: CoefficientAccessor<P, T = B::T>, const R: usize, const P: usize>
    ElementTransform<B, C, R, P>
{
    /// Create new
    ///
    /// Fails if the accessor does not provide exactly the dofs that the basis expects.
    pub fn new(basis: B, coefficients: C) -> Result<Self> {
        if basis.dofs_per_element() != coefficients.dof_count() {
            log::warn!(
                "Basis with {} dofs cannot be combined with {} coefficients",
                basis.dofs_per_element(),
                coefficients.dof_count()
            );
            return Err(Error::DofMismatch {
                expected: basis.dofs_per_element(),
                found: coefficients.dof_count(),
            });
        }
        Ok(Self {
            basis,
            coefficients,
        })
    }

    // Callers must have checked the dof counts
    pub(crate) fn from_parts(basis: B, coefficients: C) -> Self {
        debug_assert!(basis.dofs_per_element() == coefficients.dof_count());
        Self {
            basis,
            coefficients,
        }
    }

    /// Bind the transform to another entity
    pub fn bind(&mut self, id: usize) {
        self.coefficients.bind(id);
    }

    /// The basis
    pub fn basis(&self) -> &B {
        &self.basis
    }

    /// The coefficient accessor
    pub fn coefficients(&self) -> &C {
        &self.coefficients
    }
}

impl<B: Basis<R>, C: CoefficientAccessor<P, T = B::T>, const R: usize, const P: usize>
    Transform<R, P> for ElementTransform<B, C, R, P>
{
    type T = B::T;

    fn eval(&self, reference: &SVector<B::T, R>) -> (SVector<B::T, P>, SMatrix<B::T, P, R>) {
        self.basis.linear_combination(reference, &self.coefficients)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{basis::BernsteinBasis, control_points::ControlPointSet};
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    #[test]
    fn test_bilinear_quadrilateral() {
        // Corners (0,0), (2,0), (0,1), (2,1) in local dof order (i0, i1) -> 2 i0 + i1
        let points = [
            Vector2::new(0.0, 0.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(2.0, 0.0),
            Vector2::new(2.0, 1.0),
        ];
        let cps = ControlPointSet::from_points(&points, vec![0, 1, 2, 3], 4).unwrap();
        let t = ElementTransform::<_, _, 2, 2>::new(
            BernsteinBasis::<f64, 2>::new(1).unwrap(),
            cps.element(0),
        )
        .unwrap();
        let (value, jacobian) = t.eval(&Vector2::new(0.25, 0.5));
        assert_relative_eq!(value[0], 0.5);
        assert_relative_eq!(value[1], 0.5);
        assert_relative_eq!(jacobian[(0, 0)], 2.0);
        assert_relative_eq!(jacobian[(1, 1)], 1.0);
        assert_relative_eq!(jacobian[(0, 1)], 0.0);
        assert_relative_eq!(jacobian[(1, 0)], 0.0);
    }

    #[test]
    fn test_dof_mismatch() {
        let cps = ControlPointSet::<f64, 2>::new(vec![0.0; 8], vec![0, 1, 2, 3], 4).unwrap();
        let r = ElementTransform::<_, _, 2, 2>::new(
            BernsteinBasis::<f64, 2>::new(2).unwrap(),
            cps.element(0),
        );
        assert!(matches!(
            r,
            Err(Error::DofMismatch {
                expected: 9,
                found: 4
            })
        ));
    }
}

//! Tensor-product polynomial bases
use crate::{
    traits::CoefficientAccessor,
    types::{cast, RealScalar},
};
use nalgebra::{SMatrix, SVector};
use num::{One, Zero};

pub trait Basis<const R: usize>: Sync {
    //! A family of polynomial shape functions on the reference domain `[0, 1]^R`

    /// Scalar type
    type T: RealScalar;

    /// The polynomial degree in each reference direction
    fn degree(&self) -> usize;

    /// The number of dofs in each reference direction
    fn dofs_1d(&self) -> usize {
        self.degree() + 1
    }

    /// The number of dofs of one element
    fn dofs_per_element(&self) -> usize {
        self.dofs_1d().pow(R as u32)
    }

    /// Evaluate the linear combination of the basis functions weighted by the coefficients
    /// supplied by `coefficients` at `reference`
    ///
    /// Returns the value and the derivative set. Column `d` of the derivative set is the partial
    /// derivative of the value with respect to reference coordinate `d`.
    fn linear_combination<const P: usize, C: CoefficientAccessor<P, T = Self::T>>(
        &self,
        reference: &SVector<Self::T, R>,
        coefficients: &C,
    ) -> (SVector<Self::T, P>, SMatrix<Self::T, P, R>);

    /// Is `reference` inside the reference domain, widened by `tolerance` on every side?
    fn is_inside_with_tolerance(&self, reference: &SVector<Self::T, R>, tolerance: Self::T) -> bool {
        reference
            .iter()
            .all(|&x| -tolerance <= x && x <= Self::T::one() + tolerance)
    }

    /// Is `reference` inside the closed reference domain `[0, 1]^R`?
    fn is_inside(&self, reference: &SVector<Self::T, R>) -> bool {
        self.is_inside_with_tolerance(reference, Self::T::zero())
    }

    /// The centroid of the reference domain
    fn centroid(&self) -> SVector<Self::T, R> {
        SVector::<Self::T, R>::repeat(cast(0.5))
    }
}

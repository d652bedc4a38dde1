//! Maps from reference to physical space
use crate::types::RealScalar;
use nalgebra::{SMatrix, SVector};

pub trait Transform<const R: usize, const P: usize> {
    //! A map from an `R`-dimensional reference space to a `P`-dimensional physical space

    /// Scalar type
    type T: RealScalar;

    /// Evaluate the value and the derivative set at `reference`
    ///
    /// Column `d` of the returned matrix is the partial derivative of the value with respect to
    /// reference coordinate `d`.
    fn eval(&self, reference: &SVector<Self::T, R>) -> (SVector<Self::T, P>, SMatrix<Self::T, P, R>);
}

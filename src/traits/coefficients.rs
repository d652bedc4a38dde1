//! Access to the coefficients of a single element
use crate::types::RealScalar;
use nalgebra::SVector;

pub trait CoefficientAccessor<const P: usize> {
    //! Lookup from a local dof index of one bound entity to a control-point value

    /// Scalar type
    type T: RealScalar;

    /// Bind the accessor to another entity
    fn bind(&mut self, id: usize);

    /// The entity this accessor is bound to
    fn bound_id(&self) -> usize;

    /// The number of local dofs of the bound entity
    fn dof_count(&self) -> usize;

    /// The control-point value of local dof `local_index`
    fn coefficient(&self, local_index: usize) -> SVector<Self::T, P>;
}

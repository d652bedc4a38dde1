//! Two transforms over the same reference space, stacked into one
use crate::{
    error::{Error, Result},
    traits::Transform,
};
use nalgebra::{SMatrix, SVector};

/// A transform whose value is the concatenation of the values of two transforms
///
/// Used to superimpose a field on a geometry: the two transforms share the reference space but
/// may have different numbers of dofs. The physical dimension `P` must equal `PA + PB`.
#[derive(Debug, Clone, Copy)]
pub struct PairTransform<A, B, const R: usize, const PA: usize, const PB: usize, const P: usize> {
    first: A,
    second: B,
}

impl<A, B, const R: usize, const PA: usize, const PB: usize, const P: usize>
    PairTransform<A, B, R, PA, PB, P>
where
    A: Transform<R, PA>,
    B: Transform<R, PB, T = A::T>,
{
    /// Create new
    pub fn new(first: A, second: B) -> Result<Self> {
        if PA + PB != P {
            return Err(Error::DimensionMismatch(format!(
                "a pair of transforms with physical dimensions {PA} and {PB} has dimension {}, not {P}",
                PA + PB
            )));
        }
        Ok(Self { first, second })
    }

    /// The first transform
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The second transform
    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<A, B, const R: usize, const PA: usize, const PB: usize, const P: usize> Transform<R, P>
    for PairTransform<A, B, R, PA, PB, P>
where
    A: Transform<R, PA>,
    B: Transform<R, PB, T = A::T>,
{
    type T = A::T;

    fn eval(&self, reference: &SVector<A::T, R>) -> (SVector<A::T, P>, SMatrix<A::T, P, R>) {
        let (first_value, first_derivative) = self.first.eval(reference);
        let (second_value, second_derivative) = self.second.eval(reference);
        let value = SVector::<A::T, P>::from_fn(|i, _| {
            if i < PA {
                first_value[i]
            } else {
                second_value[i - PA]
            }
        });
        let derivative = SMatrix::<A::T, P, R>::from_fn(|i, j| {
            if i < PA {
                first_derivative[(i, j)]
            } else {
                second_derivative[(i - PA, j)]
            }
        });
        (value, derivative)
    }
}

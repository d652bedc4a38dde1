//! Ray augmentation of a transform
use crate::{
    error::{Error, Result},
    traits::Transform,
    types::RealScalar,
};
use nalgebra::{SMatrix, SVector};

/// The transform `(u, s) -> T(u) - s d` for a ray direction `d`
///
/// The extra reference coordinate `s` (the last one, index `R`) is the distance along the ray.
/// Solving `(u, s) -> o` for the ray origin `o` finds the intersection of the ray with the image
/// of `T`. The direction has `RAY <= P` components; the remaining physical components are left
/// unchanged, so a field stacked after the geometry can be constrained at the same time.
#[derive(Debug, Clone, Copy)]
pub struct RayTransform<Tr, T: RealScalar, const R: usize, const RS: usize, const P: usize, const RAY: usize>
{
    inner: Tr,
    minus_direction: SVector<T, RAY>,
}

impl<Tr, T, const R: usize, const RS: usize, const P: usize, const RAY: usize>
    RayTransform<Tr, T, R, RS, P, RAY>
where
    Tr: Transform<R, P, T = T>,
    T: RealScalar,
{
    /// Create new
    pub fn new(inner: Tr, direction: SVector<T, RAY>) -> Result<Self> {
        if RS != R + 1 {
            return Err(Error::DimensionMismatch(format!(
                "ray augmentation of a {R}-dimensional reference space has dimension {}, not {RS}",
                R + 1
            )));
        }
        if RAY > P {
            return Err(Error::DimensionMismatch(format!(
                "a {RAY}-dimensional ray cannot be subtracted from a {P}-dimensional transform"
            )));
        }
        Ok(Self {
            inner,
            minus_direction: -direction,
        })
    }

    /// Change the ray direction
    pub fn set_direction(&mut self, direction: SVector<T, RAY>) {
        self.minus_direction = -direction;
    }

    /// The augmented transform
    pub fn inner(&self) -> &Tr {
        &self.inner
    }

    /// The augmented transform
    pub fn inner_mut(&mut self) -> &mut Tr {
        &mut self.inner
    }
}

impl<Tr, T, const R: usize, const RS: usize, const P: usize, const RAY: usize> Transform<RS, P>
    for RayTransform<Tr, T, R, RS, P, RAY>
where
    Tr: Transform<R, P, T = T>,
    T: RealScalar,
{
    type T = T;

    fn eval(&self, reference: &SVector<T, RS>) -> (SVector<T, P>, SMatrix<T, P, RS>) {
        let uvw = SVector::<T, R>::from_fn(|i, _| reference[i]);
        let s = reference[R];
        let (mut value, inner_derivative) = self.inner.eval(&uvw);
        for pdim in 0..RAY {
            value[pdim] += self.minus_direction[pdim] * s;
        }
        let derivative = SMatrix::<T, P, RS>::from_fn(|i, j| {
            if j < R {
                inner_derivative[(i, j)]
            } else if i < RAY {
                self.minus_direction[i]
            } else {
                T::zero()
            }
        });
        (value, derivative)
    }
}

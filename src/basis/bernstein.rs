//! Tensor-product Bernstein basis
use crate::{
    basis::binomial_row,
    error::{Error, Result},
    traits::{Basis, CoefficientAccessor},
    types::{cast_usize, RealScalar},
};
use nalgebra::{SMatrix, SVector};
use std::marker::PhantomData;

/// Largest supported polynomial degree
pub const MAX_DEGREE: usize = 20;

const MAX_DOFS_1D: usize = MAX_DEGREE + 1;

/// Evaluate the Bernstein polynomials of degree `p` and their derivatives at `x`
///
/// The values are written into `u[..=p]` and the derivatives into `d[..=p]`. The evaluation
/// starts from the binomial coefficients and multiplies in powers of `x` and `1 - x`, so no
/// factorials or powers are formed explicitly.
pub fn bernstein_1d<T: RealScalar>(p: usize, x: T, u: &mut [T], d: &mut [T]) {
    if p == 0 {
        u[0] = T::one();
        d[0] = T::zero();
        return;
    }
    binomial_row(p, u);
    d[..=p].copy_from_slice(&u[..=p]);

    let y = T::one() - x;
    let xpy = x + y;
    let ptx = cast_usize::<T>(p) * x;

    let mut z = T::one();
    for i in 1..p {
        d[i] *= z * (cast_usize::<T>(i) * xpy - ptx);
        z *= x;
        u[i] *= z;
    }
    d[p] = cast_usize::<T>(p) * z;
    u[p] = z * x;

    z = T::one();
    for i in (1..p).rev() {
        d[i] *= z;
        z *= y;
        u[i] *= z;
    }
    d[0] = -cast_usize::<T>(p) * z;
    u[0] = z * y;
}

/// Tensor-product Bernstein basis of a given degree on `[0, 1]^R`
///
/// Local dofs are ordered with reference coordinate 0 outermost: dof
/// `i_0 (p+1)^(R-1) + ... + i_(R-1)` is the product of the `i_d`-th polynomial in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BernsteinBasis<T: RealScalar, const R: usize> {
    degree: usize,
    _t: PhantomData<T>,
}

impl<T: RealScalar, const R: usize> BernsteinBasis<T, R> {
    /// Create a basis of degree `degree`
    pub fn new(degree: usize) -> Result<Self> {
        if R == 0 {
            return Err(Error::ZeroReferenceDimension);
        }
        if degree > MAX_DEGREE {
            log::warn!("Bernstein degree {degree} is not supported");
            return Err(Error::DegreeTooHigh {
                degree,
                max: MAX_DEGREE,
            });
        }
        Ok(Self {
            degree,
            _t: PhantomData,
        })
    }
}

impl<T: RealScalar, const R: usize> Basis<R> for BernsteinBasis<T, R> {
    type T = T;

    fn degree(&self) -> usize {
        self.degree
    }

    fn linear_combination<const P: usize, C: CoefficientAccessor<P, T = T>>(
        &self,
        reference: &SVector<T, R>,
        coefficients: &C,
    ) -> (SVector<T, P>, SMatrix<T, P, R>) {
        let n = self.degree + 1;

        // One row of 1D values and one row of 1D derivatives per reference direction
        let mut value_rows = [[T::zero(); MAX_DOFS_1D]; R];
        let mut derivative_rows = [[T::zero(); MAX_DOFS_1D]; R];
        for (rdim, (u, d)) in value_rows
            .iter_mut()
            .zip(derivative_rows.iter_mut())
            .enumerate()
        {
            bernstein_1d(self.degree, reference[rdim], u, d);
        }

        let mut stride = [1; R];
        for rdim in (0..R).rev().skip(1) {
            stride[rdim] = n * stride[rdim + 1];
        }
        let dofs = n * stride[0];

        let mut value = SVector::<T, P>::zeros();
        let mut derivative = SMatrix::<T, P, R>::zeros();
        let mut index = [0; R];
        for dof in 0..dofs {
            let mut shape = T::one();
            for rdim in 0..R {
                index[rdim] = (dof / stride[rdim]) % n;
                shape *= value_rows[rdim][index[rdim]];
            }

            let c = coefficients.coefficient(dof);
            value += c * shape;

            for rdim_out in 0..R {
                let mut dshape = derivative_rows[rdim_out][index[rdim_out]];
                for rdim_in in (0..R).filter(|r| *r != rdim_out) {
                    dshape *= value_rows[rdim_in][index[rdim_in]];
                }
                for pdim in 0..P {
                    derivative[(pdim, rdim_out)] += c[pdim] * dshape;
                }
            }
        }
        (value, derivative)
    }
}

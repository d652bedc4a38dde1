//! Tensor-product monomial basis
use crate::{
    basis::MAX_DEGREE,
    error::{Error, Result},
    traits::{Basis, CoefficientAccessor},
    types::{cast_usize, RealScalar},
};
use nalgebra::{SMatrix, SVector};
use std::marker::PhantomData;

/// Tensor-product monomial basis `x_0^(i_0) ... x_(R-1)^(i_(R-1))` of a given degree
///
/// Local dofs use the same ordering as [`BernsteinBasis`](crate::basis::BernsteinBasis): the
/// exponent of reference coordinate 0 is the outermost index. Evaluation uses Horner's method,
/// nested over the reference directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerBasis<T: RealScalar, const R: usize> {
    degree: usize,
    _t: PhantomData<T>,
}

impl<T: RealScalar, const R: usize> PowerBasis<T, R> {
    /// Create a basis of degree `degree`
    pub fn new(degree: usize) -> Result<Self> {
        if R == 0 {
            return Err(Error::ZeroReferenceDimension);
        }
        if degree > MAX_DEGREE {
            log::warn!("Power basis degree {degree} is not supported");
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

    // Horner evaluation over reference directions `level..R` of the sub-block of coefficients
    // starting at `start`. Only derivative columns `level..R` are filled.
    fn horner<const P: usize, C: CoefficientAccessor<P, T = T>>(
        &self,
        level: usize,
        start: usize,
        reference: &SVector<T, R>,
        coefficients: &C,
    ) -> (SVector<T, P>, SMatrix<T, P, R>) {
        let n = self.degree + 1;
        let stride = n.pow((R - 1 - level) as u32);
        let x = reference[level];

        let mut value = SVector::<T, P>::zeros();
        let mut derivative = SMatrix::<T, P, R>::zeros();
        for k in (0..n).rev() {
            let (inner_value, inner_derivative) = if level + 1 == R {
                (coefficients.coefficient(start + k), SMatrix::<T, P, R>::zeros())
            } else {
                self.horner(level + 1, start + k * stride, reference, coefficients)
            };
            if k > 0 {
                let kt = cast_usize::<T>(k);
                for pdim in 0..P {
                    derivative[(pdim, level)] = derivative[(pdim, level)] * x + inner_value[pdim] * kt;
                }
            }
            value = value * x + inner_value;
            for rdim in level + 1..R {
                for pdim in 0..P {
                    derivative[(pdim, rdim)] =
                        derivative[(pdim, rdim)] * x + inner_derivative[(pdim, rdim)];
                }
            }
        }
        (value, derivative)
    }
}

impl<T: RealScalar, const R: usize> Basis<R> for PowerBasis<T, R> {
    type T = T;

    fn degree(&self) -> usize {
        self.degree
    }

    fn linear_combination<const P: usize, C: CoefficientAccessor<P, T = T>>(
        &self,
        reference: &SVector<T, R>,
        coefficients: &C,
    ) -> (SVector<T, P>, SMatrix<T, P, R>) {
        self.horner(0, 0, reference, coefficients)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::control_points::ControlPointSet;
    use approx::assert_relative_eq;
    use nalgebra::{Vector1, Vector2, Vector3};

    #[test]
    fn test_degree_too_high() {
        assert!(PowerBasis::<f64, 2>::new(MAX_DEGREE).is_ok());
        assert!(matches!(
            PowerBasis::<f64, 2>::new(MAX_DEGREE + 1),
            Err(Error::DegreeTooHigh { degree: 21, max: 20 })
        ));
    }

    #[test]
    fn test_1d() {
        // 1 + 2x - 3x^2
        let basis = PowerBasis::<f64, 1>::new(2).unwrap();
        let cps = ControlPointSet::<f64, 1>::new(vec![1.0, 2.0, -3.0], vec![0, 1, 2], 3).unwrap();
        let (value, derivative) = basis.linear_combination(&Vector1::new(0.5), &cps.element(0));
        assert_relative_eq!(value[0], 1.25);
        assert_relative_eq!(derivative[(0, 0)], -1.0);
    }

    #[test]
    fn test_2d_vector_valued() {
        // Component 0: x + 2y + 3xy. Component 1: 1 - y.
        // Dof (i, j) multiplies x^i y^j and has index 2i + j.
        let basis = PowerBasis::<f64, 2>::new(1).unwrap();
        let points = [
            Vector2::new(0.0, 1.0),
            Vector2::new(2.0, -1.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(3.0, 0.0),
        ];
        let cps = ControlPointSet::from_points(&points, vec![0, 1, 2, 3], 4).unwrap();
        let (x, y) = (0.3, 0.6);
        let (value, derivative) = basis.linear_combination(&Vector2::new(x, y), &cps.element(0));
        assert_relative_eq!(value[0], x + 2.0 * y + 3.0 * x * y, epsilon = 1e-14);
        assert_relative_eq!(value[1], 1.0 - y, epsilon = 1e-14);
        assert_relative_eq!(derivative[(0, 0)], 1.0 + 3.0 * y, epsilon = 1e-14);
        assert_relative_eq!(derivative[(0, 1)], 2.0 + 3.0 * x, epsilon = 1e-14);
        assert_relative_eq!(derivative[(1, 0)], 0.0, epsilon = 1e-14);
        assert_relative_eq!(derivative[(1, 1)], -1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_3d_against_direct_sum() {
        let degree = 2;
        let n = degree + 1;
        let basis = PowerBasis::<f64, 3>::new(degree).unwrap();
        let values = (0..n * n * n).map(|i| (i as f64 * 0.61).cos()).collect();
        let cps = ControlPointSet::<f64, 1>::new(values, (0..n * n * n).collect(), n * n * n).unwrap();
        let x = Vector3::new(0.2, 0.7, 0.45);
        let (value, derivative) = basis.linear_combination(&x, &cps.element(0));

        let mut expected = 0.0;
        let mut expected_derivative = [0.0; 3];
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    let c = cps.value(i * n * n + j * n + k)[0];
                    let e = [i as i32, j as i32, k as i32];
                    expected += c * x[0].powi(e[0]) * x[1].powi(e[1]) * x[2].powi(e[2]);
                    for d in 0..3 {
                        if e[d] > 0 {
                            let mut term = c * e[d] as f64;
                            for r in 0..3 {
                                term *= x[r].powi(if r == d { e[r] - 1 } else { e[r] });
                            }
                            expected_derivative[d] += term;
                        }
                    }
                }
            }
        }
        assert_relative_eq!(value[0], expected, epsilon = 1e-13);
        for d in 0..3 {
            assert_relative_eq!(derivative[(0, d)], expected_derivative[d], epsilon = 1e-13);
        }
    }
}

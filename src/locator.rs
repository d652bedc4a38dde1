//! Point location
use crate::{
    control_points::ControlPointSet,
    error::{Error, Result},
    newton::{NewtonOptions, NewtonSolver},
    traits::{Basis, SpatialIndex},
    transform::ElementTransform,
    types::{Location, RealScalar},
};
use nalgebra::SVector;
use rayon::prelude::*;

/// Options of a [`Locator`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocatorOptions<T: RealScalar> {
    /// Options passed to the Newton solver
    pub newton: NewtonOptions<T>,
    /// Amount by which a converged reference coordinate may lie outside `[0, 1]` and still be
    /// accepted
    pub inside_tolerance: T,
}

impl<T: RealScalar> Default for LocatorOptions<T> {
    fn default() -> Self {
        Self {
            newton: NewtonOptions::default(),
            inside_tolerance: T::zero(),
        }
    }
}

impl<T: RealScalar> LocatorOptions<T> {
    /// Set the Newton options
    pub fn with_newton(mut self, newton: NewtonOptions<T>) -> Self {
        self.newton = newton;
        self
    }

    /// Set the inside tolerance
    pub fn with_inside_tolerance(mut self, tol: T) -> Self {
        self.inside_tolerance = tol;
        self
    }

    /// Decide whether a converged reference coordinate lies in the reference domain of `basis`
    ///
    /// Components within the Newton reference tolerance of 0 or 1 are first moved onto that
    /// boundary, so points on shared element boundaries are accepted with the default options.
    pub fn accepts<B: Basis<R, T = T>, const R: usize>(
        &self,
        basis: &B,
        reference: &mut SVector<T, R>,
    ) -> bool {
        let tol = self.newton.tol_ref;
        for x in reference.iter_mut() {
            if -tol <= *x && *x <= tol {
                *x = T::zero();
            } else if T::one() - tol <= *x && *x <= T::one() + tol {
                *x = T::one();
            }
        }
        basis.is_inside_with_tolerance(reference, self.inside_tolerance)
    }
}

/// Finds the element and reference coordinate of physical points
///
/// For every query point the spatial index proposes candidate elements. Each candidate is tried
/// in turn, starting the Newton iteration at the centroid of the reference element, and the first
/// candidate that converges to a reference coordinate inside the reference element is accepted.
/// When a point lies on the boundary between elements, the candidate order decides which element
/// is reported.
pub struct Locator<'a, B: Basis<D>, S: SpatialIndex<D, T = B::T>, const D: usize> {
    control_points: &'a ControlPointSet<B::T, D>,
    basis: B,
    index: &'a S,
    options: LocatorOptions<B::T>,
}

impl<'a, B: Basis<D> + Copy, S: SpatialIndex<D, T = B::T>, const D: usize> Locator<'a, B, S, D> {
    /// Create new
    pub fn new(
        control_points: &'a ControlPointSet<B::T, D>,
        basis: B,
        index: &'a S,
        options: LocatorOptions<B::T>,
    ) -> Result<Self> {
        if basis.dofs_per_element() != control_points.dofs_per_element() {
            log::warn!(
                "Basis of degree {} does not match control points with {} dofs per element",
                basis.degree(),
                control_points.dofs_per_element()
            );
            return Err(Error::DofMismatch {
                expected: basis.dofs_per_element(),
                found: control_points.dofs_per_element(),
            });
        }
        Ok(Self {
            control_points,
            basis,
            index,
            options,
        })
    }

    /// The options
    pub fn options(&self) -> &LocatorOptions<B::T> {
        &self.options
    }

    /// Locate a single point
    pub fn locate_point(&self, point: &SVector<B::T, D>) -> Location<B::T, D> {
        let solver = NewtonSolver::new(self.options.newton);
        let element_count = self.control_points.element_count();
        let mut transform: Option<ElementTransform<_, _, D, D>> = None;

        for candidate in self.index.candidates(point) {
            if candidate >= element_count {
                log::trace!("Skipping candidate {candidate}: only {element_count} elements");
                continue;
            }
            let t = transform.get_or_insert_with(|| {
                ElementTransform::from_parts(self.basis, self.control_points.element(candidate))
            });
            t.bind(candidate);

            let mut reference = self.basis.centroid();
            let state = solver.solve(&*t, point, &mut reference);
            if !state.is_converged() {
                continue;
            }
            if self.options.accepts(&self.basis, &mut reference) {
                return Location::new(candidate, reference);
            }
            log::trace!("Candidate {candidate} converged outside the reference element");
        }
        Location::not_found()
    }

    /// Locate every point
    ///
    /// Entry `i` of the output is the location of `points[i]`.
    pub fn locate(&self, points: &[SVector<B::T, D>]) -> Vec<Location<B::T, D>> {
        let locations = points
            .par_iter()
            .map(|p| self.locate_point(p))
            .collect::<Vec<_>>();
        log::debug!(
            "Located {} of {} points",
            locations.iter().filter(|l| l.is_found()).count(),
            points.len()
        );
        locations
    }

    /// Locate the points whose indices are listed in `active`
    ///
    /// Every other entry of the output is not found. Indices past the end of `points` are ignored.
    pub fn locate_active(
        &self,
        points: &[SVector<B::T, D>],
        active: &[usize],
    ) -> Vec<Location<B::T, D>> {
        let mut mask = vec![false; points.len()];
        for i in active {
            if let Some(m) = mask.get_mut(*i) {
                *m = true;
            }
        }
        let locations = points
            .par_iter()
            .zip(mask.par_iter())
            .map(|(p, m)| {
                if *m {
                    self.locate_point(p)
                } else {
                    Location::not_found()
                }
            })
            .collect::<Vec<_>>();
        log::debug!(
            "Located {} of {} active points",
            locations.iter().filter(|l| l.is_found()).count(),
            mask.iter().filter(|m| **m).count()
        );
        locations
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{basis::BernsteinBasis, shapes::unit_square, spatial::BoundingBoxIndex};
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    #[test]
    fn test_locate_on_square_grid() {
        let cps = unit_square::<f64>(2, 2, 1).unwrap();
        let index = BoundingBoxIndex::from_elements(&cps);
        let basis = BernsteinBasis::<f64, 2>::new(1).unwrap();
        let locator = Locator::new(&cps, basis, &index, LocatorOptions::default()).unwrap();

        let l = locator.locate_point(&Vector2::new(0.75, 0.25));
        // Elements are ordered with the x index outermost
        assert_eq!(l.element, Some(2));
        assert_relative_eq!(l.reference[0], 0.5, epsilon = 1e-10);
        assert_relative_eq!(l.reference[1], 0.5, epsilon = 1e-10);

        assert!(!locator.locate_point(&Vector2::new(1.5, 0.5)).is_found());
    }

    #[test]
    fn test_dof_mismatch() {
        let cps = unit_square::<f64>(1, 1, 2).unwrap();
        let index = BoundingBoxIndex::from_elements(&cps);
        let basis = BernsteinBasis::<f64, 2>::new(1).unwrap();
        assert!(matches!(
            Locator::new(&cps, basis, &index, LocatorOptions::default()),
            Err(Error::DofMismatch {
                expected: 4,
                found: 9
            })
        ));
    }

    #[test]
    fn test_accepts_snaps_to_boundary() {
        let basis = BernsteinBasis::<f64, 2>::new(1).unwrap();
        let options = LocatorOptions::<f64>::default();

        let mut reference = Vector2::new(-1e-17, 1.0 + 1e-14);
        assert!(options.accepts(&basis, &mut reference));
        assert_eq!(reference, Vector2::new(0.0, 1.0));

        let mut reference = Vector2::new(-1e-6, 0.5);
        assert!(!options.accepts(&basis, &mut reference));
        assert_eq!(reference[0], -1e-6);
    }

    #[test]
    fn test_inside_tolerance() {
        let cps = unit_square::<f64>(1, 1, 1).unwrap();
        let index = crate::spatial::ExhaustiveIndex::<f64>::new(1);
        let basis = BernsteinBasis::<f64, 2>::new(1).unwrap();
        let point = Vector2::new(1.0 + 1e-6, 0.5);

        let strict = Locator::new(&cps, basis, &index, LocatorOptions::default()).unwrap();
        assert!(!strict.locate_point(&point).is_found());

        let options = LocatorOptions::default().with_inside_tolerance(1e-4);
        let loose = Locator::new(&cps, basis, &index, options).unwrap();
        let l = loose.locate_point(&point);
        assert_eq!(l.element, Some(0));
        assert_relative_eq!(l.reference[0], 1.0 + 1e-6, epsilon = 1e-10);
    }
}

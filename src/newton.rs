//! Newton-Raphson inversion of element transforms
use crate::{
    traits::Transform,
    types::{cast, NewtonState, RealScalar, SolveStatus},
};
use nalgebra::SVector;

/// Tolerances and step budget of the Newton solver
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewtonOptions<T: RealScalar> {
    /// Converged when the largest component of the physical residual is below this
    pub tol_phys: T,
    /// Converged when the largest component of a reference step is below this
    pub tol_ref: T,
    /// Maximum number of steps
    pub max_steps: usize,
}

impl<T: RealScalar> Default for NewtonOptions<T> {
    fn default() -> Self {
        let tol = T::default_epsilon().sqrt() * cast(0.01);
        Self {
            tol_phys: tol,
            tol_ref: tol,
            max_steps: 10,
        }
    }
}

impl<T: RealScalar> NewtonOptions<T> {
    /// Set the physical tolerance
    pub fn with_physical_tolerance(mut self, tol: T) -> Self {
        self.tol_phys = tol;
        self
    }

    /// Set the reference tolerance
    pub fn with_reference_tolerance(mut self, tol: T) -> Self {
        self.tol_ref = tol;
        self
    }

    /// Set the maximum number of steps
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

fn is_finite<T: RealScalar, const N: usize>(v: &SVector<T, N>) -> bool {
    v.iter().all(|x| x.to_f64().is_some_and(f64::is_finite))
}

/// Newton solver for square transforms
///
/// There is no damping or line search: a poor initial guess or a strongly distorted element can
/// make the iteration diverge, which is reported as [`SolveStatus::NotConverged`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonSolver<T: RealScalar> {
    options: NewtonOptions<T>,
}

impl<T: RealScalar> NewtonSolver<T> {
    /// Create new
    pub fn new(options: NewtonOptions<T>) -> Self {
        Self { options }
    }

    /// The options
    pub fn options(&self) -> &NewtonOptions<T> {
        &self.options
    }

    /// Find the reference point that `transform` maps to `target`
    ///
    /// `reference` holds the initial guess on entry and the last reference point reached on
    /// exit, whatever the outcome. A singular Jacobian, a non-finite step or a non-finite residual
    /// ends the solve as [`SolveStatus::NotConverged`].
    pub fn solve<Tr: Transform<N, N, T = T>, const N: usize>(
        &self,
        transform: &Tr,
        target: &SVector<T, N>,
        reference: &mut SVector<T, N>,
    ) -> NewtonState {
        let (value, mut jacobian) = transform.eval(reference);
        let mut residual = target - value;
        let mut iterations = 0;
        if !is_finite(&residual) {
            log::trace!("Non-finite residual at the initial guess");
            return NewtonState {
                iterations,
                status: SolveStatus::NotConverged,
            };
        }
        let mut status = if residual.amax() < self.options.tol_phys {
            SolveStatus::ConvergedPhysical
        } else {
            SolveStatus::NotConverged
        };

        while iterations < self.options.max_steps && status == SolveStatus::NotConverged {
            let step = match jacobian.try_inverse() {
                Some(inverse) => inverse * residual,
                None => {
                    log::trace!("Singular Jacobian after {iterations} Newton steps");
                    break;
                }
            };
            if !is_finite(&step) {
                log::trace!("Non-finite Newton step after {iterations} steps");
                break;
            }

            *reference += step;
            iterations += 1;
            if step.amax() < self.options.tol_ref {
                status = SolveStatus::ConvergedReference;
                break;
            }

            let (value, next_jacobian) = transform.eval(reference);
            jacobian = next_jacobian;
            residual = target - value;
            if !is_finite(&residual) {
                log::trace!("Non-finite residual after {iterations} Newton steps");
                break;
            }
            if residual.amax() < self.options.tol_phys {
                status = SolveStatus::ConvergedPhysical;
            }
        }

        NewtonState { iterations, status }
    }
}

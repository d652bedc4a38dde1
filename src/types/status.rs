//! Newton solve status

/// Outcome of a single Newton solve
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SolveStatus {
    /// Neither tolerance was met within the step budget, or the Jacobian was singular
    NotConverged,
    /// The physical residual fell below the physical tolerance
    ConvergedPhysical,
    /// The reference-space step fell below the reference tolerance
    ConvergedReference,
}

impl SolveStatus {
    /// Did the solve meet one of the convergence criteria?
    pub fn is_converged(&self) -> bool {
        !matches!(self, SolveStatus::NotConverged)
    }
}

/// State of one Newton solve, discarded after the solve returns
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct NewtonState {
    /// Number of reference-space steps applied
    pub iterations: usize,
    /// Convergence status
    pub status: SolveStatus,
}

impl NewtonState {
    /// Did the solve converge?
    pub fn is_converged(&self) -> bool {
        self.status.is_converged()
    }
}

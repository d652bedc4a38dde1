//! Polynomial bases on the reference domain `[0, 1]^R`
mod bernstein;
mod binomial;
mod power;

pub use bernstein::{bernstein_1d, BernsteinBasis, MAX_DEGREE};
pub use binomial::binomial_row;
pub use power::PowerBasis;

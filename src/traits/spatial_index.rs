//! Candidate queries against an acceleration structure
use crate::types::{Ray, RealScalar};
use nalgebra::SVector;

pub trait SpatialIndex<const D: usize>: Sync {
    //! A structure proposing the elements that may contain a point
    //!
    //! A candidate is not guaranteed to contain the point. The candidate order must be
    //! deterministic: the first accepted candidate wins.

    /// Scalar type
    type T: RealScalar;

    /// Candidate iterator
    type CandidateIter<'a>: Iterator<Item = usize>
    where
        Self: 'a;

    /// The candidates for `point`, in order of preference
    fn candidates(&self, point: &SVector<Self::T, D>) -> Self::CandidateIter<'_>;
}

pub trait RaySpatialIndex: Sync {
    //! A structure proposing the entities that a ray may hit

    /// Scalar type
    type T: RealScalar;

    /// Candidate iterator
    type RayCandidateIter<'a>: Iterator<Item = RayCandidate<Self::T>>
    where
        Self: 'a;

    /// The candidates for `ray`
    fn ray_candidates(&self, ray: &Ray<Self::T>) -> Self::RayCandidateIter<'_>;
}

/// An entity that a ray may hit, and the range of distances over which it may be hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCandidate<T: RealScalar> {
    /// Entity index
    pub entity: usize,
    /// Distance at which the ray enters the entity's bounding region
    pub enter: T,
    /// Distance at which the ray leaves the entity's bounding region
    pub exit: T,
}

//! Error types

use thiserror::Error;

/// Errors raised while constructing control-point sets, bases, transforms and locators
///
/// Failures to locate an individual point are not errors: they are reported as data through
/// [`Location`](crate::types::Location) and [`SolveStatus`](crate::types::SolveStatus).
#[derive(Error, Debug)]
pub enum Error {
    /// Polynomial degree above the supported maximum
    #[error("polynomial degree {degree} exceeds the supported maximum of {max}")]
    DegreeTooHigh {
        /// Requested degree
        degree: usize,
        /// Largest supported degree
        max: usize,
    },

    /// Basis with no reference dimensions
    #[error("reference dimension must be at least 1")]
    ZeroReferenceDimension,

    /// Flat value buffer whose length does not match the physical dimension
    #[error("values buffer of length {len} is not a multiple of the physical dimension {dim}")]
    ValuesLength {
        /// Length of the buffer
        len: usize,
        /// Physical dimension
        dim: usize,
    },

    /// Connectivity whose length does not match the dofs per element
    #[error("connectivity of length {len} is not a multiple of {dofs_per_element} dofs per element")]
    ConnectivityLength {
        /// Length of the connectivity
        len: usize,
        /// Dofs per element
        dofs_per_element: usize,
    },

    /// Connectivity entry that does not refer to a control point
    #[error("connectivity entry {position} refers to control point {index}, but only {count} exist")]
    ControlPointIndex {
        /// Position in the connectivity
        position: usize,
        /// Offending control-point index
        index: usize,
        /// Number of control points
        count: usize,
    },

    /// Basis and control-point set that disagree on the dofs per element
    #[error("basis expects {expected} dofs per element but the control points provide {found}")]
    DofMismatch {
        /// Dofs per element of the basis
        expected: usize,
        /// Dofs per element of the control points
        found: usize,
    },

    /// Inputs of incompatible dimensions or lengths
    #[error("incompatible dimensions: {0}")]
    DimensionMismatch(String),

    /// Geometry and field with different numbers of elements
    #[error("geometry has {space} elements but the field has {field}")]
    ElementCountMismatch {
        /// Number of geometry elements
        space: usize,
        /// Number of field elements
        field: usize,
    },

    /// Face index out of range
    #[error("face {face} does not exist: there are {count} faces")]
    FaceIndex {
        /// Requested face
        face: usize,
        /// Number of faces
        count: usize,
    },

    /// I/O failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// RON deserialisation failure
    #[cfg(feature = "serde")]
    #[error("could not parse RON: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// RON serialisation failure
    #[cfg(feature = "serde")]
    #[error("could not write RON: {0}")]
    RonWrite(#[from] ron::Error),
}

/// Result type for fallible construction
pub type Result<T> = std::result::Result<T, Error>;

//! Coefficients of one face of a hexahedron
use crate::{
    control_points::ControlPointSet,
    error::{Error, Result},
    traits::CoefficientAccessor,
    types::RealScalar,
};
use nalgebra::SVector;

/// Number of faces of a hexahedron
pub const HEX_FACE_COUNT: usize = 6;

/// A face of the reference hexahedron `[0, 1]^3`
///
/// `X0` is the face where reference coordinate 0 is 0, `X1` the face where it is 1, and similarly
/// for the other axes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum HexFace {
    /// Coordinate 0 is 0
    X0 = 0,
    /// Coordinate 1 is 0
    Y0 = 1,
    /// Coordinate 2 is 0
    Z0 = 2,
    /// Coordinate 0 is 1
    X1 = 3,
    /// Coordinate 1 is 1
    Y1 = 4,
    /// Coordinate 2 is 1
    Z1 = 5,
}

impl HexFace {
    /// All faces, in index order
    pub const ALL: [HexFace; HEX_FACE_COUNT] = [
        HexFace::X0,
        HexFace::Y0,
        HexFace::Z0,
        HexFace::X1,
        HexFace::Y1,
        HexFace::Z1,
    ];

    /// The face with local index `index`
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Local index of the face
    pub fn index(self) -> usize {
        self as usize
    }

    /// The reference axis that is constant on this face
    pub fn normal_axis(self) -> usize {
        self.index() % 3
    }

    /// Is this the face where the normal-axis coordinate is 1?
    pub fn is_upper(self) -> bool {
        self.index() >= 3
    }

    /// The reference axes spanned by the face coordinates `(u, v)`
    pub fn tangent_axes(self) -> (usize, usize) {
        match self.normal_axis() {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        }
    }

    /// Face id of this face of `element`
    pub fn face_id(self, element: usize) -> usize {
        HEX_FACE_COUNT * element + self.index()
    }

    /// Convert a face coordinate into a coordinate in the reference hexahedron
    pub fn element_reference<T: RealScalar>(self, uv: &SVector<T, 2>) -> SVector<T, 3> {
        let mut r = SVector::<T, 3>::zeros();
        let (a, b) = self.tangent_axes();
        r[a] = uv[0];
        r[b] = uv[1];
        r[self.normal_axis()] = if self.is_upper() { T::one() } else { T::zero() };
        r
    }

    // Offset of the face's first dof in the element, and the dof strides of the inner (v) and
    // outer (u) face directions. Reference coordinate 0 is the outermost dof index.
    fn layout(self, dofs_1d: usize) -> (usize, usize, usize) {
        let stride = |axis: usize| dofs_1d.pow((2 - axis) as u32);
        let (a, b) = self.tangent_axes();
        let offset = if self.is_upper() {
            (dofs_1d - 1) * stride(self.normal_axis())
        } else {
            0
        };
        (offset, stride(b), stride(a))
    }
}

/// Accessor for the control points of one face of a tensor-product hexahedron
///
/// Faces are numbered `6 * element + f` where `f` is the [`HexFace`] index. The face exposes
/// `dofs_1d^2` control points with the `u` direction outermost.
#[derive(Debug, Clone, Copy)]
pub struct FaceCoefficients<'a, T: RealScalar, const P: usize> {
    control_points: &'a ControlPointSet<T, P>,
    dofs_1d: usize,
    face_id: usize,
    start: usize,
    stride_in: usize,
    stride_out: usize,
}

impl<'a, T: RealScalar, const P: usize> FaceCoefficients<'a, T, P> {
    /// Create an accessor bound to face `face_id`
    pub fn new(
        control_points: &'a ControlPointSet<T, P>,
        dofs_1d: usize,
        face_id: usize,
    ) -> Result<Self> {
        if control_points.dofs_per_element() != dofs_1d.pow(3) {
            return Err(Error::DofMismatch {
                expected: dofs_1d.pow(3),
                found: control_points.dofs_per_element(),
            });
        }
        let count = HEX_FACE_COUNT * control_points.element_count();
        if face_id >= count {
            return Err(Error::FaceIndex {
                face: face_id,
                count,
            });
        }
        let mut a = Self {
            control_points,
            dofs_1d,
            face_id,
            start: 0,
            stride_in: 1,
            stride_out: 1,
        };
        a.bind(face_id);
        Ok(a)
    }

    /// The face of the reference hexahedron that this accessor is bound to
    pub fn face(&self) -> HexFace {
        HexFace::ALL[self.face_id % HEX_FACE_COUNT]
    }

    /// The element that owns the bound face
    pub fn element(&self) -> usize {
        self.face_id / HEX_FACE_COUNT
    }

    /// The control-point index of local face dof `local_index`
    pub fn dof(&self, local_index: usize) -> usize {
        let j = local_index % self.dofs_1d;
        let i = (local_index / self.dofs_1d) % self.dofs_1d;
        self.control_points.connectivity()[self.start + i * self.stride_out + j * self.stride_in]
    }
}

impl<T: RealScalar, const P: usize> CoefficientAccessor<P> for FaceCoefficients<'_, T, P> {
    type T = T;

    fn bind(&mut self, id: usize) {
        debug_assert!(id < HEX_FACE_COUNT * self.control_points.element_count());
        self.face_id = id;
        let (offset, stride_in, stride_out) = self.face().layout(self.dofs_1d);
        self.start = self.control_points.dofs_per_element() * self.element() + offset;
        self.stride_in = stride_in;
        self.stride_out = stride_out;
    }

    fn bound_id(&self) -> usize {
        self.face_id
    }

    fn dof_count(&self) -> usize {
        self.dofs_1d * self.dofs_1d
    }

    fn coefficient(&self, local_index: usize) -> SVector<T, P> {
        self.control_points.value(self.dof(local_index))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shapes::unit_cube;
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    #[test]
    fn test_face_control_points_lie_on_face() {
        for degree in 1..4 {
            let cps = unit_cube::<f64>(1, 1, 1, degree).unwrap();
            for face in HexFace::ALL {
                let c = FaceCoefficients::new(&cps, degree + 1, face.face_id(0)).unwrap();
                assert_eq!(c.dof_count(), (degree + 1) * (degree + 1));
                let expected = if face.is_upper() { 1.0 } else { 0.0 };
                for i in 0..c.dof_count() {
                    assert_relative_eq!(c.coefficient(i)[face.normal_axis()], expected);
                }
            }
        }
    }

    #[test]
    fn test_face_ordering() {
        // Lattice control points of the unit cube are the identity map, so the face's (u, v)
        // dof lattice must match its tangent axes
        let degree = 2;
        let cps = unit_cube::<f64>(1, 1, 1, degree).unwrap();
        for face in HexFace::ALL {
            let c = FaceCoefficients::new(&cps, degree + 1, face.face_id(0)).unwrap();
            let (a, b) = face.tangent_axes();
            for i in 0..degree + 1 {
                for j in 0..degree + 1 {
                    let v = c.coefficient(i * (degree + 1) + j);
                    assert_relative_eq!(v[a], i as f64 / degree as f64);
                    assert_relative_eq!(v[b], j as f64 / degree as f64);
                }
            }
        }
    }

    #[test]
    fn test_element_reference() {
        let r = HexFace::Y1.element_reference(&Vector2::new(0.25, 0.75));
        assert_relative_eq!(r[0], 0.25);
        assert_relative_eq!(r[1], 1.0);
        assert_relative_eq!(r[2], 0.75);
    }

    #[test]
    fn test_invalid_face() {
        let cps = unit_cube::<f64>(1, 1, 1, 1).unwrap();
        assert!(matches!(
            FaceCoefficients::new(&cps, 2, 6),
            Err(Error::FaceIndex { face: 6, count: 6 })
        ));
        assert!(matches!(
            FaceCoefficients::new(&cps, 3, 0),
            Err(Error::DofMismatch { .. })
        ));
    }
}

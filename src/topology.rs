//! Face connectivity of hexahedral meshes
use crate::{
    coefficients::{FaceCoefficients, HEX_FACE_COUNT},
    control_points::ControlPointSet,
    error::Result,
    types::RealScalar,
};
use std::collections::HashMap;

/// The faces of a hexahedral mesh that belong to exactly one element
///
/// Faces are identified by their sorted control-point indices, so two elements share a face only
/// if they share all of its control points. The face ids `6 * element + f` are returned in
/// increasing order.
pub fn boundary_faces<T: RealScalar>(
    control_points: &ControlPointSet<T, 3>,
    degree: usize,
) -> Result<Vec<usize>> {
    let face_count = HEX_FACE_COUNT * control_points.element_count();
    let mut keys = Vec::with_capacity(face_count);
    // The key of this HashMap is the ordered set of control points of the face
    let mut occurrences = HashMap::<Vec<usize>, usize>::new();
    for face_id in 0..face_count {
        let face = FaceCoefficients::new(control_points, degree + 1, face_id)?;
        let mut key = (0..(degree + 1) * (degree + 1))
            .map(|i| face.dof(i))
            .collect::<Vec<_>>();
        key.sort_unstable();
        *occurrences.entry(key.clone()).or_insert(0) += 1;
        keys.push(key);
    }
    let faces = keys
        .iter()
        .enumerate()
        .filter(|(_, key)| occurrences[*key] == 1)
        .map(|(face_id, _)| face_id)
        .collect::<Vec<_>>();
    log::debug!("{} of {face_count} faces are on the boundary", faces.len());
    Ok(faces)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{coefficients::HexFace, shapes::unit_cube};

    #[test]
    fn test_single_element() {
        let cps = unit_cube::<f64>(1, 1, 1, 2).unwrap();
        assert_eq!(boundary_faces(&cps, 2).unwrap(), (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_block() {
        let cps = unit_cube::<f64>(2, 2, 1, 1).unwrap();
        let faces = boundary_faces(&cps, 1).unwrap();
        // 2 x 2 faces on each z side, 2 x 1 on each of the other four sides
        assert_eq!(faces.len(), 8 + 8);
        // Element 0 is at x = 0, y = 0: its upper x and y faces are shared
        assert!(faces.contains(&HexFace::X0.face_id(0)));
        assert!(!faces.contains(&HexFace::X1.face_id(0)));
        assert!(!faces.contains(&HexFace::Y1.face_id(0)));
        assert!(faces.contains(&HexFace::Z1.face_id(0)));
    }

    #[test]
    fn test_wrong_degree() {
        let cps = unit_cube::<f64>(1, 1, 1, 2).unwrap();
        assert!(boundary_faces(&cps, 1).is_err());
    }
}

//! Candidate indices
use crate::{
    coefficients::{FaceCoefficients, HEX_FACE_COUNT},
    control_points::ControlPointSet,
    error::{Error, Result},
    spatial::BoundingBox,
    traits::{CoefficientAccessor, RayCandidate, RaySpatialIndex, SpatialIndex},
    types::{cast, Ray, RealScalar},
};
use nalgebra::SVector;
use std::marker::PhantomData;

/// Relative padding applied to control-point boxes so that points on an element boundary are
/// proposed by both neighbours
const DEFAULT_PADDING: f64 = 1e-8;

/// A flat list of bounding boxes, one per entity
///
/// Candidates are proposed in entity order. Queries are linear in the number of boxes; a
/// hierarchy can be built on top of the same boxes by the caller.
#[derive(Debug, Clone)]
pub struct BoundingBoxIndex<T: RealScalar, const D: usize> {
    boxes: Vec<BoundingBox<T, D>>,
    entities: Vec<usize>,
}

impl<T: RealScalar, const D: usize> BoundingBoxIndex<T, D> {
    /// Create an index from boxes and the entity that each box belongs to
    pub fn new(boxes: Vec<BoundingBox<T, D>>, entities: Vec<usize>) -> Result<Self> {
        if boxes.len() != entities.len() {
            return Err(Error::DimensionMismatch(format!(
                "{} boxes but {} entities",
                boxes.len(),
                entities.len()
            )));
        }
        Ok(Self { boxes, entities })
    }

    /// Create an index with one box per element, from the element's control points
    ///
    /// The boxes enclose each element only when the control points bound the element, as they
    /// do for a Bernstein basis. Control values of a [`PowerBasis`](crate::basis::PowerBasis)
    /// are monomial coefficients, not points: use [`ExhaustiveIndex`] or boxes built by the
    /// caller for those.
    pub fn from_elements(control_points: &ControlPointSet<T, D>) -> Self {
        let boxes = (0..control_points.element_count())
            .map(|e| control_points.element_bounds(e))
            .collect::<Vec<_>>();
        let entities = (0..boxes.len()).collect();
        Self { boxes, entities }.with_relative_padding(cast(DEFAULT_PADDING))
    }

    /// Grow every box by `fraction` of its largest side on every side
    pub fn with_relative_padding(mut self, fraction: T) -> Self {
        for b in self.boxes.iter_mut() {
            let amount = fraction * b.max_extent().max(T::one());
            *b = b.padded(amount);
        }
        self
    }

    /// Number of boxes
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Is the index empty?
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// The boxes
    pub fn boxes(&self) -> &[BoundingBox<T, D>] {
        &self.boxes
    }

    /// The entity that each box belongs to
    pub fn entities(&self) -> &[usize] {
        &self.entities
    }
}

impl<T: RealScalar> BoundingBoxIndex<T, 3> {
    /// Create an index with one box per hexahedron face, from the face's Bernstein control points
    ///
    /// `faces` are face ids `6 * element + f` as used by [`FaceCoefficients`].
    pub fn from_faces(
        control_points: &ControlPointSet<T, 3>,
        degree: usize,
        faces: &[usize],
    ) -> Result<Self> {
        let mut boxes = Vec::with_capacity(faces.len());
        for face in faces {
            let coefficients = FaceCoefficients::new(control_points, degree + 1, *face)?;
            let mut b = BoundingBox::from_point(coefficients.coefficient(0));
            for i in 1..coefficients.dof_count() {
                b.include(&coefficients.coefficient(i));
            }
            boxes.push(b);
        }
        Ok(Self {
            boxes,
            entities: faces.to_vec(),
        }
        .with_relative_padding(cast(DEFAULT_PADDING)))
    }

    /// Create an index over every face of every element
    pub fn from_all_faces(control_points: &ControlPointSet<T, 3>, degree: usize) -> Result<Self> {
        let faces = (0..HEX_FACE_COUNT * control_points.element_count()).collect::<Vec<_>>();
        Self::from_faces(control_points, degree, &faces)
    }
}

/// Iterator over the boxes containing a point
#[derive(Debug)]
pub struct BoxCandidates<'a, T: RealScalar, const D: usize> {
    index: &'a BoundingBoxIndex<T, D>,
    point: SVector<T, D>,
    position: usize,
}

impl<T: RealScalar, const D: usize> Iterator for BoxCandidates<'_, T, D> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.position < self.index.boxes.len() {
            self.position += 1;
            if self.index.boxes[self.position - 1].contains(&self.point) {
                return Some(self.index.entities[self.position - 1]);
            }
        }
        None
    }
}

impl<T: RealScalar, const D: usize> SpatialIndex<D> for BoundingBoxIndex<T, D> {
    type T = T;
    type CandidateIter<'a>
        = BoxCandidates<'a, T, D>
    where
        Self: 'a;

    fn candidates(&self, point: &SVector<T, D>) -> BoxCandidates<'_, T, D> {
        BoxCandidates {
            index: self,
            point: *point,
            position: 0,
        }
    }
}

/// Iterator over the boxes hit by a ray
#[derive(Debug)]
pub struct RayBoxCandidates<'a, T: RealScalar> {
    index: &'a BoundingBoxIndex<T, 3>,
    ray: Ray<T>,
    position: usize,
}

impl<T: RealScalar> Iterator for RayBoxCandidates<'_, T> {
    type Item = RayCandidate<T>;

    fn next(&mut self) -> Option<RayCandidate<T>> {
        while self.position < self.index.boxes.len() {
            self.position += 1;
            if let Some((enter, exit)) = self.index.boxes[self.position - 1].intersect_ray(&self.ray)
            {
                return Some(RayCandidate {
                    entity: self.index.entities[self.position - 1],
                    enter,
                    exit,
                });
            }
        }
        None
    }
}

impl<T: RealScalar> RaySpatialIndex for BoundingBoxIndex<T, 3> {
    type T = T;
    type RayCandidateIter<'a>
        = RayBoxCandidates<'a, T>
    where
        Self: 'a;

    fn ray_candidates(&self, ray: &Ray<T>) -> RayBoxCandidates<'_, T> {
        RayBoxCandidates {
            index: self,
            ray: *ray,
            position: 0,
        }
    }
}

/// An index that proposes every element, in element order
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveIndex<T: RealScalar> {
    element_count: usize,
    _t: PhantomData<T>,
}

impl<T: RealScalar> ExhaustiveIndex<T> {
    /// Create new
    pub fn new(element_count: usize) -> Self {
        Self {
            element_count,
            _t: PhantomData,
        }
    }
}

impl<T: RealScalar, const D: usize> SpatialIndex<D> for ExhaustiveIndex<T> {
    type T = T;
    type CandidateIter<'a>
        = std::ops::Range<usize>
    where
        Self: 'a;

    fn candidates(&self, _point: &SVector<T, D>) -> std::ops::Range<usize> {
        0..self.element_count
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shapes::unit_cube;
    use nalgebra::Vector3;

    #[test]
    fn test_element_candidates() {
        let cps = unit_cube::<f64>(2, 2, 2, 1).unwrap();
        let index = BoundingBoxIndex::from_elements(&cps);
        assert_eq!(index.len(), 8);

        let c = index
            .candidates(&Vector3::new(0.25, 0.25, 0.25))
            .collect::<Vec<_>>();
        assert_eq!(c, vec![0]);

        // A point on a shared face is proposed by both neighbours
        let c = index
            .candidates(&Vector3::new(0.5, 0.25, 0.25))
            .collect::<Vec<_>>();
        assert_eq!(c.len(), 2);

        let c = index
            .candidates(&Vector3::new(1.5, 0.25, 0.25))
            .collect::<Vec<_>>();
        assert!(c.is_empty());
    }

    #[test]
    fn test_ray_candidates() {
        let cps = unit_cube::<f64>(2, 1, 1, 1).unwrap();
        let index = BoundingBoxIndex::from_elements(&cps);
        let ray = Ray::new(Vector3::new(-1.0, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
        let c = index.ray_candidates(&ray).collect::<Vec<_>>();
        assert_eq!(c.len(), 2);
        assert!(c[0].enter < c[0].exit);
    }

    #[test]
    fn test_face_boxes() {
        let cps = unit_cube::<f64>(1, 1, 1, 2).unwrap();
        let index = BoundingBoxIndex::from_all_faces(&cps, 2).unwrap();
        assert_eq!(index.len(), 6);
        for (b, f) in index.boxes().iter().zip(index.entities()) {
            let flat_axis = f % 3;
            assert!(b.max()[flat_axis] - b.min()[flat_axis] < 1e-6);
        }
    }

    #[test]
    fn test_custom_boxes() {
        let boxes = vec![
            BoundingBox::from_point(Vector3::new(0.0, 0.0, 0.0)).padded(0.5),
            BoundingBox::from_point(Vector3::new(1.0, 0.0, 0.0)).padded(0.5),
        ];
        let index = BoundingBoxIndex::new(boxes.clone(), vec![7, 3]).unwrap();
        let c = index
            .candidates(&Vector3::new(0.9, 0.1, 0.0))
            .collect::<Vec<_>>();
        assert_eq!(c, vec![3]);

        assert!(matches!(
            BoundingBoxIndex::new(boxes, vec![0]),
            Err(Error::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_exhaustive() {
        let index = ExhaustiveIndex::<f64>::new(3);
        let c = SpatialIndex::<2>::candidates(&index, &nalgebra::Vector2::new(10.0, 10.0))
            .collect::<Vec<_>>();
        assert_eq!(c, vec![0, 1, 2]);
    }
}

//! Intersection of rays with the faces of hexahedral elements
use crate::{
    basis::BernsteinBasis,
    coefficients::{FaceCoefficients, HexFace, HEX_FACE_COUNT},
    control_points::ControlPointSet,
    error::{Error, Result},
    locator::LocatorOptions,
    newton::NewtonSolver,
    traits::RaySpatialIndex,
    transform::{ElementTransform, RayTransform},
    types::{cast, Location, Ray, RayHit, RealScalar},
};
use nalgebra::{Vector2, Vector3};
use rayon::prelude::*;

type FaceRayTransform<'a, T> = RayTransform<
    ElementTransform<BernsteinBasis<T, 2>, FaceCoefficients<'a, T, 3>, 2, 3>,
    T,
    2,
    3,
    3,
    3,
>;

/// Finds the nearest face of a hexahedral mesh hit by a ray
///
/// The faces are the images of the reference square under the face transforms. Every candidate
/// face proposed by the index is intersected by solving `F(u, v) - s d = o` for `(u, v, s)`, where
/// `o` and `d` are the origin and direction of the ray. A hit is accepted if `(u, v)` lies in the
/// reference square and `s` lies in the accepted range of the ray.
pub struct FaceIntersector<'a, T: RealScalar, I: RaySpatialIndex<T = T>> {
    index: &'a I,
    face_count: usize,
    template: Option<FaceRayTransform<'a, T>>,
    options: LocatorOptions<T>,
}

impl<'a, T: RealScalar, I: RaySpatialIndex<T = T>> FaceIntersector<'a, T, I> {
    /// Create new
    ///
    /// `degree` is the degree of the tensor-product Bernstein basis of the elements; the index must
    /// propose face ids `6 * element + f`.
    pub fn new(
        control_points: &'a ControlPointSet<T, 3>,
        degree: usize,
        index: &'a I,
        options: LocatorOptions<T>,
    ) -> Result<Self> {
        let basis = BernsteinBasis::<T, 2>::new(degree)?;
        let n = degree + 1;
        if control_points.dofs_per_element() != n * n * n {
            log::warn!(
                "Hexahedra of degree {degree} need {} dofs per element, found {}",
                n * n * n,
                control_points.dofs_per_element()
            );
            return Err(Error::DofMismatch {
                expected: n * n * n,
                found: control_points.dofs_per_element(),
            });
        }
        let template = if control_points.element_count() > 0 {
            let face = FaceCoefficients::new(control_points, n, 0)?;
            Some(RayTransform::new(
                ElementTransform::new(basis, face)?,
                Vector3::zeros(),
            )?)
        } else {
            None
        };
        Ok(Self {
            index,
            face_count: HEX_FACE_COUNT * control_points.element_count(),
            template,
            options,
        })
    }

    /// Find the nearest face hit by `ray`
    pub fn intersect_ray(&self, ray: &Ray<T>) -> Option<RayHit<T, 2>> {
        let mut transform = self.template?;
        transform.set_direction(ray.direction);
        let solver = NewtonSolver::new(self.options.newton);
        let half = cast::<T>(0.5);

        let mut nearest: Option<RayHit<T, 2>> = None;
        for candidate in self.index.ray_candidates(ray) {
            if nearest.is_some_and(|hit| candidate.enter > hit.distance) {
                continue;
            }
            if candidate.entity >= self.face_count {
                log::trace!("Skipping face {}: only {} faces", candidate.entity, self.face_count);
                continue;
            }
            transform.inner_mut().bind(candidate.entity);

            let mut reference = Vector3::new(half, half, (candidate.enter + candidate.exit) * half);
            if !solver
                .solve(&transform, &ray.origin, &mut reference)
                .is_converged()
            {
                continue;
            }
            let mut uv = Vector2::new(reference[0], reference[1]);
            let distance = reference[2];
            if !self.options.accepts(transform.inner().basis(), &mut uv) || !ray.accepts(distance)
            {
                log::trace!("Face {} converged outside the face or the ray", candidate.entity);
                continue;
            }
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(RayHit {
                    entity: candidate.entity,
                    reference: uv,
                    distance,
                });
            }
        }
        nearest
    }

    /// Find the nearest face hit by each ray
    pub fn intersect_rays(&self, rays: &[Ray<T>]) -> Vec<Option<RayHit<T, 2>>> {
        let hits = rays
            .par_iter()
            .map(|r| self.intersect_ray(r))
            .collect::<Vec<_>>();
        log::debug!(
            "{} of {} rays hit a face",
            hits.iter().filter(|h| h.is_some()).count(),
            rays.len()
        );
        hits
    }
}

/// The element owning a face hit and the hit's coordinate in that element's reference hexahedron
pub fn face_hit_location<T: RealScalar>(hit: &RayHit<T, 2>) -> Location<T, 3> {
    let face = HexFace::ALL[hit.entity % HEX_FACE_COUNT];
    Location::new(hit.entity / HEX_FACE_COUNT, face.element_reference(&hit.reference))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        shapes::unit_cube, spatial::BoundingBoxIndex, topology::boundary_faces, traits::Transform,
    };
    use approx::assert_relative_eq;

    #[test]
    fn test_nearest_face() {
        let cps = unit_cube::<f64>(2, 1, 1, 1).unwrap();
        let index = BoundingBoxIndex::from_all_faces(&cps, 1).unwrap();
        let intersector = FaceIntersector::new(&cps, 1, &index, LocatorOptions::default()).unwrap();

        let ray = Ray::new(Vector3::new(-1.0, 0.3, 0.4), Vector3::new(1.0, 0.0, 0.0));
        let hit = intersector.intersect_ray(&ray).unwrap();
        assert_eq!(hit.entity, HexFace::X0.face_id(0));
        assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-10);
        assert_relative_eq!(hit.reference[0], 0.3, epsilon = 1e-10);
        assert_relative_eq!(hit.reference[1], 0.4, epsilon = 1e-10);

        let location = face_hit_location(&hit);
        assert_eq!(location.element, Some(0));
        assert_relative_eq!(location.reference[0], 0.0);
        assert_relative_eq!(location.reference[1], 0.3, epsilon = 1e-10);
    }

    #[test]
    fn test_boundary_faces_only() {
        let cps = unit_cube::<f64>(2, 1, 1, 2).unwrap();
        let faces = boundary_faces(&cps, 2).unwrap();
        let index = BoundingBoxIndex::from_faces(&cps, 2, &faces).unwrap();
        let intersector = FaceIntersector::new(&cps, 2, &index, LocatorOptions::default()).unwrap();

        // Starting inside the first element, the ray leaves through the far end of the second
        let ray = Ray::new(Vector3::new(0.25, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
        let hit = intersector.intersect_ray(&ray).unwrap();
        assert_eq!(hit.entity, HexFace::X1.face_id(1));
        assert_relative_eq!(hit.distance, 0.75, epsilon = 1e-10);
    }

    #[test]
    fn test_miss_and_range() {
        let cps = unit_cube::<f64>(1, 1, 1, 1).unwrap();
        let index = BoundingBoxIndex::from_all_faces(&cps, 1).unwrap();
        let intersector = FaceIntersector::new(&cps, 1, &index, LocatorOptions::default()).unwrap();

        let miss = Ray::new(Vector3::new(-1.0, 2.0, 2.0), Vector3::new(1.0, 0.0, 0.0));
        let short = Ray::new(Vector3::new(-1.0, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0))
            .with_range(0.0, 0.5);
        let hits = intersector.intersect_rays(&[miss, short]);
        assert!(hits.iter().all(|h| h.is_none()));
    }

    #[test]
    fn test_curved_face() {
        let degree = 2;
        let cps = unit_cube::<f64>(1, 1, 1, degree)
            .unwrap()
            .map_values(|p| Vector3::new(p[0] + 0.2 * p[1] * (1.0 - p[1]), p[1], p[2]))
            .unwrap();
        let index = BoundingBoxIndex::from_all_faces(&cps, degree).unwrap();
        let intersector =
            FaceIntersector::new(&cps, degree, &index, LocatorOptions::default()).unwrap();

        let ray = Ray::new(Vector3::new(3.0, 0.6, 0.2), Vector3::new(-1.0, 0.0, 0.0));
        let hit = intersector.intersect_ray(&ray).unwrap();
        assert_eq!(hit.entity, HexFace::X1.face_id(0));

        // The hit point lies on the curved face
        let face = FaceCoefficients::new(&cps, degree + 1, hit.entity).unwrap();
        let t = ElementTransform::<_, _, 2, 3>::new(
            BernsteinBasis::<f64, 2>::new(degree).unwrap(),
            face,
        )
        .unwrap();
        let (on_face, _) = t.eval(&hit.reference);
        let on_ray = ray.at(hit.distance);
        for d in 0..3 {
            assert_relative_eq!(on_face[d], on_ray[d], epsilon = 1e-9);
        }
        assert!(on_face[0] > 1.0);
    }

    #[test]
    fn test_wrong_degree() {
        let cps = unit_cube::<f64>(1, 1, 1, 2).unwrap();
        let index = BoundingBoxIndex::from_all_faces(&cps, 2).unwrap();
        assert!(matches!(
            FaceIntersector::new(&cps, 1, &index, LocatorOptions::default()),
            Err(Error::DofMismatch { .. })
        ));
    }
}

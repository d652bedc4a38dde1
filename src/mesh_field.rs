//! A scalar field on a hexahedral mesh
use crate::{
    basis::BernsteinBasis,
    coefficients::ElementCoefficients,
    control_points::ControlPointSet,
    error::{Error, Result},
    locator::{Locator, LocatorOptions},
    newton::NewtonSolver,
    spatial::BoundingBox,
    traits::{Basis, RaySpatialIndex, SpatialIndex, Transform},
    transform::{ElementTransform, PairTransform, RayTransform},
    types::{cast, Location, Ray, RayHit, RealScalar},
};
#[cfg(feature = "serde")]
use crate::traits::ConvertToSerializable;
use nalgebra::{Vector3, Vector4};
use rayon::prelude::*;

/// The map of one geometry element
pub type SpaceTransform<'a, T> =
    ElementTransform<BernsteinBasis<T, 3>, ElementCoefficients<'a, T, 3>, 3, 3>;

/// The scalar field on one element
pub type FieldTransform<'a, T> =
    ElementTransform<BernsteinBasis<T, 3>, ElementCoefficients<'a, T, 1>, 3, 1>;

/// A scalar field defined on the elements of a hexahedral mesh
///
/// Geometry and field share the element numbering and the reference hexahedron `[0, 1]^3`, but
/// may have different degrees.
#[derive(Debug, Clone)]
pub struct MeshField<T: RealScalar> {
    space: ControlPointSet<T, 3>,
    space_basis: BernsteinBasis<T, 3>,
    field: ControlPointSet<T, 1>,
    field_basis: BernsteinBasis<T, 3>,
}

impl<T: RealScalar> MeshField<T> {
    /// Create new
    pub fn new(
        space: ControlPointSet<T, 3>,
        space_degree: usize,
        field: ControlPointSet<T, 1>,
        field_degree: usize,
    ) -> Result<Self> {
        let space_basis = BernsteinBasis::new(space_degree)?;
        let field_basis = BernsteinBasis::new(field_degree)?;
        for (basis, found) in [
            (&space_basis, space.dofs_per_element()),
            (&field_basis, field.dofs_per_element()),
        ] {
            if basis.dofs_per_element() != found {
                log::warn!(
                    "Degree {} hexahedra need {} dofs per element, found {found}",
                    basis.degree(),
                    basis.dofs_per_element()
                );
                return Err(Error::DofMismatch {
                    expected: basis.dofs_per_element(),
                    found,
                });
            }
        }
        if space.element_count() != field.element_count() {
            log::warn!(
                "Geometry has {} elements, field has {}",
                space.element_count(),
                field.element_count()
            );
            return Err(Error::ElementCountMismatch {
                space: space.element_count(),
                field: field.element_count(),
            });
        }
        Ok(Self {
            space,
            space_basis,
            field,
            field_basis,
        })
    }

    /// The geometry control points
    pub fn space(&self) -> &ControlPointSet<T, 3> {
        &self.space
    }

    /// The field control points
    pub fn field(&self) -> &ControlPointSet<T, 1> {
        &self.field
    }

    /// Degree of the geometry
    pub fn space_degree(&self) -> usize {
        self.space_basis.degree()
    }

    /// Degree of the field
    pub fn field_degree(&self) -> usize {
        self.field_basis.degree()
    }

    /// Number of elements
    pub fn element_count(&self) -> usize {
        self.space.element_count()
    }

    /// A box containing the whole mesh
    pub fn bounds(&self) -> Option<BoundingBox<T, 3>> {
        self.space.value_range()
    }

    /// An interval containing every value of the field
    pub fn field_range(&self) -> Option<(T, T)> {
        self.field.value_range().map(|r| (r.min()[0], r.max()[0]))
    }

    /// The geometry map of `element`
    pub fn space_transform(&self, element: usize) -> SpaceTransform<'_, T> {
        ElementTransform::from_parts(self.space_basis, self.space.element(element))
    }

    /// The field on `element`
    pub fn field_transform(&self, element: usize) -> FieldTransform<'_, T> {
        ElementTransform::from_parts(self.field_basis, self.field.element(element))
    }

    /// A locator for points in the mesh
    pub fn locator<'a, S: SpatialIndex<3, T = T>>(
        &'a self,
        index: &'a S,
        options: LocatorOptions<T>,
    ) -> Result<Locator<'a, BernsteinBasis<T, 3>, S, 3>> {
        Locator::new(&self.space, self.space_basis, index, options)
    }

    /// The value of the field at a location
    ///
    /// Returns `None` if the location was not found.
    pub fn sample(&self, location: &Location<T, 3>) -> Option<T> {
        let element = location.element.filter(|e| *e < self.element_count())?;
        Some(self.field_transform(element).eval(&location.reference).0[0])
    }

    /// Locate every point and sample the field there
    pub fn sample_points<S: SpatialIndex<3, T = T>>(
        &self,
        points: &[Vector3<T>],
        index: &S,
        options: LocatorOptions<T>,
    ) -> Result<Vec<Option<T>>> {
        let locator = self.locator(index, options)?;
        Ok(locator
            .locate(points)
            .iter()
            .map(|l| self.sample(l))
            .collect())
    }

    /// Find where a ray first meets the isosurface `field = isovalue`
    ///
    /// For every candidate element whose field range contains the isovalue, solves
    /// `(x(r) - s d, f(r)) = (o, isovalue)` for the reference point `r` and distance `s`. The
    /// nearest hit inside an element and inside the accepted range of the ray is returned.
    pub fn intersect_isosurface_ray<I: RaySpatialIndex<T = T>>(
        &self,
        ray: &Ray<T>,
        isovalue: T,
        index: &I,
        options: &LocatorOptions<T>,
    ) -> Option<RayHit<T, 3>> {
        let solver = NewtonSolver::new(options.newton);
        let half = cast::<T>(0.5);
        let target = Vector4::new(ray.origin[0], ray.origin[1], ray.origin[2], isovalue);

        let mut nearest: Option<RayHit<T, 3>> = None;
        for candidate in index.ray_candidates(ray) {
            if nearest.is_some_and(|hit| candidate.enter > hit.distance) {
                continue;
            }
            let element = candidate.entity;
            if element >= self.element_count()
                || !self.field.element_bounds(element).contains_value(isovalue)
            {
                continue;
            }
            let Ok(transform) = self.isosurface_transform(element, ray) else {
                continue;
            };

            let mut reference =
                Vector4::new(half, half, half, (candidate.enter + candidate.exit) * half);
            if !solver
                .solve(&transform, &target, &mut reference)
                .is_converged()
            {
                continue;
            }
            let mut uvw = Vector3::new(reference[0], reference[1], reference[2]);
            let distance = reference[3];
            if !options.accepts(&self.space_basis, &mut uvw) || !ray.accepts(distance)
            {
                log::trace!("Element {element} converged outside the element or the ray");
                continue;
            }
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(RayHit {
                    entity: element,
                    reference: uvw,
                    distance,
                });
            }
        }
        nearest
    }

    /// Find where each ray first meets the isosurface `field = isovalue`
    pub fn intersect_isosurface<I: RaySpatialIndex<T = T>>(
        &self,
        rays: &[Ray<T>],
        isovalue: T,
        index: &I,
        options: &LocatorOptions<T>,
    ) -> Vec<Option<RayHit<T, 3>>> {
        let outside = self
            .field_range()
            .map_or(true, |(min, max)| isovalue < min || isovalue > max);
        if outside {
            log::debug!("Isovalue is outside the field range");
            return vec![None; rays.len()];
        }
        let hits = rays
            .par_iter()
            .map(|ray| self.intersect_isosurface_ray(ray, isovalue, index, options))
            .collect::<Vec<_>>();
        log::debug!(
            "{} of {} rays hit the isosurface",
            hits.iter().filter(|h| h.is_some()).count(),
            rays.len()
        );
        hits
    }

    #[allow(clippy::type_complexity)]
    fn isosurface_transform(
        &self,
        element: usize,
        ray: &Ray<T>,
    ) -> Result<
        RayTransform<
            PairTransform<SpaceTransform<'_, T>, FieldTransform<'_, T>, 3, 3, 1, 4>,
            T,
            3,
            4,
            4,
            3,
        >,
    > {
        let pair = PairTransform::new(self.space_transform(element), self.field_transform(element))?;
        RayTransform::new(pair, ray.direction)
    }
}

#[cfg(feature = "serde")]
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(bound = "T: serde::Serialize + serde::de::DeserializeOwned")]
/// Serializable form of a mesh field
pub struct SerializableMeshField<T: RealScalar> {
    space: crate::control_points::SerializableControlPointSet<T>,
    space_degree: usize,
    field: crate::control_points::SerializableControlPointSet<T>,
    field_degree: usize,
}

#[cfg(feature = "serde")]
impl<T: RealScalar + serde::Serialize + serde::de::DeserializeOwned>
    ConvertToSerializable for MeshField<T>
{
    type SerializableType = SerializableMeshField<T>;

    fn to_serializable(&self) -> SerializableMeshField<T> {
        SerializableMeshField {
            space: self.space.to_serializable(),
            space_degree: self.space_degree(),
            field: self.field.to_serializable(),
            field_degree: self.field_degree(),
        }
    }

    fn from_serializable(s: SerializableMeshField<T>) -> Result<Self> {
        Self::new(
            ControlPointSet::from_serializable(s.space)?,
            s.space_degree,
            ControlPointSet::from_serializable(s.field)?,
            s.field_degree,
        )
    }
}

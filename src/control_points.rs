//! Control-point storage
use crate::{
    coefficients::ElementCoefficients,
    error::{Error, Result},
    spatial::BoundingBox,
    types::RealScalar,
};
use nalgebra::SVector;

/// The control points of every element of a mesh or field
///
/// `values` holds `P` components per control point. `connectivity` holds `dofs_per_element`
/// control-point indices per element, in the local dof order of the basis.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPointSet<T: RealScalar, const P: usize> {
    values: Vec<T>,
    connectivity: Vec<usize>,
    dofs_per_element: usize,
}

impl<T: RealScalar, const P: usize> ControlPointSet<T, P> {
    /// Create a control-point set from a flat value buffer
    pub fn new(values: Vec<T>, connectivity: Vec<usize>, dofs_per_element: usize) -> Result<Self> {
        if P == 0 || values.len() % P != 0 {
            log::warn!("Rejecting control-point values of length {}", values.len());
            return Err(Error::ValuesLength {
                len: values.len(),
                dim: P,
            });
        }
        if dofs_per_element == 0 || connectivity.len() % dofs_per_element != 0 {
            log::warn!("Rejecting connectivity of length {}", connectivity.len());
            return Err(Error::ConnectivityLength {
                len: connectivity.len(),
                dofs_per_element,
            });
        }
        let count = values.len() / P;
        if let Some((position, index)) = connectivity
            .iter()
            .enumerate()
            .find(|(_, index)| **index >= count)
        {
            log::warn!("Connectivity entry {position} is out of range");
            return Err(Error::ControlPointIndex {
                position,
                index: *index,
                count,
            });
        }
        Ok(Self {
            values,
            connectivity,
            dofs_per_element,
        })
    }

    /// Create a control-point set from a list of points
    pub fn from_points(
        points: &[SVector<T, P>],
        connectivity: Vec<usize>,
        dofs_per_element: usize,
    ) -> Result<Self> {
        let values = points.iter().flat_map(|p| p.iter().copied()).collect();
        Self::new(values, connectivity, dofs_per_element)
    }

    /// Number of elements
    pub fn element_count(&self) -> usize {
        self.connectivity.len() / self.dofs_per_element
    }

    /// Number of distinct control points
    pub fn control_point_count(&self) -> usize {
        self.values.len() / P
    }

    /// Dofs per element
    pub fn dofs_per_element(&self) -> usize {
        self.dofs_per_element
    }

    /// Flat value buffer
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Connectivity
    pub fn connectivity(&self) -> &[usize] {
        &self.connectivity
    }

    /// The value of control point `index`
    pub fn value(&self, index: usize) -> SVector<T, P> {
        SVector::<T, P>::from_column_slice(&self.values[P * index..P * (index + 1)])
    }

    /// The control-point indices of element `element`
    pub fn element_dofs(&self, element: usize) -> &[usize] {
        &self.connectivity
            [self.dofs_per_element * element..self.dofs_per_element * (element + 1)]
    }

    /// A coefficient accessor bound to element `element`
    pub fn element(&self, element: usize) -> ElementCoefficients<'_, T, P> {
        ElementCoefficients::new(self, element)
    }

    /// The componentwise range of the control points of element `element`
    ///
    /// For Bernstein coefficients the element lies inside this box (convex hull property).
    pub fn element_bounds(&self, element: usize) -> BoundingBox<T, P> {
        let dofs = self.element_dofs(element);
        let mut bounds = BoundingBox::from_point(self.value(dofs[0]));
        for d in &dofs[1..] {
            bounds.include(&self.value(*d));
        }
        bounds
    }

    /// The componentwise range of every control point that an element refers to
    pub fn value_range(&self) -> Option<BoundingBox<T, P>> {
        let mut elements = 0..self.element_count();
        let mut bounds = self.element_bounds(elements.next()?);
        for e in elements {
            bounds.merge(&self.element_bounds(e));
        }
        Some(bounds)
    }

    /// Create a new set with the same connectivity by applying `f` to every control point
    pub fn map_values<const Q: usize>(
        &self,
        f: impl Fn(&SVector<T, P>) -> SVector<T, Q>,
    ) -> Result<ControlPointSet<T, Q>> {
        let mut values = Vec::with_capacity(Q * self.control_point_count());
        for i in 0..self.control_point_count() {
            values.extend(f(&self.value(i)).iter().copied());
        }
        ControlPointSet::new(values, self.connectivity.clone(), self.dofs_per_element)
    }
}

#[cfg(feature = "serde")]
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(bound = "T: serde::Serialize + serde::de::DeserializeOwned")]
/// Serializable form of a control-point set
pub struct SerializableControlPointSet<T: RealScalar> {
    dim: usize,
    values: Vec<T>,
    connectivity: Vec<usize>,
    dofs_per_element: usize,
}

#[cfg(feature = "serde")]
impl<T: RealScalar + serde::Serialize + serde::de::DeserializeOwned, const P: usize>
    crate::traits::ConvertToSerializable for ControlPointSet<T, P>
{
    type SerializableType = SerializableControlPointSet<T>;

    fn to_serializable(&self) -> SerializableControlPointSet<T> {
        SerializableControlPointSet {
            dim: P,
            values: self.values.clone(),
            connectivity: self.connectivity.clone(),
            dofs_per_element: self.dofs_per_element,
        }
    }

    fn from_serializable(s: SerializableControlPointSet<T>) -> Result<Self> {
        if s.dim != P {
            return Err(Error::DimensionMismatch(format!(
                "stored control points have dimension {}, expected {P}",
                s.dim
            )));
        }
        Self::new(s.values, s.connectivity, s.dofs_per_element)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn two_segments() -> ControlPointSet<f64, 2> {
        ControlPointSet::new(
            vec![0.0, 0.0, 1.0, 0.5, 2.0, -1.0],
            vec![0, 1, 1, 2],
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_counts() {
        let s = two_segments();
        assert_eq!(s.element_count(), 2);
        assert_eq!(s.control_point_count(), 3);
        assert_eq!(s.element_dofs(1), &[1, 2]);
        assert_relative_eq!(s.value(2)[1], -1.0);
    }

    #[test]
    fn test_invalid_values_length() {
        let r = ControlPointSet::<f64, 2>::new(vec![0.0, 1.0, 2.0], vec![0], 1);
        assert!(matches!(r, Err(Error::ValuesLength { len: 3, dim: 2 })));
    }

    #[test]
    fn test_invalid_connectivity_length() {
        let r = ControlPointSet::<f64, 1>::new(vec![0.0, 1.0], vec![0, 1, 1], 2);
        assert!(matches!(r, Err(Error::ConnectivityLength { .. })));
    }

    #[test]
    fn test_invalid_connectivity_entry() {
        let r = ControlPointSet::<f64, 1>::new(vec![0.0, 1.0], vec![0, 1, 1, 2], 2);
        assert!(matches!(
            r,
            Err(Error::ControlPointIndex {
                position: 3,
                index: 2,
                count: 2
            })
        ));
    }

    #[test]
    fn test_element_bounds() {
        let s = two_segments();
        let b = s.element_bounds(1);
        assert_relative_eq!(b.min()[0], 1.0);
        assert_relative_eq!(b.max()[0], 2.0);
        assert_relative_eq!(b.min()[1], -1.0);
        assert_relative_eq!(b.max()[1], 0.5);

        let r = s.value_range().unwrap();
        assert_relative_eq!(r.min()[0], 0.0);
        assert_relative_eq!(r.max()[1], 0.5);
    }

    #[test]
    fn test_map_values() {
        let s = two_segments();
        let norms = s
            .map_values(|p| SVector::<f64, 1>::new(p.norm_squared()))
            .unwrap();
        assert_eq!(norms.element_count(), 2);
        assert_relative_eq!(norms.value(2)[0], 5.0);
    }
}

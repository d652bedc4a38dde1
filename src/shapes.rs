//! Control points of simple meshes

use crate::{
    basis::MAX_DEGREE,
    control_points::ControlPointSet,
    error::{Error, Result},
    types::{cast, cast_usize, RealScalar},
};
use itertools::iproduct;

fn check_degree(degree: usize) -> Result<()> {
    if degree > MAX_DEGREE {
        log::warn!("Cannot create a lattice of degree {degree}");
        return Err(Error::DegreeTooHigh {
            degree,
            max: MAX_DEGREE,
        });
    }
    Ok(())
}

/// Coordinate of lattice line `index` out of `segments + 1` equally spaced lines on `[0, 1]`
fn lattice_coordinate<T: RealScalar>(index: usize, segments: usize) -> T {
    cast_usize::<T>(index) / cast_usize::<T>(segments)
}

/// Midpoint of cell `index` out of `cells` equal cells on `[0, 1]`
fn cell_centre<T: RealScalar>(index: usize, cells: usize) -> T {
    (cast_usize::<T>(index) + cast(0.5)) / cast_usize::<T>(cells)
}

/// Create the control points of a unit interval mesh
///
/// The interval is split into `nx` elements of the given degree. Neighbouring elements share
/// their end points.
pub fn unit_interval<T: RealScalar>(nx: usize, degree: usize) -> Result<ControlPointSet<T, 1>> {
    check_degree(degree)?;
    let n = degree + 1;
    if nx == 0 {
        return ControlPointSet::new(vec![], vec![], n);
    }
    if degree == 0 {
        let values = (0..nx).map(|i| cell_centre(i, nx)).collect();
        return ControlPointSet::new(values, (0..nx).collect(), 1);
    }
    let px = nx * degree + 1;
    let values = (0..px).map(|i| lattice_coordinate(i, px - 1)).collect();
    let connectivity = iproduct!(0..nx, 0..n)
        .map(|(ci, a)| ci * degree + a)
        .collect();
    ControlPointSet::new(values, connectivity, n)
}

/// Create the control points of a unit square mesh
///
/// The square `[0, 1]^2` is split into `nx * ny` quadrilaterals of the given degree. Element
/// `i * ny + j` is the `i`-th element in the x direction and the `j`-th in the y direction.
/// Control points lie on an equally spaced lattice, so the map of every element is affine, and
/// neighbouring elements share the control points on their common edge.
pub fn unit_square<T: RealScalar>(
    nx: usize,
    ny: usize,
    degree: usize,
) -> Result<ControlPointSet<T, 2>> {
    check_degree(degree)?;
    let n = degree + 1;
    if nx * ny == 0 {
        return ControlPointSet::new(vec![], vec![], n * n);
    }
    if degree == 0 {
        let values = iproduct!(0..nx, 0..ny)
            .flat_map(|(i, j)| [cell_centre(i, nx), cell_centre(j, ny)])
            .collect();
        return ControlPointSet::new(values, (0..nx * ny).collect(), 1);
    }
    let (px, py) = (nx * degree + 1, ny * degree + 1);
    let values = iproduct!(0..px, 0..py)
        .flat_map(|(i, j)| [lattice_coordinate(i, px - 1), lattice_coordinate(j, py - 1)])
        .collect();
    let connectivity = iproduct!(0..nx, 0..ny, 0..n, 0..n)
        .map(|(ci, cj, a, b)| (ci * degree + a) * py + cj * degree + b)
        .collect();
    ControlPointSet::new(values, connectivity, n * n)
}

/// Create the control points of a unit cube mesh
///
/// The cube `[0, 1]^3` is split into `nx * ny * nz` hexahedra of the given degree. Element
/// `(i * ny + j) * nz + k` is the `i`-th element in the x direction, the `j`-th in the y
/// direction and the `k`-th in the z direction. Local dofs follow the tensor-product ordering of
/// [`BernsteinBasis`](crate::basis::BernsteinBasis), with the x index outermost.
pub fn unit_cube<T: RealScalar>(
    nx: usize,
    ny: usize,
    nz: usize,
    degree: usize,
) -> Result<ControlPointSet<T, 3>> {
    check_degree(degree)?;
    let n = degree + 1;
    if nx * ny * nz == 0 {
        return ControlPointSet::new(vec![], vec![], n * n * n);
    }
    if degree == 0 {
        let values = iproduct!(0..nx, 0..ny, 0..nz)
            .flat_map(|(i, j, k)| [cell_centre(i, nx), cell_centre(j, ny), cell_centre(k, nz)])
            .collect();
        return ControlPointSet::new(values, (0..nx * ny * nz).collect(), 1);
    }
    let (px, py, pz) = (nx * degree + 1, ny * degree + 1, nz * degree + 1);
    let values = iproduct!(0..px, 0..py, 0..pz)
        .flat_map(|(i, j, k)| {
            [
                lattice_coordinate(i, px - 1),
                lattice_coordinate(j, py - 1),
                lattice_coordinate(k, pz - 1),
            ]
        })
        .collect();
    let connectivity = iproduct!(0..nx, 0..ny, 0..nz, 0..n, 0..n, 0..n)
        .map(|(ci, cj, ck, a, b, c)| {
            ((ci * degree + a) * py + cj * degree + b) * pz + ck * degree + c
        })
        .collect();
    ControlPointSet::new(values, connectivity, n * n * n)
}

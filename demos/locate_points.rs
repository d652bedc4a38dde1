//! Locate points in a curved hexahedral mesh
use nalgebra::Vector3;
use ndlocate::{
    basis::BernsteinBasis, shapes::unit_cube, spatial::BoundingBoxIndex, Locator, LocatorOptions,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    // A 4 x 4 x 4 mesh of quadratic hexahedra, bent in the z direction
    let degree = 2;
    let control_points = unit_cube::<f64>(4, 4, 4, degree)
        .unwrap()
        .map_values(|p| Vector3::new(p[0], p[1], p[2] + 0.2 * p[0] * (1.0 - p[0])))
        .unwrap();
    let index = BoundingBoxIndex::from_elements(&control_points);
    let basis = BernsteinBasis::<f64, 3>::new(degree).unwrap();
    let locator = Locator::new(&control_points, basis, &index, LocatorOptions::default()).unwrap();

    let points = [
        Vector3::new(0.5, 0.5, 0.55),
        Vector3::new(0.1, 0.9, 0.05),
        Vector3::new(0.5, 0.5, 1.2),
        Vector3::new(0.9, 0.2, 1.0),
    ];
    for (point, location) in points.iter().zip(locator.locate(&points)) {
        match location.element {
            Some(element) => println!(
                "({}, {}, {}) is in element {element} at reference point ({:.6}, {:.6}, {:.6})",
                point[0],
                point[1],
                point[2],
                location.reference[0],
                location.reference[1],
                location.reference[2]
            ),
            None => println!("({}, {}, {}) is outside the mesh", point[0], point[1], point[2]),
        }
    }
}

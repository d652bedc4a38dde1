//! Cast rays at the isosurfaces of a field and at the boundary of the mesh
use nalgebra::{SVector, Vector3};
use ndlocate::{
    intersect::face_hit_location, shapes::unit_cube, spatial::BoundingBoxIndex,
    topology::boundary_faces, types::Ray, FaceIntersector, LocatorOptions, MeshField,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let space = unit_cube::<f64>(3, 3, 3, 1).unwrap();
    // Approximately the squared distance from the centre of the cube
    let field = unit_cube::<f64>(3, 3, 3, 2)
        .unwrap()
        .map_values(|p| {
            let d = p - Vector3::new(0.5, 0.5, 0.5);
            SVector::<f64, 1>::new(d.norm_squared())
        })
        .unwrap();
    let mesh_field = MeshField::new(space, 1, field, 2).unwrap();
    let (min, max) = mesh_field.field_range().unwrap();
    println!("Field range: [{min:.4}, {max:.4}]");

    let rays = (0..5)
        .map(|i| {
            let y = 0.3 + 0.1 * i as f64;
            Ray::new(Vector3::new(-1.0, y, 0.5), Vector3::new(1.0, 0.0, 0.0))
        })
        .collect::<Vec<_>>();
    let options = LocatorOptions::default();

    let element_index = BoundingBoxIndex::from_elements(mesh_field.space());
    for isovalue in [0.01, 0.04, 0.09] {
        let hits = mesh_field.intersect_isosurface(&rays, isovalue, &element_index, &options);
        for (ray, hit) in rays.iter().zip(hits) {
            match hit {
                Some(hit) => {
                    let p = ray.at(hit.distance);
                    println!(
                        "Isovalue {isovalue}: ray at y = {:.1} hits element {} at ({:.4}, {:.4}, {:.4})",
                        ray.origin[1], hit.entity, p[0], p[1], p[2]
                    );
                }
                None => println!("Isovalue {isovalue}: ray at y = {:.1} misses", ray.origin[1]),
            }
        }
    }

    let faces = boundary_faces(mesh_field.space(), mesh_field.space_degree()).unwrap();
    let face_index = BoundingBoxIndex::from_faces(mesh_field.space(), 1, &faces).unwrap();
    let intersector = FaceIntersector::new(mesh_field.space(), 1, &face_index, options).unwrap();
    for (ray, hit) in rays.iter().zip(intersector.intersect_rays(&rays)) {
        if let Some(hit) = hit {
            let location = face_hit_location(&hit);
            println!(
                "Ray at y = {:.1} enters the mesh through face {} of element {:?} at distance {:.4}",
                ray.origin[1],
                hit.entity % 6,
                location.element,
                hit.distance
            );
        }
    }
}

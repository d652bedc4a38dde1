//! Test input/output
#![cfg(feature = "serde")]
use nalgebra::SVector;
use ndlocate::{
    shapes::unit_cube,
    traits::{RONExport, RONImport},
    ControlPointSet, MeshField,
};

#[test]
fn test_control_points_ron_io() {
    let cps = unit_cube::<f64>(2, 1, 1, 2).unwrap();
    let path = std::env::temp_dir().join("_test_io_control_points.ron");
    let filename = path.to_str().unwrap();
    cps.export_as_ron(filename).unwrap();

    let cps2 = ControlPointSet::<f64, 3>::import_from_ron(filename).unwrap();
    assert_eq!(cps2.element_count(), 2);
    assert_eq!(cps2.dofs_per_element(), 27);
    assert_eq!(cps, cps2);
}

#[test]
fn test_mesh_field_ron_io() {
    let space = unit_cube::<f64>(1, 1, 2, 1).unwrap();
    let field = unit_cube::<f64>(1, 1, 2, 2)
        .unwrap()
        .map_values(|p| SVector::<f64, 1>::new(p[2] * p[2]))
        .unwrap();
    let f = MeshField::new(space, 1, field, 2).unwrap();
    let path = std::env::temp_dir().join("_test_io_mesh_field.ron");
    let filename = path.to_str().unwrap();
    f.export_as_ron(filename).unwrap();

    let g = MeshField::<f64>::import_from_ron(filename).unwrap();
    assert_eq!(g.element_count(), 2);
    assert_eq!(g.field_degree(), 2);
    assert_eq!(g.space(), f.space());
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("_test_io_does_not_exist.ron");
    assert!(matches!(
        ControlPointSet::<f64, 3>::import_from_ron(path.to_str().unwrap()),
        Err(ndlocate::Error::Io(_))
    ));
}

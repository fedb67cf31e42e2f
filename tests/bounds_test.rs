use cgmath::{Point3, Vector3};
use region_viewer::data_structures::{
    bounds::Aabb,
    model::{RegionGeometry, RegionVertex},
};

fn vertex(x: f32, y: f32, z: f32) -> RegionVertex {
    RegionVertex {
        position: [x, y, z],
        normal: [0.0, 1.0, 0.0],
    }
}

#[test]
fn should_span_all_points() {
    let bounds = Aabb::from_points([
        Point3::new(1.0, 0.0, -2.0),
        Point3::new(-1.0, 0.5, 3.0),
        Point3::new(0.0, -0.5, 0.0),
    ])
    .expect("non-empty");
    assert_eq!(bounds.min, Point3::new(-1.0, -0.5, -2.0));
    assert_eq!(bounds.max, Point3::new(1.0, 0.5, 3.0));
    assert_eq!(bounds.center(), Point3::new(0.0, 0.0, 0.5));
    assert_eq!(bounds.size(), Vector3::new(2.0, 1.0, 5.0));
    assert_eq!(bounds.footprint(), 5.0);
}

#[test]
fn should_have_no_bounds_without_points() {
    assert!(Aabb::from_points(std::iter::empty()).is_none());
}

#[test]
fn footprint_ignores_height() {
    let tall = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 10.0, 2.0));
    assert_eq!(tall.footprint(), 2.0);
}

#[test]
fn framing_bounds_sit_at_the_lifted_height() {
    let geometry = RegionGeometry::new(
        vec![vertex(0.0, 0.0, 0.0), vertex(2.0, 0.1, 0.0), vertex(0.0, 0.0, 4.0)],
        vec![0, 2, 1],
    )
    .expect("has triangles");
    let framing = geometry.framing_bounds();
    assert_eq!(framing.min, Point3::new(0.0, 0.25, 0.0));
    assert_eq!(framing.max, Point3::new(2.0, 0.35, 4.0));
    assert_eq!(framing.footprint(), geometry.bounds.footprint());
}

#[test]
fn geometry_needs_triangles() {
    assert!(RegionGeometry::new(vec![vertex(0.0, 0.0, 0.0)], vec![]).is_none());
}

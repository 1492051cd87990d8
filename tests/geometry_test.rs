use cgmath::{InnerSpace, Vector3};
use scene_ngin::data_structures::{
    geometry::{axes, cuboid, plane, sphere, torus},
    mesh::Geometry,
    text::{TextOptions, Typeface, extrude_text},
};

mod common;

fn assert_well_formed(geometry: &Geometry) {
    assert_eq!(geometry.indices.len() % 3, 0);
    let count = geometry.vertices.len() as u32;
    assert!(geometry.indices.iter().all(|&i| i < count), "index out of bounds");
    for vertex in &geometry.vertices {
        let normal = Vector3::from(vertex.normal);
        common::assert_close(normal.magnitude(), 1.0, 1e-4);
    }
}

fn extent(geometry: &Geometry) -> (Vector3<f32>, Vector3<f32>) {
    geometry.bounding_box().expect("non-empty geometry")
}

#[test]
fn donut_torus_counts() {
    let donut = torus(0.2, 0.2, 20, 45);
    assert_eq!(donut.vertices.len(), 21 * 46);
    assert_eq!(donut.triangle_count(), 20 * 45 * 2);
    assert_well_formed(&donut);

    let (min, max) = extent(&donut);
    common::assert_close(max.x, 0.4, 1e-5);
    assert!(min.y >= -0.4 - 1e-5);
    common::assert_close(max.z, 0.2, 1e-5);
    common::assert_close(min.z, -0.2, 1e-5);
}

#[test]
fn sphere_counts_and_radius() {
    let ball = sphere(0.5, 32, 32);
    assert_eq!(ball.vertices.len(), 33 * 33);
    // the pole rows contribute one triangle per segment
    assert_eq!(ball.triangle_count(), 32 * (32 * 2 - 2));
    assert_well_formed(&ball);
    for vertex in &ball.vertices {
        common::assert_close(Vector3::from(vertex.position).magnitude(), 0.5, 1e-5);
    }
}

#[test]
fn cube_faces_point_outwards() {
    let cube = cuboid(0.75, 0.75, 0.75);
    assert_eq!(cube.vertices.len(), 24);
    assert_eq!(cube.triangle_count(), 12);
    assert_well_formed(&cube);
    for tri in cube.indices.chunks_exact(3) {
        let [a, b, c] = [0, 1, 2].map(|k| Vector3::from(cube.vertices[tri[k] as usize].position));
        let face = (b - a).cross(c - a);
        let normal = Vector3::from(cube.vertices[tri[0] as usize].normal);
        assert!(face.dot(normal) > 0.0, "triangle winds away from its normal");
        // outwards: the face normal points away from the centre
        assert!(a.dot(normal) > 0.0);
    }
}

#[test]
fn plane_is_a_single_quad_facing_up_its_normal() {
    let floor = plane(5.0, 5.0);
    assert_eq!(floor.triangle_count(), 2);
    assert_well_formed(&floor);
    let (min, max) = extent(&floor);
    assert_eq!((min.x, max.x, min.y, max.y), (-2.5, 2.5, -2.5, 2.5));
    for tri in floor.indices.chunks_exact(3) {
        let [a, b, c] = [0, 1, 2].map(|k| Vector3::from(floor.vertices[tri[k] as usize].position));
        assert!((b - a).cross(c - a).z > 0.0);
    }
}

#[test]
fn axes_helper_has_three_lines() {
    let lines = axes(1.0);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1].position, [1.0, 0.0, 0.0]);
    assert_eq!(lines[3].position, [0.0, 1.0, 0.0]);
    assert_eq!(lines[5].position, [0.0, 0.0, 1.0]);
    assert!(lines.iter().step_by(2).all(|v| v.position == [0.0; 3]));
}

#[test]
fn center_moves_the_bounding_box_to_the_origin() {
    let mut cube = cuboid(1.0, 2.0, 3.0);
    cube.translate(Vector3::new(4.0, -1.0, 0.5));
    cube.center();
    let (min, max) = extent(&cube);
    common::assert_close((min + max).magnitude(), 0.0, 1e-5);
    common::assert_close(max.y - min.y, 2.0, 1e-5);
    assert!(Geometry::default().bounding_box().is_none());
}

#[test]
fn typeface_parses() {
    let face = Typeface::from_json(common::TINY_FONT).expect("valid font");
    assert_eq!(face.family_name, "Tiny");
    assert_eq!(face.glyphs.len(), 3);
    assert!(Typeface::from_json("{}").is_err());
    assert!(Typeface::from_json(&common::TINY_FONT.replace("\"resolution\": 100", "\"resolution\": 0")).is_err());
}

#[test]
fn extruded_glyph_spans_size_and_depth() {
    let face = Typeface::from_json(common::TINY_FONT).expect("valid font");
    let text = extrude_text(&face, "a", TextOptions::new(1.0, 0.5)).expect("tessellates");
    assert!(text.triangle_count() >= 12);
    assert_well_formed(&text);

    let (min, max) = extent(&text);
    common::assert_close(min.x, 0.0, 1e-5);
    common::assert_close(max.x, 1.0, 1e-5);
    common::assert_close(max.y, 1.0, 1e-5);
    common::assert_close(min.z, 0.0, 1e-6);
    common::assert_close(max.z, 0.5, 1e-6);
}

#[test]
fn glyphs_advance_and_whitespace_is_skipped() {
    let face = Typeface::from_json(common::TINY_FONT).expect("valid font");
    let text = extrude_text(&face, "a a", TextOptions::new(1.0, 0.1)).expect("tessellates");
    let (_, max) = extent(&text);
    // 1.2 + 0.6 advance, then one em wide
    common::assert_close(max.x, 2.8, 1e-4);
}

#[test]
fn holes_add_walls_but_no_cap() {
    let face = Typeface::from_json(common::TINY_FONT).expect("valid font");
    let solid = extrude_text(&face, "a", TextOptions::new(1.0, 0.1)).expect("tessellates");
    let ring = extrude_text(&face, "b", TextOptions::new(1.0, 0.1)).expect("tessellates");
    assert!(ring.triangle_count() > solid.triangle_count());
    // no front cap triangle covers the centre of the hole
    let centre = [0.5, 0.5];
    for tri in ring.indices.chunks_exact(3) {
        let corners = [0, 1, 2].map(|k| ring.vertices[tri[k] as usize].position);
        if corners.iter().all(|p| p[2] == 0.1) {
            assert!(!contains(corners, centre), "hole is filled");
        }
    }
}

#[test]
fn text_without_outlines_is_an_error() {
    let face = Typeface::from_json(common::TINY_FONT).expect("valid font");
    let err = extrude_text(&face, "안녕", TextOptions::new(0.2, 0.1)).expect_err("no glyph has an outline");
    assert!(err.to_string().contains("Tiny"));
    assert!(extrude_text(&face, "  ", TextOptions::new(0.2, 0.1)).is_err());
    assert!(extrude_text(&face, "", TextOptions::new(0.2, 0.1)).is_err());
    // one known glyph is enough
    assert!(extrude_text(&face, "안a", TextOptions::new(0.2, 0.1)).is_ok());
}

#[test]
fn centred_text_is_symmetric() {
    let face = Typeface::from_json(common::TINY_FONT).expect("valid font");
    let mut text = extrude_text(&face, "ab", TextOptions::new(0.2, 0.1)).expect("tessellates");
    text.center();
    let (min, max) = extent(&text);
    common::assert_close(min.x, -max.x, 1e-5);
    common::assert_close(min.y, -max.y, 1e-5);
    common::assert_close(min.z, -0.05, 1e-5);
    common::assert_close(max.z, 0.05, 1e-5);
}

fn contains(tri: [[f32; 3]; 3], p: [f32; 2]) -> bool {
    let sign = |a: [f32; 3], b: [f32; 3]| (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0]);
    let (d0, d1, d2) = (sign(tri[0], tri[1]), sign(tri[1], tri[2]), sign(tri[2], tri[0]));
    (d0 > 0.0 && d1 > 0.0 && d2 > 0.0) || (d0 < 0.0 && d1 < 0.0 && d2 < 0.0)
}

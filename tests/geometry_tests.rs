//! Geometry and Segment Weight Tests
//!
//! Tests for:
//! - Segmented box primitive: vertex/index counts, material groups
//! - Geometry translate, attribute versions and bounding volume
//! - Segment weights: index/weight invariants, interior values, far edge
//! - Page geometry: skin attributes present and consistent

use glam::Vec3;
use wgpu::VertexFormat;

use flipbook::book::{PageDimensions, create_page_geometry, segment_weight};
use flipbook::resources::geometry::{Attribute, Geometry};
use flipbook::resources::primitives::{BoxSegments, create_box};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

// ============================================================================
// Box Primitive Tests
// ============================================================================

#[test]
fn box_unit_segments_counts() {
    let geo = create_box(1.0, 1.0, 1.0, BoxSegments::default());
    assert_eq!(geo.vertex_count(), 24);
    assert_eq!(geo.indices().len(), 36);
    assert_eq!(geo.groups().len(), 6);
}

#[test]
fn box_segmented_counts() {
    let geo = create_box(
        1.28,
        1.71,
        0.003,
        BoxSegments {
            width: 30,
            height: 2,
            depth: 1,
        },
    );
    // +-X: 2x3 grid, +-Y: 31x2 grid, +-Z: 31x3 grid
    assert_eq!(geo.vertex_count(), 2 * 6 + 2 * 62 + 2 * 93);
    // +-X: 1x2 cells, +-Y: 30x1 cells, +-Z: 30x2 cells, 6 indices each
    assert_eq!(geo.indices().len(), (2 * 2 + 2 * 30 + 2 * 60) * 6);
}

#[test]
fn box_groups_cover_indices_in_order() {
    let geo = create_box(
        2.0,
        1.0,
        0.5,
        BoxSegments {
            width: 4,
            height: 2,
            depth: 1,
        },
    );

    let mut expected_start = 0;
    for (i, group) in geo.groups().iter().enumerate() {
        assert_eq!(group.material_index, i);
        assert_eq!(group.start, expected_start);
        assert!(group.count > 0);
        expected_start += group.count;
    }
    assert_eq!(expected_start as usize, geo.indices().len());
}

#[test]
fn box_indices_in_range() {
    let geo = create_box(
        1.0,
        1.0,
        1.0,
        BoxSegments {
            width: 3,
            height: 3,
            depth: 3,
        },
    );
    let n = geo.vertex_count();
    assert!(geo.indices().iter().all(|&i| i < n));
}

#[test]
fn box_bounds_centered() {
    let geo = create_box(2.0, 4.0, 6.0, BoxSegments::default());
    let bb = geo.bounding_box.expect("box computes its bounds");
    assert!(vec3_approx(bb.min, Vec3::new(-1.0, -2.0, -3.0)));
    assert!(vec3_approx(bb.max, Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn box_front_face_normal_points_out() {
    let geo = create_box(1.0, 1.0, 1.0, BoxSegments::default());
    let normal = geo.get_attribute("normal").unwrap();
    let front = geo.groups()[4];
    let first_vertex = geo.indices()[front.start as usize];
    let n = normal.read::<[f32; 3]>(first_vertex).unwrap();
    assert!(vec3_approx(Vec3::from_array(n), Vec3::Z));
}

// ============================================================================
// Geometry Tests
// ============================================================================

#[test]
fn geometry_translate_moves_bounds() {
    let mut geo = create_box(1.0, 1.0, 1.0, BoxSegments::default());
    geo.translate(Vec3::new(0.5, 0.0, 0.0));
    let bb = geo.compute_bounding_volume().unwrap();
    assert!(vec3_approx(bb.min, Vec3::new(0.0, -0.5, -0.5)));
    assert!(vec3_approx(bb.max, Vec3::new(1.0, 0.5, 0.5)));
}

#[test]
fn geometry_empty_has_no_bounds() {
    let mut geo = Geometry::new();
    assert_eq!(geo.vertex_count(), 0);
    assert!(geo.compute_bounding_volume().is_none());
}

#[test]
fn attribute_read_out_of_range() {
    let attr = Attribute::new_planar(&[[1.0_f32, 2.0, 3.0]], VertexFormat::Float32x3);
    assert_eq!(attr.read::<[f32; 3]>(0), Some([1.0, 2.0, 3.0]));
    assert!(attr.read::<[f32; 3]>(1).is_none());
}

#[test]
fn translate_bumps_position_version() {
    let mut geo = create_box(1.0, 1.0, 1.0, BoxSegments::default());
    let before = geo.get_attribute("position").unwrap().version;
    geo.translate(Vec3::X);
    let position = geo.get_attribute("position").unwrap();
    assert!(position.version > before);
    assert_eq!(position.count, 24);
    assert!(geo.bounding_box.is_none());
}

// ============================================================================
// Segment Weight Tests
// ============================================================================

#[test]
fn segment_weight_interior_point() {
    // x = 2.5 segments in: primary 2, halfway to bone 3
    let w = segment_weight(0.25, 0.1, 10);
    assert_eq!(w.primary, 2);
    assert_eq!(w.secondary, 3);
    assert!(approx(w.weight, 0.5));
    assert_eq!(w.skin_index(), [2, 3, 0, 0]);
    let sw = w.skin_weight();
    assert!(approx(sw[0], 0.5) && approx(sw[1], 0.5));
    assert_eq!(&sw[2..], &[0.0, 0.0]);
}

#[test]
fn segment_weight_hinge_is_root_bone() {
    let w = segment_weight(0.0, 0.1, 10);
    assert_eq!(w.primary, 0);
    assert!(approx(w.weight, 0.0));
}

#[test]
fn segment_weight_negative_clamps_to_root() {
    let w = segment_weight(-1e-6, 0.1, 10);
    assert_eq!(w.primary, 0);
    assert!(w.weight >= 0.0);
}

#[test]
fn segment_weight_far_edge_stays_in_chain() {
    let w = segment_weight(1.0, 0.1, 10);
    assert_eq!(w.primary, 9);
    assert_eq!(w.secondary, 10);
    assert!(approx(w.weight, 1.0));
}

// ============================================================================
// Page Geometry Tests
// ============================================================================

#[test]
fn page_geometry_spans_hinge_to_edge() {
    let dims = PageDimensions::default();
    let geo = create_page_geometry(&dims);
    let bb = geo.bounding_box.unwrap();
    assert!(approx(bb.min.x, 0.0));
    assert!(approx(bb.max.x, dims.width));
    assert!(approx(bb.max.y - bb.min.y, dims.height));
}

#[test]
fn page_geometry_skin_invariants_hold_for_every_vertex() {
    let dims = PageDimensions::default();
    let geo = create_page_geometry(&dims);

    let indices = geo.get_attribute("skinIndex").expect("skin indices");
    let weights = geo.get_attribute("skinWeight").expect("skin weights");
    assert_eq!(indices.format, VertexFormat::Uint16x4);
    assert_eq!(weights.format, VertexFormat::Float32x4);
    assert_eq!(indices.count, geo.vertex_count());
    assert_eq!(weights.count, geo.vertex_count());

    let segments = dims.segments as u16;
    for (idx, w) in indices.iter::<[u16; 4]>().zip(weights.iter::<[f32; 4]>()) {
        assert!(idx[0] < idx[1], "primary {} >= secondary {}", idx[0], idx[1]);
        assert!(idx[1] <= segments);
        assert_eq!(idx[1], idx[0] + 1);
        assert!((0.0..=1.0).contains(&w[1]));
        assert!(approx(w.iter().sum::<f32>(), 1.0));
    }
}

#[test]
fn page_geometry_weights_follow_position() {
    let dims = PageDimensions::default();
    let geo = create_page_geometry(&dims);
    let segment_width = dims.segment_width();

    let indices = geo.get_attribute("skinIndex").unwrap();
    let weights = geo.get_attribute("skinWeight").unwrap();
    for (i, p) in geo.positions().iter().enumerate() {
        let idx = indices.read::<[u16; 4]>(i as u32).unwrap();
        let w = weights.read::<[f32; 4]>(i as u32).unwrap();
        // The blended bone position reproduces the vertex x
        let blended = f32::from(idx[0]) * segment_width * w[0] + f32::from(idx[1]) * segment_width * w[1];
        assert!((blended - p.x).abs() < 1e-3, "vertex {i}: {blended} vs {}", p.x);
    }
}

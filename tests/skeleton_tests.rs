//! Skeleton and Skinned Mesh Tests
//!
//! Tests for:
//! - Bone chain construction: count, parenting, spacing
//! - Rebuilding from a bone list and rejecting malformed chains
//! - World and joint matrices
//! - Linear blend skinning of the page geometry
//! - Transform local matrix caching

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Affine3A, Mat4, Vec3};

use flipbook::book::{PageDimensions, create_page_geometry};
use flipbook::resources::MeshStandardMaterial;
use flipbook::resources::primitives::{BoxSegments, create_box};
use flipbook::scene::{Bone, Skeleton, SkinnedMesh, Transform};
use flipbook::FlipbookError;

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn page_mesh(dims: &PageDimensions) -> SkinnedMesh {
    let geometry = Arc::new(create_page_geometry(dims));
    let skeleton = Skeleton::chain("test", dims.segments, dims.segment_width());
    SkinnedMesh::new("page", geometry, vec![MeshStandardMaterial::default(); 6], skeleton)
}

// ============================================================================
// Chain Construction Tests
// ============================================================================

#[test]
fn chain_has_segments_plus_one_bones() {
    let skeleton = Skeleton::chain("chain", 30, 0.1);
    assert_eq!(skeleton.len(), 31);
    assert!(!skeleton.is_empty());
}

#[test]
fn chain_is_a_single_line() {
    let skeleton = Skeleton::chain("chain", 5, 0.2);

    let root = skeleton.root().unwrap();
    assert_eq!(root.index, 0);
    assert!(root.parent.is_none());
    assert_eq!(root.offset, Vec3::ZERO);

    for i in 1..skeleton.len() {
        let bone = skeleton.bone(i).unwrap();
        assert_eq!(bone.parent, Some(i - 1));
        assert!(vec3_approx(bone.offset, Vec3::new(0.2, 0.0, 0.0)));
    }
    for i in 0..skeleton.len() - 1 {
        assert_eq!(skeleton.children_of(i), vec![i + 1]);
    }
    assert!(skeleton.children_of(skeleton.len() - 1).is_empty());
}

#[test]
fn rest_world_positions_are_evenly_spaced() {
    let skeleton = Skeleton::chain("chain", 4, 0.25);
    let worlds = skeleton.rest_world_matrices();
    for (i, m) in worlds.iter().enumerate() {
        let p = Vec3::from(m.translation);
        assert!(vec3_approx(p, Vec3::new(i as f32 * 0.25, 0.0, 0.0)));
    }
}

#[test]
fn rest_pose_joint_matrices_are_identity() {
    let skeleton = Skeleton::chain("chain", 8, 0.16);
    for m in skeleton.joint_matrices() {
        assert!(m.abs_diff_eq(Mat4::IDENTITY, EPSILON));
    }
}

#[test]
fn rotations_accumulate_down_the_chain() {
    let mut skeleton = Skeleton::chain("chain", 2, 1.0);
    skeleton.set_rotation(1, FRAC_PI_2);

    let worlds = skeleton.world_matrices();
    // Bone 1 stays at x=1; bone 2 is swung a quarter turn about Y
    assert!(vec3_approx(Vec3::from(worlds[1].translation), Vec3::X));
    assert!(vec3_approx(
        Vec3::from(worlds[2].translation),
        Vec3::new(1.0, 0.0, -1.0)
    ));
}

#[test]
fn set_rotation_out_of_range_is_ignored() {
    let mut skeleton = Skeleton::chain("chain", 2, 1.0);
    skeleton.set_rotation(10, 1.0);
    assert_eq!(skeleton.rotations(), vec![0.0; 3]);
}

#[test]
fn reset_pose_zeroes_rotations() {
    let mut skeleton = Skeleton::chain("chain", 3, 1.0);
    skeleton.set_rotation(1, 0.3);
    skeleton.set_rotation(3, -0.7);
    skeleton.reset_pose();
    assert_eq!(skeleton.rotations(), vec![0.0; 4]);
}

// ============================================================================
// from_bones Tests
// ============================================================================

#[test]
fn from_bones_json_round_trip() {
    let original = Skeleton::chain("chain", 3, 0.5);
    let json = serde_json::to_string(original.bones()).unwrap();
    let bones: Vec<Bone> = serde_json::from_str(&json).unwrap();

    let rebuilt = Skeleton::from_bones("rebuilt", bones).unwrap();
    assert_eq!(rebuilt.bones(), original.bones());
    assert_eq!(rebuilt.name, "rebuilt");
    assert_ne!(rebuilt.id, original.id);
}

#[test]
fn from_bones_rejects_empty() {
    let result = Skeleton::from_bones("empty", Vec::new());
    assert!(matches!(result, Err(FlipbookError::InvalidSkeleton(_))));
}

#[test]
fn from_bones_rejects_forward_parent() {
    let mut bones = Skeleton::chain("chain", 2, 1.0).bones().to_vec();
    bones[1].parent = Some(2);
    let result = Skeleton::from_bones("bad", bones);
    assert!(matches!(result, Err(FlipbookError::InvalidSkeleton(_))));
}

#[test]
fn from_bones_rejects_second_root() {
    let mut bones = Skeleton::chain("chain", 2, 1.0).bones().to_vec();
    bones[2].parent = None;
    assert!(Skeleton::from_bones("bad", bones).is_err());
}

#[test]
fn from_bones_rejects_parented_root() {
    let mut bones = Skeleton::chain("chain", 1, 1.0).bones().to_vec();
    bones[0].parent = Some(0);
    assert!(Skeleton::from_bones("bad", bones).is_err());
}

#[test]
fn from_bones_rejects_misnumbered_bone() {
    let mut bones = Skeleton::chain("chain", 2, 1.0).bones().to_vec();
    bones[1].index = 5;
    assert!(Skeleton::from_bones("bad", bones).is_err());
}

// ============================================================================
// Skinning Tests
// ============================================================================

#[test]
fn rest_pose_skinning_is_identity() {
    let mesh = page_mesh(&PageDimensions::default());
    let rest = mesh.geometry.positions();
    let deformed = mesh.deformed_positions();
    assert_eq!(rest.len(), deformed.len());
    for (a, b) in rest.iter().zip(&deformed) {
        assert!(vec3_approx(*a, *b), "{a:?} vs {b:?}");
    }
}

#[test]
fn bending_bone_one_swings_the_far_edge() {
    let dims = PageDimensions::default();
    let mut mesh = page_mesh(&dims);
    mesh.skeleton.set_rotation(1, FRAC_PI_2);

    let segment_width = dims.segment_width();
    let rest = mesh.geometry.positions();
    let deformed = mesh.deformed_positions();

    for (r, d) in rest.iter().zip(&deformed) {
        if approx(r.x, dims.width) {
            // Everything past bone 1 turns about the joint at x = W
            assert!(approx(d.x, segment_width + r.z), "x: {d:?}");
            assert!(approx(d.z, -(dims.width - segment_width)), "z: {d:?}");
            assert!(approx(d.y, r.y));
        } else if r.x <= segment_width * 0.5 {
            // Inside the first segment the vertex blends toward a joint
            // that has not moved yet
            assert!(d.x <= segment_width + dims.depth);
        }
    }
}

#[test]
fn hinge_vertices_follow_only_root() {
    let dims = PageDimensions::default();
    let mut mesh = page_mesh(&dims);
    for i in 1..mesh.skeleton.len() {
        mesh.skeleton.set_rotation(i, 0.2);
    }

    let rest = mesh.geometry.positions();
    let deformed = mesh.deformed_positions();
    for (r, d) in rest.iter().zip(&deformed) {
        if approx(r.x, 0.0) {
            assert!(vec3_approx(*r, *d));
        }
    }
}

#[test]
fn geometry_without_skin_is_undeformed() {
    let geometry = Arc::new(create_box(1.0, 1.0, 1.0, BoxSegments::default()));
    let mut skeleton = Skeleton::chain("chain", 2, 0.5);
    skeleton.set_rotation(1, 1.0);
    let mesh = SkinnedMesh::new("plain", geometry.clone(), Vec::new(), skeleton);
    assert_eq!(mesh.deformed_positions(), geometry.positions());
}

#[test]
fn material_lookup_by_group() {
    let mesh = page_mesh(&PageDimensions::default());
    for group in mesh.geometry.groups() {
        assert!(mesh.material_for_group(group).is_some());
    }
}

#[test]
fn skinned_mesh_defaults() {
    let mesh = page_mesh(&PageDimensions::default());
    assert!(!mesh.cast_shadow);
    assert!(!mesh.receive_shadow);
    assert!(mesh.frustum_culled);
}

// ============================================================================
// Transform Tests
// ============================================================================

#[test]
fn transform_first_update_rebuilds() {
    let mut t = Transform::new();
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());
}

#[test]
fn transform_rotation_y_changes_matrix() {
    let mut t = Transform::new();
    t.update_local_matrix();
    t.set_rotation_y(FRAC_PI_2);
    // The cached matrix lags until it is rebuilt
    assert!(t.local_matrix().abs_diff_eq(Affine3A::IDENTITY, EPSILON));
    assert!(t.update_local_matrix());

    let expected = Affine3A::from_rotation_y(FRAC_PI_2);
    assert!(t.local_matrix().abs_diff_eq(expected, EPSILON));
    let p = t.local_matrix().transform_point3(Vec3::X);
    assert!(vec3_approx(p, Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn transform_same_value_does_not_rebuild() {
    let mut t = Transform::default();
    t.position.z = 0.25;
    assert!(t.update_local_matrix());
    t.position.z = 0.25;
    assert!(!t.update_local_matrix());
    assert!(approx(t.local_matrix().translation.z, 0.25));
}

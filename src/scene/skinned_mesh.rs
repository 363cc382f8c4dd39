use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::resources::{Geometry, GeometryGroup, MeshStandardMaterial};
use crate::scene::skeleton::Skeleton;
use crate::scene::transform::Transform;

/// Attribute names of the per-vertex skin data.
pub const SKIN_INDEX_ATTRIBUTE: &str = "skinIndex";
pub const SKIN_WEIGHT_ATTRIBUTE: &str = "skinWeight";

/// A mesh deformed by a skeleton.
///
/// The geometry is shared between instances; the skeleton and materials are
/// owned, so dropping the mesh drops its whole bone chain.
#[derive(Debug, Clone)]
pub struct SkinnedMesh {
    pub name: String,

    pub geometry: Arc<Geometry>,
    pub skeleton: Skeleton,
    /// Indexed by `GeometryGroup::material_index`.
    pub materials: Vec<MeshStandardMaterial>,

    /// Local transform of the mesh root; the skeleton root hangs off it.
    pub transform: Transform,

    pub cast_shadow: bool,
    pub receive_shadow: bool,
    /// Whether a renderer may cull the mesh by its rest-pose bounds.
    pub frustum_culled: bool,
}

impl SkinnedMesh {
    #[must_use]
    pub fn new(
        name: &str,
        geometry: Arc<Geometry>,
        materials: Vec<MeshStandardMaterial>,
        skeleton: Skeleton,
    ) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            skeleton,
            materials,
            transform: Transform::new(),
            cast_shadow: false,
            receive_shadow: false,
            frustum_culled: true,
        }
    }

    /// Material used to draw `group`.
    #[must_use]
    pub fn material_for_group(&self, group: &GeometryGroup) -> Option<&MeshStandardMaterial> {
        self.materials.get(group.material_index)
    }

    /// Vertex positions in mesh space after linear blend skinning with the
    /// current pose.
    ///
    /// Geometry without skin attributes is returned undeformed.
    #[must_use]
    pub fn deformed_positions(&self) -> Vec<Vec3> {
        let positions = self.geometry.positions();

        let (Some(indices), Some(weights)) = (
            self.geometry.get_attribute(SKIN_INDEX_ATTRIBUTE),
            self.geometry.get_attribute(SKIN_WEIGHT_ATTRIBUTE),
        ) else {
            return positions;
        };

        let joints = self.skeleton.joint_matrices();

        positions
            .iter()
            .zip(indices.iter::<[u16; 4]>())
            .zip(weights.iter::<[f32; 4]>())
            .map(|((&position, bone_ids), bone_weights)| {
                skin_vertex(position, bone_ids, bone_weights, &joints)
            })
            .collect()
    }
}

fn skin_vertex(position: Vec3, bone_ids: [u16; 4], weights: [f32; 4], joints: &[Mat4]) -> Vec3 {
    let mut out = Vec3::ZERO;
    for (&bone, &weight) in bone_ids.iter().zip(&weights) {
        if weight <= 0.0 {
            continue;
        }
        let m = joints.get(bone as usize).copied().unwrap_or(Mat4::IDENTITY);
        out += m.transform_point3(position) * weight;
    }
    out
}

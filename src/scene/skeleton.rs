use glam::{Affine3A, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{FlipbookError, Result};

/// A joint in a bone chain.
///
/// Bones live in an arena ordered by index; `parent` is the index of the
/// parent bone, always smaller than the bone's own index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub index: usize,
    pub parent: Option<usize>,
    /// Fixed translation relative to the parent's frame.
    pub offset: Vec3,
    /// Rotation about the local Y axis, in radians. The only animated value.
    pub rotation: f32,
}

impl Bone {
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_rotation_translation(Quat::from_rotation_y(self.rotation), self.offset)
    }
}

#[derive(Debug, Clone)]
pub struct Skeleton {
    pub id: Uuid,
    pub name: String,

    // Ordered bone arena; bones[i] corresponds to skin index i
    bones: Vec<Bone>,

    // Captured from the rest pose at construction; transforms vertices from
    // mesh space into each bone's local space
    inverse_bind_matrices: Vec<Affine3A>,
}

impl Skeleton {
    /// Builds a straight chain of `segments + 1` bones along +X.
    ///
    /// Bone 0 sits at the origin (the page hinge); every following bone is
    /// a child of the previous one, offset by `spacing`.
    #[must_use]
    pub fn chain(name: &str, segments: usize, spacing: f32) -> Self {
        let bones = (0..=segments)
            .map(|index| Bone {
                index,
                parent: index.checked_sub(1),
                offset: if index == 0 {
                    Vec3::ZERO
                } else {
                    Vec3::new(spacing, 0.0, 0.0)
                },
                rotation: 0.0,
            })
            .collect();

        Self::bind(name, bones)
    }

    /// Rebuilds a skeleton from a bone list, e.g. one read back from JSON.
    ///
    /// Every non-root bone must reference an earlier bone as its parent and
    /// exactly one bone (the first) may be parentless.
    pub fn from_bones(name: &str, bones: Vec<Bone>) -> Result<Self> {
        if bones.is_empty() {
            return Err(FlipbookError::InvalidSkeleton(
                "a skeleton needs at least one bone".to_string(),
            ));
        }

        for (i, bone) in bones.iter().enumerate() {
            if bone.index != i {
                return Err(FlipbookError::InvalidSkeleton(format!(
                    "bone at position {i} carries index {}",
                    bone.index
                )));
            }
            match (i, bone.parent) {
                (0, None) => {}
                (0, Some(p)) => {
                    return Err(FlipbookError::InvalidSkeleton(format!(
                        "root bone has parent {p}"
                    )));
                }
                (_, None) => {
                    return Err(FlipbookError::InvalidSkeleton(format!(
                        "bone {i} has no parent"
                    )));
                }
                (_, Some(p)) if p >= i => {
                    return Err(FlipbookError::InvalidSkeleton(format!(
                        "bone {i} references later bone {p} as parent"
                    )));
                }
                _ => {}
            }
        }

        Ok(Self::bind(name, bones))
    }

    fn bind(name: &str, bones: Vec<Bone>) -> Self {
        let mut skeleton = Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            bones,
            inverse_bind_matrices: Vec::new(),
        };
        skeleton.inverse_bind_matrices = skeleton
            .rest_world_matrices()
            .iter()
            .map(Affine3A::inverse)
            .collect();
        skeleton
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    #[inline]
    #[must_use]
    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    #[inline]
    pub fn bone_mut(&mut self, index: usize) -> Option<&mut Bone> {
        self.bones.get_mut(index)
    }

    /// The parentless bone attached to the mesh root.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&Bone> {
        self.bones.first()
    }

    /// Indices of the bones whose parent is `index`.
    #[must_use]
    pub fn children_of(&self, index: usize) -> Vec<usize> {
        self.bones
            .iter()
            .filter(|b| b.parent == Some(index))
            .map(|b| b.index)
            .collect()
    }

    /// Sets a bone's rotation; out-of-range indices are ignored.
    pub fn set_rotation(&mut self, index: usize, angle: f32) {
        if let Some(bone) = self.bones.get_mut(index) {
            bone.rotation = angle;
        }
    }

    #[must_use]
    pub fn rotations(&self) -> Vec<f32> {
        self.bones.iter().map(|b| b.rotation).collect()
    }

    /// Resets every rotation to the rest pose.
    pub fn reset_pose(&mut self) {
        for bone in &mut self.bones {
            bone.rotation = 0.0;
        }
    }

    /// Mesh-space matrix of every bone for the current pose.
    #[must_use]
    pub fn world_matrices(&self) -> Vec<Affine3A> {
        self.accumulate(Bone::local_matrix)
    }

    /// Mesh-space matrix of every bone with all rotations zeroed.
    #[must_use]
    pub fn rest_world_matrices(&self) -> Vec<Affine3A> {
        self.accumulate(|bone| Affine3A::from_translation(bone.offset))
    }

    /// Final skinning matrices (`world * inverse_bind`) for the current pose.
    #[must_use]
    pub fn joint_matrices(&self) -> Vec<Mat4> {
        self.world_matrices()
            .iter()
            .zip(&self.inverse_bind_matrices)
            .map(|(world, ibm)| Mat4::from(*world * *ibm))
            .collect()
    }

    // Parents always precede children, so one forward pass suffices
    fn accumulate(&self, local: impl Fn(&Bone) -> Affine3A) -> Vec<Affine3A> {
        let mut out: Vec<Affine3A> = Vec::with_capacity(self.bones.len());
        for bone in &self.bones {
            let parent_world = bone
                .parent
                .and_then(|p| out.get(p).copied())
                .unwrap_or(Affine3A::IDENTITY);
            out.push(parent_world * local(bone));
        }
        out
    }
}

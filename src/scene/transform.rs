use glam::{Affine3A, Quat, Vec3};

/// Transform component
///
/// Position, rotation and scale with a cached local matrix. Page groups and
/// skinned mesh roots each own one; the animation refreshes the matrix after
/// every write so a renderer can read it directly.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    local_matrix: Affine3A,

    // TRS the cached matrix was built from
    built_from: Option<(Vec3, Quat, Vec3)>,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Affine3A::IDENTITY,
            built_from: None,
        }
    }

    /// Rebuilds the local matrix when position, rotation or scale changed
    /// since the last rebuild. Returns whether it was rebuilt.
    pub fn update_local_matrix(&mut self) -> bool {
        let current = (self.position, self.rotation, self.scale);
        if self.built_from == Some(current) {
            return false;
        }

        self.local_matrix =
            Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);
        self.built_from = Some(current);
        true
    }

    /// Sets a pure rotation about the Y axis (the page hinge axis).
    pub fn set_rotation_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle);
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::Arc;

use glam::{Affine3A, Vec4};
use serde::{Deserialize, Serialize};

use crate::animation::DampState;
use crate::book::config::BookConfig;
use crate::resources::{ColorSpace, Geometry, MeshStandardMaterial, Texture, color_from_hex};
use crate::scene::{Skeleton, SkinnedMesh, Transform};

/// Number of materials on a page mesh, one per box face group.
pub const PAGE_MATERIAL_COUNT: usize = 6;
/// Material slot of the front (+Z) surface.
pub const FRONT_MATERIAL: usize = 4;
/// Material slot of the back (-Z) surface.
pub const BACK_MATERIAL: usize = 5;

/// Image identifiers of a page's two sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    pub front: String,
    pub back: String,
}

impl PageSpec {
    #[must_use]
    pub fn new(front: &str, back: &str) -> Self {
        Self {
            front: front.to_string(),
            back: back.to_string(),
        }
    }

    /// Lays pictures out over pages.
    ///
    /// The first page carries `cover` on its front and the first picture on
    /// its back; following pictures fill pages pairwise; the last picture
    /// backs onto `back_cover`.
    #[must_use]
    pub fn from_pictures(pictures: &[&str], cover: &str, back_cover: &str) -> Vec<Self> {
        let Some((&first, _)) = pictures.split_first() else {
            return vec![Self::new(cover, back_cover)];
        };
        let n = pictures.len();

        let mut pages = vec![Self::new(cover, first)];
        let mut i = 1;
        while i + 1 < n {
            pages.push(Self::new(pictures[i % n], pictures[(i + 1) % n]));
            i += 2;
        }
        pages.push(Self::new(pictures[n - 1], back_cover));
        pages
    }
}

/// Resolved textures of one page.
#[derive(Debug, Clone)]
pub struct PageTextures {
    pub front: Arc<Texture>,
    pub back: Arc<Texture>,
    /// Only consumed by the first and last page.
    pub roughness_map: Option<Arc<Texture>>,
}

/// Where a page sits in its book; decides the cover finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlacement {
    pub number: usize,
    pub page_count: usize,
}

impl PagePlacement {
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.number + 1 == self.page_count
    }

    /// Whether this page needs the shared roughness map.
    #[must_use]
    pub fn uses_roughness_map(&self) -> bool {
        self.is_first() || self.is_last()
    }
}

/// Builds the six page materials in box group order:
/// `+X, -X, +Y, -Y` edges, then the front and back surfaces.
#[must_use]
pub fn page_materials(
    textures: &PageTextures,
    placement: PagePlacement,
    interior_roughness: f32,
) -> Vec<MeshStandardMaterial> {
    let white = Vec4::ONE;
    let dark = color_from_hex(0x11_11_11);

    let surface = |map: &Arc<Texture>, cover: bool| {
        let material = MeshStandardMaterial::new(white)
            .with_map(Arc::new(map.with_color_space(ColorSpace::Srgb)));
        match (&textures.roughness_map, cover) {
            (Some(roughness_map), true) => material.with_roughness_map(roughness_map.clone()),
            _ => material.with_roughness(interior_roughness),
        }
    };

    vec![
        MeshStandardMaterial::new(white),
        MeshStandardMaterial::new(dark),
        MeshStandardMaterial::new(white),
        MeshStandardMaterial::new(white),
        surface(&textures.front, placement.is_first()),
        surface(&textures.back, placement.is_last()),
    ]
}

/// One page of a book: its content, its hinge group and, once assembled,
/// its skinned mesh.
#[derive(Debug)]
pub struct Page {
    number: usize,
    spec: PageSpec,

    /// Hinge transform; receives bone 0's rotation.
    pub group: Transform,
    pub(crate) group_rotation: DampState,

    pub(crate) mesh: Option<SkinnedMesh>,
    pub(crate) bone_velocities: Vec<f32>,
}

impl Page {
    #[must_use]
    pub fn new(number: usize, spec: PageSpec) -> Self {
        Self {
            number,
            spec,
            group: Transform::new(),
            group_rotation: DampState::default(),
            mesh: None,
            bone_velocities: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }

    #[inline]
    #[must_use]
    pub fn spec(&self) -> &PageSpec {
        &self.spec
    }

    #[inline]
    #[must_use]
    pub fn mesh(&self) -> Option<&SkinnedMesh> {
        self.mesh.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_assembled(&self) -> bool {
        self.mesh.is_some()
    }

    /// Current hinge angle in radians.
    #[inline]
    #[must_use]
    pub fn group_rotation(&self) -> f32 {
        self.group_rotation.value
    }

    /// Current angle of every bone, index 0 being the hinge group.
    #[must_use]
    pub fn rotations(&self) -> Vec<f32> {
        let mut out = vec![self.group_rotation.value];
        if let Some(mesh) = &self.mesh {
            out.extend(mesh.skeleton.bones().iter().skip(1).map(|b| b.rotation));
        }
        out
    }

    /// Matrix placing the page mesh in book space: the hinge group's
    /// rotation applied over the mesh's stack offset.
    #[must_use]
    pub fn world_matrix(&self) -> Option<Affine3A> {
        self.mesh
            .as_ref()
            .map(|mesh| *self.group.local_matrix() * *mesh.transform.local_matrix())
    }

    /// Builds this page's skinned mesh on the shared geometry.
    ///
    /// Assembling twice is a no-op.
    pub fn assemble(
        &mut self,
        geometry: &Arc<Geometry>,
        textures: &PageTextures,
        page_count: usize,
        config: &BookConfig,
    ) {
        if self.mesh.is_some() {
            return;
        }

        let placement = PagePlacement {
            number: self.number,
            page_count,
        };
        let segments = config.page.segments;
        let skeleton = Skeleton::chain(
            &format!("PageSkeleton_{}", self.number),
            segments,
            config.page.segment_width(),
        );
        let materials = page_materials(textures, placement, config.textures.interior_roughness);

        let mut mesh = SkinnedMesh::new(
            &format!("Page_{}", self.number),
            Arc::clone(geometry),
            materials,
            skeleton,
        );
        mesh.cast_shadow = true;
        mesh.receive_shadow = true;
        // Bounds come from the flat rest pose; a bent page leaves them
        mesh.frustum_culled = false;

        log::debug!(
            "Page {} assembled ({} bones, front '{}' {:?}, back '{}' {:?})",
            self.number,
            segments + 1,
            self.spec.front,
            mesh.materials.get(FRONT_MATERIAL).map(MeshStandardMaterial::features),
            self.spec.back,
            mesh.materials.get(BACK_MATERIAL).map(MeshStandardMaterial::features)
        );

        self.bone_velocities = vec![0.0; segments + 1];
        self.mesh = Some(mesh);
    }

    /// Offsets the mesh along Z so turned pages stack on the other side.
    pub(crate) fn set_stack_offset(&mut self, displayed: usize, depth: f32) {
        if let Some(mesh) = &mut self.mesh {
            mesh.transform.position.z = (displayed as f32 - self.number as f32) * depth;
            mesh.transform.update_local_matrix();
        }
    }
}

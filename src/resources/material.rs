use std::sync::Arc;

use bitflags::bitflags;
use glam::Vec4;
use uuid::Uuid;

use crate::resources::texture::Texture;

// Shader variant flags
bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MaterialFeatures: u32 {
        const USE_MAP           = 1 << 0;
        const USE_ROUGHNESS_MAP = 1 << 1;
    }
}

/// Converts an `0xRRGGBB` sRGB color to a linear RGBA color with alpha 1.
#[must_use]
pub fn color_from_hex(hex: u32) -> Vec4 {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec4::new(channel(16), channel(8), channel(0), 1.0)
}

/// Physically based material with a base color map and an optional
/// roughness map.
#[derive(Debug, Clone)]
pub struct MeshStandardMaterial {
    pub uuid: Uuid,
    pub color: Vec4,
    pub roughness: f32,
    pub metalness: f32,
    pub map: Option<Arc<Texture>>,
    pub roughness_map: Option<Arc<Texture>>,
}

impl MeshStandardMaterial {
    #[must_use]
    pub fn new(color: Vec4) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            color,
            roughness: 1.0,
            metalness: 0.0,
            map: None,
            roughness_map: None,
        }
    }

    #[must_use]
    pub fn with_map(mut self, map: Arc<Texture>) -> Self {
        self.map = Some(map);
        self
    }

    #[must_use]
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    #[must_use]
    pub fn with_roughness_map(mut self, roughness_map: Arc<Texture>) -> Self {
        self.roughness_map = Some(roughness_map);
        self
    }

    /// Shader variant key: which optional maps the material samples.
    #[must_use]
    pub fn features(&self) -> MaterialFeatures {
        let mut features = MaterialFeatures::empty();
        if self.map.is_some() {
            features |= MaterialFeatures::USE_MAP;
        }
        if self.roughness_map.is_some() {
            features |= MaterialFeatures::USE_ROUGHNESS_MAP;
        }
        features
    }
}

impl Default for MeshStandardMaterial {
    fn default() -> Self {
        Self::new(Vec4::ONE)
    }
}

use std::sync::Arc;

use rustc_hash::FxHashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    Srgb,
    #[default]
    Linear,
}

impl ColorSpace {
    /// GPU format a renderer should upload an 8-bit RGBA image of this space as.
    #[must_use]
    pub fn texture_format(self) -> wgpu::TextureFormat {
        match self {
            ColorSpace::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            ColorSpace::Linear => wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

/// A resolved 2D image reference.
///
/// Pixel data stays with the external loader; the texture only records the
/// identifier it was requested by, the resolved source and how to sample it.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub uuid: Uuid,
    pub name: String,
    pub source: String,
    pub color_space: ColorSpace,
}

impl Texture {
    #[must_use]
    pub fn new(name: &str, source: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            source: source.into(),
            color_space: ColorSpace::default(),
        }
    }

    /// Returns a copy tagged with `color_space`.
    #[must_use]
    pub fn with_color_space(&self, color_space: ColorSpace) -> Self {
        Self {
            color_space,
            ..self.clone()
        }
    }
}

/// Resolves image identifiers to textures.
///
/// Returning `None` means the image is not available yet; callers retry on a
/// later frame.
pub trait TextureResolver {
    fn resolve(&self, id: &str) -> Option<Arc<Texture>>;
}

/// Maps identifiers to `<dir>/<id>.<ext>` paths and caches what it has
/// registered as loaded. Identifiers that already carry an extension
/// (`"demoRoughness.webp"`) keep it.
#[derive(Debug, Default)]
pub struct TexturePaths {
    dir: String,
    extension: String,
    loaded: FxHashMap<String, Arc<Texture>>,
}

impl TexturePaths {
    #[must_use]
    pub fn new(dir: &str, extension: &str) -> Self {
        Self {
            dir: dir.trim_end_matches('/').to_string(),
            extension: extension.trim_start_matches('.').to_string(),
            loaded: FxHashMap::default(),
        }
    }

    /// The path an identifier resolves to.
    #[must_use]
    pub fn path_for(&self, id: &str) -> String {
        if std::path::Path::new(id).extension().is_some() {
            format!("{}/{}", self.dir, id)
        } else {
            format!("{}/{}.{}", self.dir, id, self.extension)
        }
    }

    /// Records `id` as loaded and returns its texture.
    pub fn mark_loaded(&mut self, id: &str) -> Arc<Texture> {
        let path = self.path_for(id);
        self.loaded
            .entry(id.to_string())
            .or_insert_with(|| {
                log::debug!("Texture '{id}' available at {path}");
                Arc::new(Texture::new(id, path))
            })
            .clone()
    }

    /// Records every identifier as loaded.
    pub fn mark_all_loaded<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        for id in ids {
            self.mark_loaded(id);
        }
    }

    #[must_use]
    pub fn is_loaded(&self, id: &str) -> bool {
        self.loaded.contains_key(id)
    }
}

impl TextureResolver for TexturePaths {
    fn resolve(&self, id: &str) -> Option<Arc<Texture>> {
        self.loaded.get(id).cloned()
    }
}

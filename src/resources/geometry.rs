use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;
use rustc_hash::FxHashMap;
use uuid::Uuid;
use wgpu::VertexFormat;

/// Attribute holds CPU-side vertex data (`Arc<Vec<u8>>`) and its layout metadata.
#[derive(Debug, Clone)]
pub struct Attribute {
    /// CPU-side data shared via Arc
    pub data: Arc<Vec<u8>>,

    /// Data version for change detection
    pub version: u64,

    pub format: VertexFormat,
    pub count: u32,
    pub stride: u64,
}

static NEXT_ATTR_VERSION: AtomicU64 = AtomicU64::new(1);

impl Attribute {
    /// Creates a planar (non-interleaved) attribute.
    pub fn new_planar<T: bytemuck::Pod>(data: &[T], format: VertexFormat) -> Self {
        let raw_data = bytemuck::cast_slice(data).to_vec();

        Self {
            data: Arc::new(raw_data),
            version: NEXT_ATTR_VERSION.fetch_add(1, Ordering::Relaxed),
            format,
            count: data.len() as u32,
            stride: std::mem::size_of::<T>() as u64,
        }
    }

    /// Replaces the data in place (copy-on-write when the buffer is shared).
    pub fn update_data<T: bytemuck::Pod>(&mut self, new_data: &[T]) {
        let vec = Arc::make_mut(&mut self.data);
        let bytes: &[u8] = bytemuck::cast_slice(new_data);

        if vec.len() != bytes.len() {
            vec.resize(bytes.len(), 0);
        }
        vec.copy_from_slice(bytes);

        self.count = new_data.len() as u32;
        self.stride = std::mem::size_of::<T>() as u64;
        self.version = NEXT_ATTR_VERSION.fetch_add(1, Ordering::Relaxed);
    }

    pub fn read<T>(&self, i: u32) -> Option<T>
    where
        T: bytemuck::Pod,
    {
        let stride = self.stride as usize;
        let offset = (i as usize) * stride;
        let size = std::mem::size_of::<T>();

        let slice = self.data.as_slice();
        if offset + size <= slice.len() {
            let bytes: &[u8] = &slice[offset..offset + size];
            return Some(bytemuck::pod_read_unaligned(bytes));
        }
        None
    }

    /// Iterates every element of the attribute as `T`.
    pub fn iter<T: bytemuck::Pod>(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.count).filter_map(move |i| self.read::<T>(i))
    }
}

/// Axis-aligned bounds of the rest-pose positions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

/// A contiguous index range drawn with one entry of a mesh's material list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryGroup {
    pub start: u32,
    pub count: u32,
    pub material_index: usize,
}

#[derive(Debug)]
pub struct Geometry {
    pub uuid: Uuid,

    attributes: FxHashMap<String, Attribute>,
    indices: Vec<u32>,
    groups: Vec<GeometryGroup>,

    pub bounding_box: Option<BoundingBox>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            attributes: FxHashMap::default(),
            indices: Vec::new(),
            groups: Vec::new(),
            bounding_box: None,
        }
    }

    pub fn set_attribute(&mut self, name: &str, attr: Attribute) {
        if name == "position" {
            self.bounding_box = None;
        }
        self.attributes.insert(name.to_string(), attr);
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Number of vertices, taken from the `position` attribute.
    pub fn vertex_count(&self) -> u32 {
        self.attributes.get("position").map_or(0, |a| a.count)
    }

    /// Reads every vertex position into a `Vec<Vec3>`.
    pub fn positions(&self) -> Vec<Vec3> {
        self.attributes
            .get("position")
            .map(|attr| attr.iter::<[f32; 3]>().map(Vec3::from_array).collect())
            .unwrap_or_default()
    }

    pub fn set_indices(&mut self, indices: &[u32]) {
        self.indices = indices.to_vec();
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn add_group(&mut self, start: u32, count: u32, material_index: usize) {
        self.groups.push(GeometryGroup {
            start,
            count,
            material_index,
        });
    }

    pub fn groups(&self) -> &[GeometryGroup] {
        &self.groups
    }

    /// Translates every vertex position by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        let moved: Vec<[f32; 3]> = self
            .positions()
            .into_iter()
            .map(|p| (p + offset).to_array())
            .collect();

        if let Some(attr) = self.attributes.get_mut("position") {
            attr.update_data(&moved);
            self.bounding_box = None;
        }
    }

    /// Computes and caches the bounding box of the rest-pose positions.
    pub fn compute_bounding_volume(&mut self) -> Option<BoundingBox> {
        let positions = self.positions();
        if positions.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in positions {
            min = min.min(p);
            max = max.max(p);
        }

        let bbox = BoundingBox { min, max };
        self.bounding_box = Some(bbox);
        Some(bbox)
    }
}

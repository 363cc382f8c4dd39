//! Segment weights
//!
//! Maps every vertex of the flat page to the two bones around it. A page
//! of width `W_page` is cut into `S` segments of width `W`; a vertex at `x`
//! belongs to segment `floor(x / W)` and blends linearly into the next bone
//! as it moves across the segment.

use glam::Vec3;
use wgpu::VertexFormat;

use crate::book::config::PageDimensions;
use crate::resources::primitives::{BoxSegments, create_box};
use crate::resources::{Attribute, Geometry};
use crate::scene::{SKIN_INDEX_ATTRIBUTE, SKIN_WEIGHT_ATTRIBUTE};

/// The bones influencing one vertex.
///
/// Invariant: `primary < secondary == primary + 1 <= segments`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentWeight {
    pub primary: u16,
    pub secondary: u16,
    /// Influence of the secondary bone; the primary gets `1 - weight`.
    pub weight: f32,
}

impl SegmentWeight {
    /// Four-slot skin index tuple; the last two slots are unused.
    #[inline]
    #[must_use]
    pub fn skin_index(&self) -> [u16; 4] {
        [self.primary, self.secondary, 0, 0]
    }

    /// Four-slot skin weight tuple matching [`Self::skin_index`].
    #[inline]
    #[must_use]
    pub fn skin_weight(&self) -> [f32; 4] {
        [1.0 - self.weight, self.weight, 0.0, 0.0]
    }
}

/// Weight of a vertex at `x` (page-local, hinge at 0).
///
/// The far edge `x == width` maps to the last segment with full weight on
/// the last bone so the secondary index stays within the chain.
#[must_use]
pub fn segment_weight(x: f32, segment_width: f32, segments: usize) -> SegmentWeight {
    let last = segments.max(1) - 1;
    let primary = ((x / segment_width).floor().max(0.0) as usize).min(last);
    let weight = ((x - primary as f32 * segment_width) / segment_width).clamp(0.0, 1.0);

    SegmentWeight {
        primary: primary as u16,
        secondary: primary as u16 + 1,
        weight,
    }
}

#[must_use]
pub fn compute_skin_weights(
    positions: &[Vec3],
    segment_width: f32,
    segments: usize,
) -> Vec<SegmentWeight> {
    positions
        .iter()
        .map(|p| segment_weight(p.x, segment_width, segments))
        .collect()
}

/// Writes the `skinIndex` / `skinWeight` attributes for every vertex.
pub fn apply_skin_weights(geometry: &mut Geometry, segment_width: f32, segments: usize) {
    let weights = compute_skin_weights(&geometry.positions(), segment_width, segments);

    let indices: Vec<[u16; 4]> = weights.iter().map(SegmentWeight::skin_index).collect();
    let blend: Vec<[f32; 4]> = weights.iter().map(SegmentWeight::skin_weight).collect();

    geometry.set_attribute(
        SKIN_INDEX_ATTRIBUTE,
        Attribute::new_planar(&indices, VertexFormat::Uint16x4),
    );
    geometry.set_attribute(
        SKIN_WEIGHT_ATTRIBUTE,
        Attribute::new_planar(&blend, VertexFormat::Float32x4),
    );
}

/// Builds the skinned page box shared by every page of a book.
///
/// The box is shifted so its hinge edge sits at `x = 0` and it extends to
/// `x = width`, matching the bone chain.
#[must_use]
pub fn create_page_geometry(dims: &PageDimensions) -> Geometry {
    let mut geometry = create_box(
        dims.width,
        dims.height,
        dims.depth,
        BoxSegments {
            width: dims.segments as u32,
            height: dims.height_segments,
            depth: 1,
        },
    );
    geometry.translate(Vec3::new(dims.width / 2.0, 0.0, 0.0));
    apply_skin_weights(&mut geometry, dims.segment_width(), dims.segments);
    geometry.compute_bounding_volume();

    log::debug!(
        "Page geometry built: {} vertices, {} segments",
        geometry.vertex_count(),
        dims.segments
    );

    geometry
}

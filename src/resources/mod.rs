//! Core resource definitions
//!
//! CPU-side data structures that do not depend on a GPU implementation:
//! - Geometry: vertex attributes, indices and material groups
//! - Material: standard PBR material description
//! - Texture: resolved image references and the resolver seam
//! - Primitives: procedural shapes

pub mod geometry;
pub mod material;
pub mod primitives;
pub mod texture;

pub use geometry::{Attribute, BoundingBox, Geometry, GeometryGroup};
pub use material::{MaterialFeatures, MeshStandardMaterial, color_from_hex};
pub use texture::{ColorSpace, Texture, TexturePaths, TextureResolver};

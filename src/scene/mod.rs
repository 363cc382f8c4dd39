//! Scene objects
//!
//! - Transform: TRS component with cached local matrix
//! - Skeleton: bone chain stored as an index arena
//! - SkinnedMesh: shared geometry bound to an owned skeleton and materials

pub mod skeleton;
pub mod skinned_mesh;
pub mod transform;

pub use skeleton::{Bone, Skeleton};
pub use skinned_mesh::{SKIN_INDEX_ATTRIBUTE, SKIN_WEIGHT_ATTRIBUTE, SkinnedMesh};
pub use transform::Transform;

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod book;
pub mod errors;
pub mod resources;
pub mod scene;
pub mod utils;

pub use animation::{DampState, damp};
pub use book::{Book, BookConfig, Page, PagePose, PageProgression, PageSpec, PointerEvent};
pub use errors::{FlipbookError, Result};
pub use resources::{Geometry, MeshStandardMaterial, Texture, TexturePaths, TextureResolver};
pub use scene::{Bone, Skeleton, SkinnedMesh, Transform};
pub use utils::Timer;

//! The book
//!
//! - [`weights`]: page geometry and per-vertex segment weights
//! - [`page`]: page content, materials and skinned mesh assembly
//! - [`animator`]: per-frame page turn targets and damping
//! - [`progression`]: displayed page chasing the requested page
//! - [`interaction`]: pointer contract and hover state
//! - [`config`]: tunables
//!
//! # Example
//!
//! ```rust,ignore
//! use flipbook::book::{Book, BookConfig, PageSpec};
//! use flipbook::resources::TexturePaths;
//!
//! let pages = PageSpec::from_pictures(&["DSC00680", "DSC00933"], "book-cover", "book-back");
//! let mut book = Book::new(BookConfig::default(), pages)?;
//!
//! let mut textures = TexturePaths::new("textures", "jpg");
//! for id in book.texture_manifest() {
//!     textures.mark_loaded(&id);
//! }
//! book.assemble_ready_pages(&textures);
//! book.request_page(2)?;
//! ```

pub mod animator;
#[allow(clippy::module_inception)]
pub mod book;
pub mod config;
pub mod interaction;
pub mod page;
pub mod progression;
pub mod weights;

pub use animator::{PagePose, animate_page, bone_target, bone_targets, inside_curve_intensity, target_rotation};
pub use book::Book;
pub use config::{BookConfig, PageDimensions, ProgressionSettings, TextureSettings, TurnSettings};
pub use interaction::{Cursor, InteractionState, PointerEvent, click_target};
pub use page::{
    BACK_MATERIAL, FRONT_MATERIAL, PAGE_MATERIAL_COUNT, Page, PagePlacement, PageSpec, PageTextures,
    page_materials,
};
pub use progression::{PageProgression, PendingStep};
pub use weights::{SegmentWeight, apply_skin_weights, compute_skin_weights, create_page_geometry, segment_weight};

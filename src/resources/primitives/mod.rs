pub mod box_shape;

pub use box_shape::{BoxSegments, create_box};

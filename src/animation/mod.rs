//! Animation primitives
//!
//! Frame-time-aware damping used to ease bone rotations toward their
//! per-frame targets.
//!
//! Page angles are damped as plain scalars rather than along the shortest
//! arc: they stay within a bounded range, and a page swinging from one side
//! of the spine to the other must sweep through the upright position.

pub mod damp;

pub use damp::{DAMP_EPSILON, DampState, damp};

//! Image → stitch grid transform.
//!
//! Pure and synchronous: every call recomputes its result from the
//! configuration record it is given.

pub mod colormap;
pub mod geometry;
pub mod pattern;
pub mod quantize;

pub use colormap::build_colormap;
pub use geometry::{Geometry, resolve_geometry};
pub use pattern::build_pattern;

//! Shared types for stitchgrid: grids, colors, palettes, configuration, errors.

pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod palette;

pub use error::{ParseColorError, PatternError};

//! Image sources for stitchgrid: decoding to luminance and resampling.

pub mod image;
pub mod resize;

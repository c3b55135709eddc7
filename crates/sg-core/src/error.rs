//! Erreurs typées du pipeline image → grille de mailles.
//!
//! Every variant is a caller configuration mistake: they are raised where
//! they are detected and never retried.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised by the geometry, pattern and colormap builders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Padding leaves no room for image content.
    #[error(
        "invalid layout: {rows}x{cols} grid leaves a {inner_rows}x{inner_cols} inner area after padding"
    )]
    InvalidLayout {
        rows: usize,
        cols: usize,
        inner_rows: i64,
        inner_cols: i64,
    },

    /// Source brightness grid has zero rows or columns.
    #[error("source image is empty")]
    EmptyImage,

    /// The named palette has fewer colors than requested tones.
    #[error("palette {palette} has {available} colors, {requested} tones requested")]
    PaletteExhausted {
        palette: String,
        available: usize,
        requested: usize,
    },

    /// Grid larger than the chart can be drawn, usually after aspect linkage.
    #[error("grid {cols}x{rows} exceeds {max} stitches per side")]
    GridTooLarge { rows: usize, cols: usize, max: usize },

    /// Chart cell size outside the drawable range.
    #[error("cell size {size} px is outside 1..={max}")]
    InvalidCellSize { size: u32, max: u32 },

    /// Tone count outside `2..=10`.
    #[error("tone count {0} is outside 2..=10")]
    InvalidToneCount(u8),

    /// The resampler rejected the requested size.
    #[error("resample failed: {0}")]
    Resample(String),
}

/// Error returned when a color string is neither hex nor a known name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string must have 3 or 6 digits after the optional `#`.
    #[error("invalid hex color length (expected 3 or 6 digits)")]
    InvalidLength,
    #[error("invalid hex digit: {0}")]
    InvalidHex(#[from] ParseIntError),
    #[error("unknown color name: {0}")]
    UnknownName(String),
}

//! Erreurs de rendu du diagramme.

use thiserror::Error;

/// Errors raised while laying out, rasterizing or converting a chart.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The chart would not fit the pixel limits at this cell size.
    #[error(
        "chart for {cols}x{rows} stitches at {cell} px per stitch exceeds {max_side} px per side or {max_pixels} pixels"
    )]
    ChartTooLarge {
        rows: usize,
        cols: usize,
        cell: u32,
        max_side: u32,
        max_pixels: u64,
    },

    /// Some tone of the grid has no color.
    #[error("colormap has {colors} colors for a {tones}-tone grid")]
    ColormapTooShort { colors: usize, tones: u8 },

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAllocation { width: u32, height: u32 },

    #[error("PDF conversion failed: {0}")]
    Pdf(String),
}

//! Rastérisation (PNG) et conversion PDF du diagramme SVG.

use std::sync::Arc;

use image::{DynamicImage, RgbImage, RgbaImage};
use resvg::usvg;
use sg_core::config::DisplayOptions;
use sg_core::grid::{Colormap, ToneGrid};
use tiny_skia::{Color, Pixmap, Transform};

use crate::error::RenderError;
use crate::svg::render_svg;

/// Turns the SVG chart into pixels or a PDF page.
///
/// Holds the font database used to shape the title, row numbers and legend.
pub struct ChartRenderer {
    fontdb: Arc<fontdb::Database>,
}

impl ChartRenderer {
    /// Renderer using the system fonts only.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fonts(Vec::new())
    }

    /// Renderer with extra font files loaded before the system fonts.
    #[must_use]
    pub fn with_fonts(fonts: Vec<Vec<u8>>) -> Self {
        let mut fontdb = fontdb::Database::new();
        for data in fonts {
            fontdb.load_font_data(data);
        }
        fontdb.load_system_fonts();

        if fontdb.len() == 0 {
            log::warn!("Aucune police trouvée: le texte du diagramme sera absent du PNG et du PDF");
        } else {
            log::debug!("Loaded {} font faces for chart text", fontdb.len());
        }
        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Number of font faces available for chart text.
    #[must_use]
    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    fn parse(&self, svg: &str) -> Result<usvg::Tree, RenderError> {
        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        usvg::Tree::from_str(svg, &options).map_err(|e| RenderError::SvgParse(e.to_string()))
    }

    /// Render the chart to an RGB image, one SVG pixel per image pixel.
    ///
    /// # Errors
    /// Returns the layout or colormap error from [`render_svg`], or an
    /// error if the SVG cannot be parsed or the pixmap cannot be allocated.
    pub fn raster(
        &self,
        grid: &ToneGrid,
        colormap: &Colormap,
        display: &DisplayOptions,
        title: &str,
    ) -> Result<RgbImage, RenderError> {
        let svg = render_svg(grid, colormap, display, title)?;
        let tree = self.parse(&svg)?;

        let size = tree.size().to_int_size();
        let (width, height) = (size.width(), size.height());
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation { width, height })?;
        pixmap.fill(Color::WHITE);
        resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

        // Opaque background: premultiplied RGBA equals straight RGBA.
        let rgba = RgbaImage::from_raw(width, height, pixmap.take())
            .ok_or(RenderError::PixmapAllocation { width, height })?;
        log::debug!(
            "Rasterized {}x{} chart to {width}x{height} px",
            grid.cols,
            grid.rows
        );
        Ok(DynamicImage::ImageRgba8(rgba).into_rgb8())
    }

    /// Render the chart as a single-page PDF document.
    ///
    /// # Errors
    /// Returns the layout or colormap error from [`render_svg`], or an
    /// error if the SVG cannot be parsed or converted.
    pub fn pdf(
        &self,
        grid: &ToneGrid,
        colormap: &Colormap,
        display: &DisplayOptions,
        title: &str,
    ) -> Result<Vec<u8>, RenderError> {
        let svg = render_svg(grid, colormap, display, title)?;
        let tree = self.parse(&svg)?;
        let bytes = svg2pdf::to_pdf(
            &tree,
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions::default(),
        )
        .map_err(|e| RenderError::Pdf(format!("{e:?}")))?;
        log::debug!("Converted {}x{} chart to PDF ({} bytes)", grid.cols, grid.rows, bytes.len());
        Ok(bytes)
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

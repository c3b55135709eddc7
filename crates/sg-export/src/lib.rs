//! Export du diagramme vers le disque (PNG, SVG ou PDF).

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, bail};
use image::ImageFormat;
use sg_core::config::DisplayOptions;
use sg_core::grid::{Colormap, ToneGrid};
use sg_render::ChartRenderer;
use sg_render::svg::render_svg;

/// Output document type, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Svg,
    Pdf,
}

impl ExportFormat {
    /// # Errors
    /// Returns an error for a missing or unsupported extension.
    ///
    /// # Example
    /// ```
    /// use sg_export::ExportFormat;
    /// use std::path::Path;
    /// assert_eq!(ExportFormat::from_path(Path::new("chart.PNG")).unwrap(), ExportFormat::Png);
    /// assert_eq!(ExportFormat::from_path(Path::new("chart.pdf")).unwrap(), ExportFormat::Pdf);
    /// assert!(ExportFormat::from_path(Path::new("chart.jpg")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("svg") => Ok(Self::Svg),
            Some("pdf") => Ok(Self::Pdf),
            Some(other) => bail!("Format d'export non supporté: .{other} (png, svg ou pdf)"),
            None => bail!("Extension manquante pour {} (png, svg ou pdf)", path.display()),
        }
    }
}

/// Render the chart fully in memory, then write it to `path`.
///
/// PNG and PDF carry the same title, labels and legend as the SVG.
///
/// # Errors
/// Returns an error if the format is unsupported, rendering or encoding
/// fails, or the file cannot be written.
pub fn export_chart(
    path: &Path,
    grid: &ToneGrid,
    colormap: &Colormap,
    display: &DisplayOptions,
    title: &str,
) -> Result<()> {
    let format = ExportFormat::from_path(path)?;
    let bytes = match format {
        ExportFormat::Png => {
            let img = ChartRenderer::new()
                .raster(grid, colormap, display, title)
                .context("Rendu PNG impossible")?;
            let mut buf = Vec::new();
            img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
                .context("Encodage PNG impossible")?;
            buf
        }
        ExportFormat::Svg => render_svg(grid, colormap, display, title)
            .context("Rendu SVG impossible")?
            .into_bytes(),
        ExportFormat::Pdf => ChartRenderer::new()
            .pdf(grid, colormap, display, title)
            .context("Rendu PDF impossible")?,
    };
    std::fs::write(path, &bytes)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!(
        "Exported {:?} chart to {} ({} bytes)",
        format,
        path.display(),
        bytes.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_core::color::Rgb;

    fn sample() -> (ToneGrid, Colormap) {
        let mut grid = ToneGrid::new(6, 5, 2);
        grid.set(2, 2, 1);
        (grid, Colormap::new(vec![Rgb::BLACK, Rgb::WHITE]))
    }

    #[test]
    fn png_export_decodes_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let (grid, colormap) = sample();
        let display = DisplayOptions::default();
        export_chart(&path, &grid, &colormap, &display, "t").unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        let expected = ChartRenderer::new()
            .raster(&grid, &colormap, &display, "t")
            .unwrap();
        assert_eq!(decoded.dimensions(), expected.dimensions());
        assert_eq!(decoded.as_raw(), expected.as_raw());
    }

    #[test]
    fn svg_export_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let (grid, colormap) = sample();
        export_chart(&path, &grid, &colormap, &DisplayOptions::default(), "Pattern").unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<svg"));
        assert!(text.contains("Pattern"));
    }

    #[test]
    fn pdf_export_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.pdf");
        let (grid, colormap) = sample();
        export_chart(&path, &grid, &colormap, &DisplayOptions::default(), "Pattern").unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn render_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let (grid, colormap) = sample();
        let display = DisplayOptions {
            cell_size: 3_000_000_000,
            ..DisplayOptions::default()
        };
        assert!(export_chart(&path, &grid, &colormap, &display, "").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn unsupported_format_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.jpg");
        let (grid, colormap) = sample();
        assert!(export_chart(&path, &grid, &colormap, &DisplayOptions::default(), "").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert!(ExportFormat::from_path(Path::new("chart")).is_err());
        assert_eq!(
            ExportFormat::from_path(Path::new("a/b.Svg")).unwrap(),
            ExportFormat::Svg
        );
    }
}

/// Chargement d'images sources en grille de luminance.
use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use sg_core::grid::BrightnessGrid;

/// Image statique décodée, prête pour le pipeline.
///
/// # Example
/// ```no_run
/// use sg_source::image::ImageSource;
/// use std::path::Path;
/// let source = ImageSource::open(Path::new("photo.png")).unwrap();
/// println!("{}x{}", source.grid().width, source.grid().height);
/// ```
pub struct ImageSource {
    grid: BrightnessGrid,
}

impl ImageSource {
    /// Decode an image file and convert it to luminance.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or decoded.
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("Impossible de charger {}", path.display()))?;
        let grid = to_brightness(&img);
        log::info!(
            "Loaded {} ({}x{} px)",
            path.display(),
            grid.width,
            grid.height
        );
        Ok(Self { grid })
    }

    #[must_use]
    pub fn from_image(img: &DynamicImage) -> Self {
        Self {
            grid: to_brightness(img),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &BrightnessGrid {
        &self.grid
    }

    #[must_use]
    pub fn into_grid(self) -> BrightnessGrid {
        self.grid
    }

    /// Source width / height, the ratio used for keep-aspect linkage.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.grid.aspect()
    }
}

/// Convertit n'importe quelle image en luminance 8 bits (Rec. 601, comme `image`).
#[must_use]
pub fn to_brightness(img: &DynamicImage) -> BrightnessGrid {
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    BrightnessGrid::from_fn(width, height, |x, y| luma.get_pixel(x, y).0[0])
}

/// Convenance pour les tests.
///
/// # Errors
/// Returns an error if the image cannot be loaded.
pub fn load_brightness(path: &Path) -> Result<BrightnessGrid> {
    ImageSource::open(path).map(ImageSource::into_grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn rgb_is_converted_to_luma() {
        let mut rgb = RgbImage::new(2, 1);
        rgb.put_pixel(0, 0, Rgb([255, 255, 255]));
        rgb.put_pixel(1, 0, Rgb([0, 0, 0]));
        let grid = to_brightness(&DynamicImage::ImageRgb8(rgb));
        assert_eq!((grid.width, grid.height), (2, 1));
        assert_eq!(grid.get(0, 0), 255);
        assert_eq!(grid.get(1, 0), 0);
    }

    #[test]
    fn png_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.png");
        let img = GrayImage::from_fn(8, 4, |x, _| Luma([(x * 32) as u8]));
        img.save(&path).unwrap();

        let source = ImageSource::open(&path).unwrap();
        assert_eq!(source.aspect(), 2.0);
        assert_eq!(source.grid().get(3, 2), 96);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_brightness(Path::new("/nonexistent/nope.png")).unwrap_err();
        assert!(err.to_string().contains("nope.png"));
    }
}

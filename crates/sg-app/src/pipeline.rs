use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sg_core::config::PatternConfig;
use sg_core::grid::{Colormap, ToneGrid};
use sg_pattern::colormap::build_colormap;
use sg_pattern::pattern::build_pattern_with_geometry;
use sg_source::image::ImageSource;

use crate::cli::Cli;

/// Result of one build: the complete renderable chart state.
#[derive(Debug, Clone)]
pub struct Chart {
    pub grid: ToneGrid,
    pub colormap: Colormap,
}

/// Resolve the effective configuration: file (if any), then CLI flags.
///
/// # Errors
/// Returns an error if the config file is invalid or the merged values are.
pub fn load_config(cli: &Cli) -> Result<PatternConfig> {
    let mut config = match &cli.config {
        Some(path) => PatternConfig::load(path)?,
        None => PatternConfig::default(),
    };
    cli.apply_to(&mut config);
    config
        .validate()
        .context("Paramètres invalides après application des options")?;
    config.normalize();
    Ok(config)
}

/// Build the tone grid and colormap for `source`.
///
/// Nothing is returned on failure; callers keep whatever chart they had.
///
/// # Errors
/// Returns the pattern or colormap error with context.
///
/// # Example
/// ```
/// use image::{DynamicImage, GrayImage, Luma};
/// use sg_core::config::PatternConfig;
/// use sg_source::image::ImageSource;
/// use sg_app::pipeline::build_chart;
///
/// let img = GrayImage::from_fn(20, 10, |x, _| Luma([(x * 12) as u8]));
/// let source = ImageSource::from_image(&DynamicImage::ImageLuma8(img));
/// let mut config = PatternConfig::default();
/// config.layout.rows = 5;
/// let chart = build_chart(&source, &config).unwrap();
/// assert_eq!((chart.grid.rows, chart.grid.cols), (5, 10));
/// ```
pub fn build_chart(source: &ImageSource, config: &PatternConfig) -> Result<Chart> {
    let (grid, geo) = build_pattern_with_geometry(source.grid(), &config.layout, &config.tones)
        .context("Construction de la grille impossible")?;
    let colormap = build_colormap(config.tones.tone_count, &config.color)
        .context("Construction de la palette impossible")?;

    log::info!(
        "Pattern {} stitches x {} rows ({}x{} image area), {} tones",
        geo.cols,
        geo.rows,
        geo.inner_cols,
        geo.inner_rows,
        config.tones.tone_count
    );
    for (tone, (count, color)) in grid.histogram().iter().zip(colormap.colors()).enumerate() {
        log::debug!("  tone {tone} ({color}): {count} stitches");
    }
    Ok(Chart { grid, colormap })
}

/// `photo.jpg` → `photo_pattern.png` in the current directory.
#[must_use]
pub fn default_output(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map_or_else(|| "stitchgrid".into(), |s| s.to_string_lossy());
    PathBuf::from(format!("{stem}_pattern.png"))
}

/// Run the whole CLI pipeline.
///
/// # Errors
/// Returns an error if configuration, loading, building, or export fails.
pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    if cli.dump_config {
        print!("{}", config.to_toml()?);
    }

    let source = ImageSource::open(&cli.image)?;
    let chart = build_chart(&source, &config)?;

    if cli.print {
        print!("{}", chart.grid.to_text());
    }

    let output = match (&cli.output, cli.print) {
        (Some(path), _) => Some(path.clone()),
        (None, false) => Some(default_output(&cli.image)),
        (None, true) => None,
    };
    if let Some(path) = output {
        let title = sg_render::chart_title(&chart.grid, config.color.use_color);
        sg_export::export_chart(&path, &chart.grid, &chart.colormap, &config.display, &title)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use image::{GrayImage, Luma};
    use std::io::Write;

    fn write_gradient(dir: &Path) -> PathBuf {
        let path = dir.join("gradient.png");
        GrayImage::from_fn(64, 32, |x, _| Luma([(x * 4) as u8]))
            .save(&path)
            .unwrap();
        path
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stitchgrid").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn end_to_end_png_export() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_gradient(dir.path());
        let out = dir.path().join("out.png");
        let args = cli(&[
            image.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--cols",
            "32",
            "--tones",
            "4",
        ]);
        run(&args).unwrap();
        let written = image::open(&out).unwrap();
        assert!(written.width() > 32 * 12);
    }

    #[test]
    fn gradient_spans_all_tones_left_to_right() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_gradient(dir.path());
        let args = cli(&[image.to_str().unwrap(), "--rows", "4", "--cols", "16", "--print"]);
        let config = load_config(&args).unwrap();
        let source = ImageSource::open(&image).unwrap();
        let chart = build_chart(&source, &config).unwrap();

        let first_row: Vec<u8> = chart.grid.rows_iter().next().unwrap().to_vec();
        assert_eq!(first_row.len(), 16);
        assert!(first_row.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(first_row[0], 0);
        assert_eq!(first_row[15], 3);
    }

    #[test]
    fn config_file_then_cli_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("pattern.toml");
        let mut file = std::fs::File::create(&cfg_path).unwrap();
        writeln!(file, "[tones]\ntone_count = 6\ninvert = true\n[display]\ncell_size = 20").unwrap();

        let args = cli(&["x.png", "-c", cfg_path.to_str().unwrap(), "--tones", "3"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.tones.tone_count, 3);
        assert!(config.tones.invert);
        assert_eq!(config.display.cell_size, 20);
    }

    #[test]
    fn invalid_tone_count_fails_before_loading_image() {
        let args = cli(&["does-not-exist.png", "--tones", "12"]);
        let err = run(&args).unwrap_err();
        assert!(format!("{err:#}").contains("tone count 12"));
    }

    #[test]
    fn failed_build_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_gradient(dir.path());
        let out = dir.path().join("out.png");
        let args = cli(&[
            image.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--rows",
            "10",
            "--cols",
            "10",
            "--pad",
            "0,0,6,6",
        ]);
        let err = run(&args).unwrap_err();
        assert!(format!("{err:#}").contains("invalid layout"));
        assert!(!out.exists());
    }

    #[test]
    fn exhausted_palette_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_gradient(dir.path());
        let args = cli(&[image.to_str().unwrap(), "--color", "--palette", "Accent", "--tones", "10"]);
        let config = load_config(&args).unwrap();
        let source = ImageSource::open(&image).unwrap();
        let err = build_chart(&source, &config).unwrap_err();
        assert!(format!("{err:#}").contains("Accent has 8 colors"));
    }

    #[test]
    fn oversized_cell_size_fails_before_loading_image() {
        let args = cli(&["does-not-exist.png", "--cell-size", "3000000000"]);
        let err = run(&args).unwrap_err();
        assert!(format!("{err:#}").contains("cell size 3000000000"));
    }

    #[test]
    fn panorama_aspect_is_rejected_not_allocated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.png");
        GrayImage::from_fn(4000, 1, |x, _| Luma([(x % 256) as u8]))
            .save(&path)
            .unwrap();
        let out = dir.path().join("strip_chart.png");
        let args = cli(&[path.to_str().unwrap(), "-o", out.to_str().unwrap()]);
        let err = run(&args).unwrap_err();
        assert!(format!("{err:#}").contains("exceeds"));
        assert!(!out.exists());
    }

    #[test]
    fn pdf_output_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_gradient(dir.path());
        let out = dir.path().join("chart.pdf");
        let args = cli(&[image.to_str().unwrap(), "-o", out.to_str().unwrap(), "--cols", "20"]);
        run(&args).unwrap();
        assert!(std::fs::read(&out).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn default_output_uses_image_stem() {
        assert_eq!(
            default_output(Path::new("/photos/cat.jpg")),
            PathBuf::from("cat_pattern.png")
        );
    }
}

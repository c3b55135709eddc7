//! Vector chart output.
//!
//! The SVG document is the one chart description: PNG and PDF output are
//! produced from it by [`crate::ChartRenderer`].

use std::fmt::Write as _;

use sg_core::color::Rgb;
use sg_core::config::DisplayOptions;
use sg_core::grid::{Colormap, ToneGrid};

use crate::error::RenderError;
use crate::layout::{ChartLayout, LEGEND_HEADING};

pub const BACKGROUND: Rgb = Rgb::WHITE;
pub const GRID_LINE: Rgb = Rgb::new(96, 96, 96);
pub const GUIDE_LINE: Rgb = Rgb::BLACK;
pub const SWATCH_BORDER: Rgb = Rgb::new(40, 40, 40);
pub const LABEL: Rgb = Rgb::BLACK;

/// Font stack for chart text; the rasterizer picks the first installed face.
pub const FONT_FAMILY: &str = "DejaVu Sans, Liberation Sans, Arial, Helvetica, sans-serif";

/// Label color readable on `background`.
#[must_use]
pub fn contrast_on(background: Rgb) -> Rgb {
    if background.luma() > 128.0 {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the chart as a standalone SVG document.
///
/// The title sits above the grid, row numbers on its left and the tone
/// legend on its right. Same-tone runs within a row are merged into a
/// single rectangle.
///
/// # Errors
/// Returns [`RenderError::ColormapTooShort`] if a tone has no color and
/// [`RenderError::ChartTooLarge`] if the layout exceeds the pixel limits.
///
/// # Example
/// ```
/// use sg_core::color::Rgb;
/// use sg_core::config::DisplayOptions;
/// use sg_core::grid::{Colormap, ToneGrid};
/// use sg_render::svg::render_svg;
///
/// let grid = ToneGrid::new(2, 2, 2);
/// let colormap = Colormap::new(vec![Rgb::BLACK, Rgb::WHITE]);
/// let svg = render_svg(&grid, &colormap, &DisplayOptions::default(), "demo").unwrap();
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains(">demo</text>"));
/// ```
pub fn render_svg(
    grid: &ToneGrid,
    colormap: &Colormap,
    display: &DisplayOptions,
    title: &str,
) -> Result<String, RenderError> {
    if !colormap.covers(grid) {
        return Err(RenderError::ColormapTooShort {
            colors: colormap.len(),
            tones: grid.tone_count,
        });
    }
    let layout = ChartLayout::new(grid, display, title)?;
    let colors = colormap.colors();
    let font = layout.font_size;
    let (width, height) = (layout.width, layout.height);

    let mut out = String::with_capacity(grid.rows * grid.cols * 48 + 4096);
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{FONT_FAMILY}">"#
    );
    let _ = writeln!(
        out,
        r#"<rect width="{width}" height="{height}" fill="{BACKGROUND}"/>"#
    );
    if layout.title_height > 0 {
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{}" font-size="{font}" dominant-baseline="middle" fill="{LABEL}">{}</text>"#,
            layout.margin,
            layout.margin + layout.title_height / 2,
            escape(title)
        );
    }

    write_cells(&mut out, &layout, grid, colors);
    write_lines(&mut out, &layout);

    if layout.row_numbers {
        for row in 0..layout.rows {
            let (x, y) = layout.row_label_anchor(row);
            let _ = writeln!(
                out,
                r#"<text x="{x}" y="{y:.1}" font-size="{font}" text-anchor="end" dominant-baseline="middle" fill="{LABEL}">{}</text>"#,
                layout.row_label(row)
            );
        }
    }

    if let Some(legend) = layout.legend {
        let _ = writeln!(
            out,
            r#"<text x="{}" y="{}" font-size="{font}" dominant-baseline="middle" fill="{LABEL}">{LEGEND_HEADING}</text>"#,
            legend.x, legend.heading_y
        );
        for (tone, &color) in (0..legend.tones).zip(colors) {
            let (sx, sy) = legend.swatch_origin(tone);
            let _ = writeln!(
                out,
                r#"<rect x="{sx}" y="{sy}" width="{s}" height="{s}" fill="{color}" stroke="{SWATCH_BORDER}"/>"#,
                s = legend.swatch
            );
            let _ = writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" font-size="{font}" text-anchor="middle" dominant-baseline="middle" fill="{}">{tone}</text>"#,
                sx as f32 + legend.swatch as f32 / 2.0,
                sy as f32 + legend.swatch as f32 / 2.0,
                contrast_on(color)
            );
        }
    }

    out.push_str("</svg>\n");
    Ok(out)
}

fn write_cells(out: &mut String, layout: &ChartLayout, grid: &ToneGrid, colors: &[Rgb]) {
    let cell = layout.cell;
    for (r, row) in grid.rows_iter().enumerate() {
        let mut start = 0;
        while start < row.len() {
            let tone = row[start];
            let run = row[start..].iter().take_while(|&&t| t == tone).count();
            let (x, y) = layout.cell_origin(r, start);
            let _ = writeln!(
                out,
                r#"<rect x="{x}" y="{y}" width="{}" height="{cell}" fill="{}"/>"#,
                run as u32 * cell,
                colors[usize::from(tone)]
            );
            start += run;
        }
    }
}

fn write_lines(out: &mut String, layout: &ChartLayout) {
    let x0 = layout.grid_x as f32;
    let y0 = layout.grid_y as f32;
    let x1 = x0 + layout.grid_width() as f32;
    let y1 = y0 + layout.grid_height() as f32;
    let cell = layout.cell as f32;

    let mut thin = String::new();
    let mut bold = String::new();
    for k in 0..=layout.cols {
        let x = x0 + k as f32 * cell + 0.5;
        let path = if layout.is_guide_boundary(k) { &mut bold } else { &mut thin };
        let _ = write!(path, "M{x:.1} {y0:.1}V{:.1}", y1 + 1.0);
    }
    for k in 0..=layout.rows {
        let y = y0 + k as f32 * cell + 0.5;
        let path = if layout.is_guide_boundary(k) { &mut bold } else { &mut thin };
        let _ = write!(path, "M{x0:.1} {y:.1}H{:.1}", x1 + 1.0);
    }
    if !thin.is_empty() {
        let _ = writeln!(
            out,
            r#"<path d="{thin}" stroke="{GRID_LINE}" stroke-width="1" fill="none"/>"#
        );
    }
    if !bold.is_empty() {
        let _ = writeln!(
            out,
            r#"<path d="{bold}" stroke="{GUIDE_LINE}" stroke-width="{}" fill="none"/>"#,
            layout.guide_width
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ToneGrid, Colormap) {
        let mut grid = ToneGrid::new(3, 4, 3);
        grid.set(0, 3, 2);
        grid.set(2, 0, 1);
        let colormap = Colormap::new(vec![Rgb::BLACK, Rgb::new(255, 0, 0), Rgb::WHITE]);
        (grid, colormap)
    }

    #[test]
    fn same_tone_runs_are_merged() {
        let (grid, colormap) = sample();
        let display = DisplayOptions {
            show_legend: false,
            ..DisplayOptions::default()
        };
        let svg = render_svg(&grid, &colormap, &display, "").unwrap();
        // background + row0: [0,0,0][2] + row1: [0,0,0,0] + row2: [1][0,0,0]
        assert_eq!(svg.matches("<rect").count(), 1 + 2 + 1 + 2);
        assert!(svg.contains(r##"fill="#ff0000""##));
    }

    #[test]
    fn title_row_numbers_and_legend_are_labelled() {
        let (grid, colormap) = sample();
        let svg = render_svg(&grid, &colormap, &DisplayOptions::default(), "Chart").unwrap();
        // title + 3 row labels + "Tone" heading + 3 legend labels
        assert_eq!(svg.matches("<text").count(), 8);
        assert!(svg.contains(">Chart</text>"));
        assert!(svg.contains(">Tone</text>"));
        assert!(svg.contains(">3</text>"));
        assert!(svg.contains(">1</text>"));
    }

    #[test]
    fn guides_use_bold_stroke() {
        let grid = ToneGrid::new(20, 20, 2);
        let colormap = Colormap::new(vec![Rgb::BLACK, Rgb::WHITE]);
        let svg = render_svg(&grid, &colormap, &DisplayOptions::default(), "").unwrap();
        assert!(svg.contains(r##"stroke="#000000" stroke-width="2""##));
    }

    #[test]
    fn title_is_escaped() {
        let (grid, colormap) = sample();
        let svg = render_svg(&grid, &colormap, &DisplayOptions::default(), "a<b & c").unwrap();
        assert!(svg.contains("a&lt;b &amp; c"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn missing_tone_color_is_an_error() {
        let (grid, _) = sample();
        let short = Colormap::new(vec![Rgb::BLACK, Rgb::WHITE]);
        assert!(matches!(
            render_svg(&grid, &short, &DisplayOptions::default(), ""),
            Err(RenderError::ColormapTooShort { colors: 2, tones: 3 })
        ));
    }

    #[test]
    fn label_color_contrasts_with_swatch() {
        assert_eq!(contrast_on(Rgb::BLACK), Rgb::WHITE);
        assert_eq!(contrast_on(Rgb::new(255, 255, 153)), Rgb::BLACK);
    }
}

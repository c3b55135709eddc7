//! Arguments de ligne de commande.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use sg_core::color::Rgb;
use sg_core::config::{Axis, PatternConfig};
use sg_core::palette::PaletteName;

/// Turn an image into a crochet stitch grid chart
#[derive(Parser, Debug, Clone)]
#[command(name = "stitchgrid", version, about, long_about = None)]
pub struct Cli {
    /// Source image (png, jpeg, bmp, gif, tiff)
    pub image: PathBuf,

    /// Chart output path; .png, .svg or .pdf [default: <image>_pattern.png]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Grid height in rows
    #[arg(long)]
    pub rows: Option<usize>,

    /// Grid width in stitches
    #[arg(long)]
    pub cols: Option<usize>,

    /// Do not derive one dimension from the image aspect ratio
    #[arg(long)]
    pub no_keep_aspect: bool,

    /// Dimension that drives the other when aspect is kept
    #[arg(long, value_enum)]
    pub drive: Option<DriveArg>,

    /// Number of tones (2-10)
    #[arg(long, short)]
    pub tones: Option<u8>,

    /// Brightness offset, -1.0 to 1.0
    #[arg(long, allow_hyphen_values = true)]
    pub brightness: Option<f32>,

    /// Invert brightness
    #[arg(long)]
    pub invert: bool,

    /// Manual padding in stitches: LEFT,RIGHT,TOP,BOTTOM
    #[arg(long, value_parser = parse_padding)]
    pub pad: Option<PadArg>,

    /// Uniform padding as a percentage of the smaller dimension (0-90)
    #[arg(long)]
    pub auto_pad: Option<u8>,

    /// Use palette colors instead of grayscale
    #[arg(long)]
    pub color: bool,

    /// Qualitative palette for --color
    #[arg(long)]
    pub palette: Option<PaletteName>,

    /// Per-tone color, e.g. 2=red or 0=#1f77b4 (repeatable)
    #[arg(long = "override", value_parser = parse_override)]
    pub overrides: Vec<(u8, Rgb)>,

    /// Bold guide line every N stitches
    #[arg(long)]
    pub guide_every: Option<usize>,

    /// Hide bold guide lines
    #[arg(long)]
    pub no_guides: bool,

    /// Hide row numbers
    #[arg(long)]
    pub no_row_numbers: bool,

    /// Hide the tone legend
    #[arg(long)]
    pub no_legend: bool,

    /// Pixels per stitch in the chart (1-200)
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Print the tone grid as text
    #[arg(long)]
    pub print: bool,

    /// Print the effective configuration as TOML
    #[arg(long)]
    pub dump_config: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DriveArg {
    Rows,
    Cols,
}

impl From<DriveArg> for Axis {
    fn from(value: DriveArg) -> Self {
        match value {
            DriveArg::Rows => Axis::Rows,
            DriveArg::Cols => Axis::Cols,
        }
    }
}

/// Four manual pads, in `--pad` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadArg {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

fn parse_padding(s: &str) -> Result<PadArg, String> {
    let parts: Vec<usize> = s
        .split(',')
        .map(|p| p.trim().parse::<usize>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        &[pad] => Ok(PadArg {
            left: pad,
            right: pad,
            top: pad,
            bottom: pad,
        }),
        &[left, right, top, bottom] => Ok(PadArg {
            left,
            right,
            top,
            bottom,
        }),
        _ => Err("expected N or LEFT,RIGHT,TOP,BOTTOM".into()),
    }
}

fn parse_override(s: &str) -> Result<(u8, Rgb), String> {
    let (tone, color) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TONE=COLOR, got {s:?}"))?;
    let tone = tone
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("tone index {tone:?}: {e}"))?;
    let color = color.parse::<Rgb>().map_err(|e| e.to_string())?;
    Ok((tone, color))
}

impl Cli {
    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply_to(&self, config: &mut PatternConfig) {
        let layout = &mut config.layout;
        if let Some(rows) = self.rows {
            layout.rows = rows;
            layout.drive = Axis::Rows;
        }
        if let Some(cols) = self.cols {
            layout.cols = cols;
            layout.drive = Axis::Cols;
        }
        if self.no_keep_aspect {
            layout.keep_aspect = false;
        } else if self.rows.is_some() && self.cols.is_some() && self.drive.is_none() {
            log::info!("Both --rows and --cols given: keeping the exact size, aspect link off");
            layout.keep_aspect = false;
        }
        if let Some(drive) = self.drive {
            layout.drive = drive.into();
        }
        if let Some(pad) = self.pad {
            layout.pad_left = pad.left;
            layout.pad_right = pad.right;
            layout.pad_top = pad.top;
            layout.pad_bottom = pad.bottom;
            layout.auto_pad_percent = None;
        }
        if let Some(pct) = self.auto_pad {
            layout.auto_pad_percent = Some(pct);
        }

        let tones = &mut config.tones;
        if let Some(t) = self.tones {
            tones.tone_count = t;
        }
        if let Some(offset) = self.brightness {
            tones.brightness_offset = offset;
        }
        if self.invert {
            tones.invert = true;
        }

        let color = &mut config.color;
        if self.color {
            color.use_color = true;
        }
        if let Some(palette) = self.palette {
            color.palette = palette;
        }
        for &(tone, rgb) in &self.overrides {
            color.set_override(tone, rgb);
        }

        let display = &mut config.display;
        if let Some(step) = self.guide_every {
            display.guide_every = step;
        }
        if self.no_guides {
            display.show_guides = false;
        }
        if self.no_row_numbers {
            display.show_row_numbers = false;
        }
        if self.no_legend {
            display.show_legend = false;
        }
        if let Some(px) = self.cell_size {
            display.cell_size = px;
        }
    }
}

//! Configuration record for one pattern build.
//!
//! Loaded from TOML, overridden by CLI flags, then passed by reference into
//! the pure transform. The transform never mutates it.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::PatternError;
use crate::palette::PaletteName;

/// Smallest and largest supported tone counts.
pub const MIN_TONES: u8 = 2;
pub const MAX_TONES: u8 = 10;

/// Largest auto padding percentage accepted.
pub const MAX_AUTO_PAD_PERCENT: u8 = 90;

/// Largest grid side, in stitches, before or after aspect linkage.
pub const MAX_GRID_SIDE: usize = 4000;

/// Largest chart cell, in pixels.
pub const MAX_CELL_SIZE: u32 = 200;

/// Grid dimension driving the other one when aspect is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Rows,
    Cols,
}

/// Output grid size and padding, in stitches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSpec {
    pub rows: usize,
    pub cols: usize,
    pub pad_left: usize,
    pub pad_right: usize,
    pub pad_top: usize,
    pub pad_bottom: usize,
    /// When set, replaces the four manual pads.
    pub auto_pad_percent: Option<u8>,
    pub keep_aspect: bool,
    /// Dimension the user set explicitly; the other follows the image.
    pub drive: Axis,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            rows: 139,
            cols: 100,
            pad_left: 0,
            pad_right: 0,
            pad_top: 0,
            pad_bottom: 0,
            auto_pad_percent: None,
            keep_aspect: true,
            drive: Axis::Rows,
        }
    }
}

impl LayoutSpec {
    /// Unpadded layout of `rows` × `cols` with aspect linkage off.
    #[must_use]
    pub fn fixed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            keep_aspect: false,
            ..Self::default()
        }
    }

    /// Same padding on all four sides.
    #[must_use]
    pub fn with_uniform_padding(mut self, pad: usize) -> Self {
        self.pad_left = pad;
        self.pad_right = pad;
        self.pad_top = pad;
        self.pad_bottom = pad;
        self
    }
}

/// Quantization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    pub tone_count: u8,
    /// Added to normalized brightness before inversion, in `-1.0..=1.0`.
    pub brightness_offset: f32,
    pub invert: bool,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            tone_count: 4,
            brightness_offset: 0.0,
            invert: false,
        }
    }
}

impl ToneConfig {
    /// # Errors
    /// Returns [`PatternError::InvalidToneCount`] outside `2..=10`.
    pub fn validate(&self) -> Result<(), PatternError> {
        check_tone_count(self.tone_count)
    }
}

/// Colormap settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub use_color: bool,
    pub palette: PaletteName,
    /// Per-tone colors; win over both palette and grayscale.
    #[serde(with = "tone_keys")]
    pub overrides: BTreeMap<u8, Rgb>,
}

impl ColorConfig {
    pub fn set_override(&mut self, tone: u8, color: Rgb) {
        self.overrides.insert(tone, color);
    }

    /// Remove one tone's override. Returns whether one was present.
    pub fn reset_override(&mut self, tone: u8) -> bool {
        self.overrides.remove(&tone).is_some()
    }

    pub fn reset_overrides(&mut self) {
        self.overrides.clear();
    }

    /// Drop overrides for tones that no longer exist after the tone count shrank.
    ///
    /// # Example
    /// ```
    /// use sg_core::color::Rgb;
    /// use sg_core::config::ColorConfig;
    /// let mut colors = ColorConfig::default();
    /// colors.set_override(1, Rgb::WHITE);
    /// colors.set_override(5, Rgb::BLACK);
    /// colors.retain_tones(4);
    /// assert_eq!(colors.overrides.len(), 1);
    /// ```
    pub fn retain_tones(&mut self, tone_count: u8) {
        self.overrides.retain(|&tone, _| tone < tone_count);
    }
}

/// Chart display flags. Interpreted by the renderer only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub show_guides: bool,
    /// Bold guide line every N stitches; below 2 disables guides.
    pub guide_every: usize,
    pub show_row_numbers: bool,
    pub show_legend: bool,
    /// Pixels per stitch in raster output.
    pub cell_size: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_guides: true,
            guide_every: 10,
            show_row_numbers: true,
            show_legend: true,
            cell_size: 12,
        }
    }
}

impl DisplayOptions {
    /// # Errors
    /// Returns [`PatternError::InvalidCellSize`] outside `1..=MAX_CELL_SIZE`.
    pub fn validate(&self) -> Result<(), PatternError> {
        if (1..=MAX_CELL_SIZE).contains(&self.cell_size) {
            Ok(())
        } else {
            Err(PatternError::InvalidCellSize {
                size: self.cell_size,
                max: MAX_CELL_SIZE,
            })
        }
    }

    /// Guide spacing if guides are drawn at all.
    #[must_use]
    pub fn guide_step(&self) -> Option<usize> {
        (self.show_guides && self.guide_every >= 2).then_some(self.guide_every)
    }
}

/// Complete configuration file.
///
/// # Example
/// ```
/// use sg_core::config::PatternConfig;
/// let cfg: PatternConfig = toml::from_str("[tones]\ntone_count = 6\n").unwrap();
/// assert_eq!(cfg.tones.tone_count, 6);
/// assert_eq!(cfg.layout.rows, 139);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub layout: LayoutSpec,
    pub tones: ToneConfig,
    pub color: ColorConfig,
    pub display: DisplayOptions,
}

impl PatternConfig {
    /// Read and validate a TOML configuration file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {}", path.display()))?;
        let mut config: Self = toml::from_str(&text)
            .with_context(|| format!("Configuration invalide: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Configuration invalide: {}", path.display()))?;
        config.normalize();
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize back to TOML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Sérialisation TOML impossible")
    }

    /// # Errors
    /// Returns [`PatternError::InvalidToneCount`] for an unsupported tone
    /// count, [`PatternError::GridTooLarge`] for rows or cols above
    /// [`MAX_GRID_SIDE`] and [`PatternError::InvalidCellSize`] for a cell
    /// size of 0 or above [`MAX_CELL_SIZE`].
    pub fn validate(&self) -> Result<(), PatternError> {
        self.tones.validate()?;
        check_grid_size(self.layout.rows, self.layout.cols)?;
        self.display.validate()
    }

    /// Clamp values into their documented ranges and prune stale overrides.
    pub fn normalize(&mut self) {
        let offset = self.tones.brightness_offset;
        self.tones.brightness_offset = if offset.is_finite() {
            offset.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        if let Some(pct) = self.layout.auto_pad_percent {
            self.layout.auto_pad_percent = Some(pct.min(MAX_AUTO_PAD_PERCENT));
        }
        let before = self.color.overrides.len();
        self.color.retain_tones(self.tones.tone_count);
        let dropped = before - self.color.overrides.len();
        if dropped > 0 {
            log::warn!(
                "Ignoring {dropped} color override(s) beyond tone {}",
                self.tones.tone_count.saturating_sub(1)
            );
        }
    }
}

/// TOML tables only have string keys; tone indices are written as `"2" = "red"`.
mod tone_keys {
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::color::Rgb;

    pub fn serialize<S: Serializer>(map: &BTreeMap<u8, Rgb>, s: S) -> Result<S::Ok, S::Error> {
        let keyed: BTreeMap<String, Rgb> = map.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        keyed.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<u8, Rgb>, D::Error> {
        BTreeMap::<String, Rgb>::deserialize(d)?
            .into_iter()
            .map(|(k, v)| {
                k.trim()
                    .parse::<u8>()
                    .map(|tone| (tone, v))
                    .map_err(|_| D::Error::custom(format!("invalid tone index {k:?}")))
            })
            .collect()
    }
}

/// # Errors
/// Returns [`PatternError::InvalidToneCount`] outside `2..=10`.
pub fn check_tone_count(tone_count: u8) -> Result<(), PatternError> {
    if (MIN_TONES..=MAX_TONES).contains(&tone_count) {
        Ok(())
    } else {
        Err(PatternError::InvalidToneCount(tone_count))
    }
}

/// # Errors
/// Returns [`PatternError::GridTooLarge`] if either side exceeds [`MAX_GRID_SIDE`].
pub fn check_grid_size(rows: usize, cols: usize) -> Result<(), PatternError> {
    if rows <= MAX_GRID_SIDE && cols <= MAX_GRID_SIDE {
        Ok(())
    } else {
        Err(PatternError::GridTooLarge {
            rows,
            cols,
            max: MAX_GRID_SIDE,
        })
    }
}

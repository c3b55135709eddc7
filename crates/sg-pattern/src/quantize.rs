//! Quantification en tons à intervalles égaux.

use sg_core::PatternError;
use sg_core::config::{ToneConfig, check_tone_count};

/// Even-bin quantizer over `[0, 1]`.
///
/// Edges are `linspace(0, 1, T + 1)`: a value lands in bin `i` when
/// `edge[i] <= v < edge[i + 1]`, and the last bin also takes `1.0`.
///
/// # Example
/// ```
/// use sg_pattern::quantize::ToneQuantizer;
/// let q = ToneQuantizer::new(4).unwrap();
/// assert_eq!(q.quantize(0.0), 0);
/// assert_eq!(q.quantize(0.25), 1);
/// assert_eq!(q.quantize(0.7), 2);
/// assert_eq!(q.quantize(1.0), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ToneQuantizer {
    /// Interior edges only, `edge[1]..edge[T-1]`.
    inner_edges: Vec<f64>,
}

impl ToneQuantizer {
    /// # Errors
    /// Returns [`PatternError::InvalidToneCount`] outside `2..=10`.
    pub fn new(tone_count: u8) -> Result<Self, PatternError> {
        check_tone_count(tone_count)?;
        let t = f64::from(tone_count);
        let inner_edges = (1..tone_count).map(|i| f64::from(i) / t).collect();
        Ok(Self { inner_edges })
    }

    #[must_use]
    pub fn tone_count(&self) -> u8 {
        self.inner_edges.len() as u8 + 1
    }

    /// Tone index for a normalized value. Out-of-range input is clamped,
    /// NaN maps to tone 0.
    #[inline]
    #[must_use]
    pub fn quantize(&self, value: f64) -> u8 {
        let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        // Number of interior edges <= v is the bin index.
        self.inner_edges.partition_point(|&edge| edge <= v) as u8
    }
}

/// One-shot quantization of a single value.
///
/// # Errors
/// Returns [`PatternError::InvalidToneCount`] outside `2..=10`.
pub fn quantize(value: f64, tone_count: u8) -> Result<u8, PatternError> {
    ToneQuantizer::new(tone_count).map(|q| q.quantize(value))
}

/// Brightness offset then inversion, always in that order.
///
/// # Example
/// ```
/// use sg_core::config::ToneConfig;
/// use sg_pattern::quantize::preprocess;
/// let tones = ToneConfig { brightness_offset: 0.5, invert: true, ..ToneConfig::default() };
/// // 0.75 + 0.5 clamps to 1.0, inverted to 0.0
/// assert_eq!(preprocess(0.75, &tones), 0.0);
/// ```
#[inline]
#[must_use]
pub fn preprocess(value: f64, tones: &ToneConfig) -> f64 {
    let v = (value + f64::from(tones.brightness_offset)).clamp(0.0, 1.0);
    if tones.invert { 1.0 - v } else { v }
}

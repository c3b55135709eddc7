//! sRGB colors for colormaps and overrides.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseColorError;

/// 8-bit sRGB color.
///
/// Serialized as a `#rrggbb` string so overrides read naturally in TOML.
///
/// # Example
/// ```
/// use sg_core::color::Rgb;
/// let red: Rgb = "red".parse().unwrap();
/// assert_eq!(red, Rgb::new(255, 0, 0));
/// assert_eq!(red.to_string(), "#ff0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// CSS basic names accepted in addition to hex notation.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("white", Rgb::new(255, 255, 255)),
    ("red", Rgb::new(255, 0, 0)),
    ("green", Rgb::new(0, 128, 0)),
    ("lime", Rgb::new(0, 255, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("orange", Rgb::new(255, 165, 0)),
    ("purple", Rgb::new(128, 0, 128)),
    ("pink", Rgb::new(255, 192, 203)),
    ("brown", Rgb::new(165, 42, 42)),
    ("gray", Rgb::new(128, 128, 128)),
    ("grey", Rgb::new(128, 128, 128)),
    ("navy", Rgb::new(0, 0, 128)),
    ("teal", Rgb::new(0, 128, 128)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("olive", Rgb::new(128, 128, 0)),
];

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray level from a normalized intensity, 0.0 = black, 1.0 = white.
    ///
    /// # Example
    /// ```
    /// use sg_core::color::Rgb;
    /// assert_eq!(Rgb::gray(0.5), Rgb::new(128, 128, 128));
    /// ```
    #[must_use]
    pub fn gray(level: f32) -> Self {
        let v = (level.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(v, v, v)
    }

    /// Build from a `0xRRGGBB` literal, used by the palette tables.
    #[must_use]
    pub const fn from_hex_u32(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    #[must_use]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Rec. 601 luma, used to pick readable label colors on swatches.
    #[must_use]
    pub fn luma(self) -> f32 {
        0.299 * f32::from(self.r) + 0.587 * f32::from(self.g) + 0.114 * f32::from(self.b)
    }

    fn parse_hex(digits: &str) -> Result<Self, ParseColorError> {
        match digits.len() {
            6 => {
                let v = u32::from_str_radix(digits, 16)?;
                Ok(Self::from_hex_u32(v))
            }
            3 => {
                let v = u32::from_str_radix(digits, 16)?;
                let expand = |nibble: u32| ((nibble & 0xF) * 17) as u8;
                Ok(Self::new(expand(v >> 8), expand(v >> 4), expand(v)))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(digits) = s.strip_prefix('#') {
            return Self::parse_hex(digits);
        }
        let lower = s.to_ascii_lowercase();
        if let Some((_, color)) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
            return Ok(*color);
        }
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::parse_hex(s);
        }
        Err(ParseColorError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

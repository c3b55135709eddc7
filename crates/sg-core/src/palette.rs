//! Qualitative palettes available for color charts.
//!
//! Tables reproduce the matplotlib/ColorBrewer qualitative colormaps,
//! in their native order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

const fn hex(v: u32) -> Rgb {
    Rgb::from_hex_u32(v)
}

/// 10 couleurs — palette par défaut.
pub const TAB10: &[Rgb] = &[
    hex(0x1f77b4), hex(0xff7f0e), hex(0x2ca02c), hex(0xd62728), hex(0x9467bd),
    hex(0x8c564b), hex(0xe377c2), hex(0x7f7f7f), hex(0xbcbd22), hex(0x17becf),
];

/// 20 couleurs — paires sombre/clair de tab10.
pub const TAB20: &[Rgb] = &[
    hex(0x1f77b4), hex(0xaec7e8), hex(0xff7f0e), hex(0xffbb78), hex(0x2ca02c),
    hex(0x98df8a), hex(0xd62728), hex(0xff9896), hex(0x9467bd), hex(0xc5b0d5),
    hex(0x8c564b), hex(0xc49c94), hex(0xe377c2), hex(0xf7b6d2), hex(0x7f7f7f),
    hex(0xc7c7c7), hex(0xbcbd22), hex(0xdbdb8d), hex(0x17becf), hex(0x9edae5),
];

pub const SET1: &[Rgb] = &[
    hex(0xe41a1c), hex(0x377eb8), hex(0x4daf4a), hex(0x984ea3), hex(0xff7f00),
    hex(0xffff33), hex(0xa65628), hex(0xf781bf), hex(0x999999),
];

pub const SET2: &[Rgb] = &[
    hex(0x66c2a5), hex(0xfc8d62), hex(0x8da0cb), hex(0xe78ac3), hex(0xa6d854),
    hex(0xffd92f), hex(0xe5c494), hex(0xb3b3b3),
];

pub const SET3: &[Rgb] = &[
    hex(0x8dd3c7), hex(0xffffb3), hex(0xbebada), hex(0xfb8072), hex(0x80b1d3),
    hex(0xfdb462), hex(0xb3de69), hex(0xfccde5), hex(0xd9d9d9), hex(0xbc80bd),
    hex(0xccebc5), hex(0xffed6f),
];

pub const PAIRED: &[Rgb] = &[
    hex(0xa6cee3), hex(0x1f78b4), hex(0xb2df8a), hex(0x33a02c), hex(0xfb9a99),
    hex(0xe31a1c), hex(0xfdbf6f), hex(0xff7f00), hex(0xcab2d6), hex(0x6a3d9a),
    hex(0xffff99), hex(0xb15928),
];

pub const ACCENT: &[Rgb] = &[
    hex(0x7fc97f), hex(0xbeaed4), hex(0xfdc086), hex(0xffff99), hex(0x386cb0),
    hex(0xf0027f), hex(0xbf5b17), hex(0x666666),
];

pub const DARK2: &[Rgb] = &[
    hex(0x1b9e77), hex(0xd95f02), hex(0x7570b3), hex(0xe7298a), hex(0x66a61e),
    hex(0xe6ab02), hex(0xa6761d), hex(0x666666),
];

pub const PASTEL1: &[Rgb] = &[
    hex(0xfbb4ae), hex(0xb3cde3), hex(0xccebc5), hex(0xdecbe4), hex(0xfed9a6),
    hex(0xffffcc), hex(0xe5d8bd), hex(0xfddaec), hex(0xf2f2f2),
];

pub const PASTEL2: &[Rgb] = &[
    hex(0xb3e2cd), hex(0xfdcdac), hex(0xcbd5e8), hex(0xf4cae4), hex(0xe6f5c9),
    hex(0xfff2ae), hex(0xf1e2cc), hex(0xcccccc),
];

/// Named qualitative palette.
///
/// # Example
/// ```
/// use sg_core::palette::PaletteName;
/// let p: PaletteName = "set1".parse().unwrap();
/// assert_eq!(p, PaletteName::Set1);
/// assert_eq!(p.colors().len(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaletteName {
    #[default]
    Tab10,
    Tab20,
    Set1,
    Set2,
    Set3,
    Paired,
    Accent,
    Dark2,
    Pastel1,
    Pastel2,
}

impl PaletteName {
    pub const ALL: [Self; 10] = [
        Self::Tab10,
        Self::Tab20,
        Self::Set1,
        Self::Set2,
        Self::Set3,
        Self::Paired,
        Self::Accent,
        Self::Dark2,
        Self::Pastel1,
        Self::Pastel2,
    ];

    /// The palette's colors in order.
    #[must_use]
    pub fn colors(self) -> &'static [Rgb] {
        match self {
            Self::Tab10 => TAB10,
            Self::Tab20 => TAB20,
            Self::Set1 => SET1,
            Self::Set2 => SET2,
            Self::Set3 => SET3,
            Self::Paired => PAIRED,
            Self::Accent => ACCENT,
            Self::Dark2 => DARK2,
            Self::Pastel1 => PASTEL1,
            Self::Pastel2 => PASTEL2,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tab10 => "tab10",
            Self::Tab20 => "tab20",
            Self::Set1 => "Set1",
            Self::Set2 => "Set2",
            Self::Set3 => "Set3",
            Self::Paired => "Paired",
            Self::Accent => "Accent",
            Self::Dark2 => "Dark2",
            Self::Pastel1 => "Pastel1",
            Self::Pastel2 => "Pastel2",
        }
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|p| p.as_str()).collect();
                format!("unknown palette {s:?} (expected one of: {})", known.join(", "))
            })
    }
}

impl TryFrom<String> for PaletteName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaletteName> for String {
    fn from(value: PaletteName) -> Self {
        value.as_str().to_owned()
    }
}

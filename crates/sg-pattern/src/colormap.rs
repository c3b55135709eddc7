//! Tone colors: grayscale ramp or named palette, then per-tone overrides.

use sg_core::PatternError;
use sg_core::color::Rgb;
use sg_core::config::{ColorConfig, check_tone_count};
use sg_core::grid::Colormap;

/// `tone_count` evenly spaced grays, black at tone 0 and white at the last.
///
/// # Example
/// ```
/// use sg_core::color::Rgb;
/// use sg_pattern::colormap::grayscale_ramp;
/// assert_eq!(grayscale_ramp(3), vec![Rgb::BLACK, Rgb::new(128, 128, 128), Rgb::WHITE]);
/// ```
#[must_use]
pub fn grayscale_ramp(tone_count: u8) -> Vec<Rgb> {
    if tone_count <= 1 {
        return vec![Rgb::BLACK; usize::from(tone_count)];
    }
    let last = f32::from(tone_count - 1);
    (0..tone_count)
        .map(|i| Rgb::gray(f32::from(i) / last))
        .collect()
}

/// Build the colormap for `tone_count` tones.
///
/// Overrides always win, in color mode and grayscale mode alike. Override
/// keys at or beyond `tone_count` are ignored.
///
/// # Errors
/// - [`PatternError::InvalidToneCount`] outside `2..=10`
/// - [`PatternError::PaletteExhausted`] if the palette has fewer colors than tones
///
/// # Example
/// ```
/// use sg_core::color::Rgb;
/// use sg_core::config::ColorConfig;
/// use sg_pattern::colormap::build_colormap;
///
/// let mut colors = ColorConfig::default();
/// colors.set_override(2, "red".parse().unwrap());
/// let map = build_colormap(4, &colors).unwrap();
/// assert_eq!(
///     map.colors(),
///     &[Rgb::BLACK, Rgb::new(85, 85, 85), Rgb::new(255, 0, 0), Rgb::WHITE]
/// );
/// ```
pub fn build_colormap(tone_count: u8, config: &ColorConfig) -> Result<Colormap, PatternError> {
    check_tone_count(tone_count)?;
    let wanted = usize::from(tone_count);

    let mut colors = if config.use_color {
        let palette = config.palette.colors();
        if palette.len() < wanted {
            return Err(PatternError::PaletteExhausted {
                palette: config.palette.to_string(),
                available: palette.len(),
                requested: wanted,
            });
        }
        palette[..wanted].to_vec()
    } else {
        grayscale_ramp(tone_count)
    };

    for (&tone, &color) in &config.overrides {
        match colors.get_mut(usize::from(tone)) {
            Some(slot) => *slot = color,
            None => log::debug!("Override for tone {tone} ignored ({tone_count} tones)"),
        }
    }

    Ok(Colormap::new(colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_core::palette::PaletteName;

    #[test]
    fn length_always_matches_tone_count() {
        for t in 2..=8u8 {
            let gray = build_colormap(t, &ColorConfig::default()).unwrap();
            assert_eq!(gray.len(), usize::from(t));
            let color = ColorConfig {
                use_color: true,
                ..ColorConfig::default()
            };
            assert_eq!(build_colormap(t, &color).unwrap().len(), usize::from(t));
        }
    }

    #[test]
    fn grayscale_ramp_is_monotonic_black_to_white() {
        let ramp = grayscale_ramp(10);
        assert_eq!(ramp[0], Rgb::BLACK);
        assert_eq!(ramp[9], Rgb::WHITE);
        assert!(ramp.windows(2).all(|w| w[0].r < w[1].r));
    }

    #[test]
    fn overrides_win_in_grayscale_mode() {
        let mut config = ColorConfig::default();
        config.set_override(2, Rgb::new(255, 0, 0));
        let map = build_colormap(4, &config).unwrap();
        assert_eq!(map.color(0), Some(Rgb::BLACK));
        assert_eq!(map.color(1), Some(Rgb::new(85, 85, 85)));
        assert_eq!(map.color(2), Some(Rgb::new(255, 0, 0)));
        assert_eq!(map.color(3), Some(Rgb::WHITE));
    }

    #[test]
    fn overrides_win_in_color_mode() {
        let mut config = ColorConfig {
            use_color: true,
            palette: PaletteName::Set1,
            ..ColorConfig::default()
        };
        config.set_override(0, Rgb::WHITE);
        let map = build_colormap(3, &config).unwrap();
        assert_eq!(map.color(0), Some(Rgb::WHITE));
        assert_eq!(map.colors()[1..], PaletteName::Set1.colors()[1..3]);
    }

    #[test]
    fn palette_takes_first_colors_in_order() {
        let config = ColorConfig {
            use_color: true,
            palette: PaletteName::Tab10,
            ..ColorConfig::default()
        };
        let map = build_colormap(5, &config).unwrap();
        assert_eq!(map.colors(), &PaletteName::Tab10.colors()[..5]);
    }

    #[test]
    fn short_palette_is_exhausted() {
        let config = ColorConfig {
            use_color: true,
            palette: PaletteName::Dark2,
            ..ColorConfig::default()
        };
        assert_eq!(
            build_colormap(9, &config),
            Err(PatternError::PaletteExhausted {
                palette: "Dark2".into(),
                available: 8,
                requested: 9,
            })
        );
    }

    #[test]
    fn stale_override_is_ignored() {
        let mut config = ColorConfig::default();
        config.set_override(7, Rgb::new(1, 2, 3));
        let map = build_colormap(2, &config).unwrap();
        assert_eq!(map.colors(), &[Rgb::BLACK, Rgb::WHITE]);
    }

    #[test]
    fn tone_count_is_validated() {
        assert_eq!(
            build_colormap(11, &ColorConfig::default()),
            Err(PatternError::InvalidToneCount(11))
        );
    }

    #[test]
    fn reset_restores_generated_color() {
        let mut config = ColorConfig::default();
        config.set_override(1, Rgb::new(9, 9, 9));
        assert!(config.reset_override(1));
        assert!(!config.reset_override(1));
        let map = build_colormap(3, &config).unwrap();
        assert_eq!(map.color(1), Some(Rgb::new(128, 128, 128)));
    }
}

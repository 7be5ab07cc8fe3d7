//! Color classification from RGB photodiode frequencies
//!
//! The color sensor reports one period reading per channel; a lower value
//! means stronger reflectance on that channel. A "dominant" color is the
//! channel reflecting most strongly relative to the other two, not the
//! channel with the highest raw value.

use crate::config::ColorConfig;
use std::fmt;

/// Saturated reading stamped by the acquisition layer when a channel
/// produced no pulse within its timeout.
pub const NO_PULSE: u16 = 999;

/// Discrete surface color labels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Ambiguous / no clear surface
    #[default]
    None,
    Black,
    White,
    Red,
    Green,
    Blue,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::None => "NONE",
            Color::Black => "BLACK",
            Color::White => "WHITE",
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
        };
        f.write_str(name)
    }
}

/// Classify one triple of channel readings into a color label.
///
/// Pure and total: every input triple maps to exactly one label. Rules are
/// checked in priority order and the first match wins:
///
/// 1. BLACK - all channels reflect poorly (all readings above `black_min`)
/// 2. WHITE - all channels reflect strongly (all readings below `white_max`)
/// 3. RED / GREEN / BLUE - one channel lower than both others by at least
///    `margin`, and itself below `hue_max`
/// 4. NONE otherwise
///
/// The black/white extremes are checked before hue discrimination: near
/// saturation the relative channel comparison is unreliable. `margin`
/// rejects noisy near-ties, `hue_max` rejects washed-out dark samples from
/// being read as a hue.
pub fn classify(red: u16, green: u16, blue: u16, config: &ColorConfig) -> Color {
    let ColorConfig {
        black_min,
        white_max,
        margin,
        hue_max,
    } = *config;

    if red > black_min && green > black_min && blue > black_min {
        return Color::Black;
    }

    if red < white_max && green < white_max && blue < white_max {
        return Color::White;
    }

    // Dominance test: channel + margin < both others, channel < hue_max.
    // saturating_add keeps the comparison safe at the top of the u16 range.
    if red.saturating_add(margin) < green && red.saturating_add(margin) < blue && red < hue_max {
        return Color::Red;
    }

    if green.saturating_add(margin) < red && green.saturating_add(margin) < blue && green < hue_max
    {
        return Color::Green;
    }

    if blue.saturating_add(margin) < red && blue.saturating_add(margin) < green && blue < hue_max {
        return Color::Blue;
    }

    Color::None
}

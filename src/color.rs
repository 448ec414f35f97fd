//! Terminal color profiles and nearest-color mapping.
//!
//! The rasterizer asks this module for the closest representable color for
//! every pixel. Layout never depends on the profile, only the color codes do.

use std::env;
use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use termini::{NumberCapability, TermInfo};

/// Color capability tier of the output terminal, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorProfile {
    /// 24-bit RGB
    TrueColor,
    /// xterm 256-color palette
    Ansi256,
    /// The 16 basic ANSI colors
    Ansi16,
}

impl ColorProfile {
    /// Detect the profile from `COLORTERM`, then terminfo `max_colors`.
    pub fn detect() -> Self {
        let colorterm = env::var("COLORTERM").ok();
        let max_colors = if Self::colorterm_is_truecolor(colorterm.as_deref()) {
            None
        } else {
            match TermInfo::from_env() {
                Ok(info) => info.number_cap(NumberCapability::MaxColors),
                Err(e) => {
                    tracing::debug!(error = %e, "terminfo unavailable");
                    None
                }
            }
        };

        let profile = Self::from_capabilities(colorterm.as_deref(), max_colors);
        tracing::info!(?profile, ?colorterm, ?max_colors, "Detected color profile");
        profile
    }

    /// Pick a profile from the raw capability inputs.
    pub fn from_capabilities(colorterm: Option<&str>, max_colors: Option<i32>) -> Self {
        if Self::colorterm_is_truecolor(colorterm) {
            return ColorProfile::TrueColor;
        }
        match max_colors {
            Some(n) if n >= 16_777_216 => ColorProfile::TrueColor,
            Some(n) if n >= 256 => ColorProfile::Ansi256,
            _ => ColorProfile::Ansi16,
        }
    }

    fn colorterm_is_truecolor(colorterm: Option<&str>) -> bool {
        colorterm
            .map(|v| {
                let v = v.to_ascii_lowercase();
                v == "truecolor" || v == "24bit"
            })
            .unwrap_or(false)
    }

    /// Map an RGB triple to the nearest color this profile can show.
    pub fn nearest(self, rgb: [u8; 3]) -> Color {
        match self {
            ColorProfile::TrueColor => Color::Rgb(rgb[0], rgb[1], rgb[2]),
            ColorProfile::Ansi256 => Color::Indexed(nearest_xterm256(rgb)),
            ColorProfile::Ansi16 => nearest_ansi16(rgb),
        }
    }
}

impl fmt::Display for ColorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorProfile::TrueColor => "truecolor",
            ColorProfile::Ansi256 => "256",
            ColorProfile::Ansi16 => "ansi",
        };
        f.write_str(name)
    }
}

impl FromStr for ColorProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => Ok(ColorProfile::TrueColor),
            "256" | "ansi256" => Ok(ColorProfile::Ansi256),
            "ansi" | "16" | "ansi16" => Ok(ColorProfile::Ansi16),
            other => Err(format!(
                "unknown color profile '{}' (expected truecolor, 256 or ansi)",
                other
            )),
        }
    }
}

/// Channel levels of the 6x6x6 cube in the xterm palette.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

fn cube_index(v: u8) -> usize {
    match v {
        0..=47 => 0,
        48..=114 => 1,
        _ => ((v as usize - 35) / 40).min(5),
    }
}

/// Index into the xterm 256-color palette (cube or grayscale ramp).
fn nearest_xterm256(rgb: [u8; 3]) -> u8 {
    let (ri, gi, bi) = (cube_index(rgb[0]), cube_index(rgb[1]), cube_index(rgb[2]));
    let cube = [CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]];
    let cube_idx = 16 + 36 * ri + 6 * gi + bi;

    // Grayscale ramp 232..=255 covers 8, 18, ..., 238
    let avg = (rgb[0] as u32 + rgb[1] as u32 + rgb[2] as u32) / 3;
    let gray_step = if avg > 238 {
        23
    } else {
        (avg.saturating_sub(3) / 10).min(23)
    };
    let gray_level = (8 + gray_step * 10) as u8;
    let gray = [gray_level, gray_level, gray_level];

    if distance_sq(rgb, gray) < distance_sq(rgb, cube) {
        232 + gray_step as u8
    } else {
        cube_idx as u8
    }
}

const ANSI16: [(Color, [u8; 3]); 16] = [
    (Color::Black, [0, 0, 0]),
    (Color::Red, [128, 0, 0]),
    (Color::Green, [0, 128, 0]),
    (Color::Yellow, [128, 128, 0]),
    (Color::Blue, [0, 0, 128]),
    (Color::Magenta, [128, 0, 128]),
    (Color::Cyan, [0, 128, 128]),
    (Color::Gray, [192, 192, 192]),
    (Color::DarkGray, [128, 128, 128]),
    (Color::LightRed, [255, 0, 0]),
    (Color::LightGreen, [0, 255, 0]),
    (Color::LightYellow, [255, 255, 0]),
    (Color::LightBlue, [0, 0, 255]),
    (Color::LightMagenta, [255, 0, 255]),
    (Color::LightCyan, [0, 255, 255]),
    (Color::White, [255, 255, 255]),
];

fn nearest_ansi16(rgb: [u8; 3]) -> Color {
    ANSI16
        .iter()
        .min_by_key(|(_, reference)| distance_sq(rgb, *reference))
        .map(|(color, _)| *color)
        .unwrap_or(Color::Reset)
}

// src/core/color.rs
use crate::error::ColorError;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees (0..360), saturation and lightness in percent (0..=100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
    Hsl,
    Rgba,
}

impl FromStr for ColorFormat {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "rgb" => Ok(Self::Rgb),
            "hsl" => Ok(Self::Hsl),
            "rgba" => Ok(Self::Rgba),
            _ => Err(ColorError::InvalidFormat(s.to_owned())),
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "inputs are clamped to the channel range first"
)]
fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "percentages and hues are bounded by construction"
)]
fn to_whole(value: f64) -> u16 {
    value.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the `#` is optional, hex digits are case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for anything else.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_owned());
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(invalid)
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        let (h, s) = if (max - min).abs() < f64::EPSILON {
            (0.0, 0.0)
        } else {
            let d = max - min;
            let s = if l > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            let h = if (max - r).abs() < f64::EPSILON {
                (g - b) / d + if g < b { 6.0 } else { 0.0 }
            } else if (max - g).abs() < f64::EPSILON {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            (h / 6.0, s)
        };

        let hue = to_whole(h * 360.0) % 360;
        Hsl {
            h: hue,
            s: u8::try_from(to_whole(s * 100.0)).unwrap_or(100),
            l: u8::try_from(to_whole(l * 100.0)).unwrap_or(100),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Hsl {
    #[must_use]
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let h = f64::from(self.h % 360) / 360.0;
        let s = f64::from(self.s.min(100)) / 100.0;
        let l = f64::from(self.l.min(100)) / 100.0;
        let a = s * l.min(1.0 - l);
        let f = |n: f64| {
            let k = (n + h * 12.0) % 12.0;
            l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
        };
        Rgb {
            r: to_channel(f(0.0) * 255.0),
            g: to_channel(f(8.0) * 255.0),
            b: to_channel(f(4.0) * 255.0),
        }
    }
}

/// Renders a color in the requested notation.
#[must_use]
pub fn format(color: Rgb, format: ColorFormat) -> String {
    match format {
        ColorFormat::Hex => color.to_hex().to_uppercase(),
        ColorFormat::Rgb => format!("rgb({}, {}, {})", color.r, color.g, color.b),
        ColorFormat::Hsl => {
            let hsl = color.to_hsl();
            format!("hsl({}, {}%, {}%)", hsl.h, hsl.s, hsl.l)
        }
        ColorFormat::Rgba => format!("rgba({}, {}, {}, 1)", color.r, color.g, color.b),
    }
}

/// Five monochromatic shades (lightness 20..=100 in steps of 20) followed by
/// three complementary shades (lightness 30, 50, 70).
#[must_use]
pub fn palette(color: Rgb) -> Vec<Rgb> {
    let base = color.to_hsl();
    let complementary = (base.h + 180) % 360;

    let mono = [20, 40, 60, 80, 100].map(|l| Hsl::new(base.h, base.s, l).to_rgb());
    let comp = [30, 50, 70].map(|l| Hsl::new(complementary, base.s, l).to_rgb());
    mono.into_iter().chain(comp).collect()
}

pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(rng.random(), rng.random(), rng.random())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    #[test]
    fn test_hex_parsing() -> Result<()> {
        assert_eq!(Rgb::from_hex("#3b82f6")?, Rgb::new(59, 130, 246));
        assert_eq!(Rgb::from_hex("FFFFFF")?, Rgb::new(255, 255, 255));
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("#ééé").is_err());
        Ok(())
    }

    #[test]
    fn test_hex_output_is_lowercase_and_padded() {
        assert_eq!(Rgb::new(0, 10, 255).to_hex(), "#000aff");
    }

    #[test]
    fn test_rgb_to_hsl() {
        assert_eq!(Rgb::new(59, 130, 246).to_hsl(), Hsl::new(217, 91, 60));
        assert_eq!(Rgb::new(255, 0, 0).to_hsl(), Hsl::new(0, 100, 50));
        assert_eq!(Rgb::new(0, 0, 255).to_hsl(), Hsl::new(240, 100, 50));
        assert_eq!(Rgb::new(128, 128, 128).to_hsl(), Hsl::new(0, 0, 50));
    }

    #[test]
    fn test_hsl_to_rgb() {
        assert_eq!(Hsl::new(0, 100, 50).to_rgb(), Rgb::new(255, 0, 0));
        assert_eq!(Hsl::new(120, 100, 50).to_rgb(), Rgb::new(0, 255, 0));
        assert_eq!(Hsl::new(0, 0, 100).to_rgb(), Rgb::new(255, 255, 255));
        assert_eq!(Hsl::new(0, 0, 0).to_rgb(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_formats() {
        let color = Rgb::new(59, 130, 246);
        assert_eq!(format(color, ColorFormat::Hex), "#3B82F6");
        assert_eq!(format(color, ColorFormat::Rgb), "rgb(59, 130, 246)");
        assert_eq!(format(color, ColorFormat::Hsl), "hsl(217, 91%, 60%)");
        assert_eq!(format(color, ColorFormat::Rgba), "rgba(59, 130, 246, 1)");
    }

    #[test]
    fn test_palette_shape() {
        let shades = palette(Rgb::new(255, 0, 0));
        assert_eq!(shades.len(), 8);
        assert_eq!(shades.get(4), Some(&Rgb::new(255, 255, 255)));
        // complementary of red at 50% lightness is cyan
        assert_eq!(shades.get(6), Some(&Rgb::new(0, 255, 255)));
    }

    #[test]
    fn test_random_is_deterministic_with_seed() {
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        assert_eq!(random(&mut a), random(&mut b));
    }
}

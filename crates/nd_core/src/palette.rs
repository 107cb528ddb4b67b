//! Palette assignment: ordinal position → (fill, stroke) color pair.
//!
//! Pure function of the position and the palette; no global state. The fill
//! is the base color at a lower alpha, the stroke is the same hue opaque.
//! Alpha is an integer percent and is rendered without float arithmetic.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Opaque base color.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// `rgba(r, g, b, a)` with `alpha_pct` in 0..=100.
    pub fn rgba(self, alpha_pct: u8) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha_str(alpha_pct))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = CoreError;

    /// Accepts `#rrggbb` or `rgb(r, g, b)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let bad = || CoreError::InvalidColor(s.to_string());

        if let Some(hex) = t.strip_prefix('#') {
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(bad());
            }
            let ch = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
            return Ok(Rgb::new(ch(0)?, ch(2)?, ch(4)?));
        }

        let inner = t
            .strip_prefix("rgb(")
            .and_then(|x| x.strip_suffix(')'))
            .ok_or_else(bad)?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(bad());
        }
        let ch = |p: &str| p.parse::<u8>().map_err(|_| bad());
        Ok(Rgb::new(ch(parts[0])?, ch(parts[1])?, ch(parts[2])?))
    }
}

#[cfg(feature = "serde")]
impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Render an integer percent as a CSS alpha: 100 → "1", 20 → "0.2", 5 → "0.05".
fn alpha_str(pct: u8) -> String {
    match pct {
        0 => "0".to_string(),
        p if p >= 100 => "1".to_string(),
        p if p % 10 == 0 => format!("0.{}", p / 10),
        p => format!("0.{p:02}"),
    }
}

/// Fill/stroke strings for one position.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorPair {
    pub fill: String,
    pub stroke: String,
}

/// Base colors of the source dashboard, in dashboard order.
pub const DEFAULT_BASE_COLORS: [Rgb; 19] = [
    Rgb::new(255, 99, 132),
    Rgb::new(54, 162, 235),
    Rgb::new(255, 206, 86),
    Rgb::new(75, 192, 192),
    Rgb::new(153, 102, 255),
    Rgb::new(255, 159, 64),
    Rgb::new(201, 203, 207),
    Rgb::new(255, 99, 71),
    Rgb::new(144, 238, 144),
    Rgb::new(135, 206, 235),
    Rgb::new(255, 140, 0),
    Rgb::new(173, 216, 230),
    Rgb::new(106, 90, 205),
    Rgb::new(255, 215, 0),
    Rgb::new(128, 0, 128),
    Rgb::new(240, 128, 128),
    Rgb::new(220, 20, 60),
    Rgb::new(0, 128, 128),
    Rgb::new(218, 112, 214),
];

pub const DEFAULT_FILL_ALPHA_PCT: u8 = 20;

/// Fixed color of single-series trend views.
pub const DEFAULT_SERIES_COLOR: Rgb = Rgb::new(75, 192, 192);

/// Ordered base colors plus the fill alpha.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Palette {
    base: Vec<Rgb>,
    fill_alpha_pct: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Self { base: DEFAULT_BASE_COLORS.to_vec(), fill_alpha_pct: DEFAULT_FILL_ALPHA_PCT }
    }
}

impl Palette {
    pub fn new(base: Vec<Rgb>, fill_alpha_pct: u8) -> Result<Self, CoreError> {
        if base.is_empty() {
            return Err(CoreError::EmptyPalette);
        }
        if fill_alpha_pct > 100 {
            return Err(CoreError::InvalidAlpha(fill_alpha_pct));
        }
        Ok(Self { base, fill_alpha_pct })
    }

    /// Palette size `P`.
    pub fn len(&self) -> usize { self.base.len() }

    /// Never true for a constructed palette; present for API symmetry.
    pub fn is_empty(&self) -> bool { self.base.is_empty() }

    pub fn fill_alpha_pct(&self) -> u8 { self.fill_alpha_pct }

    pub fn base_colors(&self) -> &[Rgb] { &self.base }

    /// Color pair for ordinal position `i`; `assign(i) == assign(i + len())`.
    pub fn assign(&self, i: usize) -> ColorPair {
        let c = self.base[i % self.base.len()];
        self.pair_for(c)
    }

    /// Pair for a fixed color, using this palette's fill alpha.
    pub fn pair_for(&self, c: Rgb) -> ColorPair {
        ColorPair { fill: c.rgba(self.fill_alpha_pct), stroke: c.to_string() }
    }
}

use core::fmt;
use core::str::FromStr;

use palette::{LinSrgb, Srgb};

use crate::error::ParseColorError;

/// Relative luminance above which a swatch counts as light.
const LIGHT_THRESHOLD: f32 = 0.5;

/// An opaque 8-bit RGB color.
///
/// The `rgb(r,g,b)` string is the display form. The `#rrggbb` form is
/// derived on demand and parses back in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Filler used when neither a sampled nor a previous color is available.
    pub const FALLBACK: Color = Color::new(200, 200, 200);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn to_rgb_string(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hex_upper(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the short `#RGB` form, in any case.
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        use ParseColorError::*;

        let hex = s.trim();
        if hex.is_empty() {
            return Err(Empty);
        }
        let bytes = hex.strip_prefix('#').unwrap_or(hex).as_bytes();

        let nibble = |c: u8| -> Result<u8, ParseColorError> {
            match c {
                b'0'..=b'9' => Ok(c - b'0'),
                b'a'..=b'f' => Ok(c - b'a' + 10),
                b'A'..=b'F' => Ok(c - b'A' + 10),
                _ => Err(InvalidHex),
            }
        };

        match bytes.len() {
            3 => Ok(Self::new(
                nibble(bytes[0])? * 17,
                nibble(bytes[1])? * 17,
                nibble(bytes[2])? * 17,
            )),
            6 => {
                let pair = |i: usize| -> Result<u8, ParseColorError> {
                    Ok(nibble(bytes[i])? << 4 | nibble(bytes[i + 1])?)
                };
                Ok(Self::new(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => Err(InvalidLength),
        }
    }

    /// Parse the display form `rgb(r,g,b)`. The function name is matched in
    /// any case; components are plain decimal digits, optionally padded with spaces.
    pub fn from_rgb_str(s: &str) -> Result<Self, ParseColorError> {
        use ParseColorError::*;

        let s = s.trim();
        if s.is_empty() {
            return Err(Empty);
        }
        let inner = s
            .get(..4)
            .filter(|prefix| prefix.eq_ignore_ascii_case("rgb("))
            .and_then(|_| s[4..].strip_suffix(')'))
            .ok_or(InvalidFunc)?;

        let mut channels = [0u8; 3];
        let mut parts = inner.split(',');
        for channel in channels.iter_mut() {
            let part = parts.next().ok_or(InvalidFunc)?.trim();
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(InvalidFunc);
            }
            // Only overflow can fail once every byte is a digit.
            let value: u32 = part.parse().map_err(|_| OutOfRange)?;
            *channel = u8::try_from(value).map_err(|_| OutOfRange)?;
        }
        if parts.next().is_some() {
            return Err(InvalidFunc);
        }

        Ok(Self::new(channels[0], channels[1], channels[2]))
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn relative_luminance(self) -> f32 {
        let lin: LinSrgb<f32> = Srgb::new(self.r, self.g, self.b).into_linear();
        0.2126 * lin.red + 0.7152 * lin.green + 0.0722 * lin.blue
    }

    pub fn is_light(self) -> bool {
        self.relative_luminance() > LIGHT_THRESHOLD
    }

    /// Caption color for text drawn on top of this swatch.
    pub fn contrast_text(self) -> Color {
        if self.is_light() { Self::BLACK } else { Self::WHITE }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for (u8, u8, u8) {
    fn from(c: Color) -> Self {
        c.to_tuple()
    }
}

impl From<Srgb<u8>> for Color {
    fn from(c: Srgb<u8>) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}

impl From<Color> for Srgb<u8> {
    fn from(c: Color) -> Self {
        Srgb::new(c.r, c.g, c.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("rgb")) {
            Self::from_rgb_str(s)
        } else {
            Self::from_hex(s)
        }
    }
}

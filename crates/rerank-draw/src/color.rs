use std::fmt;
use std::str::FromStr;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::style::StyleError;

/// An sRGB color, written as a CSS-style name or `#RRGGBB` in configs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

const NAMED: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("lime", [0, 255, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
];

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);
    pub const WHITE: Color = Color([255, 255, 255]);
    pub const RED: Color = Color([255, 0, 0]);
    pub const LIME: Color = Color([0, 255, 0]);
    pub const YELLOW: Color = Color([255, 255, 0]);

    pub fn rgb(self) -> Rgb<u8> {
        Rgb(self.0)
    }

    fn name(self) -> Option<&'static str> {
        NAMED.iter().find(|(_, rgb)| *rgb == self.0).map(|(n, _)| *n)
    }
}

impl From<Rgb<u8>> for Color {
    fn from(value: Rgb<u8>) -> Self {
        Color(value.0)
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if let Some(hex) = t.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(StyleError::InvalidColor(s.to_string()));
            }
            let mut rgb = [0u8; 3];
            for (i, c) in rgb.iter_mut().enumerate() {
                *c = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16)
                    .map_err(|_| StyleError::InvalidColor(s.to_string()))?;
            }
            return Ok(Color(rgb));
        }
        let lower = t.to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(n, _)| *n == lower)
            .map(|(_, rgb)| Color(*rgb))
            .ok_or_else(|| StyleError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_hex() {
        assert_eq!("red".parse::<Color>(), Ok(Color::RED));
        assert_eq!("Lime".parse::<Color>(), Ok(Color::LIME));
        assert_eq!("#1a2B3c".parse::<Color>(), Ok(Color([0x1a, 0x2b, 0x3c])));
        assert!("#12345".parse::<Color>().is_err());
        assert!("#zz0000".parse::<Color>().is_err());
        assert!("chartreuse-ish".parse::<Color>().is_err());
    }

    #[test]
    fn displays_name_when_known() {
        assert_eq!(Color::YELLOW.to_string(), "yellow");
        assert_eq!(Color([1, 2, 3]).to_string(), "#010203");
    }

    #[test]
    fn serde_uses_strings() {
        let json = serde_json::to_string(&Color::WHITE).expect("serialize");
        assert_eq!(json, "\"white\"");
        let back: Color = serde_json::from_str("\"#ff0000\"").expect("deserialize");
        assert_eq!(back, Color::RED);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}

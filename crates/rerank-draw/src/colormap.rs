//! Built-in perceptual colormaps.
//!
//! Each map is a short table of evenly spaced anchor colors; sampling
//! interpolates linearly between neighbours.

use std::str::FromStr;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::style::StyleError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Turbo,
}

const VIRIDIS: &[[u8; 3]] = &[
    [0x44, 0x01, 0x54],
    [0x46, 0x32, 0x7e],
    [0x36, 0x5c, 0x8d],
    [0x27, 0x7f, 0x8e],
    [0x1f, 0xa1, 0x87],
    [0x4a, 0xc1, 0x6d],
    [0xa0, 0xda, 0x39],
    [0xfd, 0xe7, 0x25],
];

const PLASMA: &[[u8; 3]] = &[
    [0x0d, 0x08, 0x87],
    [0x53, 0x02, 0xa3],
    [0x8b, 0x0a, 0xa5],
    [0xb8, 0x32, 0x89],
    [0xdb, 0x5c, 0x68],
    [0xf4, 0x88, 0x49],
    [0xfe, 0xbd, 0x2a],
    [0xf0, 0xf9, 0x21],
];

const INFERNO: &[[u8; 3]] = &[
    [0x00, 0x00, 0x04],
    [0x28, 0x0b, 0x54],
    [0x65, 0x15, 0x6e],
    [0x9f, 0x2a, 0x63],
    [0xd4, 0x48, 0x42],
    [0xf5, 0x7d, 0x15],
    [0xfa, 0xc1, 0x27],
    [0xfc, 0xff, 0xa4],
];

const MAGMA: &[[u8; 3]] = &[
    [0x00, 0x00, 0x04],
    [0x22, 0x11, 0x50],
    [0x5f, 0x18, 0x7f],
    [0x98, 0x2d, 0x80],
    [0xd3, 0x43, 0x6e],
    [0xf8, 0x76, 0x5c],
    [0xfe, 0xbb, 0x81],
    [0xfc, 0xfd, 0xbf],
];

const TURBO: &[[u8; 3]] = &[
    [0x30, 0x12, 0x3b],
    [0x45, 0x60, 0xd6],
    [0x36, 0xaa, 0xf9],
    [0x1a, 0xe4, 0xb6],
    [0x72, 0xfe, 0x5e],
    [0xc8, 0xef, 0x34],
    [0xfa, 0xba, 0x39],
    [0xf6, 0x6b, 0x19],
    [0xca, 0x2a, 0x04],
    [0x7a, 0x04, 0x03],
];

impl Colormap {
    pub const ALL: [Colormap; 5] = [
        Colormap::Viridis,
        Colormap::Plasma,
        Colormap::Inferno,
        Colormap::Magma,
        Colormap::Turbo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Inferno => "inferno",
            Colormap::Magma => "magma",
            Colormap::Turbo => "turbo",
        }
    }

    fn anchors(self) -> &'static [[u8; 3]] {
        match self {
            Colormap::Viridis => VIRIDIS,
            Colormap::Plasma => PLASMA,
            Colormap::Inferno => INFERNO,
            Colormap::Magma => MAGMA,
            Colormap::Turbo => TURBO,
        }
    }

    /// Color at `t` in `[0, 1]`; out-of-range and NaN inputs are clamped.
    pub fn sample(self, t: f32) -> Rgb<u8> {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (anchors.len() - 1) as f32;
        let i = (pos.floor() as usize).min(anchors.len() - 2);
        let frac = pos - i as f32;
        let (a, b) = (anchors[i], anchors[i + 1]);
        let mut out = [0u8; 3];
        for c in 0..3 {
            let v = a[c] as f32 + (b[c] as f32 - a[c] as f32) * frac;
            out[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        Rgb(out)
    }

    /// Color of item `index` out of `count`, spreading items over the whole map.
    ///
    /// The first item maps to 0.0 and the last to 1.0.
    pub fn color_at(self, index: usize, count: usize) -> Rgb<u8> {
        let denom = count.saturating_sub(1).max(1);
        self.sample(index as f32 / denom as f32)
    }
}

impl FromStr for Colormap {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Colormap::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| StyleError::UnknownColormap(s.to_string()))
    }
}

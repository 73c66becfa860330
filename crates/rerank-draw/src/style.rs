use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::colormap::Colormap;

/// Errors from parsing style values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("unknown colormap `{0}`")]
    UnknownColormap(String),
    #[error("invalid color `{0}` (use a name like `red` or `#RRGGBB`)")]
    InvalidColor(String),
}

/// Appearance of a fixation path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceStyle {
    /// Colormap encoding temporal order, first fixation at 0.0.
    pub colormap: Colormap,
    /// Outline color of the last fixation.
    pub final_marker_color: Color,
    /// Draw the 1-based fixation index next to each marker.
    pub show_labels: bool,
    pub label_color: Color,
    /// Pixel size of one glyph cell.
    pub label_scale: u32,
    pub marker_radius: i32,
    /// Segment width in pixels; wider than the marker outline on purpose.
    pub line_width: u32,
    pub final_marker_radius: i32,
    pub final_marker_outline: i32,
}

impl Default for SequenceStyle {
    fn default() -> Self {
        Self {
            colormap: Colormap::Viridis,
            final_marker_color: Color::RED,
            show_labels: true,
            label_color: Color::WHITE,
            label_scale: 2,
            marker_radius: 4,
            line_width: 4,
            final_marker_radius: 6,
            final_marker_outline: 3,
        }
    }
}

/// Appearance of a single REC point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointStyle {
    pub color: Color,
    pub radius: i32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            color: Color::YELLOW,
            radius: 5,
        }
    }
}

/// Appearance of the gold bounding box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxStyle {
    pub color: Color,
    /// Outline width, growing inward from the box edge.
    pub width: u32,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            color: Color::RED,
            width: 3,
        }
    }
}

//! Overlay rendering for gaze paths, REC points and bounding boxes.
//!
//! Every drawing function takes the base image by reference and returns an
//! annotated copy; the base is never touched. Malformed or missing geometry
//! yields an unmodified copy instead of an error.
//!
//! ```
//! use image::RgbImage;
//! use rerank_core::CoordSpace;
//! use rerank_draw::{draw_sequence, SequenceStyle};
//!
//! let base = RgbImage::new(512, 320);
//! let path = [[10.0f32, 10.0], [20.0, 20.0]];
//! let out = draw_sequence(&base, &path, CoordSpace::Normalized, &SequenceStyle::default());
//! assert_ne!(out.as_raw(), base.as_raw());
//! ```

mod color;
mod colormap;
mod glyphs;
mod letterbox;
mod overlay;
mod sequence;
mod style;

pub use color::Color;
pub use colormap::Colormap;
pub use glyphs::{draw_digits, measure_digits};
pub use letterbox::{letterbox, Letterbox, DEFAULT_TARGET_SIZE};
pub use overlay::{draw_bbox, draw_point};
pub use sequence::{draw_sequence, layout_sequence, Marker, Segment, SequenceLayout};
pub use style::{BoxStyle, PointStyle, SequenceStyle, StyleError};

pub use rerank_core::{scale_factors, CoordSpace};

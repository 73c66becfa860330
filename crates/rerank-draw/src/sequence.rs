//! Fixation-path overlays.
//!
//! Rendering is split into a pure layout step (which points survive, where
//! they land in pixel space, which color each gets) and a painting step.

use image::{Rgb, RgbImage};
use nalgebra::Point2;
use rerank_core::{well_formed_points, AsPoint, CoordSpace};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::colormap::Colormap;
use crate::glyphs::draw_digits;
use crate::overlay::{fill_disk, pixel_center, ring, thick_segment};
use crate::style::SequenceStyle;

/// One fixation marker in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub center: Point2<f32>,
    pub color: Rgb<u8>,
    /// 1-based position in the path.
    pub label: usize,
}

/// Link between consecutive fixations, colored like its later end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point2<f32>,
    pub to: Point2<f32>,
    pub color: Rgb<u8>,
}

/// Pixel-space geometry of a fixation path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SequenceLayout {
    pub markers: Vec<Marker>,
    pub segments: Vec<Segment>,
}

impl SequenceLayout {
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Marker that terminates the path.
    pub fn final_marker(&self) -> Option<&Marker> {
        self.markers.last()
    }
}

/// Lay out a raw path on a `width`×`height` image.
///
/// Malformed entries are dropped before indexing, so colors and labels
/// follow the order of the surviving points.
pub fn layout_sequence<P: AsPoint>(
    points: &[P],
    space: CoordSpace,
    width: u32,
    height: u32,
    colormap: Colormap,
) -> SequenceLayout {
    let pts = well_formed_points(points);
    let dropped = points.len() - pts.len();
    if dropped > 0 {
        log::debug!("dropped {dropped} malformed fixation point(s)");
    }

    let n = pts.len();
    let markers: Vec<Marker> = pts
        .into_iter()
        .enumerate()
        .map(|(i, p)| Marker {
            center: space.to_pixel(p, width, height),
            color: colormap.color_at(i, n),
            label: i + 1,
        })
        .collect();
    let segments = markers
        .windows(2)
        .map(|pair| Segment {
            from: pair[0].center,
            to: pair[1].center,
            color: pair[1].color,
        })
        .collect();

    SequenceLayout { markers, segments }
}

/// Draw a fixation path colored by temporal order.
///
/// Returns an unmodified copy when no point survives filtering.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(points = points.len()))
)]
pub fn draw_sequence<P: AsPoint>(
    image: &RgbImage,
    points: &[P],
    space: CoordSpace,
    style: &SequenceStyle,
) -> RgbImage {
    let layout = layout_sequence(points, space, image.width(), image.height(), style.colormap);
    let mut canvas = image.clone();
    paint_layout(&mut canvas, &layout, style);
    canvas
}

fn paint_layout(canvas: &mut RgbImage, layout: &SequenceLayout, style: &SequenceStyle) {
    let label_color = style.label_color.rgb();
    for (i, marker) in layout.markers.iter().enumerate() {
        fill_disk(canvas, marker.center, style.marker_radius, marker.color);
        if i > 0 {
            let seg = &layout.segments[i - 1];
            thick_segment(canvas, seg.from, seg.to, style.line_width, seg.color);
        }
        if style.show_labels {
            let (x, y) = pixel_center(marker.center);
            draw_digits(
                canvas,
                x.saturating_add(5),
                y.saturating_sub(5),
                &marker.label.to_string(),
                label_color,
                style.label_scale,
            );
        }
    }

    if let Some(last) = layout.final_marker() {
        ring(
            canvas,
            last.center,
            style.final_marker_radius,
            style.final_marker_outline,
            style.final_marker_color.rgb(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use approx::assert_relative_eq;
    use serde_json::{json, Value};

    fn base() -> RgbImage {
        RgbImage::from_pixel(512, 320, Rgb([40, 40, 40]))
    }

    #[test]
    fn drops_malformed_entries_and_rescales() {
        let raw: Vec<Value> = vec![json!([10, 10]), json!([20, 20]), json!(["bad"])];
        let layout = layout_sequence(&raw, CoordSpace::Normalized, 512, 320, Colormap::Plasma);

        assert_eq!(layout.markers.len(), 2);
        assert_eq!(layout.segments.len(), 1);
        let (a, b) = (layout.markers[0].center, layout.markers[1].center);
        assert_relative_eq!(a.x, 51.2, epsilon = 1e-4);
        assert_relative_eq!(a.y, 32.0, epsilon = 1e-4);
        assert_relative_eq!(b.x, 102.4, epsilon = 1e-4);
        assert_relative_eq!(b.y, 64.0, epsilon = 1e-4);
        assert_eq!(layout.final_marker().map(|m| m.label), Some(2));
    }

    #[test]
    fn colors_follow_temporal_order() {
        let raw = [[0.0f32, 0.0], [1.0, 1.0], [2.0, 2.0]];
        let layout = layout_sequence(&raw, CoordSpace::Pixel, 10, 10, Colormap::Viridis);
        assert_eq!(layout.markers[0].color, Colormap::Viridis.sample(0.0));
        assert_eq!(layout.markers[1].color, Colormap::Viridis.sample(0.5));
        assert_eq!(layout.markers[2].color, Colormap::Viridis.sample(1.0));
        assert_eq!(layout.segments[0].color, layout.markers[1].color);
        assert_eq!(layout.segments[1].color, layout.markers[2].color);
    }

    #[test]
    fn single_point_uses_map_start() {
        let layout = layout_sequence(&[[5.0f32, 5.0]], CoordSpace::Pixel, 10, 10, Colormap::Magma);
        assert_eq!(layout.markers.len(), 1);
        assert!(layout.segments.is_empty());
        assert_eq!(layout.markers[0].color, Colormap::Magma.sample(0.0));
    }

    #[test]
    fn empty_or_malformed_path_is_pixel_identical() {
        let img = base();
        let style = SequenceStyle::default();

        let empty: [Value; 0] = [];
        let out = draw_sequence(&img, &empty, CoordSpace::Normalized, &style);
        assert_eq!(out.as_raw(), img.as_raw());

        let junk = vec![json!(["bad"]), json!(null), json!([1])];
        let out = draw_sequence(&img, &junk, CoordSpace::Normalized, &style);
        assert_eq!(out.as_raw(), img.as_raw());
    }

    #[test]
    fn paints_markers_segments_and_final_ring() {
        let img = base();
        let style = SequenceStyle {
            show_labels: false,
            final_marker_color: Color([0, 0, 255]),
            ..SequenceStyle::default()
        };
        let raw = vec![json!([10, 10]), json!([20, 20]), json!(["bad"])];
        let out = draw_sequence(&img, &raw, CoordSpace::Normalized, &style);

        let first = style.colormap.color_at(0, 2);
        let second = style.colormap.color_at(1, 2);
        // Segment drawn over the first marker's center in the later color.
        assert_eq!(out.get_pixel(51, 32), &second);
        // Off-segment edge of the first marker keeps its own color.
        assert_eq!(out.get_pixel(51, 29), &first);
        // Final marker center stays filled, its ring takes the final color.
        assert_eq!(out.get_pixel(102, 64), &second);
        assert_eq!(out.get_pixel(108, 64).0, [0, 0, 255]);
        // Untouched elsewhere, and the base is unchanged.
        assert_eq!(out.get_pixel(300, 200).0, [40, 40, 40]);
        assert_eq!(img.get_pixel(51, 32).0, [40, 40, 40]);
    }

    #[test]
    fn labels_are_drawn_next_to_markers() {
        let img = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        let style = SequenceStyle::default();
        let out = draw_sequence(&img, &[[50.0f32, 50.0]], CoordSpace::Pixel, &style);
        // "1" at (55, 45), scale 2: its top stem cell spans x 57..59.
        assert_eq!(out.get_pixel(57, 45).0, [255, 255, 255]);
        assert_eq!(out.get_pixel(55, 45).0, [0, 0, 0]);
    }
}

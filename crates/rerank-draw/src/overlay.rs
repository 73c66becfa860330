use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use nalgebra::Point2;
use rerank_core::{AsPoint, CoordSpace};

use crate::style::{BoxStyle, PointStyle};

// Keeps integer math in imageproc far away from overflow for absurd inputs.
const COORD_LIMIT: f32 = 1.0e5;

#[inline]
fn clamp_coord(v: f32) -> f32 {
    v.clamp(-COORD_LIMIT, COORD_LIMIT)
}

#[inline]
pub(crate) fn pixel_center(p: Point2<f32>) -> (i32, i32) {
    (clamp_coord(p.x).round() as i32, clamp_coord(p.y).round() as i32)
}

pub(crate) fn fill_disk(canvas: &mut RgbImage, center: Point2<f32>, radius: i32, color: Rgb<u8>) {
    draw_filled_circle_mut(canvas, pixel_center(center), radius.max(0), color);
}

/// Square-kernel stamping of a 1 px Bresenham line; leaves no gaps on diagonals.
pub(crate) fn thick_segment(
    canvas: &mut RgbImage,
    from: Point2<f32>,
    to: Point2<f32>,
    width: u32,
    color: Rgb<u8>,
) {
    let width = width.clamp(1, 64) as i32;
    let lo = -(width / 2);
    let (fx, fy) = (clamp_coord(from.x), clamp_coord(from.y));
    let (tx, ty) = (clamp_coord(to.x), clamp_coord(to.y));
    for ox in lo..lo + width {
        for oy in lo..lo + width {
            let (ox, oy) = (ox as f32, oy as f32);
            draw_line_segment_mut(canvas, (fx + ox, fy + oy), (tx + ox, ty + oy), color);
        }
    }
}

/// Annulus between `radius - thickness` (exclusive) and `radius` (inclusive).
pub(crate) fn ring(
    canvas: &mut RgbImage,
    center: Point2<f32>,
    radius: i32,
    thickness: i32,
    color: Rgb<u8>,
) {
    let radius = radius.max(0);
    let inner = (radius - thickness.max(1)).max(-1);
    let (cx, cy) = pixel_center(center);
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let (r2_out, r2_in) = (
        (radius as i64) * (radius as i64),
        (inner as i64) * (inner as i64),
    );
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = (dx as i64) * (dx as i64) + (dy as i64) * (dy as i64);
            if d2 > r2_out || (inner >= 0 && d2 <= r2_in) {
                continue;
            }
            let (px, py) = (cx as i64 + dx as i64, cy as i64 + dy as i64);
            if px >= 0 && py >= 0 && px < w && py < h {
                canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// Draw one filled disk at `point`, or return an unmodified copy when the
/// point is missing or malformed.
pub fn draw_point<P: AsPoint + ?Sized>(
    image: &RgbImage,
    point: &P,
    space: CoordSpace,
    style: &PointStyle,
) -> RgbImage {
    let mut canvas = image.clone();
    let Some(p) = point.as_point() else {
        return canvas;
    };
    let p = space.to_pixel(p, image.width(), image.height());
    fill_disk(&mut canvas, p, style.radius, style.color.rgb());
    canvas
}

/// Outline `[x0, y0, x1, y1]` (pixel space, inclusive corners).
///
/// The outline grows inward. Inverted or non-finite boxes are a no-op.
pub fn draw_bbox(image: &RgbImage, bbox: &[f32; 4], style: &BoxStyle) -> RgbImage {
    let mut canvas = image.clone();
    if bbox.iter().any(|v| !v.is_finite()) {
        return canvas;
    }
    let [x0, y0, x1, y1] = bbox.map(|v| clamp_coord(v).round() as i32);
    if x1 < x0 || y1 < y0 {
        return canvas;
    }
    let color = style.color.rgb();
    for k in 0..style.width.max(1) as i32 {
        let (w, h) = (x1 - x0 - 2 * k + 1, y1 - y0 - 2 * k + 1);
        if w <= 0 || h <= 0 {
            break;
        }
        let rect = Rect::at(x0 + k, y0 + k).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(&mut canvas, rect, color);
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use serde_json::{json, Value};

    fn gray(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([90, 90, 90]))
    }

    #[test]
    fn null_point_is_a_no_op() {
        let base = gray(64, 48);
        let none: Option<&Value> = None;
        let out = draw_point(&base, &none, CoordSpace::Pixel, &PointStyle::default());
        assert_eq!(out.as_raw(), base.as_raw());

        let null = json!(null);
        let out = draw_point(&base, &null, CoordSpace::Pixel, &PointStyle::default());
        assert_eq!(out.as_raw(), base.as_raw());
    }

    #[test]
    fn malformed_point_is_a_no_op() {
        let base = gray(64, 48);
        for raw in [json!(["bad"]), json!([1, 2, 3]), json!("12,4")] {
            let out = draw_point(&base, &raw, CoordSpace::Normalized, &PointStyle::default());
            assert_eq!(out.as_raw(), base.as_raw());
        }
    }

    #[test]
    fn draws_rescaled_point() {
        let base = gray(200, 100);
        let style = PointStyle {
            color: Color::YELLOW,
            radius: 3,
        };
        let out = draw_point(&base, &json!([50, 50]), CoordSpace::Normalized, &style);
        assert_eq!(out.get_pixel(100, 50).0, [255, 255, 0]);
        assert_eq!(out.get_pixel(50, 50).0, [90, 90, 90]);
        // Base untouched.
        assert_eq!(base.get_pixel(100, 50).0, [90, 90, 90]);
    }

    #[test]
    fn point_outside_canvas_is_clipped() {
        let base = gray(20, 20);
        let out = draw_point(&base, &[1.0e9f32, -1.0e9], CoordSpace::Pixel, &PointStyle::default());
        assert_eq!(out.as_raw(), base.as_raw());
    }

    #[test]
    fn bbox_outline_grows_inward() {
        let base = gray(40, 40);
        let out = draw_bbox(&base, &[10.0, 10.0, 29.0, 29.0], &BoxStyle::default());
        for k in 0..3 {
            assert_eq!(out.get_pixel(10 + k, 20).0, [255, 0, 0]);
            assert_eq!(out.get_pixel(29 - k, 20).0, [255, 0, 0]);
        }
        assert_eq!(out.get_pixel(13, 20).0, [90, 90, 90]);
        assert_eq!(out.get_pixel(9, 20).0, [90, 90, 90]);
    }

    #[test]
    fn inverted_bbox_is_a_no_op() {
        let base = gray(40, 40);
        let out = draw_bbox(&base, &[30.0, 10.0, 5.0, 20.0], &BoxStyle::default());
        assert_eq!(out.as_raw(), base.as_raw());
        let out = draw_bbox(&base, &[f32::NAN, 0.0, 5.0, 5.0], &BoxStyle::default());
        assert_eq!(out.as_raw(), base.as_raw());
    }

    #[test]
    fn ring_leaves_center_alone() {
        let mut img = gray(30, 30);
        ring(&mut img, Point2::new(15.0, 15.0), 6, 3, Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(15, 15).0, [90, 90, 90]);
        assert_eq!(img.get_pixel(21, 15).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(19, 15).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(18, 15).0, [90, 90, 90]);
    }
}

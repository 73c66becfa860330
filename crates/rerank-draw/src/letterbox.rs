use image::imageops::{self, FilterType};
use image::RgbImage;
use nalgebra::Point2;

use crate::color::Color;

/// Canvas size the gaze recordings were captured on.
pub const DEFAULT_TARGET_SIZE: (u32, u32) = (512, 320);

/// An image resized into a fixed canvas, plus the placement used.
#[derive(Clone, Debug)]
pub struct Letterbox {
    pub image: RgbImage,
    pub dx: u32,
    pub dy: u32,
    pub scale: f32,
}

impl Letterbox {
    /// Map a pixel of the source image onto the canvas.
    pub fn map_point(&self, p: Point2<f32>) -> Point2<f32> {
        Point2::new(
            p.x * self.scale + self.dx as f32,
            p.y * self.scale + self.dy as f32,
        )
    }

    /// Map a source-space `[x0, y0, x1, y1]` box onto the canvas.
    pub fn map_bbox(&self, bbox: &[f32; 4]) -> [f32; 4] {
        let a = self.map_point(Point2::new(bbox[0], bbox[1]));
        let b = self.map_point(Point2::new(bbox[2], bbox[3]));
        [a.x, a.y, b.x, b.y]
    }
}

/// Fit `image` inside `target` keeping its aspect ratio, centered on `fill`.
pub fn letterbox(image: &RgbImage, target: (u32, u32), fill: Color) -> Letterbox {
    let (tw, th) = target;
    let mut canvas = RgbImage::from_pixel(tw, th, fill.rgb());
    let (ow, oh) = image.dimensions();
    if ow == 0 || oh == 0 || tw == 0 || th == 0 {
        return Letterbox {
            image: canvas,
            dx: 0,
            dy: 0,
            scale: 0.0,
        };
    }

    let scale = (tw as f32 / ow as f32).min(th as f32 / oh as f32);
    let nw = ((ow as f32 * scale) as u32).clamp(1, tw);
    let nh = ((oh as f32 * scale) as u32).clamp(1, th);
    let resized = imageops::resize(image, nw, nh, FilterType::CatmullRom);
    let (dx, dy) = ((tw - nw) / 2, (th - nh) / 2);
    imageops::replace(&mut canvas, &resized, dx as i64, dy as i64);

    Letterbox {
        image: canvas,
        dx,
        dy,
        scale,
    }
}

//! 3×5 bitmap digits for fixation labels.
//!
//! Each row is three bits, most significant bit on the left.

use image::{Rgb, RgbImage};

const GLYPH_W: u32 = 3;
const GLYPH_H: usize = 5;

const DIGITS: [[u8; GLYPH_H]; 10] = [
    [0x7, 0x5, 0x5, 0x5, 0x7],
    [0x2, 0x6, 0x2, 0x2, 0x7],
    [0x7, 0x1, 0x7, 0x4, 0x7],
    [0x7, 0x1, 0x7, 0x1, 0x7],
    [0x5, 0x5, 0x7, 0x1, 0x1],
    [0x7, 0x4, 0x7, 0x1, 0x7],
    [0x7, 0x4, 0x7, 0x5, 0x7],
    [0x7, 0x1, 0x2, 0x4, 0x4],
    [0x7, 0x5, 0x7, 0x5, 0x7],
    [0x7, 0x5, 0x7, 0x1, 0x7],
];

/// Width in pixels of `text` drawn at `scale`, including one cell of spacing per glyph.
pub fn measure_digits(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * (GLYPH_W + 1) * scale.max(1)
}

/// Draw the decimal digits of `text` with the top-left corner at `(x, y)`.
///
/// Non-digit characters advance the cursor without drawing. Pixels outside
/// the canvas are clipped.
pub fn draw_digits(canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>, scale: u32) {
    let scale = scale.max(1) as i32;
    let advance = (GLYPH_W as i32 + 1) * scale;
    let mut cx = x;
    for ch in text.chars() {
        if let Some(d) = ch.to_digit(10) {
            draw_glyph(canvas, cx, y, &DIGITS[d as usize], color, scale);
        }
        cx = cx.saturating_add(advance);
    }
}

fn draw_glyph(canvas: &mut RgbImage, x: i32, y: i32, rows: &[u8; GLYPH_H], color: Rgb<u8>, scale: i32) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_W as i32 {
            if (bits >> (GLYPH_W as i32 - 1 - col)) & 1 == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let px = x as i64 + (col * scale + dx) as i64;
                    let py = y as i64 + (row as i32 * scale + dy) as i64;
                    if px >= 0 && py >= 0 && px < w && py < h {
                        canvas.put_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(img: &RgbImage) -> usize {
        img.pixels().filter(|p| p.0 != [0, 0, 0]).count()
    }

    #[test]
    fn one_lights_eight_cells() {
        let mut img = RgbImage::new(10, 10);
        draw_digits(&mut img, 0, 0, "1", Rgb([255, 255, 255]), 1);
        assert_eq!(lit(&img), 8);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn scale_multiplies_area() {
        let mut img = RgbImage::new(20, 20);
        draw_digits(&mut img, 0, 0, "8", Rgb([255, 0, 0]), 2);
        // "8" lights 13 cells, each 2×2.
        assert_eq!(lit(&img), 13 * 4);
    }

    #[test]
    fn clips_at_canvas_edges() {
        let mut img = RgbImage::new(4, 4);
        draw_digits(&mut img, -2, -2, "12", Rgb([255, 255, 255]), 3);
        draw_digits(&mut img, i32::MAX - 1, 0, "9", Rgb([255, 255, 255]), 3);
        assert!(lit(&img) > 0);
    }

    #[test]
    fn measures_width() {
        assert_eq!(measure_digits("12", 2), 16);
        assert_eq!(measure_digits("", 2), 0);
    }
}

//! Coordinate spaces and lenient point parsing.
//!
//! Point data comes from several upstream producers and is frequently
//! malformed. Everything here degrades to `None` instead of failing.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Extent of one axis in the normalized coordinate space.
pub const NORMALIZED_EXTENT: f32 = 100.0;

/// Unit convention of a point source.
///
/// There is no default: callers must state which convention their data uses.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordSpace {
    /// 0..100 per axis, independent of the image resolution.
    Normalized,
    /// Pixel coordinates of a specific base image.
    Pixel,
}

impl CoordSpace {
    /// Convert `p` into pixel coordinates of a `width`×`height` image.
    pub fn to_pixel(self, p: Point2<f32>, width: u32, height: u32) -> Point2<f32> {
        match self {
            CoordSpace::Pixel => p,
            CoordSpace::Normalized => {
                let (sx, sy) = scale_factors(width, height);
                Point2::new(p.x * sx, p.y * sy)
            }
        }
    }
}

impl std::str::FromStr for CoordSpace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normalized" | "norm" => Ok(CoordSpace::Normalized),
            "pixel" | "px" => Ok(CoordSpace::Pixel),
            other => Err(format!("unknown coordinate space `{other}` (use normalized|pixel)")),
        }
    }
}

/// Per-axis factors from normalized to pixel coordinates.
#[inline]
pub fn scale_factors(width: u32, height: u32) -> (f32, f32) {
    (
        width as f32 / NORMALIZED_EXTENT,
        height as f32 / NORMALIZED_EXTENT,
    )
}

/// Inverse of [`CoordSpace::to_pixel`] for normalized data.
pub fn pixel_to_normalized(p: Point2<f32>, width: u32, height: u32) -> Point2<f32> {
    let (sx, sy) = scale_factors(width, height);
    Point2::new(p.x / sx, p.y / sy)
}

/// Anything that may or may not describe a 2-D point.
pub trait AsPoint {
    /// The point, if `self` is a well-formed pair of finite numbers.
    fn as_point(&self) -> Option<Point2<f32>>;
}

fn finite(x: f32, y: f32) -> Option<Point2<f32>> {
    (x.is_finite() && y.is_finite()).then(|| Point2::new(x, y))
}

impl AsPoint for Value {
    fn as_point(&self) -> Option<Point2<f32>> {
        let Value::Array(items) = self else {
            return None;
        };
        let [x, y] = items.as_slice() else {
            return None;
        };
        finite(x.as_f64()? as f32, y.as_f64()? as f32)
    }
}

impl AsPoint for Point2<f32> {
    fn as_point(&self) -> Option<Point2<f32>> {
        finite(self.x, self.y)
    }
}

impl AsPoint for [f32; 2] {
    fn as_point(&self) -> Option<Point2<f32>> {
        finite(self[0], self[1])
    }
}

impl<T: AsPoint> AsPoint for Option<T> {
    fn as_point(&self) -> Option<Point2<f32>> {
        self.as_ref().and_then(AsPoint::as_point)
    }
}

impl<T: AsPoint + ?Sized> AsPoint for &T {
    fn as_point(&self) -> Option<Point2<f32>> {
        (**self).as_point()
    }
}

/// Keep only the well-formed points of `raw`, in order.
pub fn well_formed_points<P: AsPoint>(raw: &[P]) -> Vec<Point2<f32>> {
    raw.iter().filter_map(AsPoint::as_point).collect()
}

/// Parse `[x0, y0, x1, y1]`; anything else yields `None`.
pub fn bbox_from_value(value: &Value) -> Option<[f32; 4]> {
    let items = value.as_array()?;
    if items.len() != 4 {
        return None;
    }
    let mut out = [0.0f32; 4];
    for (dst, v) in out.iter_mut().zip(items) {
        let x = v.as_f64()? as f32;
        if !x.is_finite() {
            return None;
        }
        *dst = x;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn normalized_to_pixel_uses_image_size() {
        let p = CoordSpace::Normalized.to_pixel(Point2::new(10.0, 10.0), 512, 320);
        assert_relative_eq!(p.x, 51.2, epsilon = 1e-4);
        assert_relative_eq!(p.y, 32.0, epsilon = 1e-4);
    }

    #[test]
    fn pixel_space_is_passthrough() {
        let p = CoordSpace::Pixel.to_pixel(Point2::new(10.0, 12.5), 512, 320);
        assert_eq!(p, Point2::new(10.0, 12.5));
    }

    #[test]
    fn conversion_round_trips() {
        for &(w, h) in &[(512u32, 320u32), (640, 480), (1, 1), (1999, 37)] {
            for &(x, y) in &[(0.0f32, 0.0f32), (12.5, 99.9), (100.0, 50.0), (33.3, 66.6)] {
                let px = CoordSpace::Normalized.to_pixel(Point2::new(x, y), w, h);
                let back = pixel_to_normalized(px, w, h);
                assert_relative_eq!(back.x, x, epsilon = 1e-3);
                assert_relative_eq!(back.y, y, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn filters_malformed_points() {
        let raw = vec![
            json!([10, 10]),
            json!([20.5, 20]),
            json!(["bad"]),
            json!([1, 2, 3]),
            json!(["1", 2]),
            json!([true, false]),
            json!(null),
            json!({"x": 1, "y": 2}),
        ];
        let pts = well_formed_points(&raw);
        assert_eq!(pts, vec![Point2::new(10.0, 10.0), Point2::new(20.5, 20.0)]);
    }

    #[test]
    fn non_finite_points_are_rejected() {
        assert!([f32::NAN, 1.0].as_point().is_none());
        assert!(Point2::new(1.0, f32::INFINITY).as_point().is_none());
        assert!(None::<Value>.as_point().is_none());
    }

    #[test]
    fn parses_bbox_leniently() {
        assert_eq!(
            bbox_from_value(&json!([1, 2.5, 30, 40])),
            Some([1.0, 2.5, 30.0, 40.0])
        );
        assert_eq!(bbox_from_value(&json!([1, 2, 3])), None);
        assert_eq!(bbox_from_value(&json!("box")), None);
    }

    #[test]
    fn parses_space_names() {
        assert_eq!("pixel".parse::<CoordSpace>(), Ok(CoordSpace::Pixel));
        assert_eq!("Normalized".parse::<CoordSpace>(), Ok(CoordSpace::Normalized));
        assert!("meters".parse::<CoordSpace>().is_err());
    }
}

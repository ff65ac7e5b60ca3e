use image::{Rgba, RgbaImage};

use qrdot_core::{Color, ShapeStyle};

/// Something that can fill a `size`-sided shape with its top-left corner at `(x, y)`.
///
/// Coordinates are signed and may fall partially or entirely outside the canvas: anything outside is clipped. Pixels
/// are overwritten, not blended.
pub trait ShapeDrawer {
    fn fill(&self, canvas: &mut RgbaImage, x: i64, y: i64, size: u32, color: Color);
}

/// Draws filled axis-aligned squares.
#[derive(Debug, Clone, Copy, Default)]
pub struct Square;

/// Draws filled circles inscribed in the square a [Square] would cover.
#[derive(Debug, Clone, Copy, Default)]
pub struct Circle;

impl ShapeDrawer for Square {
    fn fill(&self, canvas: &mut RgbaImage, x: i64, y: i64, size: u32, color: Color) {
        fill_square(canvas, x, y, size, color)
    }
}

impl ShapeDrawer for Circle {
    fn fill(&self, canvas: &mut RgbaImage, x: i64, y: i64, size: u32, color: Color) {
        fill_circle(canvas, x, y, size, color)
    }
}

/// Get the drawer for `style`.
pub fn drawer(style: ShapeStyle) -> &'static dyn ShapeDrawer {
    match style {
        ShapeStyle::Rect => &Square,
        ShapeStyle::Point => &Circle,
    }
}

/// Convert a [Color] into an `image` pixel.
pub(crate) fn pixel(color: Color) -> Rgba<u8> {
    Rgba(color.to_array())
}

/// Intersect the `size`-sided square at `(x, y)` with the canvas, returning the covered column and row ranges.
fn clip(
    canvas: &RgbaImage,
    x: i64,
    y: i64,
    size: u32,
) -> (std::ops::Range<u32>, std::ops::Range<u32>) {
    let span = |start: i64, limit: u32| {
        let end = (start + i64::from(size)).clamp(0, i64::from(limit));
        let start = start.clamp(0, end);
        // Both bounds lie in 0..=limit, so they fit in u32.
        (start as u32)..(end as u32)
    };
    (span(x, canvas.width()), span(y, canvas.height()))
}

/// Fill the `size`-sided square with its top-left corner at `(x, y)`.
pub fn fill_square(canvas: &mut RgbaImage, x: i64, y: i64, size: u32, color: Color) {
    let (columns, rows) = clip(canvas, x, y, size);
    let pixel = pixel(color);
    for py in rows {
        for px in columns.clone() {
            canvas.put_pixel(px, py, pixel);
        }
    }
}

/// Fill the circle of diameter `size` inscribed in the square with its top-left corner at `(x, y)`. A pixel is
/// covered when its centre lies strictly inside the circle.
pub fn fill_circle(canvas: &mut RgbaImage, x: i64, y: i64, size: u32, color: Color) {
    let radius = f64::from(size) / 2.0;
    let (cx, cy) = (x as f64 + radius, y as f64 + radius);
    let (columns, rows) = clip(canvas, x, y, size);
    let pixel = pixel(color);
    for py in rows {
        let dy = f64::from(py) + 0.5 - cy;
        for px in columns.clone() {
            let dx = f64::from(px) + 0.5 - cx;
            if dx * dx + dy * dy < radius * radius {
                canvas.put_pixel(px, py, pixel);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const RED: Color = Color::rgba(0xff, 0, 0, 0xff);

    fn blank(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, pixel(Color::WHITE))
    }

    fn painted(canvas: &RgbaImage) -> Vec<(u32, u32)> {
        canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == pixel(RED))
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_square_covers_exact_region() {
        let mut canvas = blank(10, 10);
        fill_square(&mut canvas, 2, 3, 4, RED);
        let pixels = painted(&canvas);
        assert_eq!(pixels.len(), 16);
        assert!(pixels.iter().all(|&(x, y)| (2..6).contains(&x) && (3..7).contains(&y)));
    }

    #[test]
    fn test_square_is_clipped() {
        let mut canvas = blank(5, 5);
        fill_square(&mut canvas, -2, 3, 4, RED);
        assert_eq!(painted(&canvas).len(), 2 * 2);
        fill_square(&mut canvas, 10, 10, 4, RED);
        fill_square(&mut canvas, -10, -10, 4, RED);
        assert_eq!(painted(&canvas).len(), 2 * 2);
    }

    #[test]
    fn test_circle_is_inside_square() {
        let mut canvas = blank(20, 20);
        fill_circle(&mut canvas, 3, 4, 11, RED);
        let pixels = painted(&canvas);
        assert!(pixels.iter().all(|&(x, y)| (3..14).contains(&x) && (4..15).contains(&y)));
        assert!(pixels.len() < 11 * 11);
        // Corners of the square are left alone, the centre and the edge midpoints are covered.
        assert!(!pixels.contains(&(3, 4)));
        assert!(!pixels.contains(&(13, 14)));
        assert!(pixels.contains(&(8, 9)));
        assert!(pixels.contains(&(3, 9)));
        assert!(pixels.contains(&(8, 14)));
    }

    #[test]
    fn test_circle_is_symmetric() {
        let mut canvas = blank(12, 12);
        fill_circle(&mut canvas, 0, 0, 12, RED);
        let pixels = painted(&canvas);
        for &(x, y) in &pixels {
            assert!(pixels.contains(&(11 - x, y)));
            assert!(pixels.contains(&(x, 11 - y)));
            assert!(pixels.contains(&(y, x)));
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        let mut canvas = blank(4, 4);
        fill_circle(&mut canvas, 1, 1, 0, RED);
        fill_square(&mut canvas, 1, 1, 0, RED);
        assert!(painted(&canvas).is_empty());
        fill_circle(&mut canvas, 1, 1, 1, RED);
        assert_eq!(painted(&canvas), vec![(1, 1)]);
    }

    #[test]
    fn test_drawer_selection() {
        let mut square = blank(8, 8);
        let mut circle = blank(8, 8);
        drawer(ShapeStyle::Rect).fill(&mut square, 0, 0, 8, RED);
        drawer(ShapeStyle::Point).fill(&mut circle, 0, 0, 8, RED);
        assert_eq!(painted(&square).len(), 64);
        assert!(painted(&circle).len() < 64);
    }
}

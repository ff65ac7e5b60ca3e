use image::RgbaImage;
use itertools::Itertools;
use rand::Rng;

use qrdot_core::Color;

use crate::layout::LayoutGeometry;
use crate::shape::fill_circle;

/// Check whether a shape of size `inner_size` anchored at `(x, y)` stays inside the circle inscribed in a
/// `bounds_width` x `bounds_height` canvas: the distance from `(x, y)` to the canvas centre plus `inner_size` must be
/// strictly less than half the canvas width.
/// # Example
/// ```
/// use qrdot_render::inside_circle;
/// assert!(inside_circle(200.0, 200.0, 400, 400, 11));
/// assert!(!inside_circle(200.0, 11.0, 400, 400, 11));
/// assert!(!inside_circle(0.0, 0.0, 400, 400, 11));
/// ```
pub fn inside_circle(x: f64, y: f64, bounds_width: u32, bounds_height: u32, inner_size: u32) -> bool {
    let radius = f64::from(bounds_width) / 2.0;
    let (cx, cy) = (radius, f64::from(bounds_height) / 2.0);
    let distance = (x - cx).hypot(y - cy);
    distance + f64::from(inner_size) < radius
}

/// Values from `start` moving by `step` while still short of `end`.
fn ramp(start: i64, step: i64, end: i64) -> impl Iterator<Item = i64> + Clone {
    std::iter::successors(Some(start), move |v| Some(v + step))
        .take_while(move |&v| if step > 0 { v < end } else { v > end })
}

/// Candidate top-left positions of stipple dots, on the module grid but outside the symbol.
///
/// The margin is scanned in three bands, each moving outward from the symbol: rows above the symbol, columns to the
/// left and right of every symbol row, and rows below the symbol. The corners of the margin are not scanned. Bands
/// start at the symbol's edges so every dot stays aligned with the module grid even when the padding is uneven.
pub fn candidates(geometry: &LayoutGeometry) -> impl Iterator<Item = (i64, i64)> {
    let step = i64::from(geometry.scale);
    let left = i64::from(geometry.left_padding);
    let top = i64::from(geometry.top_padding);
    let width = i64::from(geometry.output_width);
    let height = i64::from(geometry.output_height);
    let (right, bottom) = (left + i64::from(geometry.symbol_size()), top + i64::from(geometry.symbol_size()));

    let columns = ramp(left, step, right);
    let rows = ramp(top, step, bottom);
    let above = ramp(top - step, -step, -step).cartesian_product(columns.clone());
    let beside = rows.flat_map(move |y| {
        ramp(left - step, -step, -step)
            .chain(ramp(right, step, width))
            .map(move |x| (y, x))
    });
    let below = ramp(bottom, step, height).cartesian_product(columns);
    above.chain(beside).chain(below).map(|(y, x)| (x, y))
}

/// Scatter dots of `color` around the symbol. Each candidate position whose dot fits in the canvas' inscribed circle
/// gets painted with probability 1/2. Returns the number of dots painted.
pub fn stipple<R>(canvas: &mut RgbaImage, geometry: &LayoutGeometry, color: Color, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    let size = geometry.inner_size();
    let radius = f64::from(size) / 2.0;
    let mut painted = 0;
    for (x, y) in candidates(geometry) {
        // Test the dot's centre so that the whole dot stays within the circle.
        let inside = inside_circle(
            x as f64 + radius,
            y as f64 + radius,
            geometry.output_width,
            geometry.output_height,
            size,
        );
        if inside && rng.gen_bool(0.5) {
            fill_circle(canvas, x, y, size, color);
            painted += 1;
        }
    }
    log::trace!("stippled {} dots", painted);
    painted
}

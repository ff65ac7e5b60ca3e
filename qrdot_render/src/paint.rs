use image::RgbaImage;
use rand::Rng;

use qrdot_core::{Color, ModuleMatrix, RenderConfig, ShapeStyle};

use crate::layout::{LayoutGeometry, FINDER_PATTERN_SIZE};
use crate::shape::{self, ShapeDrawer};
use crate::stipple;

/// Paints a [ModuleMatrix] onto a pixel canvas according to a [LayoutGeometry] and a [RenderConfig].
pub struct Painter<'a> {
    geometry: LayoutGeometry,
    config: &'a RenderConfig,
    drawer: &'static dyn ShapeDrawer,
    canvas: RgbaImage,
}

impl<'a> Painter<'a> {
    /// Create a new [Painter] with a canvas cleared to the background color.
    pub fn new(geometry: LayoutGeometry, config: &'a RenderConfig) -> Self {
        Self {
            geometry,
            config,
            drawer: shape::drawer(config.shape_style),
            canvas: RgbaImage::from_pixel(
                geometry.output_width,
                geometry.output_height,
                shape::pixel(config.background),
            ),
        }
    }

    /// Paint `matrix`, using `rng` to decide where background dots go.
    pub fn paint<R>(mut self, matrix: &ModuleMatrix, rng: &mut R) -> RgbaImage
    where
        R: Rng + ?Sized,
    {
        debug_assert_eq!(matrix.dimension(), self.geometry.dimension as usize);
        if self.geometry.inner_size() == 0 {
            log::warn!("scale {} is too small to paint data modules", self.geometry.scale);
        }
        self.paint_modules(matrix);
        if self.config.shape_style == ShapeStyle::Point && self.config.background_round {
            stipple::stipple(&mut self.canvas, &self.geometry, self.config.foreground, rng);
        }
        // Finder patterns go last so they cover anything painted below them.
        self.paint_finder_patterns();
        self.canvas
    }

    /// Paint every dark module outside the finder pattern zones.
    fn paint_modules(&mut self, matrix: &ModuleMatrix) {
        let dimension = matrix.dimension();
        let size = self.geometry.inner_size();
        for (x, y) in matrix.dark_modules() {
            if in_finder_zone(x, y, dimension) {
                continue;
            }
            // Positions are bounded by the dimension, which the layout already fit into u32.
            let (px, py) = self.geometry.module_origin(x as u32, y as u32);
            self.fill(px, py, size, self.config.foreground);
        }
    }

    #[rustfmt::skip]
    fn paint_finder_patterns(&mut self) {
        let corner = self.geometry.finder_size();
        let (outer, middle, inner) = (self.config.outer_color, self.config.middle_color, self.config.inner_color);
        for (x, y) in self.geometry.finder_origins() {
            self.fill(x,                  y,                  corner,         outer);
            self.fill(x + corner / 7,     y + corner / 7,     corner * 5 / 7, middle);
            self.fill(x + corner * 2 / 7, y + corner * 2 / 7, corner * 3 / 7, inner);
        }
    }

    fn fill(&mut self, x: u32, y: u32, size: u32, color: Color) {
        self.drawer
            .fill(&mut self.canvas, i64::from(x), i64::from(y), size, color)
    }
}

/// Render `matrix` into a new canvas. See [Painter].
pub fn render<R>(
    matrix: &ModuleMatrix,
    geometry: &LayoutGeometry,
    config: &RenderConfig,
    rng: &mut R,
) -> RgbaImage
where
    R: Rng + ?Sized,
{
    Painter::new(*geometry, config).paint(matrix, rng)
}

/// Whether module `(x, y)` of a `dimension`-sided matrix belongs to one of the three finder pattern zones (top-left,
/// top-right, bottom-left). Zones include the separator towards the symbol's interior.
/// # Example
/// ```
/// use qrdot_render::in_finder_zone;
/// assert!(in_finder_zone(7, 7, 21));
/// assert!(in_finder_zone(14, 0, 21));
/// assert!(in_finder_zone(0, 14, 21));
/// assert!(!in_finder_zone(14, 14, 21));
/// assert!(!in_finder_zone(8, 0, 21));
/// ```
pub fn in_finder_zone(x: usize, y: usize, dimension: usize) -> bool {
    let near = FINDER_PATTERN_SIZE as usize;
    let far = dimension.saturating_sub(near);
    (x <= near && y <= near) || (x >= far && y <= near) || (x <= near && y >= far)
}

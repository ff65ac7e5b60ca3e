mod encode;
mod export;
mod layout;
mod paint;
mod shape;
mod stipple;

use image::RgbaImage;
use rand::rngs::StdRng;
use rand::SeedableRng;

use qrdot_core::{RenderConfig, RenderOptions};

pub use encode::{EncodingError, SymbolEncoder};
pub use export::{encode_image, ExportError, ImageKind};
pub use layout::{plan, LayoutError, LayoutGeometry, FINDER_PATTERN_SIZE};
pub use paint::{in_finder_zone, render, Painter};
pub use shape::{drawer, fill_circle, fill_square, Circle, ShapeDrawer, Square};
pub use stipple::{candidates, inside_circle, stipple};

/// Failure to turn text into a styled image.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Encode `text` and render it as a styled image.
///
/// Missing or malformed `options` fall back to their defaults: a 400x400 canvas, a quiet zone of 4 modules, black
/// square modules on white, error correction level H and no background dots. Background dots are placed using a
/// random source seeded from `options.seed`, or from the operating system when no seed is given.
///
/// All failures are detected before the canvas is allocated.
/// # Example
/// ```
/// use qrdot_core::RenderOptions;
/// let image = qrdot_render::generate("hello", &RenderOptions::default()).unwrap();
/// assert_eq!(image.dimensions(), (400, 400));
/// ```
pub fn generate(text: &str, options: &RenderOptions) -> Result<RgbaImage, Error> {
    generate_within(text, options, u32::MAX)
}

/// Like [generate], but fail with [LayoutError::ExceedsLimit] when the planned canvas, quiet zone included, is wider
/// or taller than `max_side` pixels.
/// # Example
/// ```
/// use qrdot_core::RenderOptions;
/// let options = RenderOptions { quiet_zone: Some(100_000), ..Default::default() };
/// assert!(qrdot_render::generate_within("hello", &options, 4096).is_err());
/// ```
pub fn generate_within(text: &str, options: &RenderOptions, max_side: u32) -> Result<RgbaImage, Error> {
    let config = RenderConfig::resolve(options);
    let symbol = SymbolEncoder::new().with_ecl(config.ecl).encode(text)?;
    let geometry = LayoutGeometry::plan(symbol.dimension(), &config)?;
    geometry.check_limit(max_side)?;
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(render(symbol.matrix(), &geometry, &config, &mut rng))
}

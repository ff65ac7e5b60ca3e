//! Styled QR symbol rendering.
//!
//! See [qrdot_render::generate] for the single entry point.

pub use qrdot_core;
pub use qrdot_render;

pub use qrdot_core::{Color, RenderConfig, RenderOptions, ShapeStyle};
pub use qrdot_render::{encode_image, generate, generate_within, Error, ImageKind};

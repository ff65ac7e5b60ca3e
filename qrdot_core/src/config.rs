use std::str::FromStr;

use crate::{Color, Ecl};

/// Canvas side, in pixels, used when the caller gives none.
pub const DEFAULT_CANVAS_SIZE: u32 = 400;
/// Quiet zone, in modules, used when the caller gives none.
pub const DEFAULT_QUIET_ZONE: u32 = 4;

/// Shape used to paint modules and finder patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShapeStyle {
    /// Axis-aligned filled squares.
    #[default]
    Rect,
    /// Filled circles inscribed in the module square.
    Point,
}

impl std::fmt::Display for ShapeStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeStyle::Rect => f.write_str("rect"),
            ShapeStyle::Point => f.write_str("point"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape style '{0}', expected 'rect' or 'point'")]
pub struct UnknownShapeStyle(pub String);

impl FromStr for ShapeStyle {
    type Err = UnknownShapeStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rect" => Ok(ShapeStyle::Rect),
            "point" => Ok(ShapeStyle::Point),
            _ => Err(UnknownShapeStyle(s.to_owned())),
        }
    }
}

/// Caller-supplied rendering options. Every field may be absent, and textual fields may be malformed: both cases
/// fall back to the documented default when resolved into a [RenderConfig].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub canvas_width: Option<u32>,
    pub canvas_height: Option<u32>,
    pub quiet_zone: Option<u32>,
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub outer_color: Option<String>,
    pub middle_color: Option<String>,
    pub inner_color: Option<String>,
    pub shape_style: Option<String>,
    pub background_round: Option<bool>,
    pub ecl: Option<String>,
    /// Seed of the random source used for background stippling.
    pub seed: Option<u64>,
}

/// Fully resolved rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub quiet_zone: u32,
    pub foreground: Color,
    pub background: Color,
    pub outer_color: Color,
    pub middle_color: Color,
    pub inner_color: Color,
    pub shape_style: ShapeStyle,
    pub background_round: bool,
    pub ecl: Ecl,
}

impl RenderConfig {
    /// Resolve `options` into a complete configuration.
    ///
    /// Finder pattern colors default to the foreground, except the middle layer which defaults to the background made
    /// fully opaque.
    pub fn resolve(options: &RenderOptions) -> Self {
        let foreground = resolve_color("foreground", options.foreground.as_deref(), Color::BLACK);
        let background = resolve_color("background", options.background.as_deref(), Color::WHITE);
        Self {
            canvas_width: options.canvas_width.unwrap_or(DEFAULT_CANVAS_SIZE),
            canvas_height: options.canvas_height.unwrap_or(DEFAULT_CANVAS_SIZE),
            quiet_zone: options.quiet_zone.unwrap_or(DEFAULT_QUIET_ZONE),
            foreground,
            background,
            outer_color: resolve_color("outer color", options.outer_color.as_deref(), foreground),
            middle_color: resolve_color("middle color", options.middle_color.as_deref(), background.opaque()),
            inner_color: resolve_color("inner color", options.inner_color.as_deref(), foreground),
            shape_style: resolve_parsed("shape style", options.shape_style.as_deref()),
            background_round: options.background_round.unwrap_or(false),
            ecl: resolve_parsed("error correction level", options.ecl.as_deref()),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::resolve(&RenderOptions::default())
    }
}

fn resolve_color(name: &str, text: Option<&str>, default: Color) -> Color {
    let Some(text) = text else {
        return default;
    };
    Color::parse_hex(text).unwrap_or_else(|| {
        log::warn!("ignoring malformed {} '{}', using {}", name, text, default);
        default
    })
}

fn resolve_parsed<T>(name: &str, text: Option<&str>) -> T
where
    T: FromStr + Default + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    let Some(text) = text else {
        return T::default();
    };
    text.parse().unwrap_or_else(|err| {
        let default = T::default();
        log::warn!("ignoring {}: {}, using {}", name, err, default);
        default
    })
}

use image::{Rgba, RgbaImage};

use qrdot_core::{RenderConfig, RenderOptions};
use qrdot_render::{generate, generate_within, Error, LayoutError, LayoutGeometry};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 0xff]);
const WHITE: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// "hello" fits a version 1 symbol at ECL H.
const TEXT: &str = "hello";

fn geometry(options: &RenderOptions) -> LayoutGeometry {
    LayoutGeometry::plan(21, &RenderConfig::resolve(options)).unwrap()
}

fn dotted(seed: Option<u64>) -> RenderOptions {
    RenderOptions {
        shape_style: Some("point".into()),
        background_round: Some(true),
        seed,
        ..Default::default()
    }
}

fn symbol_pixels(canvas: &RgbaImage, geometry: &LayoutGeometry) -> Vec<Rgba<u8>> {
    canvas
        .enumerate_pixels()
        .filter(|(x, y, _)| geometry.in_symbol(*x, *y))
        .map(|(_, _, p)| *p)
        .collect()
}

#[test]
fn test_default_render() {
    let canvas = generate(TEXT, &RenderOptions::default()).unwrap();
    assert_eq!(canvas.dimensions(), (400, 400));
    assert_eq!(*canvas.get_pixel(0, 0), WHITE);
    assert!(canvas.pixels().all(|p| *p == BLACK || *p == WHITE));
    let geometry = geometry(&RenderOptions::default());
    let (x, y) = geometry.finder_origins()[0];
    let scale = geometry.scale;
    assert_eq!(*canvas.get_pixel(x, y), BLACK);
    assert_eq!(*canvas.get_pixel(x + scale, y + scale), WHITE);
    assert_eq!(*canvas.get_pixel(x + 2 * scale, y + 2 * scale), BLACK);
}

#[test]
fn test_small_canvas() {
    let options = RenderOptions {
        canvas_width: Some(100),
        canvas_height: Some(100),
        ..Default::default()
    };
    let canvas = generate(TEXT, &options).unwrap();
    assert_eq!(canvas.dimensions(), (100, 100));
    assert_eq!(geometry(&options).scale, 3);
}

#[test]
fn test_canvas_grows_to_fit_symbol() {
    let options = RenderOptions {
        canvas_width: Some(10),
        canvas_height: Some(0),
        quiet_zone: Some(2),
        ..Default::default()
    };
    let canvas = generate(TEXT, &options).unwrap();
    assert_eq!(canvas.dimensions(), (25, 25));
}

#[test]
fn test_middle_ring_is_opaque_on_translucent_background() {
    let options = RenderOptions {
        background: Some("#3366FF40".into()),
        ..Default::default()
    };
    let canvas = generate(TEXT, &options).unwrap();
    let geometry = geometry(&options);
    assert_eq!(*canvas.get_pixel(0, 0), Rgba([0x33, 0x66, 0xff, 0x40]));
    for (x, y) in geometry.finder_origins() {
        let ring = geometry.scale;
        assert_eq!(*canvas.get_pixel(x + ring, y + ring), Rgba([0x33, 0x66, 0xff, 0xff]));
    }
}

#[test]
fn test_custom_finder_colors() {
    let options = RenderOptions {
        outer_color: Some("#FF0000".into()),
        middle_color: Some("#00FF00".into()),
        inner_color: Some("#0000FF".into()),
        ..Default::default()
    };
    let canvas = generate(TEXT, &options).unwrap();
    let geometry = geometry(&options);
    let scale = geometry.scale;
    for (x, y) in geometry.finder_origins() {
        assert_eq!(*canvas.get_pixel(x, y), Rgba([0xff, 0, 0, 0xff]));
        assert_eq!(*canvas.get_pixel(x + scale, y + scale), Rgba([0, 0xff, 0, 0xff]));
        assert_eq!(*canvas.get_pixel(x + 3 * scale, y + 3 * scale), Rgba([0, 0, 0xff, 0xff]));
    }
}

#[test]
fn test_malformed_foreground_is_ignored() {
    let malformed = RenderOptions {
        foreground: Some("#ZZZ".into()),
        ..Default::default()
    };
    assert_eq!(
        generate(TEXT, &malformed).unwrap(),
        generate(TEXT, &RenderOptions::default()).unwrap()
    );
}

#[test]
fn test_same_seed_same_image() {
    assert_eq!(
        generate(TEXT, &dotted(Some(11))).unwrap(),
        generate(TEXT, &dotted(Some(11))).unwrap()
    );
}

#[test]
fn test_symbol_does_not_depend_on_seed() {
    let geometry = geometry(&dotted(None));
    let reference = symbol_pixels(&generate(TEXT, &dotted(Some(1))).unwrap(), &geometry);
    for seed in [Some(2), Some(3), None] {
        let canvas = generate(TEXT, &dotted(seed)).unwrap();
        assert_eq!(symbol_pixels(&canvas, &geometry), reference);
    }
}

#[test]
fn test_round_background() {
    let options = dotted(Some(5));
    let canvas = generate(TEXT, &options).unwrap();
    let geometry = geometry(&options);
    let mut outside = 0;
    for (x, y, p) in canvas.enumerate_pixels() {
        if *p != BLACK || geometry.in_symbol(x, y) {
            continue;
        }
        outside += 1;
        let distance = (f64::from(x) + 0.5 - 200.0).hypot(f64::from(y) + 0.5 - 200.0);
        assert!(distance < 200.0, "dot pixel ({}, {}) leaves the circle", x, y);
    }
    assert!(outside > 0);
}

#[test]
fn test_limit_includes_quiet_zone() {
    let options = RenderOptions {
        quiet_zone: Some(100_000),
        ..Default::default()
    };
    assert!(matches!(
        generate_within(TEXT, &options, 4096),
        Err(Error::Layout(LayoutError::ExceedsLimit { limit: 4096, .. }))
    ));
    let canvas = generate_within(TEXT, &RenderOptions::default(), 400).unwrap();
    assert_eq!(canvas.dimensions(), (400, 400));
}

#[test]
fn test_text_too_long() {
    let text = "x".repeat(5000);
    assert!(matches!(generate(&text, &RenderOptions::default()), Err(Error::Encoding(_))));
}

use image::RgbaImage;
use qrstyle::color::Rgba;
use qrstyle::design::Design;
use qrstyle::encode::{encode, EncodeOptions};
use qrstyle::eyes::{EyeBallShape, EyeFrameShape};
use qrstyle::gradient::{resolve_fill, ColorStop, FillStyle, Gradient};
use qrstyle::matrix::{is_eye, ModuleGrid};
use qrstyle::render::{paint_body, Renderer};
use qrstyle::shapes::BodyShape;
use qrstyle::surface::{Painter, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tiny_skia::{Path, Rect, Stroke, Transform};

const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Collects the bounds of everything filled.
#[derive(Default)]
struct Bounds {
    fills: Vec<Rect>,
}

impl Surface for Bounds {
    fn size(&self) -> u32 {
        250
    }

    fn is_vector(&self) -> bool {
        true
    }

    fn fill_path(&mut self, path: &Path, _style: &FillStyle, transform: Transform) {
        if let Some(mapped) = path.clone().transform(transform) {
            self.fills.push(mapped.bounds());
        }
    }

    fn stroke_path(&mut self, _path: &Path, _style: &FillStyle, _stroke: &Stroke, _transform: Transform) {}

    fn draw_image(&mut self, _image: &RgbaImage, _rect: Rect) {}
}

fn render(matrix: &ModuleGrid, design: &Design, size: u32) -> RgbaImage {
    Renderer::with_seed(42).render_image(matrix, design, size).unwrap()
}

fn px(image: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
    image.get_pixel(x, y).0
}

/// Scaled images are resampled, so allow for rounding.
fn near(actual: [u8; 4], expected: [u8; 4]) -> bool {
    actual.iter().zip(expected).all(|(&a, e)| a.abs_diff(e) <= 3)
}

#[test]
fn body_tiles_cover_the_canvas_without_gaps() {
    for n in [21usize, 25, 29] {
        for size in [210u32, 250, 301] {
            let grid = ModuleGrid::from_fn(n, |_, _| true);
            let image = render(&grid, &Design::default(), size);
            let tile = size as f64 / n as f64;
            for y in 0..size {
                for x in 0..size {
                    let row = ((y as f64 + 0.5) / tile) as i32;
                    let col = ((x as f64 + 0.5) / tile) as i32;
                    if !is_eye(row, col, n as i32) {
                        assert_eq!(px(&image, x, y), BLACK, "n = {n}, size = {size}, pixel ({x}, {y})");
                    }
                }
            }
        }
    }
}

#[test]
fn body_never_paints_the_eyes() {
    let n = 25;
    let grid = ModuleGrid::from_fn(n, |_, _| true);
    let mut surface = Bounds::default();
    let mut rng = StdRng::seed_from_u64(1);
    let mut painter = Painter::new(&mut surface, &mut rng);
    paint_body(&mut painter, &grid, &Design::default(), 10.0);
    drop(painter);

    assert_eq!(surface.fills.len(), n * n - 3 * 49);
    let eyes = [
        Rect::from_xywh(0.0, 0.0, 70.0, 70.0).unwrap(),
        Rect::from_xywh(180.0, 0.0, 70.0, 70.0).unwrap(),
        Rect::from_xywh(0.0, 180.0, 70.0, 70.0).unwrap(),
    ];
    for fill in &surface.fills {
        for eye in &eyes {
            let overlap = fill.intersect(eye).map_or(0.0, |r| r.width() * r.height());
            assert_eq!(overlap, 0.0, "{fill:?} paints into {eye:?}");
        }
    }
}

#[test]
fn eyes_are_rotations_of_the_top_left_eye() {
    let grid = ModuleGrid::new(21);
    for (frame, ball) in [
        (EyeFrameShape::Square, EyeBallShape::Square),
        (EyeFrameShape::SquaredSmall, EyeBallShape::Square),
        // shapes that differ from their mirror images
        (EyeFrameShape::Leaf, EyeBallShape::PetalCaved),
        (EyeFrameShape::PetalCaved, EyeBallShape::LeafSharp),
    ] {
        let design = Design { eye_frame_shape: frame, eye_ball_shape: ball, ..Design::default() };
        let image = render(&grid, &design, 210);
        let w = 210;
        let mut differing = 0;
        for y in 0..70 {
            for x in 0..70 {
                let tl = px(&image, x, y);
                let tr = px(&image, w - 1 - y, x);
                let bl = px(&image, y, w - 1 - x);
                let close = |a: [u8; 4], b: [u8; 4]| a.iter().zip(b).all(|(&p, q)| p.abs_diff(q) <= 2);
                if !close(tl, tr) || !close(tl, bl) {
                    differing += 1;
                }
            }
        }
        assert_eq!(differing, 0, "{frame}/{ball}: {differing} pixels differ");
        assert_eq!(px(&image, 35, 35), BLACK, "{frame}/{ball}");
    }
}

#[test]
fn unknown_names_render_like_defaults() {
    let grid = encode("fallback", &EncodeOptions::default()).unwrap();
    let odd = Design::from_json(
        r#"{
            "bodyShape": "heart",
            "eyeFrameShape": "blob",
            "eyeBallShape": "cube",
            "gradient": "conic",
            "enableGradient": true
        }"#,
    )
    .unwrap();
    assert_eq!(render(&grid, &odd, 250), render(&grid, &Design::default(), 250));
}

#[test]
fn every_registered_style_renders() {
    let grid = encode("HTTPS://EXAMPLE.COM/STYLES", &EncodeOptions::default()).unwrap();
    for &body_shape in BodyShape::ALL {
        let design = Design { body_shape, ..Design::default() };
        assert_eq!(render(&grid, &design, 120).dimensions(), (120, 120));
    }
    for &eye_frame_shape in EyeFrameShape::ALL {
        let design = Design { eye_frame_shape, ..Design::default() };
        assert_eq!(render(&grid, &design, 125).dimensions(), (125, 125));
    }
    for &eye_ball_shape in EyeBallShape::ALL {
        let design = Design { eye_ball_shape, ..Design::default() };
        let image = render(&grid, &design, 125);
        // every ball covers the middle of the top-left eye
        assert!(px(&image, 17, 17)[0] < 128, "{eye_ball_shape}");
    }
}

#[test]
fn gradient_stops_are_optional() {
    let design = Design {
        enable_gradient: true,
        gradient: Gradient::Diagonal,
        color: Rgba::rgb(255, 0, 0),
        color_middle: Some(Rgba::rgb(0, 255, 0)),
        ..Design::default()
    };
    let offsets = |design: &Design| -> Vec<f32> {
        resolve_fill(design, 100.0).stops().iter().map(|s: &ColorStop| s.offset).collect()
    };
    assert_eq!(offsets(&design), vec![0.0, 0.5]);

    let full = Design { color_finish: Some(Rgba::rgb(0, 0, 255)), ..design.clone() };
    assert_eq!(offsets(&full), vec![0.0, 0.5, 1.0]);

    let flat = Design { enable_gradient: false, ..full };
    assert_eq!(resolve_fill(&flat, 100.0), FillStyle::Solid(Rgba::rgb(255, 0, 0)));
}

#[test]
fn single_dark_module_is_one_square() {
    let mut grid = ModuleGrid::new(21);
    grid.set(10, 10, true);
    let image = render(&grid, &Design::default(), 210);

    for y in 100..110 {
        for x in 100..110 {
            assert_eq!(px(&image, x, y), BLACK);
        }
    }
    for (x, y) in [(99, 105), (110, 105), (105, 99), (105, 110)] {
        assert_eq!(px(&image, x, y), WHITE, "({x}, {y})");
    }
    let dark_outside_eyes = image
        .enumerate_pixels()
        .filter(|&(x, y, p)| !is_eye((y / 10) as i32, (x / 10) as i32, 21) && p.0 != WHITE)
        .count();
    assert_eq!(dark_outside_eyes, 100);
}

#[test]
fn pcb_linked_run_is_continuous() {
    let mut grid = ModuleGrid::new(21);
    for col in 9..=11 {
        grid.set(10, col, true);
    }
    let design = Design { body_shape: BodyShape::PcbLinked, ..Design::default() };
    let image = render(&grid, &design, 210);

    for x in 92..=117 {
        assert!(px(&image, x, 105)[0] < 64, "gap at x = {x}");
    }
    // end modules keep their round base
    assert!(px(&image, 95, 101)[0] < 64);
    assert!(px(&image, 115, 101)[0] < 64);
    // the middle module is bars only
    assert_eq!(px(&image, 105, 101), WHITE);
}

#[test]
fn seeded_mosaic_is_reproducible() {
    let grid = encode("mosaic", &EncodeOptions::default()).unwrap();
    let design = Design {
        body_shape: BodyShape::Mosaic,
        eye_ball_shape: EyeBallShape::NineMosaic,
        ..Design::default()
    };
    let a = Renderer::with_seed(3).render_image(&grid, &design, 200).unwrap();
    let b = Renderer::with_seed(3).render_image(&grid, &design, 200).unwrap();
    let c = Renderer::with_seed(4).render_image(&grid, &design, 200).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

/// Red on the left of the symbol, blue on the right.
fn gradient_design(gradient: Gradient) -> Design {
    Design {
        color: Rgba::rgb(255, 0, 0),
        color_finish: Some(Rgba::rgb(0, 0, 255)),
        enable_gradient: true,
        gradient,
        ..Design::default()
    }
}

#[test]
fn horizontal_gradient_runs_left_to_right() {
    let grid = ModuleGrid::from_fn(21, |_, _| true);
    let image = render(&grid, &gradient_design(Gradient::Horizontal), 210);

    let row: Vec<_> = [20, 80, 105, 130, 200].iter().map(|&x| px(&image, x, 105)).collect();
    for pair in row.windows(2) {
        assert!(pair[0][0] > pair[1][0] && pair[0][2] < pair[1][2], "{row:?}");
    }
    assert!(row[0][0] > 220 && row[4][2] > 220, "{row:?}");
    // halfway across the symbol
    assert!(row[2][0].abs_diff(row[2][2]) <= 6, "{row:?}");
    // constant down each column
    assert!(near(px(&image, 105, 20), row[2]) && near(px(&image, 105, 200), row[2]));
}

#[test]
fn radial_gradient_runs_center_to_edge() {
    let grid = ModuleGrid::from_fn(21, |_, _| true);
    let image = render(&grid, &gradient_design(Gradient::Radial), 210);

    let center = px(&image, 105, 105);
    assert!(center[0] > 240 && center[2] < 15, "{center:?}");
    let outward: Vec<_> = [105, 130, 160, 200].iter().map(|&x| px(&image, x, 105)).collect();
    for pair in outward.windows(2) {
        assert!(pair[0][0] > pair[1][0] && pair[0][2] < pair[1][2], "{outward:?}");
    }
    assert!(outward[3][2] > outward[3][0], "{outward:?}");
    // same distance from the center, same color
    assert!(near(px(&image, 10, 105), px(&image, 200, 105)));
    assert!(near(px(&image, 105, 10), px(&image, 105, 200)));
}

#[test]
fn background_and_eye_colors_are_applied() {
    let grid = ModuleGrid::new(21);
    let design = Design::from_json(
        r##"{ "colorBackground": "#00ff00", "eyeFrameColor": "#ff0000", "eyeBallColor": "#0000ff" }"##,
    )
    .unwrap();
    let image = render(&grid, &design, 210);
    assert_eq!(px(&image, 105, 105), [0, 255, 0, 255]);
    assert_eq!(px(&image, 5, 5), [255, 0, 0, 255]);
    assert_eq!(px(&image, 35, 35), [0, 0, 255, 255]);
    assert_eq!(px(&image, 204, 204), [0, 255, 0, 255]);
}

fn red_logo() -> RgbaImage {
    RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 0, 255]))
}

#[test]
fn cleared_logo_background_is_white() {
    let grid = ModuleGrid::from_fn(21, |_, _| true);
    let mut renderer = Renderer::with_seed(0);
    renderer.logos_mut().insert("logo", red_logo());
    let design = Design {
        logo_image_source: Some("logo".into()),
        clear_logo_background: true,
        ..Design::default()
    };
    let image = renderer.render_image(&grid, &design, 210).unwrap();
    assert!(near(px(&image, 105, 105), [255, 0, 0, 255]));
    assert_eq!(px(&image, 45, 100), WHITE);
    assert_eq!(px(&image, 35, 100), BLACK);
}

#[test]
fn outline_is_raster_only() {
    let grid = ModuleGrid::new(21);
    let mut renderer = Renderer::with_seed(0);
    renderer.logos_mut().insert("logo", red_logo());
    let design = Design {
        logo_image_source: Some("logo".into()),
        logo_image_scale: 0.2,
        outline_logo: true,
        color_background: Rgba::BLACK,
        ..Design::default()
    };

    let image = renderer.render_image(&grid, &design, 210).unwrap();
    // logo spans 84..126; the outline reaches 4px further
    assert!(near(px(&image, 105, 105), [255, 0, 0, 255]));
    assert!(near(px(&image, 82, 105), WHITE));
    assert!(near(px(&image, 105, 128), WHITE));
    assert_eq!(px(&image, 75, 105), BLACK);

    let svg = renderer.render_svg(&grid, &design, 210).unwrap();
    assert_eq!(svg.matches("<image ").count(), 1);
}

#[test]
fn missing_logo_is_skipped() {
    let grid = ModuleGrid::new(21);
    let design = Design { logo_image_source: Some("/no/such/logo.png".into()), ..Design::default() };
    let image = render(&grid, &design, 210);
    assert_eq!(px(&image, 105, 105), WHITE);
}

#[test]
fn preview_renders_without_a_symbol() {
    let design = Design::from_json(r#"{ "preview": "eyeFrameShape", "eyeFrameShape": "square" }"#).unwrap();
    let grid = ModuleGrid::new(21);
    let image = render(&grid, &design, 70);
    // tile 10: the frame fills the outer module ring, the rest stays transparent
    assert_eq!(px(&image, 5, 35), BLACK);
    assert_eq!(px(&image, 35, 35)[3], 0);

    let unknown = Design::from_json(r#"{ "preview": "sparkles" }"#).unwrap();
    assert_eq!(unknown.preview, None);
}

#[test]
fn svg_output_has_one_path_per_module() {
    let mut grid = ModuleGrid::new(21);
    grid.set(10, 10, true);
    grid.set(12, 12, true);
    let svg = Renderer::with_seed(0).render_svg(&grid, &Design::default(), 210).unwrap();
    assert!(svg.contains("<path d=\"M100,100 L110,100 L110,110 L100,110 Z\" fill=\"#000000\"/>"));
    assert!(svg.contains("<path d=\"M120,120 L130,120 L130,130 L120,130 Z\" fill=\"#000000\"/>"));
    // background + 2 modules + 3 balls filled, 3 frames stroked
    assert_eq!(svg.matches("<path ").count(), 9);
}

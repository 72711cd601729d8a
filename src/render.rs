//! Symbol rendering.
//!
//! [`render`] is the whole pipeline for one symbol: background, body modules,
//! eye frames, eye balls, logo. It draws onto any [`Surface`] and never fails;
//! unknown names were already resolved to defaults when the design was read.
//!
//! [`Renderer`] is the stateful front end a host keeps around: it owns the
//! random source used by jittered shapes and the logo cache.

use image::RgbaImage;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::design::Design;
use crate::error::{Error, Result};
use crate::eyes::{draw_balls, draw_frames};
use crate::gradient::resolve_fill;
use crate::logo::{draw_logo, LogoCache};
use crate::matrix::{is_eye, Matrix, ModuleRect};
use crate::raster::RasterSurface;
use crate::surface::{Painter, Surface};
use crate::svg::SvgSurface;

/// Renders `matrix` styled by `design` onto `surface`.
///
/// With `design.preview` set, the matching thumbnail is drawn instead and
/// `matrix` is ignored. `logo` is the decoded logo image; without it the logo
/// step is skipped.
pub fn render(
    surface: &mut dyn Surface,
    matrix: &dyn Matrix,
    design: &Design,
    logo: Option<&RgbaImage>,
    rng: &mut dyn RngCore,
) {
    let mut painter = Painter::new(surface, rng);
    if let Some(preview) = design.preview {
        preview.draw(&mut painter, design);
        return;
    }

    let size = painter.size() as f32;
    painter.set_color(design.color_background);
    painter.fill_rect(0.0, 0.0, size, size);

    let n = matrix.module_count();
    if n == 0 {
        log::warn!("empty module matrix, only the background is drawn");
        return;
    }
    let tile = size as f64 / n as f64;
    log::debug!("rendering {n}x{n} modules at {size}px, tile {tile:.3}px");

    paint_body(&mut painter, matrix, design, tile);

    log::debug!("eye frames: {}", design.eye_frame_shape);
    painter.set_color(design.eye_frame_color);
    draw_frames(&mut painter, design.eye_frame_shape, size, tile as f32);

    log::debug!("eye balls: {}", design.eye_ball_shape);
    painter.set_color(design.eye_ball_color);
    draw_balls(&mut painter, design.eye_ball_shape, size, tile as f32);

    if let Some(image) = logo {
        log::debug!("logo: {}x{}", image.width(), image.height());
        draw_logo(&mut painter, design, image, size, tile as f32);
    }
}

/// Draws every dark module outside the three eyes with the body shape.
pub fn paint_body(painter: &mut Painter<'_>, matrix: &dyn Matrix, design: &Design, tile: f64) {
    let n = matrix.module_count();
    let width = (n as f64 * tile) as f32;
    let fill = if design.uses_gradient() { design.gradient.name() } else { "flat" };
    log::debug!("body: {} ({fill})", design.body_shape);
    painter.set_fill(resolve_fill(design, width));
    for row in 0..n {
        for col in 0..n {
            let (r, c) = (row as i32, col as i32);
            if !matrix.is_dark(r, c) || is_eye(r, c, n as i32) {
                continue;
            }
            let rect = ModuleRect::new(row, col, tile);
            design.body_shape.draw(painter, rect, matrix, r, c);
        }
    }
}

/// A rendering session: random source and logo cache.
pub struct Renderer {
    rng: StdRng,
    logos: LogoCache,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// A renderer whose jittered shapes differ from run to run.
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy(), logos: LogoCache::new() }
    }

    /// A renderer producing the same output for the same inputs.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), logos: LogoCache::new() }
    }

    pub fn logos_mut(&mut self) -> &mut LogoCache {
        &mut self.logos
    }

    /// Renders to a `size` x `size` RGBA image.
    pub fn render_image(&mut self, matrix: &dyn Matrix, design: &Design, size: u32) -> Result<RgbaImage> {
        let mut surface = RasterSurface::new(size)?;
        let logo = self.logos.resolve(design.logo_image_source.as_deref());
        render(&mut surface, matrix, design, logo, &mut self.rng);
        Ok(surface.into_image())
    }

    /// Renders to an SVG document `size` pixels wide.
    pub fn render_svg(&mut self, matrix: &dyn Matrix, design: &Design, size: u32) -> Result<String> {
        if size == 0 {
            return Err(Error::Surface { width: size, height: size });
        }
        let mut surface = SvgSurface::new(size);
        let logo = self.logos.resolve(design.logo_image_source.as_deref());
        render(&mut surface, matrix, design, logo, &mut self.rng);
        Ok(surface.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::gradient::FillStyle;
    use crate::matrix::ModuleGrid;
    use crate::preview::Preview;
    use crate::surface::testing::RecordingSurface;
    use rand::rngs::mock::StepRng;
    use tiny_skia::Rect;

    fn record(matrix: &ModuleGrid, design: &Design, logo: Option<&RgbaImage>) -> RecordingSurface {
        let mut surface = RecordingSurface::default();
        let mut rng = StepRng::new(0, 1);
        render(&mut surface, matrix, design, logo, &mut rng);
        surface
    }

    #[test]
    fn draws_phases_in_order() {
        // 20 modules on the 100px recording surface: tile 5
        let grid = ModuleGrid::from_fn(20, |r, c| r == 10 && c == 10);
        let design = Design {
            color: Rgba::rgb(1, 1, 1),
            eye_frame_color: Rgba::rgb(2, 2, 2),
            eye_ball_color: Rgba::rgb(3, 3, 3),
            ..Design::default()
        };
        let surface = record(&grid, &design, None);

        let colors: Vec<_> = surface.fills.iter().map(|(_, f)| f.clone()).collect();
        assert_eq!(colors[0], FillStyle::Solid(Rgba::WHITE));
        assert_eq!(surface.fills[0].0, Rect::from_xywh(0.0, 0.0, 100.0, 100.0).unwrap());
        assert_eq!(colors[1], FillStyle::Solid(Rgba::rgb(1, 1, 1)));
        assert_eq!(surface.fills[1].0, Rect::from_xywh(50.0, 50.0, 5.0, 5.0).unwrap());
        // three square balls
        assert_eq!(colors[2..].to_vec(), vec![FillStyle::Solid(Rgba::rgb(3, 3, 3)); 3]);
        // three stroked square frames
        assert_eq!(surface.strokes.len(), 3);
    }

    #[test]
    fn body_skips_eyes_and_light_modules() {
        let grid = ModuleGrid::from_fn(21, |_, _| true);
        let mut surface = RecordingSurface::default();
        let mut rng = StepRng::new(0, 1);
        let mut painter = Painter::new(&mut surface, &mut rng);
        paint_body(&mut painter, &grid, &Design::default(), 1.0);
        drop(painter);
        assert_eq!(surface.fills.len(), 21 * 21 - 3 * 49);
    }

    #[test]
    fn logo_is_drawn_last() {
        let grid = ModuleGrid::from_fn(21, |_, _| false);
        let logo = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
        let surface = record(&grid, &Design::default(), Some(&logo));
        assert_eq!(surface.images, vec![Rect::from_xywh(25.0, 25.0, 50.0, 50.0).unwrap()]);
    }

    #[test]
    fn preview_replaces_the_symbol() {
        let grid = ModuleGrid::from_fn(21, |_, _| true);
        let design = Design { preview: Some(Preview::Gradient), ..Design::default() };
        let surface = record(&grid, &design, None);
        assert_eq!(surface.fills.len(), 1);
        assert!(surface.strokes.is_empty());
    }

    #[test]
    fn empty_matrix_draws_only_background() {
        let surface = record(&ModuleGrid::new(0), &Design::default(), None);
        assert_eq!(surface.fills.len(), 1);
        assert!(surface.strokes.is_empty());
    }

    #[test]
    fn renderer_rejects_zero_size() {
        let grid = ModuleGrid::new(21);
        let mut renderer = Renderer::with_seed(1);
        assert!(renderer.render_image(&grid, &Design::default(), 0).is_err());
        assert!(renderer.render_svg(&grid, &Design::default(), 0).is_err());
    }
}

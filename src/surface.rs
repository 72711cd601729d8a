//! Drawing surfaces and the painter used by every shape function.
//!
//! A [`Surface`] is a backend (raster or SVG) that knows how to fill and stroke
//! paths and blit images. Shape code never talks to a surface directly; it goes
//! through a [`Painter`], which carries the current fill, stroke, transform and
//! the random source used by jittered shapes.

use image::RgbaImage;
use rand::{Rng, RngCore};
use tiny_skia::{LineCap, Path, PathBuilder, Rect, Stroke, Transform};

use crate::color::Rgba;
use crate::gradient::FillStyle;

/// The capability set consumed by the renderer.
pub trait Surface {
    /// Edge length of the square surface, in pixels.
    fn size(&self) -> u32;

    /// `true` for vector backends. Raster-only effects (the logo outline stamp)
    /// are skipped on vector surfaces.
    fn is_vector(&self) -> bool;

    /// Fills `path`, mapped through `transform`, with `style`.
    fn fill_path(&mut self, path: &Path, style: &FillStyle, transform: Transform);

    /// Strokes `path`, mapped through `transform`, with `style`.
    fn stroke_path(&mut self, path: &Path, style: &FillStyle, stroke: &Stroke, transform: Transform);

    /// Draws `image` scaled into `rect` (surface coordinates).
    fn draw_image(&mut self, image: &RgbaImage, rect: Rect);
}

/// Drawing state threaded through shape functions.
pub struct Painter<'a> {
    surface: &'a mut dyn Surface,
    rng: &'a mut dyn RngCore,
    transform: Transform,
    fill: FillStyle,
    stroke: Stroke,
}

impl<'a> Painter<'a> {
    pub fn new(surface: &'a mut dyn Surface, rng: &'a mut dyn RngCore) -> Self {
        Self {
            surface,
            rng,
            transform: Transform::identity(),
            fill: FillStyle::Solid(Rgba::BLACK),
            stroke: Stroke { miter_limit: 10.0, ..Stroke::default() },
        }
    }

    /// A painter whose coordinates are mapped through `transform` before the
    /// current transform. The placement ends when the returned painter is dropped.
    pub fn transformed(&mut self, transform: Transform) -> Painter<'_> {
        Painter {
            surface: &mut *self.surface,
            rng: &mut *self.rng,
            transform: self.transform.pre_concat(transform),
            fill: self.fill.clone(),
            stroke: self.stroke.clone(),
        }
    }

    pub fn size(&self) -> u32 {
        self.surface.size()
    }

    pub fn is_vector(&self) -> bool {
        self.surface.is_vector()
    }

    pub fn set_fill(&mut self, fill: FillStyle) {
        self.fill = fill;
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.fill = FillStyle::Solid(color);
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.stroke.width = width;
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.stroke.line_cap = cap;
    }

    pub fn line_cap(&self) -> LineCap {
        self.stroke.line_cap
    }

    /// Uniform random value in `[0, 1)`.
    pub fn random(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    pub fn fill(&mut self, builder: PathBuilder) {
        if let Some(path) = builder.finish() {
            self.fill_path(&path);
        }
    }

    pub fn stroke(&mut self, builder: PathBuilder) {
        if let Some(path) = builder.finish() {
            self.surface.stroke_path(&path, &self.fill, &self.stroke, self.transform);
        }
    }

    /// Fills or strokes, as the eye frame functions draw either way.
    pub fn paint(&mut self, builder: PathBuilder, filled: bool) {
        if filled {
            self.fill(builder);
        } else {
            self.stroke(builder);
        }
    }

    pub fn fill_path(&mut self, path: &Path) {
        self.surface.fill_path(path, &self.fill, self.transform);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            self.fill_path(&PathBuilder::from_rect(rect));
        }
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            let path = PathBuilder::from_rect(rect);
            self.surface.stroke_path(&path, &self.fill, &self.stroke, self.transform);
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, r) {
            self.fill_path(&path);
        }
    }

    /// Draws an image into an axis-aligned box. Only valid on an untransformed
    /// painter, which is where the logo compositor runs.
    pub fn draw_image(&mut self, image: &RgbaImage, x: f32, y: f32, w: f32, h: f32) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            self.surface.draw_image(image, rect);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSurface;
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn transformed_painter_maps_coordinates() {
        let mut surface = RecordingSurface::default();
        let mut rng = StepRng::new(0, 1);
        let mut painter = Painter::new(&mut surface, &mut rng);
        {
            let mut moved = painter.transformed(Transform::from_translate(10.0, 20.0));
            moved.fill_rect(0.0, 0.0, 5.0, 5.0);
        }
        painter.fill_rect(0.0, 0.0, 5.0, 5.0);
        drop(painter);

        assert_eq!(surface.fills.len(), 2);
        assert_eq!(surface.fills[0].0, Rect::from_xywh(10.0, 20.0, 5.0, 5.0).unwrap());
        assert_eq!(surface.fills[1].0, Rect::from_xywh(0.0, 0.0, 5.0, 5.0).unwrap());
    }

    #[test]
    fn empty_rects_are_skipped() {
        let mut surface = RecordingSurface::default();
        let mut rng = StepRng::new(0, 1);
        let mut painter = Painter::new(&mut surface, &mut rng);
        painter.fill_rect(0.0, 0.0, 0.0, 5.0);
        painter.fill_circle(1.0, 1.0, 0.0);
        drop(painter);
        assert!(surface.fills.is_empty());
    }
}

//! Raster backend on a tiny-skia pixmap.

use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, IntSize, Paint, Path, Pixmap, PixmapPaint, Rect, Stroke, Transform,
};

use crate::error::{Error, Result};
use crate::gradient::FillStyle;
use crate::surface::Surface;

/// An anti-aliased RGBA raster surface.
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    /// Allocates a transparent `size` x `size` surface.
    pub fn new(size: u32) -> Result<Self> {
        let pixmap = Pixmap::new(size, size).ok_or(Error::Surface { width: size, height: size })?;
        Ok(Self { pixmap })
    }

    /// Converts to a straight-alpha `image` buffer.
    pub fn into_image(self) -> RgbaImage {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let data = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        // The buffer length is width * height * 4 by construction.
        RgbaImage::from_raw(width, height, data).unwrap_or_else(|| RgbaImage::new(width, height))
    }

    fn paint(style: &FillStyle) -> Option<Paint<'static>> {
        let shader = style.to_shader()?;
        Some(Paint { shader, anti_alias: true, ..Paint::default() })
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> u32 {
        self.pixmap.width()
    }

    fn is_vector(&self) -> bool {
        false
    }

    fn fill_path(&mut self, path: &Path, style: &FillStyle, transform: Transform) {
        let Some(paint) = Self::paint(style) else {
            return;
        };
        // Map the geometry, not the shader: gradients are laid out in symbol space.
        let Some(path) = path.clone().transform(transform) else {
            return;
        };
        self.pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn stroke_path(&mut self, path: &Path, style: &FillStyle, stroke: &Stroke, transform: Transform) {
        if stroke.width <= 0.0 {
            return;
        }
        let Some(paint) = Self::paint(style) else {
            return;
        };
        self.pixmap.stroke_path(path, &paint, stroke, transform, None);
    }

    fn draw_image(&mut self, image: &RgbaImage, rect: Rect) {
        let Some(source) = to_pixmap(image) else {
            return;
        };
        let sx = rect.width() / source.width() as f32;
        let sy = rect.height() / source.height() as f32;
        let paint = PixmapPaint { quality: FilterQuality::Bicubic, ..PixmapPaint::default() };
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, rect.x(), rect.y());
        self.pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }
}

/// Premultiplies an `image` buffer into a pixmap.
fn to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;
    let data = image
        .pixels()
        .flat_map(|p| {
            let [r, g, b, a] = p.0;
            let c = ColorU8::from_rgba(r, g, b, a).premultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Pixmap::from_vec(data, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use tiny_skia::PathBuilder;

    #[test]
    fn zero_size_is_an_error() {
        assert!(matches!(RasterSurface::new(0), Err(Error::Surface { .. })));
    }

    #[test]
    fn fills_pixel_aligned_rect_exactly() {
        let mut surface = RasterSurface::new(20).unwrap();
        let rect = PathBuilder::from_rect(Rect::from_xywh(5.0, 5.0, 10.0, 10.0).unwrap());
        surface.fill_path(&rect, &FillStyle::Solid(Rgba::rgb(255, 0, 0)), Transform::identity());
        let image = surface.into_image();
        assert_eq!(image.get_pixel(5, 5).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(14, 14).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(4, 5).0, [0, 0, 0, 0]);
        assert_eq!(image.get_pixel(15, 15).0, [0, 0, 0, 0]);
    }

    #[test]
    fn draws_scaled_image() {
        let mut surface = RasterSurface::new(20).unwrap();
        let logo = RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 255, 255]));
        surface.draw_image(&logo, Rect::from_xywh(0.0, 0.0, 10.0, 10.0).unwrap());
        let image = surface.into_image();
        let [r, _, b, a] = image.get_pixel(5, 5).0;
        assert!(r < 8 && b > 240 && a > 240);
        assert_eq!(image.get_pixel(15, 15).0[3], 0);
    }
}

//! Logo compositing.
//!
//! The logo is drawn last, centered over the symbol, `logo_image_scale` of
//! the symbol wide with its natural aspect ratio.

use image::RgbaImage;

use crate::color::Rgba;
use crate::design::Design;
use crate::surface::Painter;

/// Padding around the logo, in pixels, for the cleared box and the outline.
pub const LOGO_BORDER: f32 = 4.0;

/// Offsets of the eight outline stamps.
const OUTLINE_OFFSETS: [(f32, f32); 8] =
    [(-1.0, -1.0), (0.0, -1.0), (1.0, -1.0), (-1.0, 0.0), (1.0, 0.0), (-1.0, 1.0), (0.0, 1.0), (1.0, 1.0)];

/// Where the logo goes on a symbol `width` pixels wide.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LogoBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl LogoBox {
    pub fn new(image: &RgbaImage, width: f32, scale: f32) -> Self {
        let aspect = image.height() as f32 / image.width() as f32;
        let w = width * scale;
        let h = w * aspect;
        Self { x: (width - w) / 2.0, y: (width - h) / 2.0, w, h }
    }

    /// The box expanded by [`LOGO_BORDER`] and snapped outward to whole modules.
    pub fn cleared(&self, tile: f32) -> (f32, f32, f32, f32) {
        let b = LOGO_BORDER;
        (
            ((self.x - b) / tile).floor() * tile,
            ((self.y - b) / tile).floor() * tile,
            ((self.w + b * 2.0) / tile).ceil() * tile,
            ((self.h + b * 2.0) / tile).ceil() * tile,
        )
    }
}

/// Draws `image` over the symbol with the treatment selected by `design`.
///
/// `clear_logo_background` wins over `outline_logo`. The outline is a raster
/// effect and is not drawn on vector surfaces.
pub fn draw_logo(painter: &mut Painter<'_>, design: &Design, image: &RgbaImage, width: f32, tile: f32) {
    if image.width() == 0 || image.height() == 0 {
        log::warn!("logo image is empty, skipping");
        return;
    }
    let logo = LogoBox::new(image, width, design.logo_image_scale);

    if design.clear_logo_background {
        let (x, y, w, h) = logo.cleared(tile);
        painter.set_color(Rgba::WHITE);
        painter.fill_rect(x, y, w, h);
    } else if design.outline_logo {
        if painter.is_vector() {
            log::debug!("logo outline is not available on vector surfaces");
        } else {
            let halo = silhouette(image);
            for (ox, oy) in OUTLINE_OFFSETS {
                let (dx, dy) = (ox * LOGO_BORDER, oy * LOGO_BORDER);
                painter.draw_image(&halo, logo.x + dx, logo.y + dy, logo.w, logo.h);
            }
        }
    }
    painter.draw_image(image, logo.x, logo.y, logo.w, logo.h);
}

/// A white copy of `image` keeping its alpha channel.
fn silhouette(image: &RgbaImage) -> RgbaImage {
    let mut halo = image.clone();
    for pixel in halo.pixels_mut() {
        let alpha = pixel.0[3];
        *pixel = image::Rgba([255, 255, 255, alpha]);
    }
    halo
}

/// The most recently loaded logo, keyed by its source path.
///
/// A source is read from disk once; asking again for the same source returns
/// the cached result, including a cached failure.
#[derive(Default)]
pub struct LogoCache {
    source: Option<String>,
    image: Option<RgbaImage>,
}

impl LogoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preloads an already decoded logo under `source`.
    pub fn insert(&mut self, source: impl Into<String>, image: RgbaImage) {
        self.source = Some(source.into());
        self.image = Some(image);
    }

    /// Returns the logo for `source`, loading it when the source changed.
    pub fn resolve(&mut self, source: Option<&str>) -> Option<&RgbaImage> {
        let source = source.map(str::trim).filter(|s| !s.is_empty());
        if self.source.as_deref() != source {
            self.source = source.map(str::to_owned);
            self.image = source.and_then(load);
        }
        self.image.as_ref()
    }
}

fn load(path: &str) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(image) => {
            let image = image.to_rgba8();
            if image.width() == 0 || image.height() == 0 {
                log::warn!("logo {path:?} has no pixels, skipping");
                return None;
            }
            log::debug!("loaded logo {path:?} ({}x{})", image.width(), image.height());
            Some(image)
        }
        Err(err) => {
            log::warn!("cannot load logo {path:?}: {err}");
            None
        }
    }
}

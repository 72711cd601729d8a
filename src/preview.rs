//! Design-picker thumbnails.
//!
//! A preview renders one aspect of a [`Design`] (body shape, eye frame, eye
//! ball or gradient) on its own, filling the surface, instead of a whole
//! symbol.

use tiny_skia::Transform;

use crate::design::Design;
use crate::eyes::EyeGeometry;
use crate::gradient::resolve_fill;
use crate::matrix::{Matrix, ModuleGrid, ModuleRect};
use crate::registry::named_registry;
use crate::surface::Painter;

named_registry! {
    /// Which part of a design a thumbnail shows.
    pub enum Preview (default BodyShape) {
        BodyShape => "bodyShape",
        EyeFrameShape => "eyeFrameShape",
        EyeBallShape => "eyeBallShape",
        Gradient => "gradient",
    }
}

/// Module pattern of the body shape thumbnail. Only the top-left 6x6 modules
/// are visible; the rest gives linked shapes neighbors at the edges.
const THUMBNAIL: [&str; 8] = [
    "  #  # #",
    "### # ##",
    " ## ## #",
    "#   #   ",
    "##### ##",
    " #  #  #",
    " ##   ##",
    "   ### #",
];

const THUMBNAIL_VISIBLE: usize = 6;

impl Preview {
    /// Draws the thumbnail over the whole surface.
    pub fn draw(self, painter: &mut Painter<'_>, design: &Design) {
        let size = painter.size() as f32;
        log::debug!("rendering {self} preview at {size}px");
        match self {
            Preview::BodyShape => body(painter, design, size),
            Preview::EyeFrameShape => {
                let tile = (size / 7.0).floor();
                let geometry = EyeGeometry::frame(size, tile);
                let d = (size - geometry.side) / 2.0;
                painter.set_color(design.eye_frame_color);
                painter.set_line_width(tile);
                let mut local = painter.transformed(Transform::from_translate(d, d));
                design.eye_frame_shape.draw(&mut local, &geometry, false);
            }
            Preview::EyeBallShape => {
                let tile = (size / 4.0).floor();
                let geometry = EyeGeometry::ball(size, tile);
                // the ball sits at modules 2..5 of its eye
                let d = tile * 2.0 - (size - geometry.side) / 2.0;
                painter.set_color(design.eye_ball_color);
                painter.set_line_width(1.0);
                let mut local = painter.transformed(Transform::from_translate(-d, -d));
                design.eye_ball_shape.draw(&mut local, &geometry);
            }
            Preview::Gradient => {
                painter.set_fill(resolve_fill(design, size));
                painter.fill_rect(0.0, 0.0, size, size);
            }
        }
    }
}

fn body(painter: &mut Painter<'_>, design: &Design, size: f32) {
    let grid = ModuleGrid::from_rows(&THUMBNAIL);
    let tile = (size / THUMBNAIL_VISIBLE as f32).floor();
    let delta = (size - tile * THUMBNAIL_VISIBLE as f32) / 2.0;

    painter.set_color(design.color);
    let mut local = painter.transformed(Transform::from_translate(delta, delta));
    for row in 0..THUMBNAIL_VISIBLE {
        for col in 0..THUMBNAIL_VISIBLE {
            let (r, c) = (row as i32, col as i32);
            if grid.is_dark(r, c) {
                let rect = ModuleRect::new(row, col, tile as f64);
                design.body_shape.draw(&mut local, rect, &grid, r, c);
            }
        }
    }
}

//! The shape primitive library and the body shape registry.
//!
//! Every primitive fills one module box `(x, y, w, h)`. Body shapes are either a
//! primitive or a linked family (see [`crate::linked`]) that composes a
//! primitive with connecting bars.

use std::f32::consts::PI;

use tiny_skia::PathBuilder;

use crate::linked::{self, Link, LinkAxis};
use crate::matrix::{Matrix, ModuleRect};
use crate::registry::named_registry;
use crate::surface::Painter;

/// Single-cell shapes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Primitive {
    Square,
    /// Square inset by 10% on every side.
    SquareSmall,
    Circle,
    CircleBig,
    CircleSmall,
    Dot,
    Diamond,
    /// Diamond with a random shift in `[0, w/2)` per module.
    Mosaic,
    Star,
    Star4,
    Star6,
    Star8,
    Snowflake,
}

impl Primitive {
    pub fn draw(self, p: &mut Painter<'_>, x: f32, y: f32, w: f32, h: f32) {
        match self {
            Primitive::Square => p.fill_rect(x, y, w, h),
            Primitive::SquareSmall => {
                let (dx, dy) = (w * 0.1, h * 0.1);
                p.fill_rect(x + dx, y + dy, w - dx * 2.0, h - dy * 2.0);
            }
            Primitive::Circle => circle(p, x, y, w, h, 0.5),
            Primitive::CircleBig => circle(p, x, y, w, h, 0.55),
            Primitive::CircleSmall => circle(p, x, y, w, h, 0.4),
            Primitive::Dot => circle(p, x, y, w, h, 0.3),
            Primitive::Diamond => shifted_square(p, x, y, w, h, w / 2.0),
            Primitive::Mosaic => {
                let shift = p.random() * w / 2.0;
                shifted_square(p, x, y, w, h, shift);
            }
            Primitive::Star => {
                let r = w / 2.0;
                star(p, x + r, y + r, 5, r, r / 2.0);
            }
            Primitive::Star4 => {
                let r = w / 2.0;
                star(p, x + r, y + r, 4, r, r / 3.0);
            }
            Primitive::Star6 => {
                let r = w / 2.0;
                star(p, x + r, y + r, 6, r, r / 2.0);
            }
            Primitive::Snowflake => {
                let r = w / 2.0;
                star(p, x + r, y + r, 6, r, r / 5.0);
            }
            Primitive::Star8 => {
                let r = w / 2.0;
                star(p, x + r, y + r, 8, r * 1.2, r / 3.0);
            }
        }
    }
}

/// Quadrilateral whose corners slide `d` along each edge; `d = w/2` gives a diamond.
pub fn shifted_square(p: &mut Painter<'_>, x: f32, y: f32, w: f32, h: f32, d: f32) {
    let mut pb = PathBuilder::new();
    pb.move_to(x + d, y);
    pb.line_to(x + w, y + d);
    pb.line_to(x + w - d, y + h);
    pb.line_to(x, y + h - d);
    pb.line_to(x + d, y);
    pb.close();
    p.fill(pb);
}

/// Circle centered in the box with radius `w * r`.
pub fn circle(p: &mut Painter<'_>, x: f32, y: f32, w: f32, h: f32, r: f32) {
    p.fill_circle(x + w / 2.0, y + h / 2.0, w * r);
}

/// Star polygon with `spikes` points, the first pointing up.
pub fn star(p: &mut Painter<'_>, cx: f32, cy: f32, spikes: u32, outer: f32, inner: f32) {
    let step = PI / spikes as f32;
    let mut rot = PI / 2.0 * 3.0;

    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy - outer);
    for _ in 0..spikes {
        pb.line_to(cx + rot.cos() * outer, cy + rot.sin() * outer);
        rot += step;
        pb.line_to(cx + rot.cos() * inner, cy + rot.sin() * inner);
        rot += step;
    }
    pb.line_to(cx, cy - outer);
    pb.close();
    p.fill(pb);
}

named_registry! {
    /// Shapes available for body (non-eye) modules.
    pub enum BodyShape (default Square) {
        Square => "square",
        SquareSmall => "squareSmall",
        Circle => "circle",
        CircleBig => "circleBig",
        CircleSmall => "circleSmall",
        Dot => "dot",
        Diamond => "diamond",
        Mosaic => "mosaic",
        Star => "star",
        Star4 => "star4",
        Star6 => "star6",
        Snowflake => "snowflake",
        Star8 => "star8",
        Zebra => "zebra",
        ZebraVertical => "zebraVertical",
        ZebraThin => "zebraThin",
        ZebraThinVertical => "zebraThinVertical",
        Star6Vertical => "star6Vertical",
        Star6Horizontal => "star6Horizontal",
        PcbVertical => "pcbVertical",
        PcbHorizontal => "pcbHorizontal",
        CircleWideLinked => "circleWideLinked",
        DiamondLinked => "diamondLinked",
        DiamondWideLinked => "diamondWideLinked",
        PcbLinked => "pcbLinked",
        MosaicLinked => "mosaicLinked",
        CircleLinked => "circleLinked",
        SquareSmallLinked => "squareSmallLinked",
        MosaicThinLinked => "mosaicThinLinked",
        CircleThinLinked => "circleThinLinked",
        PcbThinLinked => "pcbThinLinked",
        DiamondThinLinked => "diamondThinLinked",
        SquareSmallThinLinked => "squareSmallThinLinked",
        Star8ThinLinked => "star8ThinLinked",
        Star4ThinLinked => "star4ThinLinked",
    }
}

impl BodyShape {
    /// The primitive drawn for unlinked shapes.
    pub fn primitive(self) -> Option<Primitive> {
        use BodyShape as B;
        Some(match self {
            B::Square => Primitive::Square,
            B::SquareSmall => Primitive::SquareSmall,
            B::Circle => Primitive::Circle,
            B::CircleBig => Primitive::CircleBig,
            B::CircleSmall => Primitive::CircleSmall,
            B::Dot => Primitive::Dot,
            B::Diamond => Primitive::Diamond,
            B::Mosaic => Primitive::Mosaic,
            B::Star => Primitive::Star,
            B::Star4 => Primitive::Star4,
            B::Star6 => Primitive::Star6,
            B::Snowflake => Primitive::Snowflake,
            B::Star8 => Primitive::Star8,
            _ => return None,
        })
    }

    /// Link family constants for connector shapes.
    pub fn link(self) -> Option<Link> {
        use BodyShape as B;
        use LinkAxis::{Horizontal, Omni, Vertical};
        let (axis, fraction, base) = match self {
            B::Zebra => (Horizontal, 0.8, Primitive::CircleSmall),
            B::ZebraVertical => (Vertical, 0.8, Primitive::CircleSmall),
            B::ZebraThin => (Horizontal, 0.6, Primitive::Dot),
            B::ZebraThinVertical => (Vertical, 0.6, Primitive::Dot),
            B::Star6Vertical => (Vertical, 0.5, Primitive::Star8),
            B::Star6Horizontal => (Horizontal, 0.5, Primitive::Star8),
            B::PcbVertical => (Vertical, 0.5, Primitive::Circle),
            B::PcbHorizontal => (Horizontal, 0.5, Primitive::Circle),
            B::CircleWideLinked => (Omni, 1.0, Primitive::Circle),
            B::DiamondLinked => (Omni, 0.5, Primitive::Diamond),
            B::DiamondWideLinked => (Omni, 1.0, Primitive::Diamond),
            B::PcbLinked => (Omni, 0.5, Primitive::Circle),
            B::MosaicLinked => (Omni, 0.5, Primitive::Mosaic),
            B::CircleLinked => (Omni, 0.5, Primitive::Circle),
            B::SquareSmallLinked => (Omni, 0.5, Primitive::SquareSmall),
            B::MosaicThinLinked => (Omni, 0.3, Primitive::Mosaic),
            B::CircleThinLinked => (Omni, 0.3, Primitive::Circle),
            B::PcbThinLinked => (Omni, 0.3, Primitive::CircleSmall),
            B::DiamondThinLinked => (Omni, 0.3, Primitive::Diamond),
            B::SquareSmallThinLinked => (Omni, 0.3, Primitive::SquareSmall),
            B::Star8ThinLinked => (Omni, 0.3, Primitive::Star8),
            B::Star4ThinLinked => (Omni, 0.3, Primitive::Star4),
            _ => return None,
        };
        Some(Link { axis, fraction, base })
    }

    /// Draws module `(row, col)` of `matrix` into `rect`.
    pub fn draw(self, p: &mut Painter<'_>, rect: ModuleRect, matrix: &dyn Matrix, row: i32, col: i32) {
        let ModuleRect { x, y, w, h } = rect;
        if let Some(link) = self.link() {
            linked::draw(p, link, rect, matrix, row, col);
        } else {
            self.primitive().unwrap_or(Primitive::Square).draw(p, x, y, w, h);
        }
    }
}

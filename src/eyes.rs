//! Finder pattern ("eye") frames and balls.
//!
//! Every style is authored once, for the top-left eye, in eye-local
//! coordinates. The other two eyes reuse the same drawing code through an
//! [`EyePlacement`]: a quarter-turn rotation plus a translation applied to a
//! scoped [`Painter`], so nothing has to be undone afterwards.

use tiny_skia::{LineCap, PathBuilder, Transform};

use crate::registry::named_registry;
use crate::shapes::{circle, shifted_square, Primitive};
use crate::surface::Painter;

/// The three corners holding a finder pattern.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EyeCorner {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl EyeCorner {
    pub const ALL: [EyeCorner; 3] = [EyeCorner::TopLeft, EyeCorner::TopRight, EyeCorner::BottomLeft];

    /// Where the canonical (top-left) eye lands for this corner of a symbol
    /// `width` pixels wide.
    pub fn placement(self, width: f32) -> EyePlacement {
        match self {
            EyeCorner::TopLeft => EyePlacement { dx: 0.0, dy: 0.0, quarter_turns: 0 },
            EyeCorner::TopRight => EyePlacement { dx: width, dy: 0.0, quarter_turns: 1 },
            EyeCorner::BottomLeft => EyePlacement { dx: 0.0, dy: width, quarter_turns: 3 },
        }
    }
}

/// Rotation by `quarter_turns` x 90 degrees clockwise (y axis down), then a
/// translation by `(dx, dy)`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EyePlacement {
    pub dx: f32,
    pub dy: f32,
    pub quarter_turns: u8,
}

impl EyePlacement {
    pub fn transform(self) -> Transform {
        let (cos, sin) = match self.quarter_turns % 4 {
            0 => (1.0, 0.0),
            1 => (0.0, 1.0),
            2 => (-1.0, 0.0),
            _ => (0.0, -1.0),
        };
        Transform::from_row(cos, sin, -sin, cos, self.dx, self.dy)
    }
}

/// Measurements handed to every eye drawing function.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EyeGeometry {
    /// Symbol width in pixels.
    pub width: f32,
    /// Module width.
    pub tile: f32,
    /// Half a module; frame strokes are centered this far inside the eye.
    pub delta: f32,
    /// Eye side (7 modules for frames, 3 for balls).
    pub side: f32,
    pub radius: f32,
}

impl EyeGeometry {
    pub fn frame(width: f32, tile: f32) -> Self {
        let side = tile * 7.0;
        Self { width, tile, delta: tile / 2.0, side, radius: side / 2.0 }
    }

    pub fn ball(width: f32, tile: f32) -> Self {
        let side = tile * 3.0;
        Self { width, tile, delta: 0.0, side, radius: side / 2.0 }
    }
}

named_registry! {
    /// Eye frame styles.
    pub enum EyeFrameShape (default Square) {
        Square => "square",
        SquaredSmall => "squaredSmall",
        Octa => "octa",
        Round => "round",
        Crystal => "crystal",
        CrystalWide => "crystalWide",
        Leaf => "leaf",
        LeafSharp => "leafSharp",
        RoundCorner => "roundCorner",
        Pillow => "pillow",
        Petal => "petal",
        PetalCaved => "petalCaved",
        Cookie => "cookie",
        Cookie2 => "cookie2",
        Dotted => "dotted",
        DottedTight => "dottedTight",
        Circled => "circled",
        CircledTight => "circledTight",
        Diamonds => "diamonds",
        DiamondsTight => "diamondsTight",
        Mosaic => "mosaic",
        MosaicTight => "mosaicTight",
        Starred => "starred",
        StarredTight => "starredTight",
        Starred4 => "starred4",
        Starred4Tight => "starred4Tight",
        Starred6 => "starred6",
        Starred6Tight => "starred6Tight",
        Starred8 => "starred8",
        Starred8Tight => "starred8Tight",
        Snowflakes => "snowflakes",
        SnowflakesTight => "snowflakesTight",
    }
}

impl EyeFrameShape {
    /// Stamped families: the module shape, stamps per module, and whether the
    /// frame may be filled when drawn as a ball.
    fn stamps(self) -> Option<(Primitive, f32, bool)> {
        use EyeFrameShape as F;
        Some(match self {
            F::SquaredSmall => (Primitive::SquareSmall, 1.0, false),
            F::Dotted => (Primitive::Dot, 1.0, false),
            F::DottedTight => (Primitive::Dot, 1.5, false),
            F::Circled => (Primitive::Circle, 1.0, true),
            F::CircledTight => (Primitive::Circle, 1.5, false),
            F::Diamonds => (Primitive::Diamond, 1.0, true),
            F::DiamondsTight => (Primitive::Diamond, 1.5, false),
            F::Mosaic => (Primitive::Mosaic, 1.0, true),
            F::MosaicTight => (Primitive::Mosaic, 1.5, false),
            F::Starred => (Primitive::Star, 1.0, false),
            F::StarredTight => (Primitive::Star, 1.5, false),
            F::Starred4 => (Primitive::Star4, 1.0, false),
            F::Starred4Tight => (Primitive::Star4, 1.5, false),
            F::Starred6 => (Primitive::Star6, 1.0, false),
            F::Starred6Tight => (Primitive::Star6, 1.5, false),
            F::Starred8 => (Primitive::Star8, 1.0, false),
            F::Starred8Tight => (Primitive::Star8, 1.5, false),
            F::Snowflakes => (Primitive::Snowflake, 1.0, false),
            F::SnowflakesTight => (Primitive::Snowflake, 1.5, false),
            _ => return None,
        })
    }

    /// Draws one eye frame in eye-local coordinates. Frames are stroked with
    /// the current line width unless `filled`, which is how a frame doubles
    /// as a ball.
    pub fn draw(self, painter: &mut Painter<'_>, g: &EyeGeometry, filled: bool) {
        use EyeFrameShape as F;
        if let Some((primitive, density, can_fill)) = self.stamps() {
            stamped(painter, g, primitive, density, filled && can_fill);
            return;
        }
        match self {
            F::Square => {
                let l = g.side - g.tile;
                if filled {
                    painter.fill_rect(g.delta, g.delta, l, l);
                } else {
                    painter.stroke_rect(g.delta, g.delta, l, l);
                }
            }
            F::Octa => octa(painter, g, filled),
            F::Round => round(painter, g, filled),
            F::Crystal => crystal(painter, g, 2.0, filled),
            F::CrystalWide => crystal(painter, g, 1.0, filled),
            F::Leaf => leaf(painter, g, filled),
            F::LeafSharp => leaf_sharp(painter, g, filled),
            F::RoundCorner => round_corner(painter, g, filled),
            F::Pillow => pillow(painter, g, filled),
            F::Petal => petal(painter, g, filled, false),
            F::PetalCaved => petal(painter, g, filled, true),
            F::Cookie => cookie(painter, g, filled),
            F::Cookie2 => cookie2(painter, g, filled),
            // stamped frames are handled above
            _ => {}
        }
    }
}

/// Stamps `primitive` along the four edges of the eye, `density` stamps per module.
fn stamped(painter: &mut Painter<'_>, g: &EyeGeometry, primitive: Primitive, density: f32, fill_center: bool) {
    let (t, s) = (g.tile, g.side);
    let st = s - t;
    let count = (6.0 * density).ceil() as u32;
    for k in 0..count {
        let i = k as f32 / density;
        primitive.draw(painter, i * t, 0.0, t, t);
        primitive.draw(painter, st - i * t, st, t, t);
        primitive.draw(painter, 0.0, st - i * t, t, t);
        primitive.draw(painter, st, i * t, t, t);
    }
    if fill_center {
        let l = t / 2.0;
        painter.fill_rect(l, l, s - t, s - t);
    }
}

fn round(painter: &mut Painter<'_>, g: &EyeGeometry, filled: bool) {
    let (t, d) = (g.tile, g.delta);
    let p = t * 2.0 + d;
    let d2 = d * 2.0;
    let p2 = t * 2.0 + d2;
    let sd = g.side + d;

    let mut pb = PathBuilder::new();
    pb.move_to(p, d);
    pb.line_to(sd - p2, d);
    pb.quad_to(sd - d2, d, sd - d2, p);
    pb.line_to(sd - d2, sd - p2);
    pb.quad_to(sd - d2, sd - d2, sd - p2, sd - d2);
    pb.line_to(p, sd - d2);
    pb.quad_to(d, sd - d2, d, sd - p2);
    pb.line_to(d, p);
    pb.quad_to(d, d, p, d);
    pb.close();
    painter.paint(pb, filled);
}

fn cookie2(painter: &mut Painter<'_>, g: &EyeGeometry, filled: bool) {
    let (t, d) = (g.tile, g.delta);
    let p = t * 2.0 + d;
    let p2 = t * 2.0 + t;
    let dd = t + t;
    let sd = if filled { g.side + t } else { g.side + d };

    let mut pb = PathBuilder::new();
    pb.move_to(p, d);
    pb.line_to(sd - p2 + t, d);
    pb.quad_to(sd - dd, d + t, sd - t, p - t);
    pb.line_to(sd - t, sd - p2);
    pb.quad_to(sd - t, sd - t, sd - p2, sd - t);
    pb.line_to(d + t, sd - t);
    pb.quad_to(t + d, sd - dd, d, sd - p2 + t);
    pb.line_to(d, p);
    pb.quad_to(d, d, p, d);
    pb.close();
    painter.paint(pb, filled);
}

fn cookie(painter: &mut Painter<'_>, g: &EyeGeometry, filled: bool) {
    let (t, d) = (g.tile, g.delta);
    let p = t * 2.0 + d;
    let p2 = t * 2.0 + t;
    let dd = t + t;
    let sd = if filled { g.side + t } else { g.side + d };

    let mut pb = PathBuilder::new();
    pb.move_to(p, d);
    pb.line_to(sd - p2, d);
    pb.quad_to(sd - t, d, sd - t, p);
    pb.line_to(sd - t, sd - p2 + t);
    pb.quad_to(sd - dd, sd - dd, sd - p2 + t, sd - t);
    pb.line_to(p, sd - t);
    pb.quad_to(d, sd - t, d, sd - p2);
    pb.line_to(d, p - t);
    pb.quad_to(t + d, t + d, p - t, d);
    pb.close();

    let cap = painter.line_cap();
    painter.set_line_cap(LineCap::Round);
    painter.paint(pb, filled);
    painter.set_line_cap(cap);
}

fn octa(painter: &mut Painter<'_>, g: &EyeGeometry, filled: bool) {
    let (t, d) = (g.tile, g.delta);
    let p = t + d;
    let d2 = d * 2.0;
    let p2 = t + d2;
    let sd = if filled { g.side } else { g.side + d };

    let mut pb = PathBuilder::new();
    pb.move_to(p, d);
    pb.line_to(sd - p2, d);
    pb.line_to(sd - d2, p);
    pb.line_to(sd - d2, sd - p2);
    pb.line_to(sd - p2, sd - d2);
    pb.line_to(p, sd - d2);
    pb.line_to(d, sd - p2);
    pb.line_to(d, p);
    pb.line_to(p, d);
    pb.close();
    painter.paint(pb, filled);
}

fn leaf(painter: &mut Painter<'_>, g: &EyeGeometry, filled: bool) {
    let (t, d) = (g.tile, g.delta);
    let p = t * 2.0 + d;
    let d2 = d * 2.0;
    let p2 = t * 2.0 + d2;
    let sd = g.side + d;

    let mut pb = PathBuilder::new();
    pb.move_to(d, d);
    pb.line_to(sd - p2, d);
    pb.quad_to(sd - d2, d, sd - d2, p);
    pb.line_to(sd - d2, sd - d2);
    pb.line_to(p, sd - d2);
    pb.quad_to(d, sd - d2, d, sd - p2);
    pb.line_to(d, d);
    pb.close();
    painter.paint(pb, filled);
}

/// Two opposite corners cut at 45 degrees; `k` modules deep.
fn crystal(painter: &mut Painter<'_>, g: &EyeGeometry, k: f32, filled: bool) {
    let (t, d) = (g.tile, g.delta);
    let p = t * k + d;
    let d2 = d * 2.0;
    let p2 = t * k + d2;
    let sd = g.side + d;

    let mut pb = PathBuilder::new();
    pb.move_to(d, d);
    pb.line_to(sd - p2, d);
    pb.line_to(sd - d2, p);
    pb.line_to(sd - d2, sd - d2);
    pb.line_to(p, sd - d2);
    pb.line_to(d, sd - p2);
    pb.line_to(d, d);
    pb.close();
    painter.paint(pb, filled);
}

fn leaf_sharp(painter: &mut Painter<'_>, g: &EyeGeometry, filled: bool) {
    let (t, d) = (g.tile, g.delta);
    let p = t * 2.0 + d;
    let d2 = t;
    let b = t / 2.0 + d / 2.0;
    let p2 = t * 2.0 + d;
    let sd = if filled { g.side + t } else { g.side + d };

    let mut pb = PathBuilder::new();
    pb.move_to(d, d);
    pb.line_to(sd - p2, b);
    pb.quad_to(sd - d2, b, sd - d2, p + d);
    pb.line_to(sd - d2, sd - d2);
    pb.line_to(p + b, sd - d2);
    pb.quad_to(b, sd - d2, b, sd - p2);
    pb.line_to(d, d);
    pb.close();
    painter.paint(pb, filled);
}

fn round_corner(painter: &mut Painter<'_>, g: &EyeGeometry, filled: bool) {
    let (t, d) = (g.tile, g.delta);
    let p = t * 2.0 + d;
    let d2 = d * 2.0;
    let sd = g.side + d;

    let mut pb = PathBuilder::new();
    pb.move_to(p, d);
    pb.line_to(sd - d2, d);
    pb.line_to(sd - d2, sd - d2);
    pb.line_to(d, sd - d2);
    pb.line_to(d, p);
    pb.quad_to(d, d, p, d);
    pb.close();
    painter.paint(pb, filled);
}

fn petal(painter: &mut Painter<'_>, g: &EyeGeometry, filled: bool, caved: bool) {
    let (t, d) = (g.tile, g.delta);
    let p = t * 2.0 + d;
    let d2 = d * 2.0;
    let p2 = t * 2.0 + d2;
    let sd = g.side + d;

    let mut pb = PathBuilder::new();
    pb.move_to(p, d);
    pb.line_to(sd - p2, d);
    pb.quad_to(sd - d2, d, sd - d2, p);
    pb.line_to(sd - d2, sd - d2);
    if caved {
        pb.quad_to(sd - d2 - t * 2.0, sd - d2 - t / 3.0, p, sd - d2);
    } else {
        pb.line_to(p, sd - d2);
    }
    pb.quad_to(d, sd - d2, d, sd - p2);
    pb.line_to(d, p);
    pb.quad_to(d, d, p, d);
    pb.close();
    painter.paint(pb, filled);
}

fn pillow(painter: &mut Painter<'_>, g: &EyeGeometry, filled: bool) {
    let (t, d) = (g.tile, g.delta);
    let x = d + d / 2.0;
    let y = x;
    let l = t * 7.0 - (d + d / 2.0);
    let p = t * 7.0 / 2.0;
    let cc = t * 2.0 + d - d / 3.0;

    let mut pb = PathBuilder::new();
    pb.move_to(x, x);
    pb.quad_to(p, p - cc, l, y);
    pb.quad_to(p + cc, p, l, l);
    pb.quad_to(p, p + cc, x, l);
    pb.quad_to(p - cc, p, x, y);
    pb.close();
    painter.paint(pb, filled);
}

named_registry! {
    /// Eye ball styles.
    pub enum EyeBallShape (default Square) {
        Square => "square",
        Circle => "circle",
        Diamond => "diamond",
        Star => "star",
        Star6 => "star6",
        Star8 => "star8",
        Octa => "octa",
        Round => "round",
        Leaf => "leaf",
        LeafSharp => "leafSharp",
        Cookie => "cookie",
        Cookie2 => "cookie2",
        RoundCorner => "roundCorner",
        Petal => "petal",
        Circled => "circled",
        Diamonds => "diamonds",
        Mosaic => "mosaic",
        Nine => "nine",
        NineFilled => "nineFilled",
        NineMosaic => "nineMosaic",
        Asterisk => "asterisk",
        Pillow => "pillow",
        Burger => "burger",
        Sausages => "sausages",
        Crystal => "crystal",
        PetalCaved => "petalCaved",
    }
}

/// How a ball style is produced.
enum BallKind {
    /// A body primitive filling the 3x3 center.
    Primitive(Primitive),
    /// An eye frame drawn filled at ball scale.
    Frame(EyeFrameShape),
    /// A ball with its own drawing code.
    Own,
}

impl EyeBallShape {
    fn kind(self) -> BallKind {
        use EyeBallShape as B;
        match self {
            B::Square => BallKind::Primitive(Primitive::Square),
            B::Circle => BallKind::Primitive(Primitive::Circle),
            B::Diamond => BallKind::Primitive(Primitive::Diamond),
            B::Star => BallKind::Primitive(Primitive::Star),
            B::Star6 => BallKind::Primitive(Primitive::Star6),
            B::Star8 => BallKind::Primitive(Primitive::Star8),
            B::Octa => BallKind::Frame(EyeFrameShape::Octa),
            B::Round => BallKind::Frame(EyeFrameShape::Round),
            B::Leaf => BallKind::Frame(EyeFrameShape::Leaf),
            B::LeafSharp => BallKind::Frame(EyeFrameShape::LeafSharp),
            B::Cookie => BallKind::Frame(EyeFrameShape::Cookie),
            B::Cookie2 => BallKind::Frame(EyeFrameShape::Cookie2),
            B::RoundCorner => BallKind::Frame(EyeFrameShape::RoundCorner),
            B::Petal => BallKind::Frame(EyeFrameShape::Petal),
            B::Circled => BallKind::Frame(EyeFrameShape::Circled),
            B::Diamonds => BallKind::Frame(EyeFrameShape::Diamonds),
            B::Mosaic => BallKind::Frame(EyeFrameShape::Mosaic),
            _ => BallKind::Own,
        }
    }

    /// Draws one ball in eye-local coordinates; the ball occupies modules 2..5.
    pub fn draw(self, painter: &mut Painter<'_>, g: &EyeGeometry) {
        let t = g.tile;
        let t2 = t * 2.0;
        match self.kind() {
            BallKind::Primitive(primitive) => primitive.draw(painter, t2, t2, g.side, g.side),
            BallKind::Frame(frame) => {
                let scaled = EyeGeometry { tile: t / 7.0 * 3.0, delta: 0.0, ..*g };
                let mut local = painter.transformed(Transform::from_translate(t2, t2));
                frame.draw(&mut local, &scaled, true);
            }
            BallKind::Own => self.draw_own(painter, g),
        }
    }

    fn draw_own(self, painter: &mut Painter<'_>, g: &EyeGeometry) {
        use EyeBallShape as B;
        let (t, s) = (g.tile, g.side);
        let t2 = t * 2.0;
        let center = t2 + t / 2.0;
        match self {
            B::Nine => nine(painter, t, |p, x, y| circle(p, x, y, t, t, 0.5)),
            B::NineFilled => {
                nine(painter, t, |p, x, y| circle(p, x, y, t, t, 0.5));
                painter.fill_rect(center, center, t2, t2);
            }
            B::NineMosaic => {
                nine(painter, t, |p, x, y| {
                    let shift = p.random() * t / 2.0;
                    shifted_square(p, x, y, t, t, shift);
                });
                painter.fill_rect(center, center, t2, t2);
            }
            B::Asterisk => {
                for i in 0..3 {
                    for j in 0..3 {
                        let shift = if (i % 2 + j % 2) % 2 == 1 { 0.0 } else { t / 2.0 };
                        shifted_square(painter, t * j as f32 + t2, t * i as f32 + t2, t, t, shift);
                    }
                }
                painter.fill_rect(center, center, t2, t2);
            }
            B::Pillow => {
                let (x, y) = (t2, t2);
                let l = t * 5.0;
                let p = x + t * 3.0 / 2.0;
                let cc = t;
                let mut pb = PathBuilder::new();
                pb.move_to(x, x);
                pb.quad_to(p, p - cc, l, y);
                pb.quad_to(p + cc, p, l, l);
                pb.quad_to(p, p + cc, x, l);
                pb.quad_to(p - cc, p, x, y);
                pb.close();
                painter.fill(pb);
            }
            B::Burger => {
                let rr = 0.45;
                for i in 0..3 {
                    let row = t * i as f32 + t2;
                    circle(painter, t2, row, t, t, rr);
                    circle(painter, t2 + t2, row, t, t, rr);
                    painter.fill_rect(center, row + t * (0.5 - rr), t2, t * rr * 2.0);
                }
            }
            B::Sausages => {
                let rr = 0.45;
                for i in 0..3 {
                    let col = t * i as f32 + t2;
                    circle(painter, col, t2, t, t, rr);
                    circle(painter, col, t2 + t2, t, t, rr);
                    painter.fill_rect(col + t * (0.5 - rr), center, t * rr * 2.0, t2);
                }
            }
            B::Crystal => {
                let (x, y) = (t2, t2);
                let l = t * 3.0 / 2.0;
                let mut pb = PathBuilder::new();
                pb.move_to(x, y);
                pb.line_to(x + l, y);
                pb.line_to(x + s, y + l);
                pb.line_to(x + s, y + s);
                pb.line_to(x + l, y + s);
                pb.line_to(x, x + l);
                pb.line_to(x, y);
                pb.close();
                painter.fill(pb);
            }
            B::PetalCaved => {
                let p = t;
                let mut pb = PathBuilder::new();
                pb.move_to(p, 0.0);
                pb.line_to(s - p, 0.0);
                pb.quad_to(s, 0.0, s, p);
                pb.line_to(s, s);
                pb.quad_to(t2, s - t / 3.0, p, s);
                pb.quad_to(0.0, s, 0.0, s - p);
                pb.line_to(0.0, p);
                pb.quad_to(0.0, 0.0, p, 0.0);
                pb.close();
                let mut local = painter.transformed(Transform::from_translate(t2, t2));
                local.fill(pb);
            }
            // primitive and frame balls are drawn by `draw`
            _ => {}
        }
    }
}

/// Calls `stamp` for the top-left corner of each cell of the 3x3 ball grid.
fn nine(painter: &mut Painter<'_>, t: f32, mut stamp: impl FnMut(&mut Painter<'_>, f32, f32)) {
    let t2 = t * 2.0;
    for i in 0..3 {
        for j in 0..3 {
            stamp(painter, t * j as f32 + t2, t * i as f32 + t2);
        }
    }
}

/// Draws `frame` at all three eye corners, stroked with one module wide lines.
pub fn draw_frames(painter: &mut Painter<'_>, frame: EyeFrameShape, width: f32, tile: f32) {
    let geometry = EyeGeometry::frame(width, tile);
    painter.set_line_width(tile);
    for corner in EyeCorner::ALL {
        let placement = corner.placement(width);
        log::trace!("eye frame {frame} at {corner:?}: {placement:?}");
        let mut local = painter.transformed(placement.transform());
        frame.draw(&mut local, &geometry, false);
    }
}

/// Draws `ball` at all three eye corners.
pub fn draw_balls(painter: &mut Painter<'_>, ball: EyeBallShape, width: f32, tile: f32) {
    let geometry = EyeGeometry::ball(width, tile);
    for corner in EyeCorner::ALL {
        let placement = corner.placement(width);
        log::trace!("eye ball {ball} at {corner:?}: {placement:?}");
        let mut local = painter.transformed(placement.transform());
        ball.draw(&mut local, &geometry);
    }
}

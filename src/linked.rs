//! Connector shapes.
//!
//! Linked body shapes look at the neighboring modules and bridge every dark
//! neighbor with a bar, so runs of dark modules read as wires or bead chains.
//! The base primitive is dropped where it would be completely hidden under a
//! straight run of bars.

use crate::matrix::{Matrix, ModuleRect};
use crate::shapes::Primitive;
use crate::surface::Painter;

/// Which neighbors a link family connects to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LinkAxis {
    /// Left and right.
    Horizontal,
    /// Up and down.
    Vertical,
    /// All four sides.
    Omni,
}

/// Constants of a link family.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Link {
    pub axis: LinkAxis,
    /// Bar thickness as a fraction of the module size.
    pub fraction: f32,
    pub base: Primitive,
}

/// Dark state of the four direct neighbors.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Neighbors {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Neighbors {
    pub fn around(matrix: &dyn Matrix, row: i32, col: i32) -> Self {
        Self {
            left: matrix.is_dark(row, col - 1),
            right: matrix.is_dark(row, col + 1),
            up: matrix.is_dark(row - 1, col),
            down: matrix.is_dark(row + 1, col),
        }
    }

    pub fn count(self) -> usize {
        [self.left, self.right, self.up, self.down].iter().filter(|&&d| d).count()
    }

    /// A straight run passes through: both horizontal or both vertical neighbors are dark.
    pub fn straight(self) -> bool {
        (self.left && self.right) || (self.up && self.down)
    }
}

/// Draws one linked module.
pub fn draw(p: &mut Painter<'_>, link: Link, rect: ModuleRect, matrix: &dyn Matrix, row: i32, col: i32) {
    let near = Neighbors::around(matrix, row, col);
    match link.axis {
        LinkAxis::Horizontal => horizontal(p, link, rect, near),
        LinkAxis::Vertical => vertical(p, link, rect, near),
        LinkAxis::Omni => omni(p, link, rect, near),
    }
}

fn horizontal(p: &mut Painter<'_>, link: Link, rect: ModuleRect, near: Neighbors) {
    let ModuleRect { x, y, w, h } = rect;
    let r = h * link.fraction;
    let w2 = w / 2.0;
    let top = y + h / 2.0 - r / 2.0;

    if !near.left || !near.right {
        link.base.draw(p, x, y, w, h);
    }
    if near.left && near.right {
        p.fill_rect(x, top, w, r);
    } else {
        if near.left {
            p.fill_rect(x, top, w2, r);
        }
        if near.right {
            p.fill_rect(x + w2, top, w2, r);
        }
    }
}

fn vertical(p: &mut Painter<'_>, link: Link, rect: ModuleRect, near: Neighbors) {
    let ModuleRect { x, y, w, h } = rect;
    let r = w * link.fraction;
    let h2 = h / 2.0;
    let left = x + w / 2.0 - r / 2.0;

    if !near.up || !near.down {
        link.base.draw(p, x, y, w, h);
    }
    if near.up && near.down {
        p.fill_rect(left, y, r, h);
    } else {
        if near.up {
            p.fill_rect(left, y, r, h2);
        }
        if near.down {
            p.fill_rect(left, y + h2, r, h2);
        }
    }
}

fn omni(p: &mut Painter<'_>, link: Link, rect: ModuleRect, near: Neighbors) {
    let ModuleRect { x, y, w, h } = rect;
    let (w2, h2) = (w / 2.0, h / 2.0);
    let (rw, rh) = (w * link.fraction, h * link.fraction);
    let (pw, ph) = (w2 - rw / 2.0, h2 - rh / 2.0);

    if near.count() < 2 || !near.straight() {
        link.base.draw(p, x, y, w, h);
    }
    if near.left {
        p.fill_rect(x, y + ph, w2, rh);
    }
    if near.right {
        p.fill_rect(x + w2, y + ph, w2, rh);
    }
    if near.up {
        p.fill_rect(x + pw, y, rw, h2);
    }
    if near.down {
        p.fill_rect(x + pw, y + h2, rw, h2);
    }
}

//! Fill styles and the gradient resolver.
//!
//! A design either paints its body modules with one flat color or with a
//! gradient spanning the whole symbol. The gradient geometry is chosen by name
//! from [`Gradient`]; the color stops come from `color`, `colorMiddle` and
//! `colorFinish`.

use tiny_skia::{GradientStop, LinearGradient, Point, RadialGradient, Shader, SpreadMode, Transform};

use crate::color::Rgba;
use crate::design::Design;
use crate::registry::named_registry;

named_registry! {
    /// Gradient geometries.
    pub enum Gradient (default None) {
        None => "none",
        /// Top-left corner to bottom-right corner.
        Diagonal => "diagonal",
        /// Top-right corner to bottom-left corner.
        DiagonalLeft => "diagonalLeft",
        Horizontal => "horizontal",
        Vertical => "vertical",
        /// From the center outwards.
        Radial => "radial",
    }
}

/// A `(position, color)` pair along a gradient.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// How a shape is filled (or stroked).
#[derive(Clone, PartialEq, Debug)]
pub enum FillStyle {
    Solid(Rgba),
    Linear { start: Point, end: Point, stops: Vec<ColorStop> },
    Radial { center: Point, radius: f32, stops: Vec<ColorStop> },
}

impl FillStyle {
    pub fn stops(&self) -> &[ColorStop] {
        match self {
            FillStyle::Solid(_) => &[],
            FillStyle::Linear { stops, .. } | FillStyle::Radial { stops, .. } => stops,
        }
    }

    /// Converts to a tiny-skia shader. `None` when a gradient has no stops.
    pub fn to_shader(&self) -> Option<Shader<'static>> {
        match self {
            FillStyle::Solid(color) => Some(Shader::SolidColor(color.to_skia())),
            FillStyle::Linear { start, end, stops } => LinearGradient::new(
                *start,
                *end,
                skia_stops(stops),
                SpreadMode::Pad,
                Transform::identity(),
            ),
            FillStyle::Radial { center, radius, stops } => RadialGradient::new(
                *center,
                *center,
                *radius,
                skia_stops(stops),
                SpreadMode::Pad,
                Transform::identity(),
            ),
        }
    }
}

fn skia_stops(stops: &[ColorStop]) -> Vec<GradientStop> {
    stops
        .iter()
        .map(|stop| GradientStop::new(stop.offset, stop.color.to_skia()))
        .collect()
}

impl Gradient {
    /// Lays out this gradient over a `width` x `width` symbol.
    fn shape(self, width: f32, stops: Vec<ColorStop>) -> FillStyle {
        let w = width;
        let (x0, y0, x1, y1) = match self {
            Gradient::None => {
                let color = stops.first().map_or(Rgba::BLACK, |s| s.color);
                return FillStyle::Solid(color);
            }
            Gradient::Radial => {
                let r = w / 2.0;
                return FillStyle::Radial { center: Point::from_xy(r, r), radius: r, stops };
            }
            Gradient::Diagonal => (0.0, 0.0, w, w),
            Gradient::DiagonalLeft => (w, 0.0, 0.0, w),
            Gradient::Horizontal => (0.0, 0.0, w, 0.0),
            Gradient::Vertical => (0.0, 0.0, 0.0, w),
        };
        FillStyle::Linear { start: Point::from_xy(x0, y0), end: Point::from_xy(x1, y1), stops }
    }
}

/// Resolves the body fill of `design` for a symbol `width` pixels wide.
///
/// Without gradients (disabled or `none`) this is the flat `color`. Otherwise
/// stops are registered at 0.0 (`color`), 0.5 (`colorMiddle`, when set) and
/// 1.0 (`colorFinish`, when set), so a gradient may have only two stops.
pub fn resolve_fill(design: &Design, width: f32) -> FillStyle {
    if !design.enable_gradient || design.gradient == Gradient::None {
        return FillStyle::Solid(design.color);
    }

    let mut stops = vec![ColorStop { offset: 0.0, color: design.color }];
    if let Some(color) = design.color_middle {
        stops.push(ColorStop { offset: 0.5, color });
    }
    if let Some(color) = design.color_finish {
        stops.push(ColorStop { offset: 1.0, color });
    }
    design.gradient.shape(width, stops)
}

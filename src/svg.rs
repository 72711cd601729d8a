//! Vector backend producing an SVG document.
//!
//! Every fill becomes one `<path>` element. Gradients are emitted once into
//! `<defs>` and referenced by id. Images are embedded as base64 PNG data URLs.

use std::fmt::Write as _;

use image::RgbaImage;
use tiny_skia::{LineCap, LineJoin, Path, PathSegment, Rect, Stroke, Transform};

use crate::gradient::FillStyle;
use crate::helper::generate_data_url;
use crate::surface::Surface;

/// An SVG surface. Call [`SvgSurface::finish`] to get the document.
pub struct SvgSurface {
    size: u32,
    defs: String,
    body: String,
    gradients: Vec<(FillStyle, String)>,
}

impl SvgSurface {
    pub fn new(size: u32) -> Self {
        Self { size, defs: String::new(), body: String::new(), gradients: Vec::new() }
    }

    /// Returns the SVG document. Uses Unix newlines (\n) regardless of platform.
    pub fn finish(self) -> String {
        let mut result = String::new();
        result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
        result += &format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" ",
                "version=\"1.1\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\">\n",
            ),
            self.size
        );
        if !self.defs.is_empty() {
            result += "\t<defs>\n";
            result += &self.defs;
            result += "\t</defs>\n";
        }
        result += &self.body;
        result += "</svg>\n";
        result
    }

    /// `fill="..."` / `stroke="..."` attributes for `style`, defining gradients
    /// as needed.
    fn paint_attrs(&mut self, attr: &str, style: &FillStyle) -> String {
        match style {
            FillStyle::Solid(color) => {
                let mut attrs = format!("{attr}=\"{}\"", color.to_hex());
                if !color.is_opaque() {
                    let _ = write!(attrs, " {attr}-opacity=\"{}\"", num(color.opacity()));
                }
                attrs
            }
            gradient => format!("{attr}=\"url(#{})\"", self.gradient_id(gradient)),
        }
    }

    fn gradient_id(&mut self, style: &FillStyle) -> String {
        if let Some((_, id)) = self.gradients.iter().find(|(known, _)| known == style) {
            return id.clone();
        }
        let id = format!("qr-gradient-{}", self.gradients.len());
        let (open, close) = match style {
            FillStyle::Linear { start, end, .. } => (
                format!(
                    concat!(
                        "\t\t<linearGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" ",
                        "x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">\n",
                    ),
                    num(start.x),
                    num(start.y),
                    num(end.x),
                    num(end.y),
                    id = id,
                ),
                "\t\t</linearGradient>\n",
            ),
            FillStyle::Radial { center, radius, .. } => (
                format!(
                    concat!(
                        "\t\t<radialGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" ",
                        "cx=\"{0}\" cy=\"{1}\" fx=\"{0}\" fy=\"{1}\" r=\"{2}\">\n",
                    ),
                    num(center.x),
                    num(center.y),
                    num(*radius),
                    id = id,
                ),
                "\t\t</radialGradient>\n",
            ),
            FillStyle::Solid(_) => (String::new(), ""),
        };
        self.defs += &open;
        for stop in style.stops() {
            let _ = writeln!(
                self.defs,
                "\t\t\t<stop offset=\"{}\" stop-color=\"{}\" stop-opacity=\"{}\"/>",
                num(stop.offset),
                stop.color.to_hex(),
                num(stop.color.opacity())
            );
        }
        self.defs += close;
        self.gradients.push((style.clone(), id.clone()));
        id
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> u32 {
        self.size
    }

    fn is_vector(&self) -> bool {
        true
    }

    fn fill_path(&mut self, path: &Path, style: &FillStyle, transform: Transform) {
        let Some(path) = path.clone().transform(transform) else {
            return;
        };
        let fill = self.paint_attrs("fill", style);
        let _ = writeln!(self.body, "\t<path d=\"{}\" {fill}/>", path_data(&path));
    }

    fn stroke_path(&mut self, path: &Path, style: &FillStyle, stroke: &Stroke, transform: Transform) {
        if stroke.width <= 0.0 {
            return;
        }
        let paint = self.paint_attrs("stroke", style);
        let cap = match stroke.line_cap {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        };
        let join = match stroke.line_join {
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
            _ => "miter",
        };
        let mut element = format!(
            concat!(
                "\t<path d=\"{}\" fill=\"none\" {paint} stroke-width=\"{}\" ",
                "stroke-linecap=\"{cap}\" stroke-linejoin=\"{join}\" stroke-miterlimit=\"{}\"",
            ),
            path_data(path),
            num(stroke.width),
            num(stroke.miter_limit),
            paint = paint,
            cap = cap,
            join = join,
        );
        if !transform.is_identity() {
            let t = transform;
            let _ = write!(
                element,
                " transform=\"matrix({} {} {} {} {} {})\"",
                num(t.sx),
                num(t.ky),
                num(t.kx),
                num(t.sy),
                num(t.tx),
                num(t.ty)
            );
        }
        element += "/>\n";
        self.body += &element;
    }

    fn draw_image(&mut self, image: &RgbaImage, rect: Rect) {
        let href = match generate_data_url(image) {
            Ok(href) => href,
            Err(err) => {
                log::warn!("cannot embed image in SVG: {err}");
                return;
            }
        };
        let _ = writeln!(
            self.body,
            concat!(
                "\t<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" ",
                "preserveAspectRatio=\"none\" xlink:href=\"{href}\"/>",
            ),
            num(rect.x()),
            num(rect.y()),
            num(rect.width()),
            num(rect.height()),
            href = href,
        );
    }
}

/// SVG path data for `path`.
fn path_data(path: &Path) -> String {
    let mut d = String::new();
    for segment in path.segments() {
        if !d.is_empty() {
            d.push(' ');
        }
        let _ = match segment {
            PathSegment::MoveTo(p) => write!(d, "M{},{}", num(p.x), num(p.y)),
            PathSegment::LineTo(p) => write!(d, "L{},{}", num(p.x), num(p.y)),
            PathSegment::QuadTo(c, p) => write!(d, "Q{},{} {},{}", num(c.x), num(c.y), num(p.x), num(p.y)),
            PathSegment::CubicTo(c1, c2, p) => write!(
                d,
                "C{},{} {},{} {},{}",
                num(c1.x),
                num(c1.y),
                num(c2.x),
                num(c2.y),
                num(p.x),
                num(p.y)
            ),
            PathSegment::Close => write!(d, "Z"),
        };
    }
    d
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
fn num(value: f32) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

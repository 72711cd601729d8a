//! Design configuration.
//!
//! A [`Design`] describes how a symbol looks: body shape, eye frame and ball
//! shapes, colors, gradient and logo. Designs are usually produced by a host UI
//! as JSON objects with camelCase keys; any key may be omitted and falls back
//! to the default design (black square modules on white).
//!
//! # Example
//!
//! ```rust
//! use qrstyle::design::Design;
//! use qrstyle::shapes::BodyShape;
//!
//! let design = Design::from_json(r##"{ "bodyShape": "circle", "color": "#336699" }"##).unwrap();
//! assert_eq!(design.body_shape, BodyShape::Circle);
//! assert_eq!(design.logo_image_scale, 0.5);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::Rgba;
use crate::error::Result;
use crate::eyes::{EyeBallShape, EyeFrameShape};
use crate::gradient::Gradient;
use crate::preview::Preview;
use crate::shapes::BodyShape;

/// Visual configuration of a rendered symbol.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Design {
    pub body_shape: BodyShape,
    pub eye_frame_shape: EyeFrameShape,
    pub eye_ball_shape: EyeBallShape,

    pub color: Rgba,
    #[serde(deserialize_with = "optional_color")]
    pub color_middle: Option<Rgba>,
    #[serde(deserialize_with = "optional_color")]
    pub color_finish: Option<Rgba>,
    pub color_background: Rgba,
    pub eye_frame_color: Rgba,
    pub eye_ball_color: Rgba,

    pub enable_gradient: bool,
    pub gradient: Gradient,

    /// Path of the logo image, if any.
    #[serde(alias = "logoImageUrl")]
    pub logo_image_source: Option<String>,
    /// Logo width as a fraction of the symbol width.
    pub logo_image_scale: f32,
    /// Draws a white halo around the logo (raster surfaces only).
    pub outline_logo: bool,
    /// Clears the modules behind the logo. Takes precedence over `outline_logo`.
    pub clear_logo_background: bool,

    /// Renders a design-picker thumbnail instead of the symbol.
    #[serde(deserialize_with = "preview_mode")]
    pub preview: Option<Preview>,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            body_shape: BodyShape::Square,
            eye_frame_shape: EyeFrameShape::Square,
            eye_ball_shape: EyeBallShape::Square,
            color: Rgba::BLACK,
            color_middle: None,
            color_finish: None,
            color_background: Rgba::WHITE,
            eye_frame_color: Rgba::BLACK,
            eye_ball_color: Rgba::BLACK,
            enable_gradient: false,
            gradient: Gradient::None,
            logo_image_source: None,
            logo_image_scale: 0.5,
            outline_logo: false,
            clear_logo_background: false,
            preview: None,
        }
    }
}

impl Design {
    /// Parses a design from a JSON object. Missing keys take default values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON design file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `true` when a gradient will actually be used for the body.
    pub fn uses_gradient(&self) -> bool {
        self.enable_gradient && self.gradient != Gradient::None
    }
}

/// Empty strings and `null` both mean "no color", as hosts often clear a
/// color picker to an empty string.
fn optional_color<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Rgba>, D::Error> {
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PreviewRepr {
    Flag(bool),
    Name(String),
}

/// `false`, `null` and unknown names select the full symbol.
fn preview_mode<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Preview>, D::Error> {
    Ok(match Option::<PreviewRepr>::deserialize(deserializer)? {
        None | Some(PreviewRepr::Flag(_)) => None,
        Some(PreviewRepr::Name(name)) => {
            let preview = Preview::lookup(&name);
            if preview.is_none() {
                log::warn!("unknown preview mode {name:?}, rendering the full symbol");
            }
            preview
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default_design() {
        assert_eq!(Design::from_json("{}").unwrap(), Design::default());
    }

    #[test]
    fn reads_host_style_design() {
        let design = Design::from_json(
            r##"{
                "bodyShape": "pcbLinked",
                "eyeFrameShape": "round",
                "eyeBallShape": "nine",
                "enableGradient": true,
                "gradient": "diagonal",
                "color": "#ff0000",
                "colorMiddle": "",
                "colorFinish": "#0000ff",
                "logoImageUrl": "logo.png",
                "logoImageScale": 0.3,
                "outlineLogo": true,
                "preview": false
            }"##,
        )
        .unwrap();
        assert_eq!(design.body_shape, BodyShape::PcbLinked);
        assert_eq!(design.eye_frame_shape, EyeFrameShape::Round);
        assert_eq!(design.eye_ball_shape, EyeBallShape::Nine);
        assert!(design.uses_gradient());
        assert_eq!(design.color_middle, None);
        assert_eq!(design.color_finish, Some(Rgba::rgb(0, 0, 255)));
        assert_eq!(design.logo_image_source.as_deref(), Some("logo.png"));
        assert_eq!(design.logo_image_scale, 0.3);
        assert_eq!(design.preview, None);
    }

    #[test]
    fn unknown_names_fall_back_instead_of_failing() {
        let design = Design::from_json(
            r#"{ "bodyShape": "hexagon", "eyeFrameShape": "blob", "eyeBallShape": "?", "gradient": "conic" }"#,
        )
        .unwrap();
        assert_eq!(design.body_shape, BodyShape::Square);
        assert_eq!(design.eye_frame_shape, EyeFrameShape::Square);
        assert_eq!(design.eye_ball_shape, EyeBallShape::Square);
        assert_eq!(design.gradient, Gradient::None);
    }

    #[test]
    fn preview_names_are_parsed() {
        let design = Design::from_json(r#"{ "preview": "eyeBallShape" }"#).unwrap();
        assert_eq!(design.preview, Some(Preview::EyeBallShape));
    }

    #[test]
    fn bad_color_is_an_error() {
        assert!(Design::from_json(r#"{ "color": "not a color" }"#).is_err());
    }

    #[test]
    fn json_round_trip_keeps_names() {
        let design = Design { body_shape: BodyShape::Star8ThinLinked, ..Design::default() };
        let json = design.to_json().unwrap();
        assert!(json.contains("\"star8ThinLinked\""));
        assert_eq!(Design::from_json(&json).unwrap(), design);
    }
}

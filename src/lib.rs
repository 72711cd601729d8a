//! # qrstyle
//!
//! A Rust library for rendering decorative QR codes.
//!
//! `qrstyle` draws an already encoded module matrix with a configurable
//! [`Design`](design::Design): body modules as circles, stars, diamonds or
//! connector shapes that link neighboring dark modules, custom finder pattern
//! ("eye") frames and balls, flat or gradient fills, and a centered logo.
//! Output is an RGBA raster image or an SVG document.
//!
//! ## Features
//!
//! - 35 body shapes, including linked families that bridge adjacent modules.
//! - 32 eye frame and 26 eye ball styles, authored once and placed at all three corners.
//! - Linear and radial gradients with optional middle and finish stops.
//! - Logo compositing with a cleared background or a white outline.
//! - Design-picker thumbnails for every style family.
//! - Unknown style names fall back to defaults instead of failing.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrstyle = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Render a styled symbol to an image buffer:
//!
//! ```rust
//! use qrstyle::design::Design;
//! use qrstyle::encode::{encode, EncodeOptions};
//! use qrstyle::render::Renderer;
//!
//! let design = Design::from_json(r##"{
//!     "bodyShape": "pcbLinked",
//!     "eyeFrameShape": "round",
//!     "eyeBallShape": "circle",
//!     "enableGradient": true,
//!     "gradient": "diagonal",
//!     "color": "#1e3c72",
//!     "colorFinish": "#2a5298"
//! }"##).unwrap();
//!
//! let matrix = encode("https://example.com", &EncodeOptions::default()).unwrap();
//! let image = Renderer::with_seed(7).render_image(&matrix, &design, 300).unwrap();
//! assert_eq!(image.dimensions(), (300, 300));
//! ```
//!
//! Generate an SVG document in one call:
//!
//! ```rust
//! use qrstyle::helper::generate_svg_string;
//!
//! let svg = generate_svg_string("Hello, World!", None, 250).unwrap();
//! assert!(svg.ends_with("</svg>\n"));
//! ```
//!
//! ## Modules
//!
//! - [`encode`]: Text to module matrix, on top of the `qrcode` crate.
//! - [`matrix`]: The [`Matrix`](matrix::Matrix) capability, an owned grid and module geometry.
//! - [`design`]: Design configuration, loadable from JSON.
//! - [`shapes`] and [`linked`]: Body shapes.
//! - [`eyes`]: Eye frames and balls.
//! - [`gradient`]: Fill resolution.
//! - [`logo`]: Logo compositing and the logo cache.
//! - [`preview`]: Design-picker thumbnails.
//! - [`render`]: The rendering pipeline and the [`Renderer`](render::Renderer) session.
//! - [`surface`], [`raster`] and [`svg`]: Drawing backends.
//! - [`helper`]: Utilities for rendering text straight to files, buffers or SVG.
//! - [`logging`]: Logger setup.

mod registry;

pub mod color;
pub mod design;
pub mod encode;
pub mod error;
pub mod eyes;
pub mod gradient;
pub mod helper;
pub mod linked;
pub mod logging;
pub mod logo;
pub mod matrix;
pub mod preview;
pub mod raster;
pub mod render;
pub mod shapes;
pub mod surface;
pub mod svg;

pub use error::{Error, Result};

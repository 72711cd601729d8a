use crate::design::Design;
use crate::encode::{encode, EncodeOptions};
use crate::error::Result;
use crate::render::Renderer;

use base64::Engine as _;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/*---- Utilities ----*/

/// Saves a rendered symbol as a PNG file.
///
/// # Arguments
///
/// * `image` - The rendered symbol.
/// * `directory_path` - Optional. The directory path where the image will be saved.
///   If not provided, the default directory is "generated".
/// * `filename` - Optional. The name of the image file, without extension.
///   If not provided, a timestamp-based filename will be used.
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the image cannot be written.
pub fn save_png(image: &RgbaImage, directory_path: Option<&str>, filename: Option<&str>) -> Result<PathBuf> {
    let directory_path = directory_path.unwrap_or("generated");
    let filename = match filename {
        Some(name) => name.trim_end_matches(".png").to_string(),
        None => {
            let since_the_epoch = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
            since_the_epoch.as_millis().to_string()
        }
    };

    // Check if the directory exists, create it if it doesn't
    if !Path::new(directory_path).exists() {
        fs::create_dir_all(directory_path)?;
    }

    let file_path = Path::new(directory_path).join(format!("{filename}.png"));
    image.save(&file_path)?;
    log::info!("saved {}", file_path.display());
    Ok(file_path)
}

/// Encodes an image as a PNG `data:` URL, ready for an `<img src>` or an SVG `<image>`.
///
/// # Arguments
///
/// * `image` - The rendered symbol.
///
/// # Example
///
/// ```
/// use qrstyle::helper::{generate_data_url, generate_image_buffer};
///
/// let img_buffer = generate_image_buffer("Hello, World!", None, 210).unwrap();
/// let url = generate_data_url(&img_buffer).unwrap();
/// assert!(url.starts_with("data:image/png;base64,"));
/// ```
pub fn generate_data_url(image: &RgbaImage) -> Result<String> {
    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    let data = base64::engine::general_purpose::STANDARD.encode(&png);
    Ok(format!("data:image/png;base64,{data}"))
}

/// Generates a styled QR Code image from the provided content and saves it to a file.
///
/// # Arguments
///
/// * `content` - The content to encode into the QR Code.
/// * `design` - Optional. The look of the symbol. If not provided, the default design is used.
/// * `size` - The width and height of the image, in pixels.
/// * `directory` - Optional. The directory path where the image will be saved.
///   If not provided, the default directory is "generated".
/// * `filename` - Optional. The name of the image file. If not provided, a timestamp-based filename will be used.
///
/// # Example
///
/// ```no_run
/// use qrstyle::design::Design;
/// use qrstyle::helper::generate_image;
///
/// let design = Design::from_json(r#"{ "bodyShape": "circle" }"#).unwrap();
/// generate_image("Hello, World!", Some(&design), 300, Some("images"), Some("qr_code")).unwrap();
/// ```
pub fn generate_image(
    content: &str,
    design: Option<&Design>,
    size: u32,
    directory: Option<&str>,
    filename: Option<&str>,
) -> Result<PathBuf> {
    let image = generate_image_buffer(content, design, size)?;
    save_png(&image, directory, filename)
}

/// Generates a styled QR Code SVG document from the provided content.
///
/// # Arguments
///
/// * `content` - The content to encode into the QR Code.
/// * `design` - Optional. The look of the symbol. If not provided, the default design is used.
/// * `size` - The width and height of the document, in pixels.
///
/// # Returns
///
/// A string of SVG code representing the QR Code. Logo outlines are not drawn in SVG.
///
/// # Example
///
/// ```
/// use qrstyle::helper::generate_svg_string;
///
/// let svg_string = generate_svg_string("Hello, World!", None, 250).unwrap();
/// assert!(svg_string.contains("<svg"));
/// ```
pub fn generate_svg_string(content: &str, design: Option<&Design>, size: u32) -> Result<String> {
    let matrix = encode(content, &EncodeOptions::default())?;
    let default = Design::default();
    Renderer::new().render_svg(&matrix, design.unwrap_or(&default), size)
}

/// Generates a styled QR Code image buffer from the provided content.
///
/// # Arguments
///
/// * `content` - The content to encode into the QR Code.
/// * `design` - Optional. The look of the symbol. If not provided, the default design is used.
/// * `size` - The width and height of the image, in pixels.
///
/// # Returns
///
/// An `RgbaImage` of `size` x `size` pixels.
///
/// # Example
///
/// ```
/// use qrstyle::helper::generate_image_buffer;
///
/// let img_buffer = generate_image_buffer("Hello, World!", None, 210).unwrap();
/// assert_eq!(img_buffer.dimensions(), (210, 210));
/// ```
pub fn generate_image_buffer(content: &str, design: Option<&Design>, size: u32) -> Result<RgbaImage> {
    let matrix = encode(content, &EncodeOptions::default())?;
    let default = Design::default();
    Renderer::new().render_image(&matrix, design.unwrap_or(&default), size)
}

//! Module matrices and module geometry.
//!
//! The renderer never encodes data itself. It consumes anything that can answer
//! "how many modules per side" and "is this module dark", see [`Matrix`].

use qrcode::QrCode;

/// Side length of a finder pattern ("eye"), in modules.
pub const EYE_MODULES: i32 = 7;

/// Read access to a square grid of dark and light modules.
pub trait Matrix {
    /// The width and height of the grid, measured in modules.
    fn module_count(&self) -> usize;

    /// Returns `true` for dark modules. Coordinates outside the grid are light,
    /// which keeps neighbor lookups at the border free of special cases.
    fn is_dark(&self, row: i32, col: i32) -> bool;
}

impl<M: Matrix + ?Sized> Matrix for &M {
    fn module_count(&self) -> usize {
        (**self).module_count()
    }

    fn is_dark(&self, row: i32, col: i32) -> bool {
        (**self).is_dark(row, col)
    }
}

/// An owned, row-major module grid.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModuleGrid {
    size: usize,
    modules: Vec<bool>,
}

impl ModuleGrid {
    /// Creates an all-light grid of `size` x `size` modules.
    pub fn new(size: usize) -> Self {
        Self { size, modules: vec![false; size * size] }
    }

    /// Builds a grid by asking `dark(row, col)` for every module.
    pub fn from_fn(size: usize, mut dark: impl FnMut(usize, usize) -> bool) -> Self {
        let mut grid = Self::new(size);
        for row in 0..size {
            for col in 0..size {
                grid.modules[row * size + col] = dark(row, col);
            }
        }
        grid
    }

    /// Builds a grid from text rows where `#` marks a dark module.
    ///
    /// The grid is as wide as the number of rows; short rows are padded with
    /// light modules and long rows are truncated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qrstyle::matrix::{Matrix, ModuleGrid};
    ///
    /// let grid = ModuleGrid::from_rows(&["#  ", " # ", "  #"]);
    /// assert!(grid.is_dark(1, 1));
    /// assert!(!grid.is_dark(0, 1));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        Self::from_fn(size, |row, col| rows[row].as_bytes().get(col) == Some(&b'#'))
    }

    /// Copies the modules of an encoded symbol. The quiet zone is not included.
    pub fn from_qr(code: &QrCode) -> Self {
        let size = code.width();
        let colors = code.to_colors();
        Self {
            size,
            modules: colors.into_iter().map(|c| c == qrcode::Color::Dark).collect(),
        }
    }

    /// Sets a single module. Out-of-range coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, dark: bool) {
        if row < self.size && col < self.size {
            self.modules[row * self.size + col] = dark;
        }
    }

    /// Number of dark modules in the grid.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}

impl Matrix for ModuleGrid {
    fn module_count(&self) -> usize {
        self.size
    }

    fn is_dark(&self, row: i32, col: i32) -> bool {
        let range = 0..self.size as i32;
        range.contains(&row)
            && range.contains(&col)
            && self.modules[row as usize * self.size + col as usize]
    }
}

impl From<&QrCode> for ModuleGrid {
    fn from(code: &QrCode) -> Self {
        ModuleGrid::from_qr(code)
    }
}

/// Returns `true` when `(row, col)` lies in one of the three finder-pattern
/// corners (top-left, top-right, bottom-left) of an `n` x `n` grid.
///
/// The bottom-right corner never holds a finder pattern.
pub fn is_eye(row: i32, col: i32, n: i32) -> bool {
    let top = row < EYE_MODULES;
    let left = col < EYE_MODULES;
    let right = n - col <= EYE_MODULES;
    let bottom = n - row <= EYE_MODULES;
    (top && left) || (top && right) || (bottom && left)
}

/// Pixel-aligned box of one module.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ModuleRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ModuleRect {
    /// Computes the box of module `(row, col)` for a tile of `tile` pixels.
    ///
    /// Each box starts at `floor(index * tile)` and is
    /// `ceil((index + 1) * tile) - floor(index * tile)` pixels long: the
    /// smallest whole-pixel span covering the module's exact extent. Boxes of
    /// neighboring modules therefore always meet, and with a fractional tile
    /// they share the single pixel the exact boundary passes through, which
    /// hides anti-aliasing seams.
    pub fn new(row: usize, col: usize, tile: f64) -> Self {
        let (x, w) = span(col, tile);
        let (y, h) = span(row, tile);
        Self { x, y, w, h }
    }
}

/// Start and length of the pixel span for module `index`.
pub fn span(index: usize, tile: f64) -> (f32, f32) {
    let start = snap(index as f64 * tile).floor();
    let end = snap((index + 1) as f64 * tile).ceil();
    (start as f32, (end - start) as f32)
}

/// Rounds values within rounding error of a whole pixel, so `n * (size / n)`
/// ends exactly at `size`.
fn snap(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() < 1e-6 {
        nearest
    } else {
        value
    }
}

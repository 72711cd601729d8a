//! Text to module matrix.
//!
//! The renderer consumes any [`Matrix`](crate::matrix::Matrix); this module
//! produces one from text with the `qrcode` crate, using a single segment in
//! an explicit or detected input mode.
//!
//! # Example
//!
//! ```rust
//! use qrstyle::encode::{encode, EncodeOptions, InputMode};
//! use qrstyle::matrix::Matrix;
//!
//! assert_eq!(InputMode::detect("HELLO WORLD"), Some(InputMode::AlphaNum));
//!
//! let grid = encode("HELLO WORLD", &EncodeOptions::default()).unwrap();
//! assert_eq!(grid.module_count(), 21);
//! ```

use core::fmt;
use core::str::FromStr;

use qrcode::bits::Bits;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode, Version};

use crate::error::{Error, Result};
use crate::matrix::ModuleGrid;

/// Highest symbol version.
pub const MAX_TYPE_NUMBER: i16 = 40;

static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Describes how text is packed into the symbol.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum InputMode {
    /// Decimal digits only.
    Number,
    /// Digits, upper case letters and ` $%*+-./:`.
    AlphaNum,
    /// One byte per character, for characters up to U+00FF.
    Byte,
}

impl InputMode {
    /// Every mode, narrowest first.
    pub const ALL: [InputMode; 3] = [InputMode::Number, InputMode::AlphaNum, InputMode::Byte];

    pub fn name(self) -> &'static str {
        match self {
            InputMode::Number => "NUMBER",
            InputMode::AlphaNum => "ALPHA_NUM",
            InputMode::Byte => "8bit",
        }
    }

    /// Tests whether `text` can be represented in this mode.
    pub fn accepts(self, text: &str) -> bool {
        match self {
            InputMode::Number => text.chars().all(|c| c.is_ascii_digit()),
            InputMode::AlphaNum => text.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c)),
            InputMode::Byte => text.chars().all(|c| u32::from(c) <= 0xFF),
        }
    }

    /// The narrowest mode able to hold `text`, or `None` when some character
    /// lies beyond U+00FF.
    pub fn detect(text: &str) -> Option<InputMode> {
        Self::ALL.into_iter().find(|mode| mode.accepts(text))
    }

    /// Returns an error when `text` cannot be encoded in this mode.
    pub fn check(self, text: &str) -> Result<()> {
        if self.accepts(text) {
            Ok(())
        } else {
            Err(Error::InvalidInputMode { mode: self.name() })
        }
    }

    fn push(self, bits: &mut Bits, text: &str) -> std::result::Result<(), QrError> {
        match self {
            InputMode::Number => bits.push_numeric_data(text.as_bytes()),
            InputMode::AlphaNum => bits.push_alphanumeric_data(text.as_bytes()),
            InputMode::Byte => {
                // `accepts` guarantees every char fits in a byte
                let latin1: Vec<u8> = text.chars().map(|c| u32::from(c) as u8).collect();
                bits.push_byte_data(&latin1)
            }
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "number" | "numeric" => Ok(InputMode::Number),
            "alpha_num" | "alphanum" | "alphanumeric" => Ok(InputMode::AlphaNum),
            "8bit" | "byte" => Ok(InputMode::Byte),
            _ => Err(format!("unknown input mode {s:?}, expected NUMBER, ALPHA_NUM or 8bit")),
        }
    }
}

/// The error correction level used in a QR Code symbol.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Correction {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    #[default]
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl Correction {
    fn ec_level(self) -> EcLevel {
        match self {
            Correction::Low => EcLevel::L,
            Correction::Medium => EcLevel::M,
            Correction::Quartile => EcLevel::Q,
            Correction::High => EcLevel::H,
        }
    }
}

impl FromStr for Correction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(Correction::Low),
            "M" | "MEDIUM" => Ok(Correction::Medium),
            "Q" | "QUARTILE" => Ok(Correction::Quartile),
            "H" | "HIGH" => Ok(Correction::High),
            _ => Err(format!("unknown correction level {s:?}, expected L, M, Q or H")),
        }
    }
}

/// Encoder settings.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct EncodeOptions {
    /// Symbol version 1..=40, or 0 for the smallest version that fits.
    pub type_number: i16,
    pub correction: Correction,
    /// `None` picks the narrowest mode for the text.
    pub input_mode: Option<InputMode>,
}

/// Encodes `text` (with surrounding whitespace removed) into a module grid.
pub fn encode(text: &str, opts: &EncodeOptions) -> Result<ModuleGrid> {
    let text = text.trim();
    let mode = match opts.input_mode {
        Some(mode) => mode,
        None => InputMode::detect(text).ok_or(Error::InvalidInputMode { mode: InputMode::Byte.name() })?,
    };
    mode.check(text)?;

    let code = match opts.type_number {
        0 => smallest_fit(text, mode, opts.correction)?,
        v @ 1..=MAX_TYPE_NUMBER => with_version(text, mode, opts.correction, v)?,
        _ => return Err(QrError::InvalidVersion.into()),
    };
    log::debug!("encoded {} chars as {mode}, {}x{} modules", text.chars().count(), code.width(), code.width());
    Ok(ModuleGrid::from_qr(&code))
}

fn with_version(
    text: &str,
    mode: InputMode,
    correction: Correction,
    version: i16,
) -> std::result::Result<QrCode, QrError> {
    let ec = correction.ec_level();
    let mut bits = Bits::new(Version::Normal(version));
    mode.push(&mut bits, text)?;
    bits.push_terminator(ec)?;
    QrCode::with_bits(bits, ec)
}

fn smallest_fit(text: &str, mode: InputMode, correction: Correction) -> std::result::Result<QrCode, QrError> {
    for version in 1..=MAX_TYPE_NUMBER {
        match with_version(text, mode, correction, version) {
            Err(QrError::DataTooLong) => continue,
            result => return result,
        }
    }
    Err(QrError::DataTooLong)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{is_eye, Matrix};

    #[test]
    fn detects_narrowest_mode() {
        assert_eq!(InputMode::detect("0123456789"), Some(InputMode::Number));
        assert_eq!(InputMode::detect(""), Some(InputMode::Number));
        assert_eq!(InputMode::detect("HTTP://X.Y/Z"), Some(InputMode::AlphaNum));
        assert_eq!(InputMode::detect("hello"), Some(InputMode::Byte));
        assert_eq!(InputMode::detect("café"), Some(InputMode::Byte));
        assert_eq!(InputMode::detect("日本"), None);
    }

    #[test]
    fn check_rejects_text_outside_the_mode() {
        assert!(InputMode::Number.check("12a").is_err());
        assert!(matches!(
            InputMode::AlphaNum.check("lower"),
            Err(Error::InvalidInputMode { mode: "ALPHA_NUM" })
        ));
        assert!(InputMode::Byte.check("✓").is_err());
        assert!(InputMode::Byte.check("12").is_ok());
    }

    #[test]
    fn parses_names() {
        assert_eq!("8bit".parse::<InputMode>(), Ok(InputMode::Byte));
        assert_eq!("ALPHA_NUM".parse::<InputMode>(), Ok(InputMode::AlphaNum));
        assert_eq!("q".parse::<Correction>(), Ok(Correction::Quartile));
        assert!("X".parse::<Correction>().is_err());
        assert_eq!(Correction::default(), Correction::Medium);
    }

    #[test]
    fn auto_version_grows_with_data() {
        let small = encode("1234", &EncodeOptions::default()).unwrap();
        assert_eq!(small.module_count(), 21);
        let long = "x".repeat(100);
        let large = encode(&long, &EncodeOptions::default()).unwrap();
        assert!(large.module_count() > 21);
        assert_eq!((large.module_count() - 17) % 4, 0);
    }

    #[test]
    fn fixed_version_is_honored() {
        let opts = EncodeOptions { type_number: 5, ..EncodeOptions::default() };
        assert_eq!(encode("HI", &opts).unwrap().module_count(), 37);
    }

    #[test]
    fn too_much_data_for_version_fails() {
        let opts = EncodeOptions { type_number: 1, correction: Correction::High, ..EncodeOptions::default() };
        assert!(matches!(encode(&"y".repeat(50), &opts), Err(Error::Encode(QrError::DataTooLong))));
    }

    #[test]
    fn invalid_version_fails() {
        let opts = EncodeOptions { type_number: 41, ..EncodeOptions::default() };
        assert!(matches!(encode("1", &opts), Err(Error::Encode(QrError::InvalidVersion))));
    }

    #[test]
    fn explicit_mode_must_match_text() {
        let opts = EncodeOptions { input_mode: Some(InputMode::Number), ..EncodeOptions::default() };
        assert!(matches!(encode("abc", &opts), Err(Error::InvalidInputMode { mode: "NUMBER" })));
        assert!(encode("日本", &EncodeOptions::default()).is_err());
    }

    #[test]
    fn text_is_trimmed() {
        let a = encode("  42\n", &EncodeOptions::default()).unwrap();
        let b = encode("42", &EncodeOptions::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn finder_patterns_are_in_the_eye_corners() {
        let grid = encode("HELLO WORLD", &EncodeOptions::default()).unwrap();
        let n = grid.module_count() as i32;
        // outer ring of every finder pattern is dark, the ring inside it light
        for (r0, c0) in [(0, 0), (0, n - 7), (n - 7, 0)] {
            assert!(grid.is_dark(r0, c0 + 3));
            assert!(!grid.is_dark(r0 + 1, c0 + 3));
            assert!(grid.is_dark(r0 + 3, c0 + 3));
            assert!(is_eye(r0 + 3, c0 + 3, n));
        }
    }
}

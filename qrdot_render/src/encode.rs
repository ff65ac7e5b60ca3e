use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

use qrdot_core::{Ecl, Meta, Module, ModuleMatrix, Symbol, Version};

/// Encoder turning text into a QR [Symbol].
///
/// The heavy lifting (segmentation, version selection, error correction and masking) is delegated to the `qrcode`
/// crate; this type only constrains it and converts the result into a [ModuleMatrix].
#[derive(Debug, Clone)]
pub struct SymbolEncoder {
    ecl: Ecl,
}

impl SymbolEncoder {
    /// Construct a new encoder using the highest error correction level.
    pub fn new() -> Self {
        Self { ecl: Ecl::H }
    }

    /// Get the error correction level the encoder will use.
    pub fn ecl(&self) -> Ecl {
        self.ecl
    }

    /// Constrain to the specified `ecl`.
    pub fn with_ecl(mut self, ecl: Ecl) -> Self {
        self.ecl = ecl;
        self
    }

    /// Encode `data` into the smallest symbol that fits it.
    pub fn encode<T: AsRef<[u8]>>(&self, data: T) -> Result<Symbol, EncodingError> {
        let data = data.as_ref();
        let code = QrCode::with_error_correction_level(data, ec_level(self.ecl)).map_err(|err| match err {
            QrError::DataTooLong => EncodingError::DataTooBig(data.len(), self.ecl),
            other => EncodingError::Rejected(other.to_string()),
        })?;
        let version = match code.version() {
            qrcode::Version::Normal(number) => u8::try_from(number)
                .ok()
                .and_then(Version::new)
                .ok_or(EncodingError::UnsupportedVersion(number))?,
            qrcode::Version::Micro(number) => return Err(EncodingError::UnsupportedVersion(number)),
        };
        let dimension = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| Module::from(color == qrcode::Color::Dark));
        let matrix = ModuleMatrix::from_modules(dimension, modules).ok_or(EncodingError::Malformed(dimension))?;
        log::debug!(
            "encoded {} B as {} with ECL {} ({}x{} modules)",
            data.len(),
            version,
            self.ecl,
            dimension,
            dimension
        );
        Symbol::new(matrix, Meta { version, ecl: self.ecl }).ok_or(EncodingError::Malformed(dimension))
    }
}

impl Default for SymbolEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn ec_level(ecl: Ecl) -> EcLevel {
    match ecl {
        Ecl::L => EcLevel::L,
        Ecl::M => EcLevel::M,
        Ecl::Q => EcLevel::Q,
        Ecl::H => EcLevel::H,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("cannot encode {0} B of data with ECL {1}")]
    DataTooBig(usize, Ecl),
    #[error("cannot encode data: {0}")]
    Rejected(String),
    #[error("encoder produced unsupported version {0}")]
    UnsupportedVersion(i16),
    #[error("encoder produced a malformed {0}x{0} matrix")]
    Malformed(usize),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_level_is_high() {
        assert_eq!(SymbolEncoder::new().ecl(), Ecl::H);
        assert_eq!(SymbolEncoder::default().with_ecl(Ecl::L).ecl(), Ecl::L);
    }

    #[test]
    fn test_short_text_fits_version_1() {
        let symbol = SymbolEncoder::new().encode("hello").unwrap();
        assert_eq!(symbol.dimension(), 21);
        assert_eq!(symbol.meta().version, Version::MIN);
        assert_eq!(symbol.meta().ecl, Ecl::H);
    }

    #[test]
    fn test_finder_pattern_corners() {
        let symbol = SymbolEncoder::new().encode("https://example.com").unwrap();
        let matrix = symbol.matrix();
        let last = matrix.dimension() - 1;
        // Outer ring of each finder pattern is dark, its separator is light.
        for (x, y) in [(0, 0), (last, 0), (0, last)] {
            assert!(matrix.is_dark(x, y), "corner ({}, {}) should be dark", x, y);
        }
        assert!(!matrix.is_dark(7, 7));
        assert!(!matrix.is_dark(1, 1));
        assert!(matrix.is_dark(3, 3));
    }

    #[test]
    fn test_larger_payload_grows_symbol() {
        let small = SymbolEncoder::new().encode("a").unwrap();
        let large = SymbolEncoder::new().encode("a".repeat(200)).unwrap();
        assert!(large.dimension() > small.dimension());
        assert_eq!((large.dimension() - 17) % 4, 0);
    }

    #[test]
    fn test_data_too_big() {
        let data = vec![b'x'; 4000];
        let err = SymbolEncoder::new().encode(&data).unwrap_err();
        assert!(matches!(err, EncodingError::DataTooBig(4000, Ecl::H)));
    }
}

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

/// Image container a rendered canvas can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Bmp,
}

impl ImageKind {
    /// Determine the kind from a file extension, ignoring case.
    /// # Example
    /// ```
    /// use qrdot_render::ImageKind;
    /// assert_eq!(ImageKind::from_extension("PNG"), Some(ImageKind::Png));
    /// assert_eq!(ImageKind::from_extension("gif"), None);
    /// ```
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Bmp => "image/bmp",
        }
    }

    fn format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

/// Encode `canvas` into the bytes of a `kind` file.
pub fn encode_image(canvas: &RgbaImage, kind: ImageKind) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), kind.format())
        .map_err(|source| ExportError { kind, source })?;
    Ok(bytes)
}

#[derive(Debug, thiserror::Error)]
#[error("cannot write {} image", .kind.extension())]
pub struct ExportError {
    pub kind: ImageKind,
    #[source]
    pub source: image::ImageError,
}

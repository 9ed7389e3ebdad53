//! Decoding of equirectangular source images.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageReader};
use thiserror::Error;

/// Errors that can occur while reading a source panorama.
#[derive(Error, Debug)]
pub enum SourceImageError {
    #[error("File does not exist: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image decoding error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
}

/// Encoded formats accepted as input and produced as output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
}

impl SourceFormat {
    /// File extension used when writing faces (`.jpg` inputs come back as `.jpeg`).
    pub const fn extension(self) -> &'static str {
        match self {
            SourceFormat::Jpeg => "jpeg",
            SourceFormat::Png => "png",
        }
    }

    pub fn from_image_format(format: ImageFormat) -> Option<SourceFormat> {
        match format {
            ImageFormat::Jpeg => Some(SourceFormat::Jpeg),
            ImageFormat::Png => Some(SourceFormat::Png),
            _ => None,
        }
    }

    /// Guesses the format from a file extension (`jpg`, `jpeg`, `png`).
    pub fn from_path(path: &Path) -> Option<SourceFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(SourceFormat::Jpeg),
            "png" => Some(SourceFormat::Png),
            _ => None,
        }
    }
}

/// Returns true if `path` has a JPEG or PNG extension.
pub fn is_supported_image_path(path: &Path) -> bool {
    SourceFormat::from_path(path).is_some()
}

/// Reads and decodes a JPEG or PNG panorama.
///
/// The format is detected from the file contents, falling back to the
/// extension. Anything other than JPEG or PNG is rejected.
pub fn read_source_image(path: &Path) -> Result<(DynamicImage, SourceFormat), SourceImageError> {
    if !path.exists() {
        return Err(SourceImageError::NotFound(path.to_path_buf()));
    }

    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = match reader.format() {
        Some(detected) => SourceFormat::from_image_format(detected)
            .ok_or_else(|| SourceImageError::UnsupportedFormat(format!("{:?}", detected)))?,
        None => return Err(SourceImageError::UnsupportedFormat(path.display().to_string())),
    };

    let image = reader.decode()?;
    Ok((image, format))
}

//! Writing rendered cubemap faces to disk.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use log::debug;
use thiserror::Error;

use crate::cubemap::FaceImage;
use crate::source::SourceFormat;

/// Errors that can occur while writing face images.
#[derive(Error, Debug)]
pub enum FaceWriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Mismatched face count: {images} images but {names} side names")]
    CountMismatch { images: usize, names: usize },
    #[error("Invalid JPEG quality: {0} (must be 1-100)")]
    InvalidQuality(u8),
}

/// Writes each face as `{output_dir}/{side}.{ext}`.
///
/// The side name comes from the face each buffer was rendered for.
/// `output_dir` is created if missing. Returns the written paths in order.
pub fn write_faces(
    faces: &[FaceImage],
    output_dir: &Path,
    format: SourceFormat,
    jpeg_quality: u8,
) -> Result<Vec<PathBuf>, FaceWriteError> {
    let images: Vec<&RgbaImage> = faces.iter().map(|f| &f.image).collect();
    let names: Vec<&str> = faces.iter().map(|f| f.face.name()).collect();
    write_named(&images, &names, output_dir, format, jpeg_quality)
}

/// Writes buffers positionally against `names`, as `{output_dir}/{name}.{ext}`.
///
/// Fails with [`FaceWriteError::CountMismatch`] if the two lists differ in length.
pub fn write_faces_named(
    images: &[RgbaImage],
    names: &[&str],
    output_dir: &Path,
    format: SourceFormat,
    jpeg_quality: u8,
) -> Result<Vec<PathBuf>, FaceWriteError> {
    let images: Vec<&RgbaImage> = images.iter().collect();
    write_named(&images, names, output_dir, format, jpeg_quality)
}

fn write_named(
    images: &[&RgbaImage],
    names: &[&str],
    output_dir: &Path,
    format: SourceFormat,
    jpeg_quality: u8,
) -> Result<Vec<PathBuf>, FaceWriteError> {
    if images.len() != names.len() {
        return Err(FaceWriteError::CountMismatch {
            images: images.len(),
            names: names.len(),
        });
    }
    if format == SourceFormat::Jpeg && !(1..=100).contains(&jpeg_quality) {
        return Err(FaceWriteError::InvalidQuality(jpeg_quality));
    }

    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(images.len());
    for (image, name) in images.iter().zip(names) {
        let path = output_dir.join(format!("{}.{}", name, format.extension()));
        write_face_image(image, &path, format, jpeg_quality)?;
        debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Encodes one RGBA face. JPEG has no alpha channel, so it is dropped there.
pub fn write_face_image(
    image: &RgbaImage,
    path: &Path,
    format: SourceFormat,
    jpeg_quality: u8,
) -> Result<(), FaceWriteError> {
    let (width, height) = image.dimensions();
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    match format {
        SourceFormat::Jpeg => {
            let rgb: Vec<u8> = image
                .pixels()
                .flat_map(|p| [p[0], p[1], p[2]])
                .collect();
            let encoder = JpegEncoder::new_with_quality(writer, jpeg_quality);
            encoder.write_image(&rgb, width, height, ExtendedColorType::Rgb8)?;
        }
        SourceFormat::Png => {
            let encoder =
                PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
            encoder.write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)?;
        }
    }

    Ok(())
}

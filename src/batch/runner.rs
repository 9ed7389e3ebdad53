//! Single-file and directory conversion runs.

use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgba, RgbaImage};
use log::{info, warn};
use rayon::prelude::*;
use thiserror::Error;

use super::progress::file_progress_bar;
use crate::config::{ConfigError, ConvertOptions};
use crate::cubemap::{convert, ConvertError};
use crate::export::{write_faces, FaceWriteError};
use crate::source::{is_supported_image_path, read_source_image, SourceImageError};

/// Errors that can occur while converting files.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Error reading image: {0}")]
    Source(#[from] SourceImageError),
    #[error("Error converting image: {0}")]
    Convert(#[from] ConvertError),
    #[error("Error writing images: {0}")]
    Write(#[from] FaceWriteError),
    #[error("Invalid options: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// A file that failed during a directory run.
#[derive(Debug)]
pub struct BatchFailure {
    pub input: PathBuf,
    pub error: BatchError,
}

/// Outcome of a directory run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of images found.
    pub total: usize,
    /// Number of images converted and written.
    pub converted: usize,
    /// Images that failed, with their errors.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Reads one panorama, renders the configured faces and writes them to `output_dir`.
///
/// Returns the paths of the written face images.
pub fn convert_file(
    input: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
) -> Result<Vec<PathBuf>, BatchError> {
    let (image, format) = read_source_image(input)?;
    let source = to_source_raster(image);

    let faces = convert(options.edge_length, &source, &options.faces)?;
    let written = write_faces(&faces, output_dir, format, options.jpeg_quality)?;

    info!(
        "Converted {} -> {} face(s) in {}",
        input.display(),
        written.len(),
        output_dir.display()
    );
    Ok(written)
}

/// Flattens a decoded image to straight-alpha RGBA8.
///
/// 16-bit channels keep their high byte (truncation, not rounding).
/// Alpha is kept so the sampler can premultiply it.
fn to_source_raster(image: DynamicImage) -> RgbaImage {
    match image {
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => {
            let wide = image.to_rgba16();
            let (width, height) = wide.dimensions();
            RgbaImage::from_fn(width, height, |x, y| {
                Rgba(wide.get_pixel(x, y).0.map(|c| (c >> 8) as u8))
            })
        }
        other => other.into_rgba8(),
    }
}

/// Lists the JPEG/PNG files directly inside `dir`, sorted by name.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_image_path(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Converts every image in `input_dir`.
///
/// Each image is written to `{output_dir}/{file stem}/`. At most
/// `options.max_concurrent_files` images are in flight at once. A failed
/// image is recorded in the report and does not stop the others.
pub fn convert_directory(
    input_dir: &Path,
    options: &ConvertOptions,
    show_progress: bool,
) -> Result<BatchReport, BatchError> {
    options.validate()?;

    let images = discover_images(input_dir)?;
    info!(
        "Found {} image(s) in {}",
        images.len(),
        input_dir.display()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.max_concurrent_files)
        .build()?;

    let pb = file_progress_bar(images.len() as u64, show_progress);
    pb.set_message("Converting");

    let results: Vec<(PathBuf, Result<Vec<PathBuf>, BatchError>)> = pool.install(|| {
        images
            .par_iter()
            .map(|input| {
                let output_dir = image_output_dir(&options.output_dir, input);
                let result = convert_file(input, &output_dir, options);
                pb.inc(1);
                (input.clone(), result)
            })
            .collect()
    });

    pb.finish_with_message("Done");

    let mut report = BatchReport {
        total: images.len(),
        ..Default::default()
    };
    for (input, result) in results {
        match result {
            Ok(_) => report.converted += 1,
            Err(error) => {
                warn!("Failed to convert {}: {}", input.display(), error);
                report.failures.push(BatchFailure { input, error });
            }
        }
    }

    Ok(report)
}

/// `{output_root}/{file stem}` for one input image.
fn image_output_dir(output_root: &Path, input: &Path) -> PathBuf {
    match input.file_stem() {
        Some(stem) => output_root.join(stem),
        None => output_root.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Face;
    use image::{ImageBuffer, Rgb, RgbImage};
    use tempfile::tempdir;

    fn small_options(output_dir: &Path) -> ConvertOptions {
        ConvertOptions {
            edge_length: 8,
            output_dir: output_dir.to_path_buf(),
            max_concurrent_files: 2,
            ..Default::default()
        }
    }

    fn write_panorama(path: &Path, color: [u8; 3]) {
        RgbImage::from_pixel(32, 16, Rgb(color)).save(path).unwrap();
    }

    #[test]
    fn test_convert_file_writes_all_faces() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pano.png");
        write_panorama(&input, [0, 255, 0]);
        let out = dir.path().join("out");

        let written = convert_file(&input, &out, &small_options(&out)).unwrap();
        assert_eq!(written.len(), 6);
        for face in Face::ALL {
            let path = out.join(format!("{}.png", face.name()));
            assert!(path.exists(), "Missing file for {:?}", face);
            let img = image::open(&path).unwrap().to_rgba8();
            assert_eq!(img.dimensions(), (8, 8));
            assert_eq!(img.get_pixel(4, 4), &image::Rgba([0, 255, 0, 255]));
        }
    }

    #[test]
    fn test_convert_file_selected_faces() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pano.jpg");
        write_panorama(&input, [90, 90, 90]);
        let out = dir.path().join("out");
        let options = ConvertOptions {
            faces: vec![Face::Top, Face::Bottom],
            ..small_options(&out)
        };

        let written = convert_file(&input, &out, &options).unwrap();
        assert_eq!(written, vec![out.join("top.jpeg"), out.join("bottom.jpeg")]);
        assert!(!out.join("front.jpeg").exists());
    }

    #[test]
    fn test_transparent_png_renders_black() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("clear.png");
        RgbaImage::from_pixel(32, 16, Rgba([200, 100, 50, 0]))
            .save(&input)
            .unwrap();
        let out = dir.path().join("out");
        let options = ConvertOptions {
            faces: vec![Face::Front],
            ..small_options(&out)
        };

        convert_file(&input, &out, &options).unwrap();
        let front = image::open(out.join("front.png")).unwrap().to_rgba8();
        assert_eq!(front.get_pixel(2, 2), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_sixteen_bit_channels_truncate() {
        // 0x80FF / 257 rounds to 129; keeping the high byte gives 128.
        let wide: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(4, 2, Rgb([0x80FF, 0x00FF, 0xFFFF]));
        let raster = to_source_raster(DynamicImage::ImageRgb16(wide));
        assert_eq!(raster.get_pixel(1, 1), &Rgba([0x80, 0x00, 0xFF, 0xFF]));
    }

    #[test]
    fn test_sixteen_bit_png_converts() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("wide.png");
        let wide: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(32, 16, Rgb([0x80FF, 0x80FF, 0x80FF]));
        wide.save(&input).unwrap();
        let out = dir.path().join("out");
        let options = ConvertOptions {
            faces: vec![Face::Top],
            ..small_options(&out)
        };

        convert_file(&input, &out, &options).unwrap();
        let top = image::open(out.join("top.png")).unwrap().to_rgba8();
        assert_eq!(top.get_pixel(4, 4), &Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn test_discover_images_filters_and_sorts() {
        let dir = tempdir().unwrap();
        write_panorama(&dir.path().join("b.png"), [1, 1, 1]);
        write_panorama(&dir.path().join("a.jpg"), [1, 1, 1]);
        std::fs::write(dir.path().join("readme.txt"), "skip").unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let images = discover_images(dir.path()).unwrap();
        assert_eq!(images, vec![dir.path().join("a.jpg"), dir.path().join("b.png")]);
    }

    #[test]
    fn test_convert_directory_collects_failures() {
        let dir = tempdir().unwrap();
        let input_dir = dir.path().join("in");
        std::fs::create_dir(&input_dir).unwrap();
        write_panorama(&input_dir.join("first.png"), [10, 20, 30]);
        write_panorama(&input_dir.join("second.png"), [40, 50, 60]);
        std::fs::write(input_dir.join("broken.png"), b"not a png").unwrap();

        let out = dir.path().join("out");
        let report = convert_directory(&input_dir, &small_options(&out), false).unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.converted, 2);
        assert_eq!(report.failures.len(), 1);
        assert!(!report.is_success());
        assert_eq!(report.failures[0].input, input_dir.join("broken.png"));

        assert!(out.join("first").join("front.png").exists());
        assert!(out.join("second").join("bottom.png").exists());
        assert!(!out.join("broken").exists());
    }

    #[test]
    fn test_convert_directory_rejects_invalid_options() {
        let dir = tempdir().unwrap();
        let options = ConvertOptions {
            edge_length: 0,
            ..small_options(dir.path())
        };
        let result = convert_directory(dir.path(), &options, false);
        assert!(matches!(result, Err(BatchError::Config(_))));
    }
}

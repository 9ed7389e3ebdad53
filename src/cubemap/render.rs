//! Per-face rendering and the parallel face dispatcher.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use image::{GenericImageView, Pixel, Rgb, Rgba, RgbaImage};
use log::debug;
use rayon::prelude::*;

use super::error::ConvertError;
use crate::geometry::{pixel_to_direction, Face};
use crate::sampling::{direction_to_source, sample_bilinear};

/// One rendered cubemap face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceImage {
    /// The face this buffer was rendered for.
    pub face: Face,
    /// `edge x edge` RGBA8 pixels, fully opaque.
    pub image: RgbaImage,
}

/// Renders a single face of side `edge` from an equirectangular source.
///
/// Every pixel `(i, j)` is written exactly once: its ray direction is mapped
/// into the source and the color there is bilinearly resampled.
///
/// Unlike [`convert`], this does not validate its inputs.
///
/// # Panics
/// If `source` has zero width or height.
pub fn render_face<I>(face: Face, edge: u32, source: &I) -> RgbaImage
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = source.dimensions();
    let mut canvas = RgbaImage::new(edge, edge);

    for (i, j, pixel) in canvas.enumerate_pixels_mut() {
        let dir = pixel_to_direction(face, i, j, edge);
        let (u, v) = direction_to_source(dir, width, height);
        let Rgb([r, g, b]) = sample_bilinear(u, v, source);
        *pixel = Rgba([r, g, b, 255]);
    }

    canvas
}

/// Converts an equirectangular source into the requested cubemap faces.
///
/// One rayon task is spawned per requested face and the call returns once
/// all of them have finished. The output keeps the caller's face order.
/// A failure in any face fails the whole call.
///
/// # Arguments
/// * `edge` - Side length of every output face in pixels
/// * `source` - Equirectangular source raster, read concurrently
/// * `faces` - Faces to render, in output order
pub fn convert<I>(edge: u32, source: &I, faces: &[Face]) -> Result<Vec<FaceImage>, ConvertError>
where
    I: GenericImageView + Sync,
    I::Pixel: Pixel<Subpixel = u8>,
{
    validate(edge, source, faces)?;

    let (width, height) = source.dimensions();
    debug!(
        "Converting {}x{} source into {} face(s) of {}x{}",
        width,
        height,
        faces.len(),
        edge,
        edge
    );

    faces
        .par_iter()
        .map(|&face| {
            let image = run_face_task(face, || render_face(face, edge, source))?;
            debug!("Rendered face '{}'", face);
            Ok(FaceImage { face, image })
        })
        .collect()
}

/// Same as [`convert`], but takes raw face indices (0-5).
pub fn convert_indices<I>(
    edge: u32,
    source: &I,
    face_indices: &[usize],
) -> Result<Vec<FaceImage>, ConvertError>
where
    I: GenericImageView + Sync,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let faces = face_indices
        .iter()
        .map(|&index| Face::try_from(index))
        .collect::<Result<Vec<_>, _>>()?;
    convert(edge, source, &faces)
}

fn validate<I: GenericImageView>(edge: u32, source: &I, faces: &[Face]) -> Result<(), ConvertError> {
    if edge == 0 {
        return Err(ConvertError::InvalidEdgeLength(edge));
    }
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(ConvertError::EmptySource { width, height });
    }
    if faces.is_empty() {
        return Err(ConvertError::NoFacesRequested);
    }
    Ok(())
}

/// Runs one face's work, turning a panic inside it into a `ComputationFailure`.
fn run_face_task<T, F>(face: Face, task: F) -> Result<T, ConvertError>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(task)).map_err(|payload| {
        ConvertError::ComputationFailure {
            face,
            reason: panic_message(payload.as_ref()),
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

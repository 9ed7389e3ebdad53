//! Face pixel to ray direction mapping.

use glam::DVec3;

use super::face::Face;
use crate::cubemap::ConvertError;

/// Returns the direction on the unit cube for face-plane coordinates `(a, b)`.
///
/// `a` runs along the face's horizontal axis and `b` along its vertical axis,
/// both in [-1, 1).
#[inline]
pub fn face_plane_to_cube(face: Face, a: f64, b: f64) -> DVec3 {
    match face {
        Face::Back => DVec3::new(-1.0, -a, -b),
        Face::Left => DVec3::new(a, -1.0, -b),
        Face::Front => DVec3::new(1.0, a, -b),
        Face::Right => DVec3::new(-a, 1.0, -b),
        Face::Top => DVec3::new(b, a, 1.0),
        Face::Bottom => DVec3::new(-b, a, -1.0),
    }
}

/// Converts a pixel `(i, j)` of a face with side `edge` into a ray direction.
///
/// `i` is the column and `j` the row. The pixel grid is mapped onto [-1, 1)
/// with a step of `2 / edge`, so pixel 0 sits exactly on the cube edge.
///
/// # Arguments
/// * `face` - The cubemap face
/// * `i` - Column in [0, edge)
/// * `j` - Row in [0, edge)
/// * `edge` - Face side length in pixels
pub fn pixel_to_direction(face: Face, i: u32, j: u32, edge: u32) -> DVec3 {
    let step = 2.0 / f64::from(edge);
    let a = step * f64::from(i) - 1.0;
    let b = step * f64::from(j) - 1.0;
    face_plane_to_cube(face, a, b)
}

/// Same as [`pixel_to_direction`], but takes a raw face index.
///
/// Indices outside 0..=5 are rejected with [`ConvertError::UnknownFace`].
pub fn pixel_to_direction_by_index(
    face_index: usize,
    i: u32,
    j: u32,
    edge: u32,
) -> Result<DVec3, ConvertError> {
    let face = Face::try_from(face_index)?;
    Ok(pixel_to_direction(face, i, j, edge))
}

//! Direction to equirectangular source coordinates.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec3;

/// Maps a ray direction to fractional pixel coordinates in an
/// equirectangular source of the given size.
///
/// Azimuth `atan2(y, x)` covers the horizontal axis starting at -π, and
/// elevation covers the vertical axis with row 0 at the north pole. Both
/// axes use the same scale of `height / π` pixels per radian. The result is
/// not wrapped or clamped.
pub fn direction_to_source(dir: DVec3, _width: u32, height: u32) -> (f64, f64) {
    let theta = dir.y.atan2(dir.x);
    let rad = dir.x.hypot(dir.y);
    let phi = dir.z.atan2(rad);

    let scale = f64::from(height) / PI;
    let u = (theta + PI) * scale;
    let v = (FRAC_PI_2 - phi) * scale;
    (u, v)
}

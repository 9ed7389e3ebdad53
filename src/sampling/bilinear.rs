//! Bilinear color resampling from the source raster.

use glam::DVec3;
use image::{GenericImageView, Pixel, Rgb};

/// Samples `source` at fractional pixel coordinates `(u, v)` with bilinear
/// filtering.
///
/// The four neighbor indices are clamped into the raster, but the blend
/// weights are taken against the clamped base index and are not clamped
/// again, so coordinates left of or above the raster extrapolate from the
/// first two columns/rows. Each channel of the result is truncated toward
/// zero and saturated into `0..=255`.
///
/// Neighbors are read alpha-premultiplied, so fully transparent source
/// pixels sample as black.
///
/// # Panics
/// If `source` has zero width or height.
pub fn sample_bilinear<I>(u: f64, v: f64, source: &I) -> Rgb<u8>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = source.dimensions();

    let u0 = clamp_index(u.floor(), width);
    let v0 = clamp_index(v.floor(), height);
    let u1 = clamp_index(f64::from(u0) + 1.0, width);
    let v1 = clamp_index(f64::from(v0) + 1.0, height);

    let mu = u - f64::from(u0);
    let nu = v - f64::from(v0);

    let a = read_rgb(source, u0, v0);
    let b = read_rgb(source, u1, v0);
    let c = read_rgb(source, u0, v1);
    let d = read_rgb(source, u1, v1);

    let top = lerp(a, b, mu);
    let bottom = lerp(c, d, mu);
    let color = lerp(top, bottom, nu);

    // `as` truncates and saturates; NaN becomes 0.
    Rgb([color.x as u8, color.y as u8, color.z as u8])
}

#[inline]
fn lerp(p: DVec3, q: DVec3, t: f64) -> DVec3 {
    p + (q - p) * t
}

#[inline]
fn clamp_index(n: f64, size: u32) -> u32 {
    n.clamp(0.0, f64::from(size - 1)) as u32
}

#[inline]
fn read_rgb<I>(source: &I, x: u32, y: u32) -> DVec3
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let [r, g, b, a] = source.get_pixel(x, y).to_rgba().0;
    DVec3::new(
        f64::from(premultiply(r, a)),
        f64::from(premultiply(g, a)),
        f64::from(premultiply(b, a)),
    )
}

/// Scales a straight-alpha channel by alpha at 16-bit precision and
/// truncates back to 8 bits.
#[inline]
fn premultiply(channel: u8, alpha: u8) -> u8 {
    let c = u32::from(channel) * 0x101;
    let a = u32::from(alpha) * 0x101;
    ((c * a / 0xffff) >> 8) as u8
}

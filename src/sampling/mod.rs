//! Source sampling: spherical angle lookup and bilinear filtering.

mod bilinear;
mod spherical;

pub use bilinear::sample_bilinear;
pub use spherical::direction_to_source;

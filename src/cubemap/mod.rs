//! Equirectangular to cubemap reprojection engine.
//!
//! Each requested face is rendered by its own task, reading the shared
//! source raster and writing only into its own output buffer.

mod error;
mod render;

pub use error::ConvertError;
pub use render::{convert, convert_indices, render_face, FaceImage};

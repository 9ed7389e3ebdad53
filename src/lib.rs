//! Equirectangular panorama to cubemap converter.
//!
//! This crate reprojects a 360° equirectangular image onto the six faces of
//! a cube by casting a ray through every face pixel, converting it to
//! spherical angles and bilinearly resampling the source. Faces are rendered
//! in parallel, one task per face.

pub mod batch;
pub mod config;
pub mod cubemap;
pub mod export;
pub mod geometry;
pub mod sampling;
pub mod source;

pub use batch::{convert_directory, convert_file, BatchError, BatchReport};
pub use config::ConvertOptions;
pub use cubemap::{convert, convert_indices, render_face, ConvertError, FaceImage};
pub use geometry::{parse_faces, pixel_to_direction, Face};
pub use sampling::{direction_to_source, sample_bilinear};
pub use source::{read_source_image, SourceFormat};

//! Export module for saving rendered cubemap faces.
//!
//! Faces are written one file per side, named after the side
//! (`front.png`, `top.jpeg`, ...), in the same format as the source.

mod faces;

pub use faces::{write_face_image, write_faces, write_faces_named, FaceWriteError};

//! Cubemap face geometry.
//!
//! Identifies the six output faces and maps face pixels onto ray
//! directions from the cube center.

mod direction;
mod face;

pub use direction::{face_plane_to_cube, pixel_to_direction, pixel_to_direction_by_index};
pub use face::{parse_faces, Face};

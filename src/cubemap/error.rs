//! Conversion errors.

use thiserror::Error;

use crate::geometry::Face;

/// Errors that can occur while converting a panorama to cubemap faces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Invalid edge length: {0} (must be positive)")]
    InvalidEdgeLength(u32),
    #[error("Source image is empty: {width}x{height}")]
    EmptySource { width: u32, height: u32 },
    #[error("No faces requested")]
    NoFacesRequested,
    #[error("Unknown face: '{0}' (valid faces are back, left, front, right, top, bottom)")]
    UnknownFace(String),
    #[error("Rendering face '{face}' failed: {reason}")]
    ComputationFailure { face: Face, reason: String },
}

impl ConvertError {
    /// Returns true for caller errors (bad edge length, source or face list).
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, ConvertError::ComputationFailure { .. })
    }
}

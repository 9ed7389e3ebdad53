//! Conversion options shared by the CLI and the batch runner.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Face;

/// Default side length of a cube face in pixels.
pub const DEFAULT_EDGE_LENGTH: u32 = 1024;
/// Default number of images converted at once in directory mode.
pub const DEFAULT_MAX_CONCURRENT_FILES: usize = 10;
/// Default JPEG output quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Errors raised while loading or validating options.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid option: {0}")]
    Invalid(String),
}

/// Options for converting panoramas into cubemap faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Side length of each output face in pixels.
    pub edge_length: u32,
    /// Faces to render, in output order.
    pub faces: Vec<Face>,
    /// Quality used when writing JPEG faces (1-100).
    pub jpeg_quality: u8,
    /// Maximum number of images converted concurrently in directory mode.
    pub max_concurrent_files: usize,
    /// Directory that receives the face images.
    pub output_dir: PathBuf,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            edge_length: DEFAULT_EDGE_LENGTH,
            faces: Face::ALL.to_vec(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_concurrent_files: DEFAULT_MAX_CONCURRENT_FILES,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ConvertOptions {
    /// Loads options from a TOML file. Missing keys take their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let options: ConvertOptions = toml::from_str(&content)?;
        Ok(options)
    }

    /// Checks that the options describe a valid conversion.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.edge_length == 0 {
            return Err(ConfigError::Invalid("edge length must be positive".into()));
        }
        if self.faces.is_empty() {
            return Err(ConfigError::Invalid("at least one face is required".into()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Invalid(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }
        if self.max_concurrent_files == 0 {
            return Err(ConfigError::Invalid(
                "max concurrent files must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let options = ConvertOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.edge_length, 1024);
        assert_eq!(options.faces, Face::ALL.to_vec());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("panorama.toml");
        std::fs::write(
            &path,
            "edge_length = 512\nfaces = [\"top\", \"front\"]\njpeg_quality = 90\n",
        )
        .unwrap();

        let options = ConvertOptions::load_from_file(&path).unwrap();
        assert_eq!(options.edge_length, 512);
        assert_eq!(options.faces, vec![Face::Top, Face::Front]);
        assert_eq!(options.jpeg_quality, 90);
        assert_eq!(options.max_concurrent_files, DEFAULT_MAX_CONCURRENT_FILES);
    }

    #[test]
    fn test_unknown_face_in_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "faces = [\"up\"]\n").unwrap();
        assert!(matches!(
            ConvertOptions::load_from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            ConvertOptions { edge_length: 0, ..Default::default() },
            ConvertOptions { faces: vec![], ..Default::default() },
            ConvertOptions { jpeg_quality: 0, ..Default::default() },
            ConvertOptions { jpeg_quality: 101, ..Default::default() },
            ConvertOptions { max_concurrent_files: 0, ..Default::default() },
        ];
        for options in cases {
            assert!(options.validate().is_err(), "{:?} should be invalid", options);
        }
    }
}

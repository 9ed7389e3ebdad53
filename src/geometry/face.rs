//! Cubemap face identification and naming.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cubemap::ConvertError;

/// Identifies one of the six faces of an output cubemap.
///
/// The numeric values are positional: output file naming and face
/// indices used by callers both rely on this exact ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Face {
    /// -X face
    Back = 0,
    /// -Y face
    Left = 1,
    /// +X face
    Front = 2,
    /// +Y face
    Right = 3,
    /// +Z face
    Top = 4,
    /// -Z face
    Bottom = 5,
}

impl Face {
    /// All six faces in canonical order.
    pub const ALL: [Face; 6] = [
        Face::Back,
        Face::Left,
        Face::Front,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    /// Returns the face index (0-5).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a face from an index (0-5).
    pub const fn from_index(index: usize) -> Option<Face> {
        match index {
            0 => Some(Face::Back),
            1 => Some(Face::Left),
            2 => Some(Face::Front),
            3 => Some(Face::Right),
            4 => Some(Face::Top),
            5 => Some(Face::Bottom),
            _ => None,
        }
    }

    /// Returns the side name used for output files (e.g., "front", "top").
    pub const fn name(self) -> &'static str {
        match self {
            Face::Back => "back",
            Face::Left => "left",
            Face::Front => "front",
            Face::Right => "right",
            Face::Top => "top",
            Face::Bottom => "bottom",
        }
    }

    /// Looks up a face by side name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Face> {
        let name = name.trim();
        Face::ALL
            .into_iter()
            .find(|face| face.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Face {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Face::from_name(s).ok_or_else(|| ConvertError::UnknownFace(s.to_string()))
    }
}

impl TryFrom<usize> for Face {
    type Error = ConvertError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Face::from_index(index).ok_or_else(|| ConvertError::UnknownFace(index.to_string()))
    }
}

/// Parses a list of side names into faces, keeping the caller's order.
///
/// An empty list selects all six faces in canonical order.
pub fn parse_faces<S: AsRef<str>>(names: &[S]) -> Result<Vec<Face>, ConvertError> {
    if names.is_empty() {
        return Ok(Face::ALL.to_vec());
    }
    names.iter().map(|name| name.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_faces() {
        assert_eq!(Face::ALL.len(), 6);
        for (i, face) in Face::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }

    #[test]
    fn test_from_index() {
        for i in 0..6 {
            let face = Face::from_index(i).unwrap();
            assert_eq!(face.index(), i);
        }
        assert!(Face::from_index(6).is_none());
        assert!(matches!(Face::try_from(7), Err(ConvertError::UnknownFace(_))));
    }

    #[test]
    fn test_names_are_positional() {
        let names: Vec<&str> = Face::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["back", "left", "front", "right", "top", "bottom"]);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Face::from_name("front"), Some(Face::Front));
        assert_eq!(Face::from_name(" TOP "), Some(Face::Top));
        assert_eq!(Face::from_name("up"), None);
        assert!("sideways".parse::<Face>().is_err());
    }

    #[test]
    fn test_parse_faces_keeps_order() {
        let faces = parse_faces(&["top", "back", "front"]).unwrap();
        assert_eq!(faces, vec![Face::Top, Face::Back, Face::Front]);

        let all = parse_faces::<&str>(&[]).unwrap();
        assert_eq!(all, Face::ALL.to_vec());

        assert!(parse_faces(&["front", "nope"]).is_err());
    }
}

//! Node paths - Absolute addresses in the scene graph

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::SceneError;

/// Absolute path of a scene node (e.g., "/World/rover/lidar_2d")
///
/// Held in canonical form: a leading slash, identifier segments joined by
/// single slashes, no trailing slash. The root "/" is a valid path with no
/// segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(String);

impl NodePath {
    /// The scene root "/"
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Parse and validate an absolute path string
    pub fn parse(raw: &str) -> Result<Self, SceneError> {
        if raw == "/" {
            return Ok(Self::root());
        }
        let valid = raw
            .strip_prefix('/')
            .is_some_and(|rest| !rest.is_empty() && rest.split('/').all(valid_segment));
        if !valid {
            return Err(SceneError::InvalidPath(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Append a child segment, validating it
    pub fn child(&self, name: &str) -> Result<Self, SceneError> {
        if !valid_segment(name) {
            return Err(SceneError::InvalidPath(format!("{}/{}", self.0, name)));
        }
        if self.is_root() {
            Ok(Self(format!("/{name}")))
        } else {
            Ok(Self(format!("{}/{}", self.0, name)))
        }
    }

    /// Parent path, or None for the root
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// Final segment, or "" for the root
    pub fn leaf(&self) -> &str {
        if self.is_root() {
            return "";
        }
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Wrap an already-canonical path string
    pub(crate) fn from_canonical(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Segments are identifiers: ASCII letter or underscore first, then
/// letters, digits, and underscores
fn valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_paths() {
        assert_eq!(NodePath::parse("/").unwrap(), NodePath::root());
        assert_eq!(NodePath::parse("/World").unwrap().as_str(), "/World");
        assert_eq!(
            NodePath::parse("/World/rover/lidar_2d").unwrap().as_str(),
            "/World/rover/lidar_2d"
        );
        assert!(NodePath::parse("/_private/x2").is_ok());
    }

    #[test]
    fn test_parse_invalid_paths() {
        for raw in [
            "",
            "World",
            "//World",
            "/World/",
            "/World//rover",
            "/World/2wheel",
            "/World/my-carter",
            "/World/a b",
        ] {
            assert!(
                matches!(NodePath::parse(raw), Err(SceneError::InvalidPath(_))),
                "expected rejection of {raw:?}"
            );
        }
    }

    #[test]
    fn test_child_and_parent() {
        let root = NodePath::root();
        let world = root.child("World").unwrap();
        let rover = world.child("rover").unwrap();
        assert_eq!(rover.as_str(), "/World/rover");
        assert_eq!(rover.parent(), Some(world.clone()));
        assert_eq!(world.parent(), Some(root.clone()));
        assert_eq!(root.parent(), None);

        assert!(world.child("my-carter").is_err());
        assert!(world.child("").is_err());
        assert!(world.child("9lives").is_err());
    }

    #[test]
    fn test_leaf() {
        assert_eq!(NodePath::root().leaf(), "");
        assert_eq!(NodePath::parse("/World").unwrap().leaf(), "World");
        assert_eq!(
            NodePath::parse("/World/rover/imu_center").unwrap().leaf(),
            "imu_center"
        );
    }
}

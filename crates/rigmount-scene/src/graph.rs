//! Scene-graph contract - The narrow surface Rigmount needs from a host
//!
//! The host environment owns the scene graph. Placement only ever defines
//! prims, sets attributes, and reads back translations, so that is the
//! whole contract. `MemoryScene` implements it for tests and the demo
//! driver; adapters to real hosts implement it against the host API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rigmount_core::Vec3;

use crate::path::NodePath;

/// Attribute carrying a node's translation
pub const ATTR_TRANSLATE: &str = "xformOp:translate";

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid node path: {0}")]
    InvalidPath(String),
    #[error("Node kind conflict at {path}: existing {existing:?}, requested {requested:?}")]
    KindConflict {
        path: String,
        existing: PrimKind,
        requested: PrimKind,
    },
    #[error("No node at {0}")]
    NotFound(String),
}

/// Kinds of prim the synthesizer defines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimKind {
    Xform,
    Cylinder,
    Cube,
    Sphere,
    Camera,
}

/// Attribute values settable on scene nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Scalar(f64),
    Vector([f64; 3]),
}

impl AttrValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            AttrValue::Scalar(v) => Some(*v),
            AttrValue::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<[f64; 3]> {
        match self {
            AttrValue::Scalar(_) => None,
            AttrValue::Vector(v) => Some(*v),
        }
    }
}

impl From<Vec3> for AttrValue {
    fn from(v: Vec3) -> Self {
        AttrValue::Vector(v.to_array())
    }
}

/// Mutable scene-graph surface used by the synthesizer
pub trait SceneGraph {
    /// Create-or-fetch a prim of `kind` at `path`
    ///
    /// Defining an existing node of the same kind succeeds and leaves its
    /// attributes untouched. Missing ancestors are created as transform
    /// nodes.
    fn define(&mut self, kind: PrimKind, path: &NodePath) -> Result<(), SceneError>;

    /// Set an attribute on the node at `path`
    fn set_attr(&mut self, path: &NodePath, name: &str, value: AttrValue)
        -> Result<(), SceneError>;

    /// Translation of the node at `path`, if the node exists and carries a
    /// translate op
    fn translation(&self, path: &NodePath) -> Option<Vec3>;

    /// Whether a node exists at `path`
    fn contains(&self, path: &NodePath) -> bool;
}

//! In-memory scene graph - Host stand-in for tests and the demo driver

use std::collections::{BTreeMap, HashMap};

use rigmount_core::Vec3;

use crate::graph::{AttrValue, PrimKind, SceneError, SceneGraph, ATTR_TRANSLATE};
use crate::path::NodePath;

#[derive(Debug, Clone)]
struct Node {
    kind: PrimKind,
    attrs: BTreeMap<String, AttrValue>,
}

/// Scene graph held entirely in memory, in creation order
///
/// The implicit root "/" always exists and cannot be defined or given
/// attributes. Nodes are never removed; placement only ever adds.
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    nodes: HashMap<String, Node>,
    order: Vec<String>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prim kind of the node at `path`
    pub fn kind_at(&self, path: &NodePath) -> Option<PrimKind> {
        self.nodes.get(path.as_str()).map(|n| n.kind)
    }

    /// Attribute value on the node at `path`
    pub fn attr(&self, path: &NodePath, name: &str) -> Option<AttrValue> {
        self.nodes
            .get(path.as_str())
            .and_then(|n| n.attrs.get(name).copied())
    }

    /// Direct children of `path`, in creation order
    pub fn children(&self, path: &NodePath) -> Vec<NodePath> {
        self.order
            .iter()
            .filter(|candidate| is_child_of(candidate, path))
            .map(|candidate| NodePath::from_canonical(candidate.clone()))
            .collect()
    }

    /// All nodes with their kinds, in creation order
    pub fn nodes(&self) -> impl Iterator<Item = (&str, PrimKind)> {
        self.order
            .iter()
            .filter_map(|path| self.nodes.get(path).map(|n| (path.as_str(), n.kind)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, kind: PrimKind, path: &NodePath) {
        self.nodes.insert(
            path.as_str().to_string(),
            Node {
                kind,
                attrs: BTreeMap::new(),
            },
        );
        self.order.push(path.as_str().to_string());
    }

    /// Create missing ancestors as transform nodes, root-most first
    fn ensure_ancestors(&mut self, path: &NodePath) {
        let mut missing = Vec::new();
        let mut current = path.clone();
        while !current.is_root() && !self.nodes.contains_key(current.as_str()) {
            missing.push(current.clone());
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        for ancestor in missing.into_iter().rev() {
            self.insert(PrimKind::Xform, &ancestor);
        }
    }
}

impl SceneGraph for MemoryScene {
    fn define(&mut self, kind: PrimKind, path: &NodePath) -> Result<(), SceneError> {
        if path.is_root() {
            return Err(SceneError::InvalidPath("/".to_string()));
        }
        if let Some(parent) = path.parent() {
            self.ensure_ancestors(&parent);
        }
        match self.nodes.get(path.as_str()) {
            Some(node) if node.kind == kind => Ok(()),
            Some(node) => Err(SceneError::KindConflict {
                path: path.as_str().to_string(),
                existing: node.kind,
                requested: kind,
            }),
            None => {
                self.insert(kind, path);
                Ok(())
            }
        }
    }

    fn set_attr(
        &mut self,
        path: &NodePath,
        name: &str,
        value: AttrValue,
    ) -> Result<(), SceneError> {
        let node = self
            .nodes
            .get_mut(path.as_str())
            .ok_or_else(|| SceneError::NotFound(path.as_str().to_string()))?;
        node.attrs.insert(name.to_string(), value);
        Ok(())
    }

    fn translation(&self, path: &NodePath) -> Option<Vec3> {
        self.attr(path, ATTR_TRANSLATE)
            .and_then(|v| v.as_vector())
            .map(Vec3::from)
    }

    fn contains(&self, path: &NodePath) -> bool {
        path.is_root() || self.nodes.contains_key(path.as_str())
    }
}

fn is_child_of(candidate: &str, parent: &NodePath) -> bool {
    let rest = if parent.is_root() {
        candidate.strip_prefix('/')
    } else {
        candidate
            .strip_prefix(parent.as_str())
            .and_then(|r| r.strip_prefix('/'))
    };
    matches!(rest, Some(r) if !r.is_empty() && !r.contains('/'))
}

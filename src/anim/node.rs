//! Flat node hierarchy.
//!
//! Nodes live in one `Vec` and point at their parent by index. Every parent
//! index is smaller than the child's own index, so a single front-to-back
//! pass visits parents before children.

use std::collections::HashSet;

use crate::util::{Error, Mat4, Result};

/// One node of the scene hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeData {
    /// Unique within its hierarchy; animation channels match on it.
    pub name: String,
    /// Local-to-parent bind pose.
    pub original_transform: Mat4,
    /// `None` for roots.
    pub parent: Option<usize>,
    /// World transform from the most recent sample call.
    pub world_transform: Mat4,
}

impl NodeData {
    /// Create a node with its world transform reset to identity.
    pub fn new(name: impl Into<String>, original_transform: Mat4, parent: Option<usize>) -> Self {
        Self {
            name: name.into(),
            original_transform,
            parent,
            world_transform: Mat4::IDENTITY,
        }
    }

    /// Parent index in the `-1` for root convention.
    pub fn parent_index(&self) -> i64 {
        self.parent.map_or(-1, |p| p as i64)
    }
}

/// Node arena ordered parents first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeHierarchy {
    nodes: Vec<NodeData>,
    names: HashSet<String>,
}

impl NodeHierarchy {
    /// Create an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its index.
    ///
    /// The parent must already be present and the name must be new.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        original_transform: Mat4,
        parent: Option<usize>,
    ) -> Result<usize> {
        self.push_node(NodeData::new(name, original_transform, parent))
    }

    fn push_node(&mut self, node: NodeData) -> Result<usize> {
        let index = self.nodes.len();
        if let Some(parent) = node.parent {
            if parent >= index {
                return Err(Error::InvalidHierarchy(format!(
                    "node '{}' at {} has parent {} which is not before it",
                    node.name, index, parent
                )));
            }
        }
        if !self.names.insert(node.name.clone()) {
            return Err(Error::InvalidHierarchy(format!(
                "duplicate node name '{}'",
                node.name
            )));
        }

        self.nodes.push(node);
        Ok(index)
    }

    /// Build from a flat list, checking ordering and unique names.
    pub fn from_nodes(nodes: impl IntoIterator<Item = NodeData>) -> Result<Self> {
        let mut hierarchy = Self::new();
        for node in nodes {
            hierarchy.push_node(node)?;
        }
        Ok(hierarchy)
    }

    /// Build from `-1`-for-root parent indices.
    pub fn from_parent_indices<'a>(
        nodes: impl IntoIterator<Item = (&'a str, Mat4, i64)>,
    ) -> Result<Self> {
        let mut hierarchy = Self::new();
        for (name, transform, parent) in nodes {
            let parent = match parent {
                -1 => None,
                p if p >= 0 => Some(p as usize),
                p => {
                    return Err(Error::InvalidHierarchy(format!(
                        "node '{}' has invalid parent index {}",
                        name, p
                    )))
                }
            };
            hierarchy.push(name, transform, parent)?;
        }
        Ok(hierarchy)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node.
    pub fn get(&self, index: usize) -> Option<&NodeData> {
        self.nodes.get(index)
    }

    /// Index of the node called `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        if !self.names.contains(name) {
            return None;
        }
        self.nodes.iter().position(|n| n.name == name)
    }

    /// Nodes in parent-first order.
    pub fn nodes(&self) -> &[NodeData] {
        &self.nodes
    }

    /// World transform of node `index` from the last sample.
    pub fn world_transform(&self, index: usize) -> Option<Mat4> {
        self.nodes.get(index).map(|n| n.world_transform)
    }

    /// Recompute every world transform, using `local(index, node)` for
    /// each node's local transform.
    ///
    /// Roots use the identity as their parent transform.
    pub fn update_world<F>(&mut self, mut local: F)
    where
        F: FnMut(usize, &NodeData) -> Mat4,
    {
        for i in 0..self.nodes.len() {
            let local_transform = local(i, &self.nodes[i]);
            let parent_world = match self.nodes[i].parent {
                Some(p) => self.nodes[p].world_transform,
                None => Mat4::IDENTITY,
            };
            self.nodes[i].world_transform = parent_world * local_transform;
        }
    }

    /// Recompute world transforms from the bind pose alone.
    pub fn update_bind_pose(&mut self) {
        self.update_world(|_, node| node.original_transform);
    }
}
